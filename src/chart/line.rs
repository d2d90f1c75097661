//! Deadlines, as a polyline
//!
//! This is an illustrative chart, not a calibrated time axis: later deadlines are drawn higher, and that's it.

use chrono::{NaiveDate, TimeZone, Utc};

use crate::chart::{Point, Surface, PALETTE};
use crate::task::Task;

/// Size of the surface the line chart is designed for
pub const SURFACE_SIZE: (f64, f64) = (1000., 200.);
const LEFT_MARGIN: f64 = 50.;
/// Milliseconds per vertical pixel
const TIMESTAMP_DIVISOR: f64 = 1e11;
const FONT_PX: f64 = 12.;
const LABEL_OFFSET: f64 = 10.;

/// A point of the line, with its label
#[derive(Clone, Debug, PartialEq)]
pub struct DeadlinePoint {
    pub position: Point,
    pub label: String,
}

fn timestamp_millis(date: NaiveDate) -> Option<i64> {
    let midnight = date.and_hms_opt(0, 0, 0)?;
    Some(Utc.from_utc_datetime(&midnight).timestamp_millis())
}

/// `M/D/YYYY`
pub fn format_deadline(date: NaiveDate) -> String {
    date.format("%-m/%-d/%Y").to_string()
}

/// Place the deadline of every task that has one, in the order of `tasks`.
///
/// Points are evenly spread over the surface width. Tasks without a valid due date are skipped.
pub fn layout_deadlines(tasks: &[Task], surface_width: f64, surface_height: f64) -> Vec<DeadlinePoint> {
    let dated: Vec<NaiveDate> = tasks.iter()
        .filter_map(|task| {
            let due = task.due_date();
            if due.is_none() {
                log::debug!("Task {} has no valid due date, it is not drawn on the deadline chart", task.id());
            }
            due
        })
        .collect();
    if dated.is_empty() {
        return Vec::new();
    }

    let step = surface_width / dated.len() as f64;
    dated.into_iter()
        .enumerate()
        .filter_map(|(index, due)| {
            let millis = timestamp_millis(due)?;
            Some(DeadlinePoint {
                position: Point::new(
                    index as f64 * step + LEFT_MARGIN,
                    surface_height - millis as f64 / TIMESTAMP_DIVISOR,
                ),
                label: format_deadline(due),
            })
        })
        .collect()
}

/// Draw the deadlines of the tasks
pub fn render_deadlines<S: Surface + ?Sized>(surface: &mut S, tasks: &[Task]) {
    surface.clear();

    let points = layout_deadlines(tasks, surface.width(), surface.height());
    if points.is_empty() {
        return;
    }

    let positions: Vec<Point> = points.iter().map(|p| p.position).collect();
    surface.stroke_polyline(&positions, PALETTE.line);
    for point in &points {
        surface.fill_text(&point.label,
                          Point::new(point.position.x, point.position.y - LABEL_OFFSET),
                          FONT_PX, PALETTE.text);
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::{DrawList, DrawOp};
    use crate::task::{Priority, Status, TaskId};

    fn task(id: u64, due: Option<&str>) -> Task {
        Task::new_with_parameters(TaskId::from(id), format!("T{}", id), String::new(),
                                  due.map(String::from), Priority::Low, Status::Incomplete)
    }

    #[test]
    fn positions() {
        let tasks = vec![
            task(1, Some("2024-10-11")),
            task(2, Some("garbage")),
            task(3, Some("2024-10-12T18:00:00Z")),
            task(4, None),
        ];
        let points = layout_deadlines(&tasks, 1000., 200.);
        assert_eq!(points.len(), 2);

        assert_eq!(points[0].position.x, 50.);
        assert_eq!(points[1].position.x, 550.);

        // 2024-10-11T00:00:00Z is 1728604800000 ms after the epoch
        assert!((points[0].position.y - (200. - 17.286048)).abs() < 1e-9);
        // Later deadlines are higher on the surface
        assert!(points[1].position.y < points[0].position.y);

        assert_eq!(points[0].label, "10/11/2024");
        assert_eq!(points[1].label, "10/12/2024");
    }

    #[test]
    fn single_polyline() {
        let tasks = vec![task(1, Some("2024-01-05")), task(2, Some("2024-03-01")), task(3, Some("2023-12-31"))];
        let mut surface = DrawList::new(SURFACE_SIZE.0, SURFACE_SIZE.1);
        render_deadlines(&mut surface, &tasks);

        let polylines: Vec<_> = surface.ops().iter().filter(|op| matches!(op, DrawOp::Polyline { .. })).collect();
        assert_eq!(polylines.len(), 1);
        match polylines[0] {
            DrawOp::Polyline { points, color } => {
                assert_eq!(points.len(), 3);
                assert_eq!(*color, PALETTE.line);
            },
            _ => panic!("not a polyline"),
        }
        assert_eq!(surface.texts().count(), 3);
    }

    #[test]
    fn drawing_twice_is_idempotent() {
        let tasks = vec![task(1, Some("2024-10-11")), task(2, None), task(3, Some("2024-10-20T09:00:00Z"))];
        let mut surface = DrawList::new(SURFACE_SIZE.0, SURFACE_SIZE.1);
        render_deadlines(&mut surface, &tasks);
        let first = surface.clone();
        render_deadlines(&mut surface, &tasks);
        assert_eq!(first, surface);
        assert_eq!(surface.texts().count(), 2);
    }

    #[test]
    fn nothing_to_draw() {
        let mut surface = DrawList::new(SURFACE_SIZE.0, SURFACE_SIZE.1);
        render_deadlines(&mut surface, &[task(1, None)]);
        assert_eq!(surface.ops(), &[DrawOp::Clear]);
    }
}
