//! Completed vs. incomplete tasks

use std::f64::consts::PI;

use crate::chart::{Point, Surface, PALETTE};
use crate::task::Task;

/// Size of the surface the pie is designed for
pub const SURFACE_SIZE: (f64, f64) = (200., 150.);
const CENTER: Point = Point { x: 100., y: 75. };
const RADIUS: f64 = 75.;
const FONT_PX: f64 = 16.;

/// How many tasks are completed and how many are not
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CompletionCounts {
    pub completed: usize,
    pub incomplete: usize,
}

impl CompletionCounts {
    /// Count the tasks. Tasks with an unknown status are counted in neither group
    pub fn from_tasks(tasks: &[Task]) -> Self {
        tasks.iter().fold(Self::default(), |mut counts, task| {
            if task.status().is_complete() {
                counts.completed += 1;
            } else if task.status().is_incomplete() {
                counts.incomplete += 1;
            }
            counts
        })
    }

    pub fn total(&self) -> usize {
        self.completed + self.incomplete
    }
}


/// The two slices of the pie
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PieGeometry {
    /// The completed slice spans `0..completed_angle`, the incomplete one `completed_angle..2π`
    pub completed_angle: f64,
    pub completed_percent: u32,
    pub incomplete_percent: u32,
}

impl PieGeometry {
    /// Returns `None` when there is nothing to split
    pub fn new(counts: CompletionCounts) -> Option<Self> {
        let total = counts.total();
        if total == 0 {
            return None;
        }
        let total = total as f64;
        let completed_share = counts.completed as f64 / total;
        let incomplete_share = counts.incomplete as f64 / total;

        Some(Self {
            completed_angle: completed_share * 2. * PI,
            completed_percent: (completed_share * 100.).round() as u32,
            incomplete_percent: (incomplete_share * 100.).round() as u32,
        })
    }
}


/// Draw the pie of completed vs. incomplete tasks.
///
/// Nothing but the clearing is drawn when there are no tasks.
pub fn render_completion_pie<S: Surface + ?Sized>(surface: &mut S, counts: CompletionCounts) {
    surface.clear();

    let geometry = match PieGeometry::new(counts) {
        None => {
            log::debug!("No task to draw in the completion pie");
            return;
        },
        Some(g) => g,
    };

    surface.fill_wedge(CENTER, RADIUS, 0., geometry.completed_angle, PALETTE.complete);
    surface.fill_wedge(CENTER, RADIUS, geometry.completed_angle, 2. * PI, PALETTE.incomplete);

    surface.fill_text(&format!("Completed: {}%", geometry.completed_percent),
                      Point::new(CENTER.x, CENTER.y - 5.), FONT_PX, PALETTE.text);
    surface.fill_text(&format!("Incomplete: {}%", geometry.incomplete_percent),
                      Point::new(CENTER.x, CENTER.y + 15.), FONT_PX, PALETTE.text);
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::{DrawList, DrawOp};

    fn counts(completed: usize, incomplete: usize) -> CompletionCounts {
        CompletionCounts { completed, incomplete }
    }

    #[test]
    fn three_quarters() {
        let g = PieGeometry::new(counts(3, 1)).unwrap();
        assert!((g.completed_angle - 1.5 * PI).abs() < 1e-12);
        assert!((g.completed_angle.to_degrees() - 270.).abs() < 1e-9);
        assert_eq!(g.completed_percent, 75);
        assert_eq!(g.incomplete_percent, 25);

        let mut surface = DrawList::new(SURFACE_SIZE.0, SURFACE_SIZE.1);
        render_completion_pie(&mut surface, counts(3, 1));
        let wedges: Vec<_> = surface.wedges().collect();
        assert_eq!(wedges.len(), 2);
        match wedges[0] {
            DrawOp::Wedge { start_angle, end_angle, color, .. } => {
                assert_eq!(*start_angle, 0.);
                assert!((end_angle - 1.5 * PI).abs() < 1e-12);
                assert_eq!(*color, PALETTE.complete);
            },
            _ => panic!("not a wedge"),
        }
        match wedges[1] {
            DrawOp::Wedge { start_angle, end_angle, .. } => {
                assert!((start_angle - 1.5 * PI).abs() < 1e-12);
                assert!((end_angle - 2. * PI).abs() < 1e-12);
            },
            _ => panic!("not a wedge"),
        }
        let texts: Vec<_> = surface.texts().collect();
        assert_eq!(texts, vec!["Completed: 75%", "Incomplete: 25%"]);
    }

    #[test]
    fn no_tasks_no_wedge() {
        assert_eq!(PieGeometry::new(counts(0, 0)), None);

        let mut surface = DrawList::new(SURFACE_SIZE.0, SURFACE_SIZE.1);
        render_completion_pie(&mut surface, counts(0, 0));
        assert_eq!(surface.ops(), &[DrawOp::Clear]);
    }

    #[test]
    fn rounded_percentages() {
        let g = PieGeometry::new(counts(1, 2)).unwrap();
        assert_eq!(g.completed_percent, 33);
        assert_eq!(g.incomplete_percent, 67);

        let g = PieGeometry::new(counts(0, 5)).unwrap();
        assert_eq!(g.completed_angle, 0.);
        assert_eq!(g.incomplete_percent, 100);
    }

    #[test]
    fn drawing_twice_is_idempotent() {
        let mut surface = DrawList::new(SURFACE_SIZE.0, SURFACE_SIZE.1);
        render_completion_pie(&mut surface, counts(2, 5));
        let first = surface.clone();
        render_completion_pie(&mut surface, counts(2, 5));
        assert_eq!(first, surface);
    }
}
