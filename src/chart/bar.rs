//! One bar per task, sized and colored by priority

use crate::chart::{Point, Rect, Rgba, Surface, PALETTE};
use crate::task::{Priority, Task};

/// Size of the surface the bar chart is designed for
pub const SURFACE_SIZE: (f64, f64) = (400., 200.);
pub const BAR_WIDTH: f64 = 40.;
pub const BAR_SPACING: f64 = 10.;
const FONT_PX: f64 = 14.;
const LABEL_OFFSET: f64 = 10.;

/// The more urgent the task, the taller (and the redder) its bar
pub fn bar_style(priority: Priority) -> (f64, Rgba) {
    match priority {
        Priority::High => (150., PALETTE.high_priority),
        Priority::Medium => (100., PALETTE.medium_priority),
        Priority::Low => (50., PALETTE.low_priority),
    }
}

/// The bar of a task
#[derive(Clone, Debug, PartialEq)]
pub struct Bar {
    pub rect: Rect,
    pub color: Rgba,
    pub label: String,
    pub label_anchor: Point,
}

/// Lay out one bar per task, in the order of `tasks`, standing on the bottom of a surface of height `surface_height`
pub fn layout_bars(tasks: &[Task], surface_height: f64) -> Vec<Bar> {
    tasks.iter()
        .enumerate()
        .map(|(index, task)| {
            let (height, color) = bar_style(task.priority());
            let x = index as f64 * (BAR_WIDTH + BAR_SPACING);
            let top = surface_height - height;
            Bar {
                rect: Rect { x, y: top, width: BAR_WIDTH, height },
                color,
                label: task.title().to_string(),
                label_anchor: Point::new(x + BAR_WIDTH / 2., top - LABEL_OFFSET),
            }
        })
        .collect()
}

/// Draw the priority of every task
pub fn render_priority_bars<S: Surface + ?Sized>(surface: &mut S, tasks: &[Task]) {
    surface.clear();

    for bar in layout_bars(tasks, surface.height()) {
        surface.fill_rect(bar.rect, bar.color);
        surface.fill_text(&bar.label, bar.label_anchor, FONT_PX, PALETTE.text);
    }
}
