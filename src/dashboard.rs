//! The dashboard: three charts, each on its own surface

use bitflags::bitflags;

use crate::chart::{DrawList, Surface};
use crate::chart::{bar, line, pie};
use crate::task::Task;

bitflags! {
    /// Which charts should be redrawn
    pub struct Charts: u8 {
        /// Completed vs. incomplete tasks
        const COMPLETION = 1;
        /// Task priorities
        const PRIORITIES = 2;
        /// Task deadlines
        const DEADLINES = 4;
    }
}

/// The three surfaces of the dashboard
pub struct Dashboard<S: Surface> {
    pub completion: S,
    pub priorities: S,
    pub deadlines: S,
}

impl<S: Surface> Dashboard<S> {
    pub fn new(completion: S, priorities: S, deadlines: S) -> Self {
        Self { completion, priorities, deadlines }
    }

    /// Redraw the selected charts from the current task list
    pub fn render(&mut self, tasks: &[Task], charts: Charts) {
        if charts.contains(Charts::COMPLETION) {
            pie::render_completion_pie(&mut self.completion, pie::CompletionCounts::from_tasks(tasks));
        }
        if charts.contains(Charts::PRIORITIES) {
            bar::render_priority_bars(&mut self.priorities, tasks);
        }
        if charts.contains(Charts::DEADLINES) {
            line::render_deadlines(&mut self.deadlines, tasks);
        }
    }

    /// Redraw every chart
    pub fn render_all(&mut self, tasks: &[Task]) {
        self.render(tasks, Charts::all());
    }
}

impl Dashboard<DrawList> {
    /// A dashboard that records drawing calls, on surfaces of the default sizes
    pub fn recording() -> Self {
        Self::new(
            DrawList::new(pie::SURFACE_SIZE.0, pie::SURFACE_SIZE.1),
            DrawList::new(bar::SURFACE_SIZE.0, bar::SURFACE_SIZE.1),
            DrawList::new(line::SURFACE_SIZE.0, line::SURFACE_SIZE.1),
        )
    }
}
