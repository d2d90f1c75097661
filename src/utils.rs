//! Some utility functions, mostly to debug what a page would show

use crate::calendar::WEEKDAY_NAMES;
use crate::calendar::grid::{DayCell, MonthGrid};
use crate::chart::line::format_deadline;
use crate::chart::pie::{CompletionCounts, PieGeometry};
use crate::task::{Priority, Task, TaskFilter};

const CELL_WIDTH: usize = 6;

/// Render a month grid as text: a title, a weekday header, then one line per week.
///
/// Days that have tasks are followed by the number of tasks (e.g. `11*2`).
pub fn format_month_grid(grid: &MonthGrid) -> String {
    let mut out = format!("{}\n", grid.month());
    for name in WEEKDAY_NAMES.iter() {
        out.push_str(&format!("{:>width$}", name, width = CELL_WIDTH));
    }
    out.push('\n');

    for week in grid.weeks() {
        for cell in week {
            let text = match cell {
                DayCell::Blank => String::new(),
                DayCell::Active { day, tasks, .. } if tasks.is_empty() => day.to_string(),
                DayCell::Active { day, tasks, .. } => format!("{}*{}", day, tasks.len()),
            };
            out.push_str(&format!("{:>width$}", text, width = CELL_WIDTH));
        }
        out.push('\n');
    }
    out
}

/// A debug utility that pretty-prints a month grid, and the tasks of each day
pub fn print_month_grid(grid: &MonthGrid) {
    print!("{}", format_month_grid(grid));
    for cell in grid.active_cells() {
        if let DayCell::Active { date, tasks, .. } = cell {
            for task in tasks {
                println!("  {}  {}", format_deadline(*date), task.title());
            }
        }
    }
}

pub fn print_task(task: &Task) {
    let completion = if task.completed() { "✓" } else { " " };
    let priority = match task.priority() {
        Priority::High => "!!!",
        Priority::Medium => "!! ",
        Priority::Low => "!  ",
    };
    let due = task.due_date().map(format_deadline).unwrap_or_else(|| "-".to_string());
    println!("    {} {} {}\t{}\t{}", completion, priority, task.title(), due, task.id());
}

pub fn print_task_list(tasks: &[Task], filter: TaskFilter) {
    for task in filter.apply(tasks) {
        print_task(task);
    }
}

/// A debug utility that prints what the dashboard charts would show
pub fn print_chart_summary(tasks: &[Task]) {
    match PieGeometry::new(CompletionCounts::from_tasks(tasks)) {
        None => println!("Completion: no tasks"),
        Some(pie) => println!("Completion: {}% completed, {}% incomplete", pie.completed_percent, pie.incomplete_percent),
    }

    let count = |p: Priority| TaskFilter::WithPriority(p).apply(tasks).len();
    println!("Priorities: {} high, {} medium, {} low", count(Priority::High), count(Priority::Medium), count(Priority::Low));

    let deadlines: Vec<String> = tasks.iter().filter_map(|t| t.due_date()).map(format_deadline).collect();
    println!("Deadlines: {}", deadlines.join(", "));
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::YearMonth;
    use crate::calendar::grid::build_month_grid;
    use crate::task::{Status, TaskId};

    #[test]
    fn text_grid() {
        let tasks = vec![
            Task::new_with_parameters(TaskId::from(1), "a".into(), "".into(), Some("2024-10-11".into()), Priority::Low, Status::Incomplete),
            Task::new_with_parameters(TaskId::from(2), "b".into(), "".into(), Some("2024-10-11".into()), Priority::Low, Status::Incomplete),
        ];
        let grid = build_month_grid(YearMonth::new(2024, 10).unwrap(), &tasks);
        let text = format_month_grid(&grid);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "October 2024");
        assert_eq!(lines[1], "   Sun   Mon   Tue   Wed   Thu   Fri   Sat");
        // October 1st, 2024 is a Tuesday
        assert_eq!(lines[2], "                 1     2     3     4     5");
        assert!(lines[3].ends_with("  11*2    12"));
        assert_eq!(lines.len(), 2 + 5);
    }
}
