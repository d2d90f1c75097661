//! Lays out a month as a sequence of day cells

use chrono::{Datelike, NaiveDate};

use crate::calendar::YearMonth;
use crate::task::Task;

/// One cell of the month grid
#[derive(Clone, Debug, PartialEq)]
pub enum DayCell<'a> {
    /// A cell that belongs to the previous or the next month. It never carries tasks
    Blank,
    /// A day of the displayed month, with the tasks that are due that day (in fetch order)
    Active {
        date: NaiveDate,
        day: u32,
        tasks: Vec<&'a Task>,
    },
}

impl<'a> DayCell<'a> {
    pub fn is_blank(&self) -> bool {
        matches!(self, DayCell::Blank)
    }

    /// The day of month, or `None` for a blank cell
    pub fn day(&self) -> Option<u32> {
        match self {
            DayCell::Blank => None,
            DayCell::Active { day, .. } => Some(*day),
        }
    }

    pub fn tasks(&self) -> &[&'a Task] {
        match self {
            DayCell::Blank => &[],
            DayCell::Active { tasks, .. } => tasks,
        }
    }
}


/// The cells of a displayed month: `first_weekday` leading blank cells, then one active cell per day
#[derive(Clone, Debug, PartialEq)]
pub struct MonthGrid<'a> {
    month: YearMonth,
    cells: Vec<DayCell<'a>>,
}

impl<'a> MonthGrid<'a> {
    pub fn month(&self) -> YearMonth { self.month }
    pub fn cells(&self) -> &[DayCell<'a>] { &self.cells }

    /// Number of blank cells before the first day
    pub fn leading_blanks(&self) -> usize {
        self.cells.iter().take_while(|c| c.is_blank()).count()
    }

    pub fn active_cells(&self) -> impl Iterator<Item = &DayCell<'a>> {
        self.cells.iter().filter(|c| c.is_blank() == false)
    }

    /// Returns the cell of a given date, if it belongs to this month
    pub fn cell_for(&self, date: NaiveDate) -> Option<&DayCell<'a>> {
        if self.month.contains(date) == false {
            return None;
        }
        self.active_cells().find(|c| matches!(c, DayCell::Active { date: d, .. } if *d == date))
    }

    /// Add trailing blank cells, so that the last week is complete
    pub fn padded(mut self) -> Self {
        while self.cells.len() % 7 != 0 {
            self.cells.push(DayCell::Blank);
        }
        self
    }

    /// Rows of (at most) 7 cells, Sunday first
    pub fn weeks(&self) -> std::slice::Chunks<'_, DayCell<'a>> {
        self.cells.chunks(7)
    }
}


/// Build the grid of `month`, and attach every task to the day it is due.
///
/// Tasks are compared by calendar day only. Tasks without a (valid) due date are not shown.
pub fn build_month_grid(month: YearMonth, tasks: &[Task]) -> MonthGrid<'_> {
    let blanks = month.first_weekday() as usize;
    let n_days = month.days_in_month();

    let mut cells = Vec::with_capacity(blanks + n_days as usize);
    cells.extend(std::iter::repeat_with(|| DayCell::Blank).take(blanks));
    for day in 1..=n_days {
        let date = match month.day(day) {
            Some(date) => date,
            None => {
                log::error!("Inconsistent calendar: {} has no day {}", month, day);
                break;
            },
        };
        cells.push(DayCell::Active { date, day, tasks: Vec::new() });
    }

    for task in tasks {
        let due = match task.due_date() {
            None => {
                log::debug!("Task {} has no valid due date, it will not be on the calendar", task.id());
                continue;
            },
            Some(due) => due,
        };
        if month.contains(due) == false {
            continue;
        }

        let index = blanks + due.day() as usize - 1;
        if let Some(DayCell::Active { tasks, .. }) = cells.get_mut(index) {
            tasks.push(task);
        }
    }

    MonthGrid { month, cells }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::{Priority, Status, TaskId};

    fn task(id: u64, due: &str) -> Task {
        Task::new_with_parameters(TaskId::from(id), format!("Task {}", id), String::new(),
                                  Some(due.to_string()), Priority::Low, Status::Incomplete)
    }

    fn ids(cell: &DayCell) -> Vec<u64> {
        cell.tasks().iter().map(|t| t.id().as_u64()).collect()
    }

    #[test]
    fn cell_counts_for_every_month() {
        for year in [1900, 1999, 2000, 2023, 2024, 2100].iter() {
            for month in 1..=12 {
                let ym = YearMonth::new(*year, month).unwrap();
                let grid = build_month_grid(ym, &[]);
                assert_eq!(grid.leading_blanks(), ym.first_weekday() as usize);
                let days: Vec<u32> = grid.active_cells().filter_map(|c| c.day()).collect();
                let expected: Vec<u32> = (1..=ym.days_in_month()).collect();
                assert_eq!(days, expected);
                assert_eq!(grid.cells().len(), ym.first_weekday() as usize + ym.days_in_month() as usize);
            }
        }
    }

    #[test]
    fn tasks_land_on_their_day_only() {
        let tasks = vec![
            task(1, "2024-10-11"),
            task(2, "2024-10-11T23:59:00Z"),
            task(3, "2024-10-12T00:00:01+05:00"),
            task(4, "2024-11-11"),
            task(5, "2023-10-11"),
            task(6, "not a date"),
            task(7, ""),
        ];
        let grid = build_month_grid(YearMonth::new(2024, 10).unwrap(), &tasks);

        let d11 = NaiveDate::from_ymd_opt(2024, 10, 11).unwrap();
        let d12 = NaiveDate::from_ymd_opt(2024, 10, 12).unwrap();
        assert_eq!(ids(grid.cell_for(d11).unwrap()), vec![1, 2]);
        assert_eq!(ids(grid.cell_for(d12).unwrap()), vec![3]);

        let placed: usize = grid.cells().iter().map(|c| c.tasks().len()).sum();
        assert_eq!(placed, 3);
        assert!(grid.cells().iter().filter(|c| c.is_blank()).all(|c| c.tasks().is_empty()));
    }

    #[test]
    fn first_and_last_days() {
        let tasks = vec![task(1, "2024-02-01"), task(2, "2024-02-29")];
        let grid = build_month_grid(YearMonth::new(2024, 2).unwrap(), &tasks);
        // February 1st, 2024 is a Thursday
        assert_eq!(grid.leading_blanks(), 4);
        assert_eq!(ids(&grid.cells()[4]), vec![1]);
        assert_eq!(ids(grid.cells().last().unwrap()), vec![2]);
    }

    #[test]
    fn padding_completes_weeks() {
        let grid = build_month_grid(YearMonth::new(2024, 10).unwrap(), &[]).padded();
        assert_eq!(grid.cells().len() % 7, 0);
        assert_eq!(grid.cells().len(), 35);
        assert!(grid.weeks().all(|w| w.len() == 7));
        assert_eq!(grid.active_cells().count(), 31);
    }
}
