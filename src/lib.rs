//! This crate provides the client side of a to-do task service.
//!
//! It provides a REST client for the task service in the [`client`] module, that can be used as a stand-alone module.
//!
//! Fetched tasks can be laid out on a month calendar (see [`calendar::grid`]), and summarized by the charts of the [`dashboard`].
//! Every displayed task should also have an entry in the calendar of its user. This is taken care of in the background by the [`reconcile`] module.
//!
//! A [`TaskBoard`] glues all of these together, the way a page would.

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

pub mod traits;

pub mod task;
pub use task::{Priority, Status, Task, TaskDraft, TaskFilter, TaskId};
pub mod calendar;
pub use calendar::YearMonth;
pub use calendar::grid::{DayCell, MonthGrid};
pub use calendar::entry::{CalendarEntry, UserId};
pub mod chart;
pub mod dashboard;
pub use dashboard::{Charts, Dashboard};
pub mod reconcile;

pub mod client;
pub use client::Client;
pub mod session;
pub use session::Session;
pub mod board;
pub use board::TaskBoard;

pub mod config;
pub mod utils;

pub mod mock_behaviour;
pub mod mock;
