//! Prints the tasks of a user on a month calendar, with a summary of the dashboard charts.
//!
//! Usage: `pinboard-month [YYYY-MM]`. The session is read from the file `$PINBOARD_SESSION` (defaults to `session.json`).

use std::path::PathBuf;

use pinboard::{Session, TaskBoard, TaskFilter, YearMonth};

const DEFAULT_SESSION_FILE: &str = "session.json";

#[tokio::main]
async fn main() {
    env_logger::init();

    let session_path = std::env::var_os("PINBOARD_SESSION")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_SESSION_FILE));
    let session = match Session::from_file(&session_path) {
        Ok(session) => session,
        Err(err) => {
            log::error!("Invalid session file: {}", err);
            std::process::exit(1);
        }
    };

    let mut board = match TaskBoard::from_session(&session) {
        Ok(board) => board,
        Err(err) => {
            log::error!("Unable to create a client: {}", err);
            std::process::exit(1);
        }
    };

    if let Some(arg) = std::env::args().nth(1) {
        match YearMonth::parse(&arg) {
            Some(month) => board.set_month(month),
            None => {
                eprintln!("Expected a month as YYYY-MM, got {:?}", arg);
                std::process::exit(2);
            }
        }
    }

    if board.refresh().await == false {
        eprintln!("Unable to fetch the tasks of user {}. Set RUST_LOG=debug for more info.", session.user_id());
    }

    pinboard::utils::print_month_grid(&board.month_grid());
    println!();
    println!("---- all tasks -----");
    pinboard::utils::print_task_list(board.tasks(), TaskFilter::All);
    println!();
    pinboard::utils::print_chart_summary(board.tasks());

    // Give the background reconciliation a chance to finish before the runtime shuts down
    if let Some(handle) = board.take_pending_reconciliation() {
        match handle.await {
            Ok(report) if report.is_success() => log::info!("{} calendar entries created", report.created.len()),
            Ok(report) => log::warn!("{} calendar entries could not be checked", report.failed.len()),
            Err(err) => log::error!("Reconciliation did not complete: {}", err),
        }
    }
}
