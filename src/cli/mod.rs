//! CLI module - argument parsing and the interactive dashboard

mod args;
pub mod dashboard;

pub use args::Cli;
pub use dashboard::{run_dashboard, DashboardAction, DashboardState};
