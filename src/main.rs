//! paxsat: Passenger Satisfaction Explorer CLI
//!
//! Loads a survey file once, then either runs the interactive terminal
//! dashboard or prints a one-shot report for the selected filters.

use anyhow::{Context, Result};
use clap::Parser;

use paxsat::cli::{run_dashboard, Cli};
use paxsat::pipeline::{DashboardSession, DatasetCache, LoadOptions};
use paxsat::report::{export_snapshot, render_report, ExportParams};
use paxsat::utils::{
    create_spinner, finish_with_failure, finish_with_success, init_logging, print_banner,
    print_dataset_card, print_success,
};

/// Loaded once per process and read-only afterwards.
static DATASET: DatasetCache = DatasetCache::new();

fn main() -> Result<()> {
    let cli = Cli::parse();

    // The TUI owns the terminal, so stderr logging is only on for reports
    let _log_guard = init_logging(cli.log_file.as_deref(), cli.no_interactive)?;

    print_banner(env!("CARGO_PKG_VERSION"));

    let spinner = create_spinner("Loading dataset...");
    let options = LoadOptions {
        infer_schema_length: cli.infer_schema_length,
    };
    let loaded = match DATASET.get_or_load(&cli.input, &options) {
        Ok(loaded) => {
            finish_with_success(&spinner, "Dataset loaded");
            loaded
        }
        Err(err) => {
            finish_with_failure(&spinner);
            return Err(err)
                .with_context(|| format!("Failed to load dataset: {}", cli.input.display()));
        }
    };
    print_dataset_card(&cli.input, &loaded.stats);

    let mut session = DashboardSession::new(&loaded.dataset).with_bins(cli.bins);
    cli.apply_selections(&mut session)?;

    let snapshot = if cli.no_interactive {
        let snapshot = session.snapshot();
        print!("{}", render_report(&snapshot));
        snapshot
    } else {
        run_dashboard(session)?
    };

    if let Some(path) = &cli.json {
        let input_file = cli.input.display().to_string();
        let params = ExportParams {
            input_file: &input_file,
            bins: cli.bins,
            load_stats: &loaded.stats,
        };
        export_snapshot(&snapshot, path, &params)?;
        print_success(&format!("Snapshot written to {}", path.display()));
    }

    Ok(())
}
