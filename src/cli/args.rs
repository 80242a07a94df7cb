//! Command-line argument definitions using clap

use clap::Parser;
use std::path::PathBuf;

use crate::pipeline::{
    resolve_highlight, DashboardControls, DashboardSession, ALL_OPTION, DEFAULT_AGE_BINS,
    NO_HIGHLIGHT_OPTION,
};

/// paxsat - Explore airline passenger satisfaction by age, class and travel type
#[derive(Parser, Debug)]
#[command(name = "paxsat")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Input survey file path (CSV or Parquet)
    #[arg(short, long)]
    pub input: PathBuf,

    /// Lower bound of the age filter (inclusive). Defaults to the youngest passenger.
    #[arg(long)]
    pub age_min: Option<u32>,

    /// Upper bound of the age filter (inclusive). Defaults to the oldest passenger.
    #[arg(long)]
    pub age_max: Option<u32>,

    /// Flight class filter, or "All"
    #[arg(short, long, default_value = ALL_OPTION)]
    pub class: String,

    /// Travel type filter, or "All"
    #[arg(short, long, default_value = ALL_OPTION)]
    pub travel_type: String,

    /// Service feature to highlight in the correlation view, or "None"
    #[arg(long, default_value = NO_HIGHLIGHT_OPTION)]
    pub highlight: String,

    /// Number of equal-width age buckets in the histogram
    #[arg(long, default_value_t = DEFAULT_AGE_BINS, value_parser = validate_bins)]
    pub bins: usize,

    /// Print a one-shot report instead of starting the interactive dashboard
    #[arg(long, default_value = "false")]
    pub no_interactive: bool,

    /// Write the final dashboard snapshot as JSON to this path
    #[arg(long)]
    pub json: Option<PathBuf>,

    /// Write debug logs as JSON lines to this file
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Number of rows to use for schema inference (CSV only).
    /// Use 0 for full table scan (very slow for large files).
    #[arg(long, default_value = "10000")]
    pub infer_schema_length: usize,
}

impl Cli {
    /// Apply the initial selections to a session, validating each against
    /// the dashboard controls.
    pub fn apply_selections(&self, session: &mut DashboardSession<'_>) -> anyhow::Result<()> {
        let controls = session.controls().clone();
        let (age_min, age_max) = self.age_range(&controls);
        ensure_age("age-min", age_min, controls.age_bounds)?;
        ensure_age("age-max", age_max, controls.age_bounds)?;
        session.set_age_range(age_min, age_max)?;

        ensure_option("class", &self.class, &controls.class_options)?;
        session.set_class(&self.class);

        ensure_option("travel type", &self.travel_type, &controls.travel_type_options)?;
        session.set_travel_type(&self.travel_type);

        if self.highlight != NO_HIGHLIGHT_OPTION && resolve_highlight(&self.highlight).is_none() {
            anyhow::bail!(
                "Unknown highlight feature '{}'. Available: {}",
                self.highlight,
                controls.highlight_options.join(", ")
            );
        }
        session.set_highlight(&self.highlight);

        Ok(())
    }

    /// Requested age range, with missing bounds taken from the dataset.
    pub fn age_range(&self, controls: &DashboardControls) -> (u32, u32) {
        let (min, max) = controls.age_bounds;
        (self.age_min.unwrap_or(min), self.age_max.unwrap_or(max))
    }
}

fn ensure_option(name: &str, value: &str, options: &[String]) -> anyhow::Result<()> {
    if options.iter().any(|o| o == value) {
        Ok(())
    } else {
        anyhow::bail!(
            "Unknown {} '{}'. Available: {}",
            name,
            value,
            options.join(", ")
        )
    }
}

fn ensure_age(name: &str, value: u32, (min, max): (u32, u32)) -> anyhow::Result<()> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        anyhow::bail!(
            "Age {} '{}' is outside the dataset range {}-{}",
            name,
            value,
            min,
            max
        )
    }
}

/// Validator for the bins parameter
fn validate_bins(s: &str) -> Result<usize, String> {
    let value: usize = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", s))?;

    if value == 0 {
        Err("bins must be at least 1".to_string())
    } else {
        Ok(value)
    }
}
