//! Terminal styling utilities for the one-shot report and startup output

use console::{style, Emoji};
use std::path::Path;

use crate::pipeline::LoadStats;

// Emoji icons with fallbacks for terminals that don't support them
pub static PLANE: Emoji<'_, '_> = Emoji("✈️  ", ">> ");
pub static FOLDER: Emoji<'_, '_> = Emoji("📂 ", "");
pub static CHART: Emoji<'_, '_> = Emoji("📊 ", "");

/// Print the application banner
pub fn print_banner(version: &str) {
    println!();
    println!("    {}{}", PLANE, style("paxsat").cyan().bold());
    println!("    {}", style("Passenger satisfaction explorer").dim());
    println!("    {}", style(format!("v{}", version)).dim());
    println!("    {}", style("━".repeat(50)).dim());
    println!();
}

/// Print the dataset card shown after loading
pub fn print_dataset_card(input: &Path, stats: &LoadStats) {
    println!("    {} Input:  {}", FOLDER, truncate_path(input, 48));
    println!("    {} Dataset Statistics:", CHART);
    println!("      {:<24}{}", "Raw rows:", stats.raw_rows);
    println!("      {:<24}{}", "Missing arrival delay:", stats.incomplete_rows);
    println!("      {:<24}{}", "Duplicates removed:", stats.duplicate_rows);
    if stats.skipped_rows > 0 {
        println!(
            "      {:<24}{}",
            "Unusable rows:",
            style(stats.skipped_rows).yellow()
        );
    }
    println!(
        "      {:<24}{}",
        "Records:",
        style(stats.records).green().bold()
    );
}

/// Print a success message
pub fn print_success(message: &str) {
    println!("    {} {}", style("✓").green().bold(), style(message).green());
}

fn truncate_path(path: &Path, max_len: usize) -> String {
    let path_str = path.display().to_string();
    truncate_string(&path_str, max_len)
}

/// Shorten `s` to at most `max_len` characters, keeping the tail.
pub fn truncate_string(s: &str, max_len: usize) -> String {
    let count = s.chars().count();
    if count <= max_len {
        s.to_string()
    } else {
        let keep = max_len.saturating_sub(3);
        let tail: String = s.chars().skip(count - keep).collect();
        format!("...{}", tail)
    }
}
