//! One-shot dashboard report rendered with comfy-table

use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, CellAlignment, Color, Table};
use console::style;

use crate::pipeline::{
    CorrelationResult, DashboardSnapshot, DashboardView, HistogramResult, RateResult, Satisfaction,
};

/// Notice shown instead of all three views when no record matches.
pub const EMPTY_VIEW_NOTICE: &str =
    "No data available for this filter combination. Adjust the filters.";

/// Notice shown instead of the correlation view when it cannot be computed.
pub const INSUFFICIENT_DATA_NOTICE: &str =
    "Not enough data to compute correlations for these filters, or satisfaction is constant.";

/// Width of the inline bars in the histogram table.
const BAR_WIDTH: usize = 24;

/// Render the full report for a snapshot.
pub fn render_report(snapshot: &DashboardSnapshot) -> String {
    let mut out = String::new();

    push_section(&mut out, "APPLIED FILTERS");
    push_table(&mut out, &filters_table(snapshot));

    match &snapshot.view {
        DashboardView::Empty => {
            out.push('\n');
            out.push_str(&format!("    {}\n", style(EMPTY_VIEW_NOTICE).yellow()));
        }
        DashboardView::Populated {
            histogram,
            rates,
            correlations,
        } => {
            push_section(&mut out, "AGE DISTRIBUTION BY SATISFACTION");
            push_table(&mut out, &histogram_table(histogram));

            push_section(&mut out, &snapshot.rate_title().to_uppercase());
            push_table(&mut out, &rates_table(rates));

            push_section(&mut out, "SERVICE FEATURE CORRELATION WITH SATISFACTION");
            match correlations {
                CorrelationResult::InsufficientData => {
                    out.push_str(&format!(
                        "    {}\n",
                        style(INSUFFICIENT_DATA_NOTICE).yellow()
                    ));
                }
                CorrelationResult::Ranked(_) => {
                    push_table(&mut out, &correlation_table(correlations));
                }
            }
        }
    }

    out
}

fn push_section(out: &mut String, title: &str) {
    out.push('\n');
    out.push_str(&format!("    {} {}\n", style("▸").cyan(), style(title).white().bold()));
    out.push_str(&format!("    {}\n", style("─".repeat(50)).dim()));
}

fn push_table(out: &mut String, table: &Table) {
    // Indent the table
    for line in table.to_string().lines() {
        out.push_str("    ");
        out.push_str(line);
        out.push('\n');
    }
}

fn header(cells: &[&str]) -> Vec<Cell> {
    cells
        .iter()
        .map(|c| Cell::new(c).add_attribute(Attribute::Bold))
        .collect()
}

fn filters_table(snapshot: &DashboardSnapshot) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(header(&["Filter", "Value"]));

    table.add_row(vec![Cell::new("Age range"), Cell::new(snapshot.age_range_label())]);
    table.add_row(vec![
        Cell::new("Class"),
        Cell::new(snapshot.criteria.class().as_option()),
    ]);
    table.add_row(vec![
        Cell::new("Travel type"),
        Cell::new(snapshot.criteria.travel_type().as_option()),
    ]);
    table.add_row(vec![
        Cell::new("Highlight"),
        Cell::new(snapshot.highlight.as_deref().unwrap_or("None")),
    ]);
    table.add_row(vec![
        Cell::new("Matching passengers"),
        Cell::new(format!(
            "{} of {}",
            snapshot.filtered_records, snapshot.total_records
        ))
        .fg(if snapshot.filtered_records == 0 {
            Color::Red
        } else {
            Color::Green
        }),
    ]);
    table
}

fn bar(count: usize, max: usize) -> String {
    if max == 0 {
        return String::new();
    }
    let len = (count * BAR_WIDTH).div_ceil(max);
    "█".repeat(len)
}

fn histogram_table(histogram: &HistogramResult) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(header(&["Age", "Satisfied", "", "Dissatisfied", ""]));

    let max = histogram.max_count();
    let last = histogram.buckets.len().saturating_sub(1);
    for (i, bucket) in histogram.buckets.iter().enumerate() {
        let closing = if i == last { ']' } else { ')' };
        table.add_row(vec![
            Cell::new(format!("[{:.1}, {:.1}{}", bucket.left, bucket.right, closing)),
            Cell::new(bucket.satisfied).set_alignment(CellAlignment::Right),
            Cell::new(bar(bucket.satisfied, max)).fg(Color::Blue),
            Cell::new(bucket.dissatisfied).set_alignment(CellAlignment::Right),
            Cell::new(bar(bucket.dissatisfied, max)).fg(Color::Red),
        ]);
    }
    table
}

fn rates_table(rates: &RateResult) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(header(&["Satisfaction", "Count", "Percentage"]));

    for entry in &rates.entries {
        let color = match entry.satisfaction {
            Satisfaction::Dissatisfied => Color::Red,
            Satisfaction::Satisfied => Color::Blue,
        };
        table.add_row(vec![
            Cell::new(entry.satisfaction.label()).fg(color),
            Cell::new(entry.count).set_alignment(CellAlignment::Right),
            Cell::new(format!("{:.1}%", entry.percentage)).set_alignment(CellAlignment::Right),
        ]);
    }
    table
}

fn correlation_table(correlations: &CorrelationResult) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(header(&["#", "Feature", "Correlation"]));

    for (rank, feature) in correlations.features().iter().enumerate() {
        let mut label = Cell::new(&feature.display_label);
        let mut value = Cell::new(format!("{:.2}", feature.correlation))
            .set_alignment(CellAlignment::Right);
        if feature.highlighted {
            label = label.fg(Color::Red).add_attribute(Attribute::Bold);
            value = value.fg(Color::Red).add_attribute(Attribute::Bold);
        }
        table.add_row(vec![Cell::new(rank + 1), label, value]);
    }
    table
}
