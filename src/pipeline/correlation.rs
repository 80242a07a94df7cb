//! Correlation of service ratings with passenger satisfaction

use rayon::prelude::*;
use serde::Serialize;

use super::dataset::{display_label, ServiceFeature};
use super::filter::FilteredView;

/// Selector value meaning "highlight nothing".
pub const NO_HIGHLIGHT_OPTION: &str = "None";

/// Correlation of one service feature with the satisfaction flag.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureCorrelation {
    pub feature: ServiceFeature,
    pub column_name: &'static str,
    pub display_label: String,
    pub correlation: f64,
    pub highlighted: bool,
}

/// Ranked correlations, or a marker that the view cannot support them.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "features", rename_all = "snake_case")]
pub enum CorrelationResult {
    /// Fewer than two records, or every record has the same satisfaction.
    InsufficientData,
    /// Features sorted by correlation, descending.
    Ranked(Vec<FeatureCorrelation>),
}

impl CorrelationResult {
    pub fn features(&self) -> &[FeatureCorrelation] {
        match self {
            CorrelationResult::InsufficientData => &[],
            CorrelationResult::Ranked(features) => features,
        }
    }

    pub fn is_insufficient(&self) -> bool {
        matches!(self, CorrelationResult::InsufficientData)
    }

    pub fn highlighted(&self) -> Option<&FeatureCorrelation> {
        self.features().iter().find(|f| f.highlighted)
    }
}

/// Compare labels ignoring case, whitespace and underscores.
pub fn labels_match(a: &str, b: &str) -> bool {
    fn normalize(s: &str) -> String {
        s.chars()
            .filter(|c| !c.is_whitespace() && *c != '_')
            .flat_map(char::to_lowercase)
            .collect()
    }
    normalize(a) == normalize(b)
}

/// Resolve a highlight selection to a feature. `"None"` and unknown labels
/// resolve to nothing.
pub fn resolve_highlight(selection: &str) -> Option<ServiceFeature> {
    if selection == NO_HIGHLIGHT_OPTION {
        return None;
    }
    ServiceFeature::ALL
        .into_iter()
        .find(|feature| labels_match(&feature.display_label(), selection))
}

/// Pearson correlation between each service feature and the satisfaction
/// flag, sorted descending.
///
/// Constant features have no defined correlation and are left out. Ties keep
/// the survey declaration order. `highlight` only marks a matching entry.
pub fn compute_correlations(view: &FilteredView<'_>, highlight: Option<&str>) -> CorrelationResult {
    let satisfied = view.satisfied_count();
    if view.len() < 2 || satisfied == 0 || satisfied == view.len() {
        return CorrelationResult::InsufficientData;
    }

    let highlighted = highlight.and_then(resolve_highlight);

    // Parallel map, ordered collect: output order is declaration order
    let mut ranked: Vec<FeatureCorrelation> = ServiceFeature::ALL
        .par_iter()
        .filter_map(|&feature| {
            let pairs = view.records().iter().filter_map(|record| {
                let flag = if record.satisfaction_flag() { 1.0 } else { 0.0 };
                record.rating(feature).map(|rating| (rating, flag))
            });
            let correlation = compute_pearson_correlation(pairs)?;
            Some(FeatureCorrelation {
                feature,
                column_name: feature.column_name(),
                display_label: display_label(feature.column_name()),
                correlation,
                highlighted: highlighted == Some(feature),
            })
        })
        .collect();

    ranked.sort_by(|a, b| {
        b.correlation
            .partial_cmp(&a.correlation)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    CorrelationResult::Ranked(ranked)
}

/// Pearson correlation using Welford's single-pass algorithm.
///
/// Returns `None` with no pairs or when either side has zero variance.
pub fn compute_pearson_correlation(pairs: impl IntoIterator<Item = (f64, f64)>) -> Option<f64> {
    let mut n = 0.0;
    let mut mean_x = 0.0;
    let mut mean_y = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    let mut cov_xy = 0.0;

    for (x, y) in pairs {
        if x.is_nan() || y.is_nan() {
            continue;
        }
        n += 1.0;
        let dx = x - mean_x;
        let dy = y - mean_y;
        mean_x += dx / n;
        mean_y += dy / n;
        var_x += dx * (x - mean_x);
        var_y += dy * (y - mean_y);
        cov_xy += dx * (y - mean_y);
    }

    if n == 0.0 || var_x <= 0.0 || var_y <= 0.0 {
        return None;
    }

    let r = cov_xy / (var_x.sqrt() * var_y.sqrt());
    if r.is_nan() {
        return None;
    }
    Some(r.clamp(-1.0, 1.0))
}
