//! Dashboard session: user selections in, chart-ready aggregates out
//!
//! Every change to the selections is followed by a full synchronous
//! recompute through [`DashboardSession::snapshot`]. Nothing is cached
//! between snapshots.

use serde::Serialize;
use tracing::debug;

use super::correlation::{compute_correlations, resolve_highlight, CorrelationResult, NO_HIGHLIGHT_OPTION};
use super::dataset::{Dataset, ServiceFeature};
use super::error::FilterError;
use super::filter::{apply_filters, CategoryFilter, FilterCriteria, ALL_OPTION};
use super::histogram::{compute_age_histogram, HistogramResult, DEFAULT_AGE_BINS};
use super::rates::{compute_satisfaction_rates, RateResult};

/// Option lists for the dashboard controls, derived from the full dataset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardControls {
    pub age_bounds: (u32, u32),
    /// `"All"` followed by the sorted distinct classes.
    pub class_options: Vec<String>,
    /// `"All"` followed by the sorted distinct travel types.
    pub travel_type_options: Vec<String>,
    /// `"None"` followed by the display labels of the service features.
    pub highlight_options: Vec<String>,
}

impl DashboardControls {
    pub fn from_dataset(dataset: &Dataset) -> Self {
        let with_all = |values: Vec<String>| {
            std::iter::once(ALL_OPTION.to_string())
                .chain(values)
                .collect::<Vec<_>>()
        };

        Self {
            age_bounds: dataset.age_bounds().unwrap_or((0, 0)),
            class_options: with_all(dataset.flight_classes()),
            travel_type_options: with_all(dataset.travel_types()),
            highlight_options: std::iter::once(NO_HIGHLIGHT_OPTION.to_string())
                .chain(ServiceFeature::ALL.iter().map(|f| f.display_label()))
                .collect(),
        }
    }
}

/// What the dashboard shows for the current selections.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum DashboardView {
    /// No record matches the filters; no aggregate was computed.
    Empty,
    Populated {
        histogram: HistogramResult,
        rates: RateResult,
        correlations: CorrelationResult,
    },
}

/// One full recompute: the applied filters plus every aggregate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSnapshot {
    pub criteria: FilterCriteria,
    pub highlight: Option<String>,
    pub total_records: usize,
    pub filtered_records: usize,
    pub view: DashboardView,
}

impl DashboardSnapshot {
    pub fn is_empty(&self) -> bool {
        matches!(self.view, DashboardView::Empty)
    }

    /// Title for the satisfaction rate chart.
    pub fn rate_title(&self) -> String {
        format!(
            "Satisfaction: Class '{}', Travel Type '{}'",
            self.criteria.class().as_option(),
            self.criteria.travel_type().as_option()
        )
    }

    /// Short description of the applied age range.
    pub fn age_range_label(&self) -> String {
        format!("{}-{}", self.criteria.age_min(), self.criteria.age_max())
    }
}

/// Per-session selections over a shared, read-only dataset.
#[derive(Debug, Clone)]
pub struct DashboardSession<'a> {
    dataset: &'a Dataset,
    controls: DashboardControls,
    criteria: FilterCriteria,
    highlight: Option<String>,
    bins: usize,
}

impl<'a> DashboardSession<'a> {
    /// Start a session with no filters and no highlight.
    pub fn new(dataset: &'a Dataset) -> Self {
        Self {
            dataset,
            controls: DashboardControls::from_dataset(dataset),
            criteria: FilterCriteria::unfiltered(dataset),
            highlight: None,
            bins: DEFAULT_AGE_BINS,
        }
    }

    pub fn with_bins(mut self, bins: usize) -> Self {
        self.bins = bins.max(1);
        self
    }

    pub fn dataset(&self) -> &'a Dataset {
        self.dataset
    }

    pub fn controls(&self) -> &DashboardControls {
        &self.controls
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn highlight(&self) -> Option<&str> {
        self.highlight.as_deref()
    }

    pub fn bins(&self) -> usize {
        self.bins
    }

    pub fn set_age_range(&mut self, age_min: u32, age_max: u32) -> Result<(), FilterError> {
        self.criteria.set_age_range(age_min, age_max)
    }

    /// Select a class by its selector value (`"All"` clears the filter).
    pub fn set_class(&mut self, option: &str) {
        self.criteria.set_class(CategoryFilter::from_option(option));
    }

    /// Select a travel type by its selector value (`"All"` clears the filter).
    pub fn set_travel_type(&mut self, option: &str) {
        self.criteria.set_travel_type(CategoryFilter::from_option(option));
    }

    /// Select the highlighted feature by display label (`"None"` clears it).
    pub fn set_highlight(&mut self, option: &str) {
        self.highlight = resolve_highlight(option).map(|f| f.display_label());
    }

    /// Back to no filters and no highlight.
    pub fn reset(&mut self) {
        self.criteria = FilterCriteria::unfiltered(self.dataset);
        self.highlight = None;
    }

    /// Run filter and all aggregators for the current selections.
    pub fn snapshot(&self) -> DashboardSnapshot {
        let view = apply_filters(self.dataset, &self.criteria);
        debug!(
            age_min = self.criteria.age_min(),
            age_max = self.criteria.age_max(),
            class = self.criteria.class().as_option(),
            travel_type = self.criteria.travel_type().as_option(),
            filtered = view.len(),
            "recomputing dashboard"
        );

        let dashboard_view = if view.is_empty() {
            DashboardView::Empty
        } else {
            DashboardView::Populated {
                histogram: compute_age_histogram(&view, self.bins),
                rates: compute_satisfaction_rates(&view),
                correlations: compute_correlations(&view, self.highlight.as_deref()),
            }
        };

        DashboardSnapshot {
            criteria: self.criteria.clone(),
            highlight: self.highlight.clone(),
            total_records: self.dataset.len(),
            filtered_records: view.len(),
            view: dashboard_view,
        }
    }
}
