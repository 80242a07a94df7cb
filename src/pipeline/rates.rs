//! Satisfaction rate breakdown

use serde::Serialize;

use super::dataset::Satisfaction;
use super::filter::FilteredView;

/// Count and share of one satisfaction label.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RateEntry {
    pub satisfaction: Satisfaction,
    pub count: usize,
    pub percentage: f64,
}

/// Dissatisfied and satisfied shares, always in that order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RateResult {
    pub entries: [RateEntry; 2],
}

impl RateResult {
    pub fn total(&self) -> usize {
        self.entries.iter().map(|e| e.count).sum()
    }

    pub fn entry(&self, satisfaction: Satisfaction) -> &RateEntry {
        match satisfaction {
            Satisfaction::Dissatisfied => &self.entries[0],
            Satisfaction::Satisfied => &self.entries[1],
        }
    }
}

/// Count each label and convert to percentages of the view.
///
/// A zero total gives 0% for both labels rather than NaN.
pub fn compute_satisfaction_rates(view: &FilteredView<'_>) -> RateResult {
    let satisfied = view.satisfied_count();
    let dissatisfied = view.len() - satisfied;
    let total = satisfied + dissatisfied;

    let percentage = |count: usize| {
        if total > 0 {
            100.0 * count as f64 / total as f64
        } else {
            0.0
        }
    };

    RateResult {
        entries: Satisfaction::ALL.map(|satisfaction| {
            let count = match satisfaction {
                Satisfaction::Dissatisfied => dissatisfied,
                Satisfaction::Satisfied => satisfied,
            };
            RateEntry {
                satisfaction,
                count,
                percentage: percentage(count),
            }
        }),
    }
}
