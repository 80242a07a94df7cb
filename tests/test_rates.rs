//! Unit tests for the satisfaction rate breakdown

use paxsat::pipeline::{
    apply_filters, compute_satisfaction_rates, CategoryFilter, FilterCriteria, FilteredView,
    Satisfaction,
};

#[path = "common/mod.rs"]
mod common;

use common::*;

#[test]
fn test_all_satisfied() {
    let dataset = dataset_from(&[(30, true), (40, true), (50, true)]);
    let view = apply_filters(&dataset, &FilterCriteria::unfiltered(&dataset));

    let rates = compute_satisfaction_rates(&view);

    let satisfied = rates.entry(Satisfaction::Satisfied);
    let dissatisfied = rates.entry(Satisfaction::Dissatisfied);
    assert_eq!(satisfied.count, 3);
    assert_eq!(satisfied.percentage, 100.0);
    assert_eq!(dissatisfied.count, 0);
    assert_eq!(dissatisfied.percentage, 0.0);
}

#[test]
fn test_mixed_shares() {
    let dataset = dataset_from(&[(30, true), (40, false), (50, false), (60, false)]);
    let view = apply_filters(&dataset, &FilterCriteria::unfiltered(&dataset));

    let rates = compute_satisfaction_rates(&view);

    assert_eq!(rates.total(), 4);
    assert_eq!(rates.entry(Satisfaction::Satisfied).percentage, 25.0);
    assert_eq!(rates.entry(Satisfaction::Dissatisfied).percentage, 75.0);
}

#[test]
fn test_entries_are_in_fixed_order() {
    let dataset = dataset_from(&[(30, true), (40, false)]);
    let view = apply_filters(&dataset, &FilterCriteria::unfiltered(&dataset));

    let rates = compute_satisfaction_rates(&view);

    assert_eq!(rates.entries[0].satisfaction, Satisfaction::Dissatisfied);
    assert_eq!(rates.entries[1].satisfaction, Satisfaction::Satisfied);
}

#[test]
fn test_percentages_sum_to_one_hundred() {
    let dataset = random_dataset(777, 5);
    for class in ["Business", "Eco", "Eco Plus"] {
        let criteria = FilterCriteria::new(
            20,
            60,
            CategoryFilter::Only(class.to_string()),
            CategoryFilter::All,
        )
        .unwrap();
        let view = apply_filters(&dataset, &criteria);

        let rates = compute_satisfaction_rates(&view);

        let sum: f64 = rates.entries.iter().map(|e| e.percentage).sum();
        assert!((sum - 100.0).abs() < 1e-9, "Sum was {} for {}", sum, class);
        assert_eq!(rates.total(), view.len());
    }
}

#[test]
fn test_empty_view_gives_zero_percentages() {
    let view = FilteredView::from_records(Vec::new());

    let rates = compute_satisfaction_rates(&view);

    assert_eq!(rates.total(), 0);
    for entry in &rates.entries {
        assert_eq!(entry.count, 0);
        assert_eq!(entry.percentage, 0.0);
        assert!(!entry.percentage.is_nan());
    }
}
