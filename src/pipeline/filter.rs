//! Filter criteria and the filtered view they select

use serde::Serialize;

use super::dataset::{Dataset, PassengerRecord};
use super::error::FilterError;

/// Selector value meaning "no filter" for categorical controls.
pub const ALL_OPTION: &str = "All";

/// A categorical filter: either everything or one exact value.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(String),
}

impl CategoryFilter {
    /// Build from a selector value, treating `"All"` as no filter.
    pub fn from_option(option: &str) -> Self {
        if option == ALL_OPTION {
            CategoryFilter::All
        } else {
            CategoryFilter::Only(option.to_string())
        }
    }

    pub fn matches(&self, value: &str) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(wanted) => wanted == value,
        }
    }

    /// Selector value for this filter.
    pub fn as_option(&self) -> &str {
        match self {
            CategoryFilter::All => ALL_OPTION,
            CategoryFilter::Only(value) => value,
        }
    }
}

impl Serialize for CategoryFilter {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_option())
    }
}

/// The active filter selections of one session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterCriteria {
    age_min: u32,
    age_max: u32,
    class: CategoryFilter,
    travel_type: CategoryFilter,
}

impl FilterCriteria {
    pub fn new(
        age_min: u32,
        age_max: u32,
        class: CategoryFilter,
        travel_type: CategoryFilter,
    ) -> Result<Self, FilterError> {
        if age_min > age_max {
            return Err(FilterError::InvertedAgeRange {
                min: age_min,
                max: age_max,
            });
        }
        Ok(Self {
            age_min,
            age_max,
            class,
            travel_type,
        })
    }

    /// Criteria that keep every record of `dataset`.
    pub fn unfiltered(dataset: &Dataset) -> Self {
        let (age_min, age_max) = dataset.age_bounds().unwrap_or((0, u32::MAX));
        Self {
            age_min,
            age_max,
            class: CategoryFilter::All,
            travel_type: CategoryFilter::All,
        }
    }

    pub fn age_min(&self) -> u32 {
        self.age_min
    }

    pub fn age_max(&self) -> u32 {
        self.age_max
    }

    pub fn class(&self) -> &CategoryFilter {
        &self.class
    }

    pub fn travel_type(&self) -> &CategoryFilter {
        &self.travel_type
    }

    /// Replace the age range, rejecting an inverted one.
    pub fn set_age_range(&mut self, age_min: u32, age_max: u32) -> Result<(), FilterError> {
        if age_min > age_max {
            return Err(FilterError::InvertedAgeRange {
                min: age_min,
                max: age_max,
            });
        }
        self.age_min = age_min;
        self.age_max = age_max;
        Ok(())
    }

    pub fn set_class(&mut self, class: CategoryFilter) {
        self.class = class;
    }

    pub fn set_travel_type(&mut self, travel_type: CategoryFilter) {
        self.travel_type = travel_type;
    }

    /// All three predicates ANDed.
    pub fn matches(&self, record: &PassengerRecord) -> bool {
        (self.age_min..=self.age_max).contains(&record.age())
            && self.class.matches(record.flight_class())
            && self.travel_type.matches(record.travel_type())
    }
}

/// Records of a dataset that satisfy a set of criteria.
#[derive(Debug, Clone)]
pub struct FilteredView<'a> {
    records: Vec<&'a PassengerRecord>,
}

impl<'a> FilteredView<'a> {
    pub fn from_records(records: Vec<&'a PassengerRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[&'a PassengerRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Empty views are valid; callers show a notice instead of aggregates.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn satisfied_count(&self) -> usize {
        self.records.iter().filter(|r| r.satisfaction_flag()).count()
    }
}

/// Select the records of `dataset` matching `criteria`.
pub fn apply_filters<'a>(dataset: &'a Dataset, criteria: &FilterCriteria) -> FilteredView<'a> {
    let records = dataset
        .records()
        .iter()
        .filter(|record| criteria.matches(record))
        .collect();
    FilteredView { records }
}
