//! Canonical in-memory survey dataset
//!
//! The dataset is built once by the loader and never mutated afterwards.

use serde::Serialize;

/// Normalized satisfaction label.
///
/// Declaration order is the fixed category order used by every view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Satisfaction {
    Dissatisfied,
    Satisfied,
}

impl Satisfaction {
    /// Both labels in display order.
    pub const ALL: [Satisfaction; 2] = [Satisfaction::Dissatisfied, Satisfaction::Satisfied];

    /// Parse a raw survey label, collapsing the neutral answer into `Dissatisfied`.
    pub fn from_raw(raw: &str) -> Option<Self> {
        match raw.trim() {
            "satisfied" => Some(Satisfaction::Satisfied),
            "dissatisfied" | "neutral or dissatisfied" => Some(Satisfaction::Dissatisfied),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Satisfaction::Dissatisfied => "dissatisfied",
            Satisfaction::Satisfied => "satisfied",
        }
    }

    pub fn flag(&self) -> bool {
        matches!(self, Satisfaction::Satisfied)
    }
}

impl std::fmt::Display for Satisfaction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Number of service-quality rating columns in the survey.
pub const SERVICE_FEATURE_COUNT: usize = 12;

/// The twelve rated service features, in survey declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ServiceFeature {
    InflightWifi,
    OnlineBookingEase,
    FoodAndDrink,
    OnlineBoarding,
    SeatComfort,
    InflightEntertainment,
    OnBoardService,
    LegRoom,
    BaggageHandling,
    CheckinService,
    InflightService,
    Cleanliness,
}

impl ServiceFeature {
    pub const ALL: [ServiceFeature; SERVICE_FEATURE_COUNT] = [
        ServiceFeature::InflightWifi,
        ServiceFeature::OnlineBookingEase,
        ServiceFeature::FoodAndDrink,
        ServiceFeature::OnlineBoarding,
        ServiceFeature::SeatComfort,
        ServiceFeature::InflightEntertainment,
        ServiceFeature::OnBoardService,
        ServiceFeature::LegRoom,
        ServiceFeature::BaggageHandling,
        ServiceFeature::CheckinService,
        ServiceFeature::InflightService,
        ServiceFeature::Cleanliness,
    ];

    /// Column name in the source table.
    pub fn column_name(&self) -> &'static str {
        match self {
            ServiceFeature::InflightWifi => "Inflight wifi service",
            ServiceFeature::OnlineBookingEase => "Ease of Online booking",
            ServiceFeature::FoodAndDrink => "Food and drink",
            ServiceFeature::OnlineBoarding => "Online boarding",
            ServiceFeature::SeatComfort => "Seat comfort",
            ServiceFeature::InflightEntertainment => "Inflight entertainment",
            ServiceFeature::OnBoardService => "On-board service",
            ServiceFeature::LegRoom => "Leg room service",
            ServiceFeature::BaggageHandling => "Baggage handling",
            ServiceFeature::CheckinService => "Checkin service",
            ServiceFeature::InflightService => "Inflight service",
            ServiceFeature::Cleanliness => "Cleanliness",
        }
    }

    /// Human-readable label shown in charts and selectors.
    pub fn display_label(&self) -> String {
        display_label(self.column_name())
    }

    /// Position of this feature in [`ServiceFeature::ALL`].
    pub fn index(&self) -> usize {
        *self as usize
    }
}

/// Convert an internal column name to a display label: underscores become
/// spaces and every alphabetic run starts uppercase with the rest lowercase.
pub fn display_label(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut prev_alpha = false;
    for ch in name.chars() {
        let ch = if ch == '_' { ' ' } else { ch };
        if ch.is_alphabetic() {
            if prev_alpha {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(ch);
            prev_alpha = false;
        }
    }
    out
}

/// One cleaned survey response.
#[derive(Debug, Clone, PartialEq)]
pub struct PassengerRecord {
    age: u32,
    flight_class: String,
    travel_type: String,
    satisfaction: Satisfaction,
    ratings: [Option<f64>; SERVICE_FEATURE_COUNT],
}

impl PassengerRecord {
    pub fn new(
        age: u32,
        flight_class: impl Into<String>,
        travel_type: impl Into<String>,
        satisfaction: Satisfaction,
        ratings: [Option<f64>; SERVICE_FEATURE_COUNT],
    ) -> Self {
        Self {
            age,
            flight_class: flight_class.into(),
            travel_type: travel_type.into(),
            satisfaction,
            ratings,
        }
    }

    pub fn age(&self) -> u32 {
        self.age
    }

    pub fn flight_class(&self) -> &str {
        &self.flight_class
    }

    pub fn travel_type(&self) -> &str {
        &self.travel_type
    }

    pub fn satisfaction(&self) -> Satisfaction {
        self.satisfaction
    }

    /// Derived binary flag, `true` iff the passenger was satisfied.
    pub fn satisfaction_flag(&self) -> bool {
        self.satisfaction.flag()
    }

    pub fn rating(&self, feature: ServiceFeature) -> Option<f64> {
        self.ratings[feature.index()]
    }
}

/// The cleaned dataset, read-only for the lifetime of the process.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Vec<PassengerRecord>,
}

impl Dataset {
    pub fn from_records(records: Vec<PassengerRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[PassengerRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Minimum and maximum age, or `None` for an empty dataset.
    pub fn age_bounds(&self) -> Option<(u32, u32)> {
        let min = self.records.iter().map(|r| r.age).min()?;
        let max = self.records.iter().map(|r| r.age).max()?;
        Some((min, max))
    }

    /// Sorted distinct flight classes.
    pub fn flight_classes(&self) -> Vec<String> {
        distinct_sorted(self.records.iter().map(|r| r.flight_class.as_str()))
    }

    /// Sorted distinct travel types.
    pub fn travel_types(&self) -> Vec<String> {
        distinct_sorted(self.records.iter().map(|r| r.travel_type.as_str()))
    }
}

fn distinct_sorted<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let set: std::collections::BTreeSet<&str> = values.collect();
    set.into_iter().map(str::to_string).collect()
}
