//! Shared test utilities and fixture generators

#![allow(dead_code)]

use paxsat::pipeline::{
    Dataset, PassengerRecord, Satisfaction, ServiceFeature, SERVICE_FEATURE_COUNT,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::io::Write;
use std::path::PathBuf;
use tempfile::TempDir;

/// Header of the survey CSV, in the column order of the public dataset
pub const SURVEY_HEADER: &str = "Unnamed: 0,id,Gender,Customer Type,Age,Type of Travel,Class,\
Flight Distance,Inflight wifi service,Departure/Arrival time convenient,Ease of Online booking,\
Gate location,Food and drink,Online boarding,Seat comfort,Inflight entertainment,\
On-board service,Leg room service,Baggage handling,Checkin service,Inflight service,\
Cleanliness,Departure Delay in Minutes,Arrival Delay in Minutes,satisfaction";

/// One raw survey row for CSV fixtures
#[derive(Debug, Clone)]
pub struct SurveyRow {
    pub index: u32,
    pub id: u32,
    pub age: Option<i64>,
    pub travel_type: &'static str,
    pub class: &'static str,
    /// Ratings for the twelve service features, in declaration order
    pub ratings: [u8; SERVICE_FEATURE_COUNT],
    pub arrival_delay: Option<f64>,
    pub satisfaction: &'static str,
}

impl SurveyRow {
    pub fn new(id: u32, age: i64, class: &'static str, satisfaction: &'static str) -> Self {
        Self {
            index: id,
            id,
            age: Some(age),
            travel_type: "Business travel",
            class,
            ratings: [3; SERVICE_FEATURE_COUNT],
            arrival_delay: Some(0.0),
            satisfaction,
        }
    }

    pub fn to_csv_line(&self) -> String {
        let r = &self.ratings;
        let opt = |v: Option<String>| v.unwrap_or_default();
        format!(
            "{},{},Female,Loyal Customer,{},{},{},1000,{},3,{},3,{},{},{},{},{},{},{},{},{},{},0,{},{}",
            self.index,
            self.id,
            opt(self.age.map(|a| a.to_string())),
            self.travel_type,
            self.class,
            r[0],
            r[1],
            r[2],
            r[3],
            r[4],
            r[5],
            r[6],
            r[7],
            r[8],
            r[9],
            r[10],
            r[11],
            opt(self.arrival_delay.map(|d| d.to_string())),
            self.satisfaction,
        )
    }
}

/// Write rows to a survey CSV inside a fresh temporary directory
pub fn write_survey_csv(rows: &[SurveyRow]) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let csv_path = temp_dir.path().join("survey.csv");
    write_csv_with_header(&csv_path, SURVEY_HEADER, rows.iter().map(|r| r.to_csv_line()));
    (temp_dir, csv_path)
}

/// Write an arbitrary header and lines to `path`
pub fn write_csv_with_header(
    path: &std::path::Path,
    header: &str,
    lines: impl IntoIterator<Item = String>,
) {
    let mut file = std::fs::File::create(path).unwrap();
    writeln!(file, "{}", header).unwrap();
    for line in lines {
        writeln!(file, "{}", line).unwrap();
    }
}

/// A small, varied survey: two classes, two travel types, mixed satisfaction
pub fn sample_survey_rows() -> Vec<SurveyRow> {
    let mut rows = vec![
        SurveyRow::new(1, 25, "Eco", "neutral or dissatisfied"),
        SurveyRow::new(2, 34, "Business", "satisfied"),
        SurveyRow::new(3, 47, "Business", "satisfied"),
        SurveyRow::new(4, 52, "Eco", "neutral or dissatisfied"),
        SurveyRow::new(5, 61, "Eco Plus", "satisfied"),
        SurveyRow::new(6, 19, "Eco", "neutral or dissatisfied"),
    ];
    rows[0].travel_type = "Personal Travel";
    rows[3].travel_type = "Personal Travel";
    rows[5].travel_type = "Personal Travel";
    for (i, row) in rows.iter_mut().enumerate() {
        let base = if row.satisfaction == "satisfied" { 4 } else { 2 };
        row.ratings = [base; SERVICE_FEATURE_COUNT];
        // Vary one feature so not everything is perfectly separated
        row.ratings[0] = (i % 5) as u8 + 1;
    }
    rows
}

/// Ratings array with the same value for every feature
pub fn uniform_ratings(value: f64) -> [Option<f64>; SERVICE_FEATURE_COUNT] {
    [Some(value); SERVICE_FEATURE_COUNT]
}

/// Build a record directly
pub fn record(
    age: u32,
    class: &str,
    travel_type: &str,
    satisfied: bool,
    ratings: [Option<f64>; SERVICE_FEATURE_COUNT],
) -> PassengerRecord {
    let satisfaction = if satisfied {
        Satisfaction::Satisfied
    } else {
        Satisfaction::Dissatisfied
    };
    PassengerRecord::new(age, class, travel_type, satisfaction, ratings)
}

/// Records with the given ages and flags; class Eco, business travel,
/// ratings varied so every feature has variance
pub fn dataset_from(ages_and_flags: &[(u32, bool)]) -> Dataset {
    let records = ages_and_flags
        .iter()
        .enumerate()
        .map(|(i, &(age, satisfied))| {
            let mut ratings = uniform_ratings(0.0);
            for feature in ServiceFeature::ALL {
                let value = ((i + feature.index()) % 5) as f64 + 1.0;
                ratings[feature.index()] = Some(value);
            }
            record(age, "Eco", "Business travel", satisfied, ratings)
        })
        .collect();
    Dataset::from_records(records)
}

/// Random dataset for property-style checks
pub fn random_dataset(rows: usize, seed: u64) -> Dataset {
    let mut rng = StdRng::seed_from_u64(seed);
    let classes = ["Business", "Eco", "Eco Plus"];
    let travel_types = ["Business travel", "Personal Travel"];

    let records = (0..rows)
        .map(|_| {
            let mut ratings = uniform_ratings(0.0);
            for slot in ratings.iter_mut() {
                *slot = Some(rng.gen_range(0..=5) as f64);
            }
            record(
                rng.gen_range(7..=85),
                classes[rng.gen_range(0..classes.len())],
                travel_types[rng.gen_range(0..travel_types.len())],
                rng.gen::<bool>(),
                ratings,
            )
        })
        .collect();
    Dataset::from_records(records)
}
