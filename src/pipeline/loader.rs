//! Dataset loader for survey files (CSV or Parquet)
//!
//! Loading is the only place the raw input is touched. The cleaning steps run
//! in a fixed order: completeness gate, de-duplication over the full raw row,
//! identifier removal, satisfaction rename and label normalization.

use std::path::Path;
use std::sync::OnceLock;

use polars::prelude::*;
use serde::Serialize;
use tracing::{debug, info, warn};

use super::dataset::{
    Dataset, PassengerRecord, Satisfaction, ServiceFeature, SERVICE_FEATURE_COUNT,
};
use super::error::LoadError;

/// Rows with a null value here are dropped before anything else happens.
pub const ARRIVAL_DELAY_COLUMN: &str = "Arrival Delay in Minutes";
/// Identifier columns, required in the input and removed after de-duplication.
pub const IDENTIFIER_COLUMNS: [&str; 2] = ["Unnamed: 0", "id"];
pub const RAW_SATISFACTION_COLUMN: &str = "satisfaction";
pub const SATISFACTION_COLUMN: &str = "Satisfaction";
pub const AGE_COLUMN: &str = "Age";
pub const CLASS_COLUMN: &str = "Class";
pub const TRAVEL_TYPE_COLUMN: &str = "Type of Travel";

/// Reader settings for [`load_dataset`].
#[derive(Debug, Clone)]
pub struct LoadOptions {
    /// Rows used for CSV schema inference; 0 scans the whole file.
    pub infer_schema_length: usize,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            infer_schema_length: 10_000,
        }
    }
}

/// Row accounting for one load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LoadStats {
    pub raw_rows: usize,
    pub incomplete_rows: usize,
    pub duplicate_rows: usize,
    pub skipped_rows: usize,
    pub records: usize,
}

/// A cleaned dataset together with the statistics of how it was produced.
#[derive(Debug, Clone)]
pub struct LoadedDataset {
    pub dataset: Dataset,
    pub stats: LoadStats,
}

/// Load and clean a survey file.
pub fn load_dataset(path: &Path, options: &LoadOptions) -> Result<LoadedDataset, LoadError> {
    let lf = scan_table(path, options.infer_schema_length)?;
    let schema = lf.clone().collect_schema()?;

    let satisfaction_source = if schema.get(RAW_SATISFACTION_COLUMN).is_some() {
        RAW_SATISFACTION_COLUMN
    } else {
        SATISFACTION_COLUMN
    };

    let missing: Vec<String> = required_columns(satisfaction_source)
        .into_iter()
        .filter(|name| schema.get(name).is_none())
        .map(str::to_string)
        .collect();
    if !missing.is_empty() {
        return Err(LoadError::MissingColumns(missing));
    }

    let raw = lf.collect()?;
    let raw_rows = raw.height();

    let complete = raw
        .lazy()
        .filter(col(ARRIVAL_DELAY_COLUMN).is_not_null())
        .collect()?;
    let incomplete_rows = raw_rows - complete.height();

    let deduplicated = complete
        .lazy()
        .unique_stable(None, UniqueKeepStrategy::First)
        .collect()?;
    let duplicate_rows = raw_rows - incomplete_rows - deduplicated.height();

    debug!(columns = ?IDENTIFIER_COLUMNS, "dropping identifier columns");
    let mut df = deduplicated.drop_many(IDENTIFIER_COLUMNS);

    if satisfaction_source == RAW_SATISFACTION_COLUMN {
        df.rename(RAW_SATISFACTION_COLUMN, SATISFACTION_COLUMN.into())?;
    }

    let (records, skipped_rows) = build_records(&df)?;
    if skipped_rows > 0 {
        warn!(
            skipped_rows,
            "skipped rows with a missing or negative age, class, travel type or satisfaction"
        );
    }
    if records.is_empty() {
        return Err(LoadError::EmptyDataset);
    }

    let stats = LoadStats {
        raw_rows,
        incomplete_rows,
        duplicate_rows,
        skipped_rows,
        records: records.len(),
    };
    info!(
        path = %path.display(),
        raw_rows,
        incomplete_rows,
        duplicate_rows,
        records = stats.records,
        "dataset loaded"
    );

    Ok(LoadedDataset {
        dataset: Dataset::from_records(records),
        stats,
    })
}

/// Open a CSV or Parquet file lazily based on its extension.
fn scan_table(path: &Path, infer_schema_length: usize) -> Result<LazyFrame, LoadError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    let schema_length = if infer_schema_length == 0 {
        None
    } else {
        Some(infer_schema_length)
    };

    let lf = match extension.as_str() {
        "csv" => LazyCsvReader::new(path)
            .with_infer_schema_length(schema_length)
            .finish()?,
        "parquet" => LazyFrame::scan_parquet(path, Default::default())?,
        _ => return Err(LoadError::UnsupportedFormat(extension)),
    };

    Ok(lf)
}

fn required_columns(satisfaction_column: &str) -> Vec<&str> {
    let mut columns = IDENTIFIER_COLUMNS.to_vec();
    columns.extend([
        ARRIVAL_DELAY_COLUMN,
        satisfaction_column,
        AGE_COLUMN,
        CLASS_COLUMN,
        TRAVEL_TYPE_COLUMN,
    ]);
    columns.extend(ServiceFeature::ALL.iter().map(|f| f.column_name()));
    columns
}

/// Materialize typed records, returning them with the number of rows that
/// could not form a record.
fn build_records(df: &DataFrame) -> Result<(Vec<PassengerRecord>, usize), LoadError> {
    let age_col = df.column(AGE_COLUMN)?.cast(&DataType::Int64)?;
    let class_col = df.column(CLASS_COLUMN)?.cast(&DataType::String)?;
    let travel_col = df.column(TRAVEL_TYPE_COLUMN)?.cast(&DataType::String)?;
    let label_col = df.column(SATISFACTION_COLUMN)?.cast(&DataType::String)?;

    let rating_cols = ServiceFeature::ALL
        .iter()
        .map(|f| df.column(f.column_name())?.cast(&DataType::Float64))
        .collect::<PolarsResult<Vec<Column>>>()?;
    let rating_arrays = rating_cols
        .iter()
        .map(|c| c.f64())
        .collect::<PolarsResult<Vec<&Float64Chunked>>>()?;
    let mut rating_iters: Vec<_> = rating_arrays.iter().map(|ca| ca.into_iter()).collect();

    let ages = age_col.i64()?;
    let classes = class_col.str()?;
    let travel_types = travel_col.str()?;
    let labels = label_col.str()?;

    let mut records = Vec::with_capacity(df.height());
    let mut skipped = 0usize;

    for (((age, class), travel_type), label) in ages
        .into_iter()
        .zip(classes.into_iter())
        .zip(travel_types.into_iter())
        .zip(labels.into_iter())
    {
        // Advance every rating column, even for rows that get skipped
        let mut ratings = [None; SERVICE_FEATURE_COUNT];
        for (slot, iter) in ratings.iter_mut().zip(rating_iters.iter_mut()) {
            *slot = iter.next().flatten();
        }

        let (Some(age), Some(class), Some(travel_type), Some(label)) =
            (age, class, travel_type, label)
        else {
            skipped += 1;
            continue;
        };
        let Ok(age) = u32::try_from(age) else {
            skipped += 1;
            continue;
        };

        let satisfaction = Satisfaction::from_raw(label)
            .ok_or_else(|| LoadError::UnknownSatisfactionLabel(label.to_string()))?;

        records.push(PassengerRecord::new(
            age,
            class,
            travel_type,
            satisfaction,
            ratings,
        ));
    }

    Ok((records, skipped))
}

/// Process-wide dataset slot, filled at most once.
#[derive(Debug, Default)]
pub struct DatasetCache {
    cell: OnceLock<LoadedDataset>,
}

impl DatasetCache {
    pub const fn new() -> Self {
        Self {
            cell: OnceLock::new(),
        }
    }

    /// The loaded dataset, if any load has completed.
    pub fn get(&self) -> Option<&LoadedDataset> {
        self.cell.get()
    }

    /// Return the cached dataset, loading it from `path` on first access.
    ///
    /// Later calls ignore `path` and return the first successful load.
    pub fn get_or_load(
        &self,
        path: &Path,
        options: &LoadOptions,
    ) -> Result<&LoadedDataset, LoadError> {
        if let Some(loaded) = self.cell.get() {
            return Ok(loaded);
        }
        let loaded = load_dataset(path, options)?;
        Ok(self.cell.get_or_init(|| loaded))
    }
}
