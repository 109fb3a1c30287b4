//! CSV Data Loader
//!
//! Reads the wastewater surveillance export into a [`Dataset`].
//! Columns are located by header name, so column order and extra columns
//! do not matter.

use super::error::{LoadError, LoadResult};
use super::types::{Dataset, SampleRecord};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Header of the sampling site column
pub const LOCATION_COLUMN: &str = "sample.loc";
/// Header of the collection date column
pub const DATE_COLUMN: &str = "sample.date";
/// Header of the wildtype concentration column
pub const WILDTYPE_COLUMN: &str = "wildtype";
/// Header of the lower detection limit column
pub const LDL_COLUMN: &str = "LDL";

/// Tokens read as a missing numeric value
const MISSING_TOKENS: [&str; 4] = ["", "NA", "NaN", "nan"];

/// Column positions resolved from the header row
#[derive(Debug, Clone, Copy)]
struct ColumnMap {
    location: usize,
    date: usize,
    wildtype: usize,
    ldl: usize,
}

impl ColumnMap {
    fn from_headers(headers: &csv::StringRecord) -> LoadResult<Self> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim() == name)
                .ok_or_else(|| LoadError::MissingColumn(name.to_string()))
        };

        Ok(Self {
            location: find(LOCATION_COLUMN)?,
            date: find(DATE_COLUMN)?,
            wildtype: find(WILDTYPE_COLUMN)?,
            ldl: find(LDL_COLUMN)?,
        })
    }
}

/// Load the dataset from a CSV file
pub fn load_csv(path: &Path) -> LoadResult<Dataset> {
    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let dataset = load_reader(file)?;

    tracing::info!(
        path = %path.display(),
        rows = dataset.len(),
        locations = dataset.locations().len(),
        "Loaded wastewater dataset"
    );

    Ok(dataset)
}

/// Load the dataset from an in-memory CSV string (useful for testing)
pub fn load_str(csv_data: &str) -> LoadResult<Dataset> {
    load_reader(csv_data.as_bytes())
}

fn load_reader<R: Read>(reader: R) -> LoadResult<Dataset> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let columns = ColumnMap::from_headers(reader.headers()?)?;

    let mut records = Vec::new();
    let mut skipped = 0usize;

    for result in reader.records() {
        let row = result?;
        let line = row.position().map(|p| p.line()).unwrap_or(0);
        let field = |idx: usize| row.get(idx).unwrap_or("");

        let ldl = match parse_number(field(columns.ldl), LDL_COLUMN, line)? {
            Some(v) => v,
            None => {
                tracing::warn!(line, "Skipping sample without a detection limit");
                skipped += 1;
                continue;
            }
        };

        let wildtype = parse_number(field(columns.wildtype), WILDTYPE_COLUMN, line)?;

        let date_str = field(columns.date);
        let sample_date = parse_sample_date(date_str).ok_or_else(|| LoadError::InvalidDate {
            line,
            value: date_str.to_string(),
        })?;

        records.push(SampleRecord::new(
            field(columns.location),
            sample_date,
            wildtype,
            ldl,
        ));
    }

    if skipped > 0 {
        tracing::warn!(skipped, "Some samples were skipped during load");
    }

    Dataset::from_records(records).ok_or(LoadError::Empty)
}

/// Parse a numeric cell; missing markers yield `None`
fn parse_number(value: &str, column: &str, line: u64) -> LoadResult<Option<f64>> {
    if MISSING_TOKENS.contains(&value) {
        return Ok(None);
    }

    value
        .parse::<f64>()
        .map(|v| if v.is_nan() { None } else { Some(v) })
        .map_err(|_| LoadError::InvalidNumber {
            line,
            column: column.to_string(),
            value: value.to_string(),
        })
}

/// Parse a sample date, keeping only the calendar day
pub fn parse_sample_date(value: &str) -> Option<NaiveDate> {
    let date_formats = ["%Y-%m-%d", "%m/%d/%Y", "%Y/%m/%d"];
    let datetime_formats = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

    for fmt in date_formats {
        if let Ok(date) = NaiveDate::parse_from_str(value, fmt) {
            return Some(date);
        }
    }

    for fmt in datetime_formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, fmt) {
            return Some(dt.date());
        }
    }

    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|dt| dt.date_naive())
}
