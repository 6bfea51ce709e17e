//! ETL normalizer: raw dataset CSV → clean [`SalaryRecord`] rows
//!
//! The raw file ships with an unnamed row-index column, an unlabeled salary
//! column, and cities stored as `"<City>, <ST>"`. Normalization renames the
//! columns, splits city from state, maps the abbreviation to a full state
//! name, and rewrites the file in place with the clean schema.
//!
//! Any malformed row aborts the whole load. There is no partial load: either
//! every row normalizes or the caller gets an error and the table is left
//! untouched.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{EtlError, Result};
use crate::states;

/// One normalized row of the salary table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalaryRecord {
    /// Row index from the raw file; unique and stable per dataset version
    pub id: i64,
    /// City name with the state suffix removed
    pub city: String,
    /// Full state name; `None` when the abbreviation is unmapped
    pub state: Option<String>,
    /// Metro-area label, passed through unchanged
    pub metro: String,
    /// Cost-of-living-adjusted mean salary for software developers
    pub mean_salary_adjusted: f64,
}

/// Normalize the raw CSV at `path` and rewrite it in place.
///
/// Returns the normalized rows, ready for loading into the salary table.
/// The rewritten file carries the clean header
/// `id,city,state,metro,mean_salary_adjusted`.
pub fn normalize_file(path: &Path) -> Result<Vec<SalaryRecord>> {
    if !path.exists() {
        return Err(EtlError::missing_file(path));
    }

    let records = read_raw(path)?;
    info!(rows = records.len(), path = %path.display(), "normalized raw dataset");

    write_normalized(path, &records)?;
    Ok(records)
}

/// Parse the raw file: column 0 = row index, column 1 = `"City, ST"`,
/// column 2 = adjusted salary, `Metro` column passed through when present.
fn read_raw(path: &Path) -> Result<Vec<SalaryRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .map_err(|e| EtlError::csv(path, e))?;

    let metro_idx = reader
        .headers()
        .map_err(|e| EtlError::csv(path, e))?
        .iter()
        .position(|h| h.eq_ignore_ascii_case("metro"));
    debug!(?metro_idx, "located metro column");

    let mut records = Vec::new();
    for (row, result) in reader.records().enumerate() {
        let raw = result.map_err(|e| EtlError::csv(path, e))?;
        records.push(parse_row(row, &raw, metro_idx)?);
    }
    Ok(records)
}

fn parse_row(
    row: usize,
    raw: &csv::StringRecord,
    metro_idx: Option<usize>,
) -> Result<SalaryRecord> {
    let id_field = raw
        .get(0)
        .ok_or_else(|| EtlError::parse(row, "missing row index column"))?;
    let id = id_field
        .trim()
        .parse::<i64>()
        .map_err(|_| EtlError::parse(row, format!("row index '{}' is not an integer", id_field)))?;

    let combined = raw
        .get(1)
        .ok_or_else(|| EtlError::parse(row, "missing city column"))?;
    let (city, abbrev) = combined
        .split_once(", ")
        .ok_or_else(|| EtlError::parse(row, format!("city field '{}' has no ', ' separator", combined)))?;

    let salary_field = raw
        .get(2)
        .ok_or_else(|| EtlError::parse(row, "missing salary column"))?;
    let mean_salary_adjusted = salary_field.trim().parse::<f64>().map_err(|_| {
        EtlError::parse(row, format!("salary '{}' is not numeric", salary_field))
    })?;

    let metro = metro_idx
        .and_then(|i| raw.get(i))
        .unwrap_or_default()
        .to_string();

    Ok(SalaryRecord {
        id,
        city: city.to_string(),
        state: states::full_name(abbrev).map(str::to_string),
        metro,
        mean_salary_adjusted,
    })
}

/// Overwrite the raw file with the normalized rows and clean header.
fn write_normalized(path: &Path, records: &[SalaryRecord]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).map_err(|e| EtlError::csv(path, e))?;
    for record in records {
        writer.serialize(record).map_err(|e| EtlError::csv(path, e))?;
    }
    writer.flush()?;
    Ok(())
}
