//! Query service: assembles the per-state salary report
//!
//! Four questions, one answer struct: state average, top three cities,
//! each city's premium over the average, and a recommendation.

use serde::Serialize;
use sqlx::SqlitePool;
use thiserror::Error;

use crate::db::{DbError, SalaryRepo};

/// How many cities the report ranks
pub const TOP_CITY_COUNT: i64 = 3;

/// A top city's percentage premium over the state average
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CityPremium {
    pub city: String,
    pub premium_pct: f64,
}

/// The full report for one state
#[derive(Debug, Clone, Serialize)]
pub struct StateReport {
    pub state: String,
    pub average_salary: f64,
    pub top_cities: Vec<String>,
    pub city_percentages: Vec<CityPremium>,
    pub recommended_city: String,
    pub recommended_city_salary: f64,
}

/// Report assembly errors
#[derive(Debug, Error)]
pub enum ReportError {
    /// No rows match the requested state. Recovered by the caller and
    /// rendered as the error view; never aborts the process.
    #[error("No data for this state.")]
    NoData { state: String },

    #[error(transparent)]
    Db(#[from] DbError),
}

/// Percentage by which `city_salary` exceeds `average`.
///
/// Callers must guard `average != 0`; [`build_report`] folds a zero or
/// absent average into [`ReportError::NoData`].
fn premium(city_salary: f64, average: f64) -> f64 {
    (city_salary / average - 1.0) * 100.0
}

/// Percentage premium of one city over its state average.
///
/// `NoData` when the state has no rows, a zero average, or the city is
/// not present in the state.
pub async fn city_premium(pool: &SqlitePool, state: &str, city: &str) -> Result<f64, ReportError> {
    let repo = SalaryRepo::new(pool);

    let average = repo
        .avg_salary(state)
        .await?
        .filter(|avg| *avg != 0.0)
        .ok_or_else(|| ReportError::NoData {
            state: state.to_string(),
        })?;

    let city_salary = repo
        .city_salary(state, city)
        .await?
        .ok_or_else(|| ReportError::NoData {
            state: state.to_string(),
        })?;

    Ok(premium(city_salary, average))
}

/// The recommended city for `state`: the top city with the highest premium.
pub async fn recommend(pool: &SqlitePool, state: &str) -> Result<String, ReportError> {
    build_report(pool, state)
        .await
        .map(|report| report.recommended_city)
}

/// Build the report for `state` (exact, case-sensitive match).
pub async fn build_report(pool: &SqlitePool, state: &str) -> Result<StateReport, ReportError> {
    let repo = SalaryRepo::new(pool);

    if repo.count_for_state(state).await? == 0 {
        return Err(ReportError::NoData {
            state: state.to_string(),
        });
    }

    // A zero average only occurs with zero records, but it would also
    // break the premium division, so both collapse into NoData.
    let average_salary = repo
        .avg_salary(state)
        .await?
        .filter(|avg| *avg != 0.0)
        .ok_or_else(|| ReportError::NoData {
            state: state.to_string(),
        })?;

    let ranked = repo.top_cities(state, TOP_CITY_COUNT).await?;

    let city_percentages: Vec<CityPremium> = ranked
        .iter()
        .map(|c| CityPremium {
            city: c.city.clone(),
            premium_pct: premium(c.mean_salary_adjusted, average_salary),
        })
        .collect();

    // First-encountered maximum: on equal premiums the higher-ranked
    // city keeps the recommendation.
    let mut best = 0;
    for (index, entry) in city_percentages.iter().enumerate().skip(1) {
        if entry.premium_pct > city_percentages[best].premium_pct {
            best = index;
        }
    }

    Ok(StateReport {
        state: state.to_string(),
        average_salary,
        top_cities: ranked.iter().map(|c| c.city.clone()).collect(),
        city_percentages: city_percentages.clone(),
        recommended_city: city_percentages[best].city.clone(),
        recommended_city_salary: ranked[best].mean_salary_adjusted,
    })
}
