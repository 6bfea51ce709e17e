//! Salary repository
//!
//! Read-only aggregate queries over the salary table. Ordering ties are
//! broken lexicographically by city name so results are deterministic
//! regardless of storage order.

use sqlx::{Row, SqlitePool};

/// A city with its adjusted mean salary
#[derive(Debug, Clone, PartialEq)]
pub struct CitySalary {
    pub city: String,
    pub mean_salary_adjusted: f64,
}

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),
}

/// Salary repository
pub struct SalaryRepo<'a> {
    pool: &'a SqlitePool,
}

impl<'a> SalaryRepo<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Number of rows for `state`.
    pub async fn count_for_state(&self, state: &str) -> Result<i64, DbError> {
        let row = sqlx::query("SELECT COUNT(*) AS n FROM salary WHERE state = ?1")
            .bind(state)
            .fetch_one(self.pool)
            .await?;

        Ok(row.get("n"))
    }

    /// Arithmetic mean of `mean_salary_adjusted` for `state`, or `None`
    /// when no rows match.
    pub async fn avg_salary(&self, state: &str) -> Result<Option<f64>, DbError> {
        let row = sqlx::query(
            "SELECT AVG(mean_salary_adjusted) AS avg_salary FROM salary WHERE state = ?1",
        )
        .bind(state)
        .fetch_one(self.pool)
        .await?;

        Ok(row.get("avg_salary"))
    }

    /// Adjusted salary for one city in `state`, or `None` when absent.
    pub async fn city_salary(&self, state: &str, city: &str) -> Result<Option<f64>, DbError> {
        let row = sqlx::query(
            "SELECT mean_salary_adjusted FROM salary WHERE state = ?1 AND city = ?2",
        )
        .bind(state)
        .bind(city)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(|r| r.get("mean_salary_adjusted")))
    }

    /// Up to `limit` cities for `state`, highest salary first, ties broken
    /// by city name.
    pub async fn top_cities(&self, state: &str, limit: i64) -> Result<Vec<CitySalary>, DbError> {
        let rows = sqlx::query(
            r#"
            SELECT city, mean_salary_adjusted
            FROM salary
            WHERE state = ?1
            ORDER BY mean_salary_adjusted DESC, city ASC
            LIMIT ?2
            "#,
        )
        .bind(state)
        .bind(limit)
        .fetch_all(self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| CitySalary {
                city: r.get("city"),
                mean_salary_adjusted: r.get("mean_salary_adjusted"),
            })
            .collect())
    }
}
