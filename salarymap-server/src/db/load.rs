//! Full-replace load of the salary table
//!
//! The table carries no append semantics: every load swaps the entire
//! contents inside one transaction, so readers see either the old table
//! or the new one, never a mix.

use salarymap_core::SalaryRecord;
use sqlx::SqlitePool;
use tracing::info;

use crate::db::DbError;

/// Replace every row of the salary table with `records`.
pub async fn replace_all(pool: &SqlitePool, records: &[SalaryRecord]) -> Result<(), DbError> {
    let mut tx = pool.begin().await?;

    sqlx::query("DELETE FROM salary").execute(&mut *tx).await?;

    for record in records {
        sqlx::query(
            r#"
            INSERT INTO salary (id, city, state, metro, mean_salary_adjusted)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(record.id)
        .bind(&record.city)
        .bind(record.state.as_deref())
        .bind(&record.metro)
        .bind(record.mean_salary_adjusted)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;
    info!(rows = records.len(), "salary table replaced");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::pool::create_pool_with_options;
    use crate::db::{migrations, SalaryRepo};

    fn record(id: i64, city: &str, state: &str, salary: f64) -> SalaryRecord {
        SalaryRecord {
            id,
            city: city.to_string(),
            state: Some(state.to_string()),
            metro: String::new(),
            mean_salary_adjusted: salary,
        }
    }

    #[tokio::test]
    async fn reload_never_leaves_stale_rows() {
        let pool = create_pool_with_options("sqlite::memory:", 1)
            .await
            .unwrap();
        migrations::run(&pool).await.unwrap();

        replace_all(&pool, &[record(0, "Austin", "Texas", 95000.0)])
            .await
            .unwrap();
        replace_all(&pool, &[record(0, "Dallas", "Texas", 88000.0)])
            .await
            .unwrap();

        let repo = SalaryRepo::new(&pool);
        let cities = repo.top_cities("Texas", 3).await.unwrap();
        assert_eq!(cities.len(), 1);
        assert_eq!(cities[0].city, "Dallas");
    }

    #[tokio::test]
    async fn reloading_the_same_rows_is_idempotent() {
        let pool = create_pool_with_options("sqlite::memory:", 1)
            .await
            .unwrap();
        migrations::run(&pool).await.unwrap();

        let rows = vec![
            record(0, "Austin", "Texas", 95000.0),
            record(1, "Dallas", "Texas", 88000.0),
        ];
        replace_all(&pool, &rows).await.unwrap();
        replace_all(&pool, &rows).await.unwrap();

        let repo = SalaryRepo::new(&pool);
        assert_eq!(repo.count_for_state("Texas").await.unwrap(), 2);
    }

    #[tokio::test]
    async fn null_state_rows_are_stored_but_never_match_a_state() {
        let pool = create_pool_with_options("sqlite::memory:", 1)
            .await
            .unwrap();
        migrations::run(&pool).await.unwrap();

        let unmapped = SalaryRecord {
            id: 0,
            city: "Somewhere".to_string(),
            state: None,
            metro: String::new(),
            mean_salary_adjusted: 50000.0,
        };
        replace_all(&pool, &[unmapped]).await.unwrap();

        let (total,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM salary")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(total, 1);

        let repo = SalaryRepo::new(&pool);
        assert_eq!(repo.count_for_state("Texas").await.unwrap(), 0);
    }
}
