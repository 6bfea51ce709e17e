//! Database migration for the salary table

use sqlx::SqlitePool;

use crate::db::DbError;

/// Run the schema migration. Idempotent; called once at startup before
/// the first load.
pub async fn run(pool: &SqlitePool) -> Result<(), DbError> {
    tracing::info!("running salary table migration");

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS salary (
            id INTEGER PRIMARY KEY,
            city TEXT NOT NULL,
            state TEXT,
            metro TEXT NOT NULL DEFAULT '',
            mean_salary_adjusted REAL NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_salary_state
        ON salary (state, mean_salary_adjusted DESC)
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}
