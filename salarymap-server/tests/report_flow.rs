//! End-to-end flow: raw CSV → normalize → replace load → report

use std::fs;

use salarymap_core::{normalize_file, SalaryRecord};
use salarymap_server::db::{create_pool_with_options, migrations, replace_all};
use salarymap_server::report::{build_report, city_premium, recommend, ReportError};
use sqlx::SqlitePool;
use tempfile::TempDir;

fn record(id: i64, city: &str, state: &str, salary: f64) -> SalaryRecord {
    SalaryRecord {
        id,
        city: city.to_string(),
        state: Some(state.to_string()),
        metro: String::new(),
        mean_salary_adjusted: salary,
    }
}

async fn loaded_pool(records: &[SalaryRecord]) -> SqlitePool {
    // One connection: each in-memory SQLite connection is its own database
    let pool = create_pool_with_options("sqlite::memory:", 1)
        .await
        .expect("pool creation failed");
    migrations::run(&pool).await.expect("migration failed");
    replace_all(&pool, records).await.expect("load failed");
    pool
}

#[tokio::test]
async fn report_covers_all_four_questions() {
    let pool = loaded_pool(&[
        record(0, "Austin", "Texas", 250.0),
        record(1, "Dallas", "Texas", 200.0),
        record(2, "Houston", "Texas", 150.0),
        record(3, "Waco", "Texas", 120.0),
    ])
    .await;

    let report = build_report(&pool, "Texas").await.unwrap();

    assert_eq!(report.state, "Texas");
    assert_eq!(report.average_salary, 180.0);
    assert_eq!(report.top_cities, ["Austin", "Dallas", "Houston"]);

    // Premium of the top city: (250 / 180 - 1) * 100
    let austin = &report.city_percentages[0];
    assert_eq!(austin.city, "Austin");
    assert!((austin.premium_pct - ((250.0 / 180.0 - 1.0) * 100.0)).abs() < 1e-9);

    assert_eq!(report.recommended_city, "Austin");
    assert_eq!(report.recommended_city_salary, 250.0);
}

#[tokio::test]
async fn recommendation_is_the_city_with_the_highest_premium() {
    let pool = loaded_pool(&[
        record(0, "Dallas", "Texas", 200.0),
        record(1, "Austin", "Texas", 250.0),
        record(2, "Houston", "Texas", 150.0),
    ])
    .await;

    let report = build_report(&pool, "Texas").await.unwrap();
    let max_premium = report
        .city_percentages
        .iter()
        .map(|c| c.premium_pct)
        .fold(f64::NEG_INFINITY, f64::max);
    let recommended = report
        .city_percentages
        .iter()
        .find(|c| c.city == report.recommended_city)
        .unwrap();

    assert_eq!(recommended.premium_pct, max_premium);
}

#[tokio::test]
async fn premium_of_250_against_a_200_average_is_25_percent() {
    let pool = loaded_pool(&[
        record(0, "Austin", "Texas", 250.0),
        record(1, "Dallas", "Texas", 200.0),
        record(2, "Houston", "Texas", 150.0),
    ])
    .await;

    assert_eq!(city_premium(&pool, "Texas", "Austin").await.unwrap(), 25.0);
}

#[tokio::test]
async fn premium_for_an_absent_city_is_no_data() {
    let pool = loaded_pool(&[record(0, "Austin", "Texas", 250.0)]).await;

    let err = city_premium(&pool, "Texas", "Paris").await.unwrap_err();
    assert!(matches!(err, ReportError::NoData { .. }));
}

#[tokio::test]
async fn recommend_returns_the_highest_premium_city() {
    let pool = loaded_pool(&[
        record(0, "Dallas", "Texas", 200.0),
        record(1, "Austin", "Texas", 250.0),
    ])
    .await;

    assert_eq!(recommend(&pool, "Texas").await.unwrap(), "Austin");
}

#[tokio::test]
async fn fewer_than_three_cities_returns_all_of_them() {
    let pool = loaded_pool(&[
        record(0, "Chicago", "Illinois", 90000.0),
        record(1, "Springfield", "Illinois", 70000.0),
    ])
    .await;

    let report = build_report(&pool, "Illinois").await.unwrap();
    assert_eq!(report.top_cities, ["Chicago", "Springfield"]);
    assert_eq!(report.city_percentages.len(), 2);
}

#[tokio::test]
async fn unknown_state_is_the_no_data_path_not_a_crash() {
    let pool = loaded_pool(&[record(0, "Austin", "Texas", 95000.0)]).await;

    let err = build_report(&pool, "Atlantis").await.unwrap_err();
    assert!(matches!(err, ReportError::NoData { .. }));
    assert_eq!(err.to_string(), "No data for this state.");
}

#[tokio::test]
async fn empty_table_reports_no_data_for_every_state() {
    let pool = loaded_pool(&[]).await;

    let err = build_report(&pool, "Texas").await.unwrap_err();
    assert!(matches!(err, ReportError::NoData { .. }));
}

#[tokio::test]
async fn csv_to_report_end_to_end() {
    let dir = TempDir::new().unwrap();
    let csv_path = dir.path().join("salaries.csv");
    fs::write(
        &csv_path,
        ",City,Mean Software Developer Salary (adjusted),Metro\n\
         0,\"Austin, TX\",95000,Austin-Round Rock\n\
         1,\"Dallas, TX\",88000,Dallas-Fort Worth\n\
         2,\"Houston, TX\",85000,Greater Houston\n\
         3,\"Waco, TX\",70000,Waco MSA\n\
         4,\"Chicago, IL\",90000,Chicagoland\n",
    )
    .unwrap();

    let records = normalize_file(&csv_path).unwrap();
    let pool = loaded_pool(&records).await;

    let report = build_report(&pool, "Texas").await.unwrap();
    assert_eq!(report.average_salary, 84500.0);
    assert_eq!(report.top_cities, ["Austin", "Dallas", "Houston"]);
    assert_eq!(report.recommended_city, "Austin");
    assert_eq!(report.recommended_city_salary, 95000.0);

    let illinois = build_report(&pool, "Illinois").await.unwrap();
    assert_eq!(illinois.top_cities, ["Chicago"]);
}

#[tokio::test]
async fn reloading_the_same_dataset_yields_the_same_report() {
    let rows = [
        record(0, "Austin", "Texas", 95000.0),
        record(1, "Dallas", "Texas", 88000.0),
    ];
    let pool = loaded_pool(&rows).await;
    let first = build_report(&pool, "Texas").await.unwrap();

    replace_all(&pool, &rows).await.unwrap();
    let second = build_report(&pool, "Texas").await.unwrap();

    assert_eq!(first.average_salary, second.average_salary);
    assert_eq!(first.top_cities, second.top_cities);
    assert_eq!(first.recommended_city, second.recommended_city);
}
