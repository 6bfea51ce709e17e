//! salarymap-server: storage and HTTP surface for the salary report
//!
//! Owns the SQLite `salary` table (pool, migration, full-replace load),
//! the query service that assembles the per-state report, and the axum
//! routes that expose it.

pub mod db;
pub mod http;
pub mod report;
pub mod state;

pub use db::pool::create_pool;
pub use db::{migrations, replace_all, SalaryRepo};
pub use report::{build_report, city_premium, recommend, ReportError, StateReport};
pub use state::AppState;
