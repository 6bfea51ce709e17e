//! SQLite storage for the salary table
//!
//! The table has exactly one writer: the startup load, which replaces
//! every row inside a single transaction. Everything else reads.

pub mod load;
pub mod migrations;
pub mod pool;
pub mod repos;

pub use load::replace_all;
pub use pool::{create_pool, create_pool_with_options};
pub use repos::{CitySalary, DbError, SalaryRepo};
