//! Repository for read access to the salary table
//!
//! All queries are read-only aggregates; the state match is exact and
//! case-sensitive.

pub mod salaries;

pub use salaries::{CitySalary, DbError, SalaryRepo};
