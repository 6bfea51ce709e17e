//! salarymap-core: dataset acquisition and normalization
//!
//! Turns the raw U.S. software-developer salary dataset into clean
//! [`SalaryRecord`] rows ready for loading into the salary table.
//! Storage and the HTTP surface live in `salarymap-server`.

pub mod config;
pub mod error;
pub mod etl;
pub mod fetch;
pub mod states;

pub use config::AppConfig;
pub use error::{EtlError, Result};
pub use etl::{normalize_file, SalaryRecord};
pub use fetch::{download_dataset, ARCHIVE_NAME, RAW_CSV_NAME};
