//! Environment-driven application configuration
//!
//! All configuration is read once at startup into a typed struct and
//! passed down explicitly. Nothing in the libraries reads the environment
//! after this point.
//!
//! Variables:
//!   KAGGLE_USERNAME / KAGGLE_KEY   # dataset source credentials
//!   LOCAL_DIRECTORY                # data directory (default: cwd)
//!   DATASET_SLUG                   # Kaggle dataset (default: developer salaries)
//!   DATABASE_URL                   # SQLite url (default: sqlite://salarymap.db)
//!   BIND_ADDR                      # listen address (default: 127.0.0.1:5000)

use anyhow::{Context, Result};
use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

/// Kaggle dataset holding the per-city salary table
pub const DEFAULT_DATASET_SLUG: &str = "thedevastator/u-s-software-developer-salaries";

const DEFAULT_DATABASE_URL: &str = "sqlite://salarymap.db";
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:5000";

/// Application configuration, constructed once at startup
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Kaggle dataset identifier (`owner/dataset`)
    pub dataset_slug: String,
    /// Dataset source credentials; required for online fetch only
    pub kaggle_username: Option<String>,
    pub kaggle_key: Option<String>,
    /// Directory the archive and CSV are written into
    pub data_dir: PathBuf,
    /// SQLite database url
    pub database_url: String,
    /// HTTP listen address
    pub bind_addr: SocketAddr,
}

impl AppConfig {
    /// Read configuration from the environment.
    ///
    /// Missing credentials are not an error here: offline runs never
    /// need them. The fetcher rejects online runs without them.
    pub fn from_env() -> Result<Self> {
        let data_dir = match env::var_os("LOCAL_DIRECTORY") {
            Some(dir) => PathBuf::from(dir),
            None => env::current_dir().context("could not determine working directory")?,
        };

        let bind_addr = env::var("BIND_ADDR")
            .unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string())
            .parse::<SocketAddr>()
            .context("BIND_ADDR is not a valid socket address")?;

        Ok(Self {
            dataset_slug: env::var("DATASET_SLUG")
                .unwrap_or_else(|_| DEFAULT_DATASET_SLUG.to_string()),
            kaggle_username: env::var("KAGGLE_USERNAME").ok(),
            kaggle_key: env::var("KAGGLE_KEY").ok(),
            data_dir,
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string()),
            bind_addr,
        })
    }

    /// Both credentials, or `None` if either is unset
    pub fn kaggle_credentials(&self) -> Option<(&str, &str)> {
        match (&self.kaggle_username, &self.kaggle_key) {
            (Some(user), Some(key)) => Some((user.as_str(), key.as_str())),
            _ => None,
        }
    }
}
