//! Dataset fetcher: downloads and unpacks the salary dataset from Kaggle
//!
//! One attempt, no retry. A failed fetch is fatal to startup so the app
//! never serves queries without data. Offline runs skip this module
//! entirely and normalize a CSV already on disk.

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use reqwest::Client;
use tracing::info;
use zip::ZipArchive;

use crate::config::AppConfig;
use crate::error::{EtlError, Result};

/// Archive filename written into the data directory
pub const ARCHIVE_NAME: &str = "developer_salaries.zip";

/// CSV filename inside the archive. The typo is upstream's.
pub const RAW_CSV_NAME: &str = "SofwareDeveloperIncomeExpensesperUSACity.csv";

const KAGGLE_DOWNLOAD_BASE: &str = "https://www.kaggle.com/api/v1/datasets/download";

/// Download the configured dataset archive and extract it into the data
/// directory. Returns the path of the raw CSV.
pub async fn download_dataset(client: &Client, config: &AppConfig) -> Result<PathBuf> {
    let (username, key) = config
        .kaggle_credentials()
        .ok_or_else(|| EtlError::fetch("KAGGLE_USERNAME and KAGGLE_KEY must be set"))?;

    let url = format!("{}/{}", KAGGLE_DOWNLOAD_BASE, config.dataset_slug);
    info!(%url, "downloading dataset");

    let response = client
        .get(&url)
        .basic_auth(username, Some(key))
        .send()
        .await
        .map_err(|e| EtlError::fetch(format!("request to {} failed: {}", url, e)))?;

    let status = response.status();
    if !status.is_success() {
        return Err(EtlError::fetch(format!("{} returned HTTP {}", url, status)));
    }

    let body = response
        .bytes()
        .await
        .map_err(|e| EtlError::fetch(format!("reading response body failed: {}", e)))?;

    std::fs::create_dir_all(&config.data_dir)?;
    let archive_path = config.data_dir.join(ARCHIVE_NAME);
    std::fs::write(&archive_path, &body)?;
    info!(bytes = body.len(), path = %archive_path.display(), "archive written");

    extract_archive(&archive_path, &config.data_dir)?;
    Ok(config.data_dir.join(RAW_CSV_NAME))
}

/// Unpack every file entry of `archive_path` into `dest`, flattening any
/// directory structure the archive may carry.
pub fn extract_archive(archive_path: &Path, dest: &Path) -> Result<()> {
    let file = File::open(archive_path)?;
    let mut archive = ZipArchive::new(file)?;

    for index in 0..archive.len() {
        let mut entry = archive.by_index(index)?;
        if entry.is_dir() {
            continue;
        }
        let Some(name) = entry
            .enclosed_name()
            .and_then(|p| p.file_name().map(PathBuf::from))
        else {
            continue;
        };

        let out_path = dest.join(&name);
        let mut out = File::create(&out_path)?;
        io::copy(&mut entry, &mut out)?;
        info!(entry = %name.display(), "extracted");
    }

    Ok(())
}
