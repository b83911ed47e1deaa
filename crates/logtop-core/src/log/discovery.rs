use crate::{Error, Result};
use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};

lazy_static! {
    static ref LOG_NAME: Regex = Regex::new(r"^nginx-access-ui\.log-(\d{8})(\.gz)?$").unwrap();
}

/// The newest access log found in a directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LatestLog {
    pub path: PathBuf,
    pub date: NaiveDate,
}

/// Find the access log with the newest date in its file name
///
/// Only `nginx-access-ui.log-YYYYMMDD` and `nginx-access-ui.log-YYYYMMDD.gz`
/// are considered. Names carrying an impossible date are skipped.
pub fn find_latest_log(dir: &Path) -> Result<Option<LatestLog>> {
    if !dir.is_dir() {
        return Err(Error::NoLogFound(dir.to_path_buf()));
    }

    let mut latest: Option<LatestLog> = None;

    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let file_name = entry.file_name();
        let Some(name) = file_name.to_str() else {
            continue;
        };
        let Some(caps) = LOG_NAME.captures(name) else {
            continue;
        };

        let date = match NaiveDate::parse_from_str(&caps[1], "%Y%m%d") {
            Ok(date) => date,
            Err(e) => {
                tracing::debug!("Skipping {}: {}", name, e);
                continue;
            }
        };

        if latest.as_ref().is_none_or(|l| date > l.date) {
            latest = Some(LatestLog {
                path: entry.path(),
                date,
            });
        }
    }

    match &latest {
        Some(log) => tracing::info!("Latest log file: {}", log.path.display()),
        None => tracing::info!("No access logs found in {}", dir.display()),
    }

    Ok(latest)
}
