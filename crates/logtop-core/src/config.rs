use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Config file picked up from the working directory when none is given
pub const DEFAULT_CONFIG_PATH: &str = "./logtop.toml";

/// Run configuration
///
/// Built once at startup and passed by reference into every component that
/// needs it. Keys missing from a config file keep their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Number of URLs to keep in the report
    pub report_size: usize,
    /// Directory the HTML reports are written to
    pub report_dir: PathBuf,
    /// Directory scanned for access logs
    pub log_dir: PathBuf,
    /// Abort when more than this percentage of lines fail to parse
    pub max_error_percent: f64,
    /// HTML template containing the `$table_json` placeholder
    pub template: PathBuf,
    /// Write application logs here instead of stderr
    pub log_file: Option<PathBuf>,
    /// Log level filter (e.g. "info", "debug")
    pub log_level: Option<String>,
    /// Stop scanning after this many lines
    pub max_lines: Option<u64>,
    /// Custom line grammar with `url` and `request_time` named groups
    pub log_pattern: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            report_size: 1000,
            report_dir: PathBuf::from("./reports"),
            log_dir: PathBuf::from("./log"),
            max_error_percent: 10.0,
            template: PathBuf::from("./templates/report.html"),
            log_file: None,
            log_level: None,
            max_lines: None,
            log_pattern: None,
        }
    }
}

impl Config {
    /// Read a TOML config file and merge it over the defaults
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::Config(format!(
                "config file not found: {}",
                path.display()
            )));
        }

        let contents = fs::read_to_string(path)?;
        Self::from_toml(&contents)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))
    }

    /// Parse and validate a TOML config string
    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: Config =
            toml::from_str(contents).map_err(|e| Error::Config(e.message().to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load the explicit config file if given, otherwise the default one when it
    /// exists, otherwise the built-in defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_PATH);
                if default_path.exists() {
                    Self::from_file(default_path)
                } else {
                    tracing::debug!("No config file found, using defaults");
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.report_size == 0 {
            return Err(Error::Config("report_size must be greater than 0".into()));
        }
        if !(0.0..=100.0).contains(&self.max_error_percent) {
            return Err(Error::Config(format!(
                "max_error_percent must be within 0..=100, got {}",
                self.max_error_percent
            )));
        }
        Ok(())
    }
}
