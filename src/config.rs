use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Result, RosterError};

/// Where the workbook sheets live and how runs are stamped.
///
/// Every field has a default, so an absent config file is the same as an
/// empty one.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RosterConfig {
    /// Directory holding the CSV sheets
    pub data_dir: PathBuf,
    pub availability_file: String,
    pub schedule_file: String,
    pub ledger_file: String,
    /// Optional; a run is only logged when this sheet already exists
    pub log_file: String,
    /// IANA timezone used for run timestamps
    pub timezone: String,
    pub timestamp_format: String,
    /// How many days past the last scheduled date `extend` covers
    pub window_days: u32,
    pub port: u16,
    pub admin_password: Option<String>,
}

impl Default for RosterConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            availability_file: "availability.csv".to_string(),
            schedule_file: "schedule.csv".to_string(),
            ledger_file: "ledger.csv".to_string(),
            log_file: "log.csv".to_string(),
            timezone: "America/Denver".to_string(),
            timestamp_format: "%Y-%m-%d %H:%M".to_string(),
            window_days: 30,
            port: 8080,
            admin_password: None,
        }
    }
}

impl RosterConfig {
    /// Loads `path` if it exists, then applies `ROSTER_ADMIN_PASSWORD`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) if path.exists() => {
                let text = std::fs::read_to_string(path)?;
                Self::from_toml(&text)?
            }
            _ => Self::default(),
        };

        if let Ok(password) = std::env::var("ROSTER_ADMIN_PASSWORD") {
            if !password.is_empty() {
                config.admin_password = Some(password);
            }
        }

        Ok(config)
    }

    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| RosterError::Config(e.to_string()))
    }

    pub fn availability_path(&self) -> PathBuf {
        self.data_dir.join(&self.availability_file)
    }

    pub fn schedule_path(&self) -> PathBuf {
        self.data_dir.join(&self.schedule_file)
    }

    pub fn ledger_path(&self) -> PathBuf {
        self.data_dir.join(&self.ledger_file)
    }

    pub fn log_path(&self) -> PathBuf {
        self.data_dir.join(&self.log_file)
    }
}
