use serde::{Deserialize, Serialize};
use spendwise_domain::NotificationChannel;
use std::{env, path::PathBuf};

/// Environment variable that overrides the data root for every profile.
pub const HOME_ENV: &str = "SPENDWISE_HOME";

/// Stores user preferences and where the record store lives.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Optional custom data directory. Defaults to `~/Documents/Spendwise`.
    pub data_root: Option<PathBuf>,

    #[serde(default = "Config::default_records_file")]
    pub records_file: String,

    #[serde(default)]
    pub notification_channel: NotificationChannel,

    #[serde(default = "Config::default_log_filter")]
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_root: None,
            records_file: Self::default_records_file(),
            notification_channel: NotificationChannel::default(),
            log_filter: Self::default_log_filter(),
        }
    }
}

impl Config {
    pub fn default_records_file() -> String {
        "records.json".into()
    }

    pub fn default_log_filter() -> String {
        "spendwise=info".into()
    }

    pub fn resolve_data_root(&self) -> PathBuf {
        if let Some(custom) = env::var_os(HOME_ENV) {
            return PathBuf::from(custom);
        }
        if let Some(path) = &self.data_root {
            return path.clone();
        }

        let base = dirs::document_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."));

        base.join("Spendwise")
    }

    /// Location of the JSON record store snapshot.
    pub fn records_path(&self) -> PathBuf {
        self.resolve_data_root().join(&self.records_file)
    }
}
