//! CLI configuration file
//!
//! Read from `{config_dir}/studium/config.toml` when present:
//!
//! ```toml
//! data_dir = "/var/lib/studium"
//! student = "demo"
//! ```

use std::fs;
use std::path::PathBuf;

use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Snapshot directory; falls back to the platform data dir
    pub data_dir: Option<PathBuf>,
    /// Student identity used when --student is not given
    pub student: Option<String>,
}

impl CliConfig {
    pub fn load() -> Self {
        let Some(path) = dirs::config_dir().map(|d| d.join("studium").join("config.toml")) else {
            return Self::default();
        };
        if !path.exists() {
            return Self::default();
        }

        match fs::read_to_string(&path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(config) => config,
                Err(err) => {
                    log::warn!("ignoring invalid config {:?}: {}", path, err);
                    Self::default()
                }
            },
            Err(err) => {
                log::warn!("could not read config {:?}: {}", path, err);
                Self::default()
            }
        }
    }
}
