use crate::error::Error;

use serde::Deserialize;

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

/// Dashboard configuration. Every field has a default, so an empty file (or
/// no file at all) is valid.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub general: General,
    #[serde(default)]
    pub dashboard: Dashboard,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct General {
    #[serde(default = "listen")]
    pub listen: SocketAddr,
    #[serde(default = "dataset")]
    pub dataset: PathBuf,
    #[serde(default = "open_browser")]
    pub open_browser: bool,
}

impl Default for General {
    fn default() -> Self {
        Self {
            listen: listen(),
            dataset: dataset(),
            open_browser: open_browser(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Dashboard {
    /// Year shown when an event does not carry one.
    #[serde(default = "default_year")]
    pub default_year: i32,
}

impl Default for Dashboard {
    fn default() -> Self {
        Self {
            default_year: default_year(),
        }
    }
}

fn listen() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 8050))
}

fn dataset() -> PathBuf {
    PathBuf::from("energy-data.csv")
}

fn open_browser() -> bool {
    true
}

fn default_year() -> i32 {
    2019
}

impl Config {
    pub fn load(path: &Path) -> Result<Self, Error> {
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }
}
