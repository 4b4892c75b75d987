use anyhow::{Context, Result};
use kauri_import::CustomRule;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_CONFIG_FILE: &str = "kauri.toml";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory scanned for `.csv` statement exports.
    pub statements_dir: PathBuf,
    /// Classifications below this confidence are listed for manual review.
    pub review_threshold: f32,
    /// Give up waiting on slow statement files after this many seconds.
    pub ingest_timeout_secs: Option<u64>,
    pub custom_rules: Vec<CustomRule>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            statements_dir: PathBuf::from("statements"),
            review_threshold: 0.5,
            ingest_timeout_secs: None,
            custom_rules: Vec::new(),
        }
    }
}

impl Config {
    pub fn ingest_timeout(&self) -> Option<Duration> {
        self.ingest_timeout_secs.map(Duration::from_secs)
    }
}

pub fn parse_config(s: &str) -> Result<Config> {
    toml::from_str(s).context("parse config")
}

/// Loads `path` when given, otherwise `kauri.toml` in the working directory
/// if it exists, otherwise the defaults.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => {
            let p = PathBuf::from(DEFAULT_CONFIG_FILE);
            if !p.exists() {
                return Ok(Config::default());
            }
            p
        }
    };
    let s = fs::read_to_string(&path).with_context(|| format!("read {}", path.display()))?;
    parse_config(&s).with_context(|| format!("in {}", path.display()))
}
