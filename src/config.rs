//! Configuration handling for the TUI

use crate::api::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const ENV_API_URL: &str = "PAGEGEN_API_URL";
pub const ENV_PAGE_FILE: &str = "PAGEGEN_PAGE_FILE";
pub const ENV_STRICT_LAYOUT: &str = "PAGEGEN_STRICT_LAYOUT";

/// User configuration for the TUI
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct TuiConfig {
    /// Base URL of the users/posts API
    pub api_base_url: Option<String>,
    /// JSON page layout replacing the built-in one
    pub page_file: Option<PathBuf>,
    /// Refuse to start when the page has unknown node kinds
    pub strict_layout: Option<bool>,
    /// Per-request timeout
    pub request_timeout_secs: Option<u64>,
}

impl TuiConfig {
    fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("dev", "pagegen", "pagegen-tui")
    }

    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Directory for the log file
    pub fn data_dir() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.data_dir().to_path_buf())
    }

    /// Load configuration from file, then apply environment overrides
    pub fn load() -> Result<Self> {
        let config = match Self::config_path() {
            Some(path) if path.exists() => Self::load_from(&path)?,
            _ => Self::default(),
        };
        Ok(config.with_overrides(|name| std::env::var(name).ok()))
    }

    /// Load configuration from a specific file
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config {}", path.display()))?;
        Ok(config)
    }

    /// Apply `PAGEGEN_*` variables looked up through `lookup`
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(url) = lookup(ENV_API_URL).filter(|v| !v.trim().is_empty()) {
            self.api_base_url = Some(url);
        }
        if let Some(file) = lookup(ENV_PAGE_FILE).filter(|v| !v.trim().is_empty()) {
            self.page_file = Some(PathBuf::from(file));
        }
        if let Some(raw) = lookup(ENV_STRICT_LAYOUT) {
            match parse_flag(&raw) {
                Some(strict) => self.strict_layout = Some(strict),
                None => tracing::warn!(value = %raw, "ignoring invalid {ENV_STRICT_LAYOUT}"),
            }
        }
        self
    }

    pub fn api_base_url(&self) -> &str {
        self.api_base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }

    pub fn request_timeout(&self) -> Duration {
        self.request_timeout_secs
            .map_or(DEFAULT_TIMEOUT, Duration::from_secs)
    }

    pub fn strict_layout(&self) -> bool {
        self.strict_layout.unwrap_or(false)
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
