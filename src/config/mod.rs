#[cfg(feature = "cli")]
pub mod cli;
pub mod suite_config;

use crate::utils::error::{HarnessError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const DEFAULT_BASE_URL: &str = "http://localhost:5555";
pub const DEFAULT_LOG_FILE: &str = "app.log";

/// Dispatcher 的固定設定：建立後不再變動
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HarnessConfig {
    base_url: String,
    headers: BTreeMap<String, String>,
    log_path: String,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        let mut headers = BTreeMap::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());

        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            headers,
            log_path: DEFAULT_LOG_FILE.to_string(),
        }
    }
}

impl HarnessConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::default().with_base_url(base_url)
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_log_path(mut self, log_path: impl Into<String>) -> Self {
        self.log_path = log_path.into();
        self
    }

    /// 額外的標頭；Content-Type 不可被覆寫
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        if !name.eq_ignore_ascii_case("content-type") {
            self.headers.insert(name, value.into());
        }
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn headers(&self) -> &BTreeMap<String, String> {
        &self.headers
    }

    pub fn log_path(&self) -> &str {
        &self.log_path
    }

    /// `http://host:5555` + `users/3` → `http://host:5555/users/3`
    pub fn url_for(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

impl Validate for HarnessConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_url("target.base_url", &self.base_url)?;
        validation::validate_path("target.log_file", &self.log_path)?;

        for name in self.headers.keys() {
            validation::validate_non_empty_string("target.headers", name)?;
        }

        if !self.headers.contains_key("Content-Type") {
            return Err(HarnessError::MissingConfigError {
                field: "target.headers.Content-Type".to_string(),
            });
        }

        Ok(())
    }
}
