// src/config.rs
//
// Runtime configuration for a dashboard session.

use std::time::Duration;

use crate::domain::DateNormalization;
use crate::error::{AppError, AppResult};

pub const ENV_API_URL: &str = "EMPLOYEE_API_URL";
pub const ENV_API_TIMEOUT_SECS: &str = "EMPLOYEE_API_TIMEOUT_SECS";
pub const ENV_TOAST_LIFETIME_MS: &str = "EMPLOYEE_TOAST_LIFETIME_MS";
pub const ENV_DATE_NORMALIZATION: &str = "EMPLOYEE_DATE_NORMALIZATION";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardConfig {
    /// Root of the employees API, without the `/employees` suffix
    pub api_base_url: String,
    /// Transport timeout for every remote call
    pub request_timeout: Duration,
    /// How long a notification stays before dismissing itself
    pub notification_lifetime: Duration,
    pub date_normalization: DateNormalization,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:3333".to_string(),
            request_timeout: Duration::from_secs(30),
            notification_lifetime: Duration::from_millis(3000),
            date_normalization: DateNormalization::default(),
        }
    }
}

impl DashboardConfig {
    /// Defaults overridden by whatever is set in the environment.
    pub fn from_env() -> AppResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as `from_env`, reading variables through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup(ENV_API_URL) {
            config.api_base_url = url;
        }
        if let Some(raw) = lookup(ENV_API_TIMEOUT_SECS) {
            config.request_timeout = Duration::from_secs(parse_number(ENV_API_TIMEOUT_SECS, &raw)?);
        }
        if let Some(raw) = lookup(ENV_TOAST_LIFETIME_MS) {
            config.notification_lifetime =
                Duration::from_millis(parse_number(ENV_TOAST_LIFETIME_MS, &raw)?);
        }
        if let Some(raw) = lookup(ENV_DATE_NORMALIZATION) {
            config.date_normalization = raw
                .parse()
                .map_err(|e| AppError::Config(format!("{}: {}", ENV_DATE_NORMALIZATION, e)))?;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> AppResult<()> {
        let url = self.api_base_url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(AppError::Config(format!(
                "{} must be an http(s) URL, got '{}'",
                ENV_API_URL, self.api_base_url
            )));
        }
        if self.request_timeout.is_zero() {
            return Err(AppError::Config(format!(
                "{} must be greater than zero",
                ENV_API_TIMEOUT_SECS
            )));
        }
        Ok(())
    }
}

fn parse_number(key: &str, raw: &str) -> AppResult<u64> {
    raw.trim()
        .parse()
        .map_err(|_| AppError::Config(format!("{} must be a whole number, got '{}'", key, raw)))
}
