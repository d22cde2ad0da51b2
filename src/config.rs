//! Build-time application configuration.
//!
//! The WASM bundle has no process environment, so values are captured with
//! `option_env!` when the crate is compiled:
//!
//! - `CATALOG_API_BASE_URL`: backend address, default `http://localhost:8080`
//! - `CATALOG_LOG_LEVEL`: `error|warn|info|debug|trace`, default `info`

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use log::Level;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080";
pub const DEFAULT_LOG_LEVEL: Level = Level::Info;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub api_base_url: String,
    pub log_level: Level,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self { api_base_url: DEFAULT_API_BASE_URL.to_owned(), log_level: DEFAULT_LOG_LEVEL }
    }
}

impl AppConfig {
    /// Config baked in from the environment at compile time.
    pub fn from_build_env() -> Self {
        Self::from_values(option_env!("CATALOG_API_BASE_URL"), option_env!("CATALOG_LOG_LEVEL"))
    }

    /// Resolve config from raw optional values, falling back to defaults.
    pub fn from_values(api_base_url: Option<&str>, log_level: Option<&str>) -> Self {
        Self { api_base_url: parse_base_url(api_base_url), log_level: parse_log_level(log_level) }
    }
}

fn parse_base_url(raw: Option<&str>) -> String {
    match raw.map(str::trim).filter(|v| !v.is_empty()) {
        Some(url) => url.trim_end_matches('/').to_owned(),
        None => DEFAULT_API_BASE_URL.to_owned(),
    }
}

fn parse_log_level(raw: Option<&str>) -> Level {
    raw.and_then(|v| v.trim().parse().ok()).unwrap_or(DEFAULT_LOG_LEVEL)
}
