//! Build-time Configuration
//!
//! The client is configured the way a frontend build environment is: values
//! are baked in at compile time from environment variables, with defaults.

use std::fmt::Display;
use std::str::FromStr;

use tracing::{info, warn, Level};

const DEFAULT_API_URL: &str = "http://localhost:3000/api";
const DEFAULT_TOKEN_KEY: &str = "auth_token";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    /// REST backend root, without trailing slash
    pub api_url: &'static str,
    /// Local-storage key holding the bearer token
    pub token_key: &'static str,
    pub log_level: Level,
}

impl Config {
    pub fn load() -> Self {
        Self {
            api_url: trim_base(option_env!("PROJECTFLOW_API_URL").unwrap_or(DEFAULT_API_URL)),
            token_key: option_env!("PROJECTFLOW_TOKEN_KEY").unwrap_or(DEFAULT_TOKEN_KEY),
            log_level: try_load(option_env!("PROJECTFLOW_LOG"), default_log_level()),
        }
    }

    /// Describe where each value came from; called once logging is up
    pub fn report(&self) {
        if option_env!("PROJECTFLOW_API_URL").is_none() {
            info!("PROJECTFLOW_API_URL not set, using default: {}", DEFAULT_API_URL);
        }
        for warning in load_warnings(option_env!("PROJECTFLOW_LOG")) {
            warn!("{}, using {}", warning, self.log_level);
        }
        info!(api_url = self.api_url, token_key = self.token_key, level = %self.log_level, "config loaded");
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL,
            token_key: DEFAULT_TOKEN_KEY,
            log_level: default_log_level(),
        }
    }
}

/// `debug` for debug builds, `info` for release builds
pub fn default_log_level() -> Level {
    if cfg!(debug_assertions) {
        Level::DEBUG
    } else {
        Level::INFO
    }
}

fn trim_base(url: &'static str) -> &'static str {
    url.trim_end_matches('/')
}

/// Parse an optional raw value, falling back to `default` when absent or invalid
fn try_load<T: FromStr>(raw: Option<&str>, default: T) -> T {
    raw.and_then(|value| value.trim().parse().ok()).unwrap_or(default)
}

/// Why `raw` was not used for `key`, if it was set but invalid
fn parse_warning<T>(key: &str, raw: Option<&str>) -> Option<String>
where
    T: FromStr,
    T::Err: Display,
{
    let value = raw?;
    value.trim().parse::<T>().err().map(|e| format!("Invalid {key} value `{value}`: {e}"))
}

/// Problems with the build environment, reported once logging is up
fn load_warnings(log_raw: Option<&str>) -> Vec<String> {
    parse_warning::<Level>("PROJECTFLOW_LOG", log_raw).into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_try_load_parses_level() {
        assert_eq!(try_load(Some("warn"), Level::INFO), Level::WARN);
        assert_eq!(try_load(Some(" error "), Level::INFO), Level::ERROR);
    }

    #[test]
    fn test_try_load_falls_back() {
        assert_eq!(try_load(None, Level::INFO), Level::INFO);
        assert_eq!(try_load(Some("loud"), Level::INFO), Level::INFO);
    }

    #[test]
    fn test_invalid_level_is_reported() {
        let warnings = load_warnings(Some("loud"));
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].starts_with("Invalid PROJECTFLOW_LOG value `loud`"));
        assert!(load_warnings(Some("debug")).is_empty());
        assert!(load_warnings(None).is_empty());
    }

    #[test]
    fn test_trim_base_strips_trailing_slash() {
        assert_eq!(trim_base("http://api.test/api/"), "http://api.test/api");
        assert_eq!(trim_base("http://api.test/api"), "http://api.test/api");
    }
}
