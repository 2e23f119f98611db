// Runtime settings
//
// Read from the process environment (optionally seeded from `.env`), then
// overridden by CLI flags in main.

use std::path::PathBuf;
use std::time::Duration;

use super::constants::{
    DEFAULT_BIND_HOST, DEFAULT_MODEL, DEFAULT_PORT, DEFAULT_RESULTS_URL, DEFAULT_ROSTER_URL,
};
use crate::errors::ConfigError;

pub const API_KEY_VAR: &str = "GOOGLE_API_KEY";
pub const PORT_VAR: &str = "PORT";
pub const MODEL_VAR: &str = "GEMINI_MODEL";
pub const ROSTER_URL_VAR: &str = "ROSTER_URL";
pub const RESULTS_URL_VAR: &str = "RESULTS_URL";
pub const CONTEXT_PATH_VAR: &str = "CONTEXT_PATH";
pub const REFRESH_VAR: &str = "SCRAPE_REFRESH_SECS";

#[derive(Clone)]
pub struct Settings {
    /// Gemini API key
    pub api_key: String,
    pub bind_host: String,
    pub port: u16,
    pub model: String,
    pub roster_url: String,
    pub results_url: String,
    /// Static context file; `None` uses the bundled resource
    pub context_path: Option<PathBuf>,
    /// Re-scrape interval; `None` scrapes once at startup
    pub refresh_interval: Option<Duration>,
}

// Keeps the key out of logs.
impl std::fmt::Debug for Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Settings")
            .field("api_key", &"<redacted>")
            .field("bind_host", &self.bind_host)
            .field("port", &self.port)
            .field("model", &self.model)
            .field("roster_url", &self.roster_url)
            .field("results_url", &self.results_url)
            .field("context_path", &self.context_path)
            .field("refresh_interval", &self.refresh_interval)
            .finish()
    }
}

impl Settings {
    /// Load settings from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load settings through an arbitrary lookup, so tests never touch real env vars.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Blank values count as unset, same as an empty line in .env.
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let api_key = get(API_KEY_VAR).ok_or(ConfigError::MissingCredential(API_KEY_VAR))?;

        let port = match get(PORT_VAR) {
            Some(raw) => parse_port(&raw)?,
            None => DEFAULT_PORT,
        };

        let refresh_interval = match get(REFRESH_VAR) {
            Some(raw) => parse_refresh(&raw)?,
            None => None,
        };

        Ok(Self {
            api_key: api_key.trim().to_string(),
            bind_host: DEFAULT_BIND_HOST.to_string(),
            port,
            model: get(MODEL_VAR).unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            roster_url: get(ROSTER_URL_VAR).unwrap_or_else(|| DEFAULT_ROSTER_URL.to_string()),
            results_url: get(RESULTS_URL_VAR).unwrap_or_else(|| DEFAULT_RESULTS_URL.to_string()),
            context_path: get(CONTEXT_PATH_VAR).map(PathBuf::from),
            refresh_interval,
        })
    }

    /// `host:port` string for the listener
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.bind_host, self.port)
    }
}

fn parse_port(raw: &str) -> Result<u16, ConfigError> {
    raw.trim()
        .parse::<u16>()
        .map_err(|e| ConfigError::InvalidValue {
            key: PORT_VAR,
            value: raw.to_string(),
            reason: e.to_string(),
        })
}

/// Zero disables refresh.
fn parse_refresh(raw: &str) -> Result<Option<Duration>, ConfigError> {
    let secs = raw
        .trim()
        .parse::<u64>()
        .map_err(|e| ConfigError::InvalidValue {
            key: REFRESH_VAR,
            value: raw.to_string(),
            reason: e.to_string(),
        })?;
    Ok((secs > 0).then(|| Duration::from_secs(secs)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_with_only_api_key() {
        let settings = Settings::from_lookup(lookup(&[(API_KEY_VAR, "secret")])).unwrap();
        assert_eq!(settings.api_key, "secret");
        assert_eq!(settings.port, DEFAULT_PORT);
        assert_eq!(settings.model, DEFAULT_MODEL);
        assert_eq!(settings.roster_url, DEFAULT_ROSTER_URL);
        assert_eq!(settings.results_url, DEFAULT_RESULTS_URL);
        assert!(settings.context_path.is_none());
        assert!(settings.refresh_interval.is_none());
        assert_eq!(settings.bind_address(), "0.0.0.0:5001");
    }

    #[test]
    fn test_missing_api_key_is_fatal() {
        let err = Settings::from_lookup(lookup(&[(PORT_VAR, "8080")])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingCredential(API_KEY_VAR)));
    }

    #[test]
    fn test_blank_api_key_counts_as_missing() {
        let err = Settings::from_lookup(lookup(&[(API_KEY_VAR, "   ")])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingCredential(_)));
    }

    #[test]
    fn test_invalid_port_is_rejected() {
        let err =
            Settings::from_lookup(lookup(&[(API_KEY_VAR, "k"), (PORT_VAR, "http")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { key: PORT_VAR, .. }));
    }

    #[test]
    fn test_overrides() {
        let settings = Settings::from_lookup(lookup(&[
            (API_KEY_VAR, "k"),
            (PORT_VAR, "8080"),
            (MODEL_VAR, "gemini-pro"),
            (ROSTER_URL_VAR, "http://localhost/roster"),
            (RESULTS_URL_VAR, "http://localhost/results"),
            (CONTEXT_PATH_VAR, "/etc/pantera/context.toml"),
            (REFRESH_VAR, "600"),
        ]))
        .unwrap();
        assert_eq!(settings.port, 8080);
        assert_eq!(settings.model, "gemini-pro");
        assert_eq!(settings.roster_url, "http://localhost/roster");
        assert_eq!(settings.results_url, "http://localhost/results");
        assert_eq!(
            settings.context_path,
            Some(PathBuf::from("/etc/pantera/context.toml"))
        );
        assert_eq!(settings.refresh_interval, Some(Duration::from_secs(600)));
    }

    #[test]
    fn test_zero_refresh_disables() {
        let settings =
            Settings::from_lookup(lookup(&[(API_KEY_VAR, "k"), (REFRESH_VAR, "0")])).unwrap();
        assert!(settings.refresh_interval.is_none());
    }

    #[test]
    fn test_debug_redacts_key() {
        let settings = Settings::from_lookup(lookup(&[(API_KEY_VAR, "super-secret")])).unwrap();
        let rendered = format!("{:?}", settings);
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("<redacted>"));
    }
}
