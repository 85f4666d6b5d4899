//! API client configuration.

use std::time::Duration;

use reqwest::Url;

use crate::error::ConfigError;

pub const API_URL_ENV: &str = "STOREDESK_API_URL";
pub const API_TOKEN_ENV: &str = "STOREDESK_API_TOKEN";
pub const API_TIMEOUT_ENV: &str = "STOREDESK_API_TIMEOUT_SECS";

pub const DEFAULT_API_URL: &str = "http://localhost:8080";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: Url,
    /// Bearer token sent with every request, if set.
    pub token: Option<String>,
    pub timeout: Duration,
}

impl ApiConfig {
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: parse_base_url(base_url)?,
            token: None,
            timeout: DEFAULT_TIMEOUT,
        })
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Read `STOREDESK_API_URL`, `STOREDESK_API_TOKEN` and
    /// `STOREDESK_API_TIMEOUT_SECS`, falling back to defaults when unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an injectable variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let url = lookup(API_URL_ENV)
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let mut config = Self::new(&url)?;

        if let Some(token) = lookup(API_TOKEN_ENV).filter(|t| !t.trim().is_empty()) {
            config = config.with_token(token.trim());
        }

        if let Some(raw) = lookup(API_TIMEOUT_ENV) {
            let secs: u64 = raw
                .trim()
                .parse()
                .ok()
                .filter(|s| *s > 0)
                .ok_or_else(|| ConfigError::InvalidTimeout(raw.clone()))?;
            config = config.with_timeout(Duration::from_secs(secs));
        }

        Ok(config)
    }
}

fn parse_base_url(value: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(value.trim()).map_err(|e| ConfigError::InvalidUrl {
        value: value.to_string(),
        reason: e.to_string(),
    })?;
    if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
        return Err(ConfigError::InvalidUrl {
            value: value.to_string(),
            reason: "expected an http(s) base URL".to_string(),
        });
    }
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = ApiConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.base_url.as_str(), "http://localhost:8080/");
        assert_eq!(config.token, None);
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
    }

    #[test]
    fn reads_all_variables() {
        let config = ApiConfig::from_lookup(lookup(&[
            (API_URL_ENV, "https://shop.example.com/api/"),
            (API_TOKEN_ENV, " abc123 "),
            (API_TIMEOUT_ENV, "3"),
        ]))
        .unwrap();
        assert_eq!(config.base_url.as_str(), "https://shop.example.com/api/");
        assert_eq!(config.token.as_deref(), Some("abc123"));
        assert_eq!(config.timeout, Duration::from_secs(3));
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(
            ApiConfig::from_lookup(lookup(&[(API_URL_ENV, "not a url")])),
            Err(ConfigError::InvalidUrl { .. })
        ));
        assert!(matches!(
            ApiConfig::from_lookup(lookup(&[(API_URL_ENV, "ftp://files.example.com")])),
            Err(ConfigError::InvalidUrl { .. })
        ));
        assert!(matches!(
            ApiConfig::from_lookup(lookup(&[(API_TIMEOUT_ENV, "0")])),
            Err(ConfigError::InvalidTimeout(_))
        ));
        assert!(matches!(
            ApiConfig::from_lookup(lookup(&[(API_TIMEOUT_ENV, "soon")])),
            Err(ConfigError::InvalidTimeout(_))
        ));
    }
}
