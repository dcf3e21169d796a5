//! Client configuration: API key and base URL.
//!
//! Built once and never mutated. Request headers are derived from it per
//! request.

use secrecy::{ExposeSecret, SecretString};

use crate::error::ApiError;

pub const DEFAULT_BASE_URL: &str = "https://api.lexoffice.io/v1";

pub const API_KEY_ENV: &str = "LEXOFFICE_API_KEY";
pub const BASE_URL_ENV: &str = "LEXOFFICE_BASE_URL";

/// `Debug` prints the key as a redacted secret.
#[derive(Debug)]
pub struct ClientConfig {
    api_key: SecretString,
    base_url: String,
}

impl ClientConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: SecretString::new(api_key.into()),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Point the client at another deployment (or a mock). A trailing `/`
    /// is stripped.
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// Read `LEXOFFICE_API_KEY` (required) and `LEXOFFICE_BASE_URL`.
    pub fn from_env() -> Result<Self, ApiError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ApiError> {
        let api_key = lookup(API_KEY_ENV)
            .filter(|k| !k.trim().is_empty())
            .ok_or(ApiError::MissingConfig(API_KEY_ENV))?;
        let config = Self::new(api_key);
        Ok(match lookup(BASE_URL_ENV) {
            Some(url) if !url.trim().is_empty() => config.with_base_url(url.trim()),
            _ => config,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn authorization(&self) -> String {
        format!("Bearer {}", self.api_key.expose_secret())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_public_api() {
        let config = ClientConfig::new("key");
        assert_eq!(config.base_url(), "https://api.lexoffice.io/v1");
        assert_eq!(config.authorization(), "Bearer key");
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let config = ClientConfig::new("key").with_base_url("http://localhost:3000/v1/");
        assert_eq!(config.base_url(), "http://localhost:3000/v1");
    }

    #[test]
    fn debug_output_hides_key() {
        let config = ClientConfig::new("super-secret").with_base_url("http://localhost:3000/v1");
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("REDACTED"));
        assert!(rendered.contains("http://localhost:3000/v1"));
    }

    #[test]
    fn lookup_requires_api_key() {
        let err = ClientConfig::from_lookup(|_| None).unwrap_err();
        assert!(matches!(err, ApiError::MissingConfig(API_KEY_ENV)));

        let err = ClientConfig::from_lookup(|_| Some("  ".to_string())).unwrap_err();
        assert!(matches!(err, ApiError::MissingConfig(_)));
    }

    #[test]
    fn lookup_reads_optional_base_url() {
        let config = ClientConfig::from_lookup(|name| match name {
            API_KEY_ENV => Some("abc".to_string()),
            BASE_URL_ENV => Some("http://127.0.0.1:9999/v1/".to_string()),
            _ => None,
        })
        .unwrap();
        assert_eq!(config.base_url(), "http://127.0.0.1:9999/v1");

        let config = ClientConfig::from_lookup(|name| (name == API_KEY_ENV).then(|| "abc".to_string())).unwrap();
        assert_eq!(config.base_url(), DEFAULT_BASE_URL);
    }
}
