//! Client configuration.
//!
//! Defaults match a page served next to its API: requests go to `/api` and
//! no anti-forgery token is sent until the host provides one.

use serde::Deserialize;

pub const DEFAULT_BASE_URL: &str = "/api";
pub const ENV_BASE_URL: &str = "GESTAO_API_BASE_URL";
pub const ENV_CSRF_TOKEN: &str = "GESTAO_CSRF_TOKEN";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub base_url: String,
    /// Sent as `x-csrftoken` on mutating requests.
    pub csrf_token: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            csrf_token: None,
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            csrf_token: None,
        }
    }

    pub fn with_csrf_token(mut self, token: impl Into<String>) -> Self {
        self.csrf_token = Some(token.into());
        self
    }

    /// Read `GESTAO_API_BASE_URL` and `GESTAO_CSRF_TOKEN`, falling back to
    /// the defaults for anything unset or empty.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        Self {
            base_url: non_empty(ENV_BASE_URL).unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            csrf_token: non_empty(ENV_CSRF_TOKEN),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_api() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "/api");
        assert!(config.csrf_token.is_none());
    }

    #[test]
    fn deserialize_fills_missing_fields() {
        let config: ClientConfig = serde_json::from_str(r#"{"csrf_token":"abc"}"#).unwrap();
        assert_eq!(config.base_url, "/api");
        assert_eq!(config.csrf_token.as_deref(), Some("abc"));
    }

    #[test]
    fn lookup_ignores_empty_values() {
        let config = ClientConfig::from_lookup(|key| match key {
            ENV_BASE_URL => Some("http://localhost:8000/api".to_string()),
            ENV_CSRF_TOKEN => Some("  ".to_string()),
            _ => None,
        });
        assert_eq!(config.base_url, "http://localhost:8000/api");
        assert!(config.csrf_token.is_none());
    }

    #[test]
    fn lookup_defaults_when_unset() {
        assert_eq!(ClientConfig::from_lookup(|_| None), ClientConfig::default());
    }
}
