//! Connection settings read from the environment.

use std::env;

use friction_repository::{Credentials, StoreConfig};

use crate::LoaderError;

/// Environment variable holding the store endpoint.
pub const URL_VAR: &str = "OPENSEARCH_URL";
/// Environment variable holding an encoded API key.
pub const API_KEY_VAR: &str = "OPENSEARCH_API_KEY";
/// Environment variables for basic authentication.
pub const USERNAME_VAR: &str = "OPENSEARCH_USERNAME";
pub const PASSWORD_VAR: &str = "OPENSEARCH_PASSWORD";
/// Set to `true` to connect without credentials.
pub const ALLOW_ANONYMOUS_VAR: &str = "FRICTION_ALLOW_ANONYMOUS";

/// Validated loader settings.
#[derive(Debug, Clone)]
pub struct Settings {
    pub store: StoreConfig,
}

impl Settings {
    /// Read settings from the process environment.
    ///
    /// # Environment Variables
    ///
    /// - `OPENSEARCH_URL`: store endpoint (required)
    /// - `OPENSEARCH_API_KEY`: encoded API key, or
    /// - `OPENSEARCH_USERNAME` / `OPENSEARCH_PASSWORD`: basic authentication
    /// - `FRICTION_ALLOW_ANONYMOUS`: `true` to allow no credentials at all
    ///
    /// `url_override` takes precedence over `OPENSEARCH_URL`.
    pub fn from_env(url_override: Option<String>) -> Result<Self, LoaderError> {
        Self::from_lookup(|name| env::var(name).ok(), url_override)
    }

    /// Read settings through `lookup` and validate them.
    pub fn from_lookup<F>(lookup: F, url_override: Option<String>) -> Result<Self, LoaderError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let url = url_override
            .or_else(|| lookup(URL_VAR))
            .ok_or_else(|| LoaderError::config(format!("{} is not set", URL_VAR)))?;

        let api_key = lookup(API_KEY_VAR).filter(|v| !v.is_empty());
        let username = lookup(USERNAME_VAR).filter(|v| !v.is_empty());
        let allow_anonymous = lookup(ALLOW_ANONYMOUS_VAR)
            .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        let credentials = match (api_key, username) {
            (Some(_), Some(_)) => {
                return Err(LoaderError::config(format!(
                    "Both {} and {} are set; configure exactly one credential",
                    API_KEY_VAR, USERNAME_VAR
                )))
            }
            (Some(key), None) => Credentials::ApiKey(key),
            (None, Some(username)) => Credentials::Basic {
                username,
                password: lookup(PASSWORD_VAR).unwrap_or_default(),
            },
            (None, None) if allow_anonymous => Credentials::Anonymous,
            (None, None) => {
                return Err(LoaderError::config(format!(
                    "No credentials configured; set {} or {}/{}",
                    API_KEY_VAR, USERNAME_VAR, PASSWORD_VAR
                )))
            }
        };

        let settings = Self {
            store: StoreConfig::new(url, credentials),
        };
        settings.validate()?;
        Ok(settings)
    }

    /// Reject missing, malformed or placeholder values.
    pub fn validate(&self) -> Result<(), LoaderError> {
        self.store
            .validate()
            .map(|_| ())
            .map_err(LoaderError::from_store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_api_key_settings() {
        let settings = Settings::from_lookup(
            lookup_from(&[
                (URL_VAR, "https://search.example.com:9200"),
                (API_KEY_VAR, "a2V5aWQ6c2VjcmV0"),
            ]),
            None,
        )
        .unwrap();

        assert_eq!(settings.store.url, "https://search.example.com:9200");
        assert_eq!(
            settings.store.credentials,
            Credentials::ApiKey("a2V5aWQ6c2VjcmV0".to_string())
        );
    }

    #[test]
    fn test_basic_auth_settings() {
        let settings = Settings::from_lookup(
            lookup_from(&[
                (URL_VAR, "http://localhost:9200"),
                (USERNAME_VAR, "admin"),
                (PASSWORD_VAR, "Str0ng-pass"),
            ]),
            None,
        )
        .unwrap();

        assert!(matches!(settings.store.credentials, Credentials::Basic { .. }));
    }

    #[test]
    fn test_url_override_wins() {
        let settings = Settings::from_lookup(
            lookup_from(&[
                (URL_VAR, "http://localhost:9200"),
                (ALLOW_ANONYMOUS_VAR, "true"),
            ]),
            Some("http://search.internal:9200".to_string()),
        )
        .unwrap();

        assert_eq!(settings.store.url, "http://search.internal:9200");
        assert_eq!(settings.store.credentials, Credentials::Anonymous);
    }

    #[test]
    fn test_missing_url() {
        let err = Settings::from_lookup(lookup_from(&[(API_KEY_VAR, "a2V5")]), None).unwrap_err();
        assert!(matches!(err, LoaderError::ConfigError(ref msg) if msg.contains(URL_VAR)));
    }

    #[test]
    fn test_missing_credentials() {
        let err = Settings::from_lookup(lookup_from(&[(URL_VAR, "http://localhost:9200")]), None)
            .unwrap_err();
        assert!(matches!(err, LoaderError::ConfigError(ref msg) if msg.contains("No credentials")));
    }

    #[test]
    fn test_placeholder_api_key() {
        let err = Settings::from_lookup(
            lookup_from(&[
                (URL_VAR, "https://search.example.com"),
                (API_KEY_VAR, "your_api_key"),
            ]),
            None,
        )
        .unwrap_err();

        assert!(matches!(err, LoaderError::ConfigError(ref msg) if msg.contains("placeholder")));
    }

    #[test]
    fn test_conflicting_credentials() {
        let err = Settings::from_lookup(
            lookup_from(&[
                (URL_VAR, "https://search.example.com"),
                (API_KEY_VAR, "a2V5"),
                (USERNAME_VAR, "admin"),
            ]),
            None,
        )
        .unwrap_err();

        assert!(matches!(err, LoaderError::ConfigError(_)));
    }
}
