//! Connection settings for the document store.

use std::fmt;
use url::Url;

use crate::errors::StoreError;

/// Values shipped in sample configs that must be replaced before a run.
const PLACEHOLDER_VALUES: &[&str] = &["changeme", "change-me", "xxx", "todo"];

/// How the loader authenticates against the document store.
#[derive(Clone, PartialEq)]
pub enum Credentials {
    /// Encoded API key, sent as `Authorization: ApiKey <key>`.
    ApiKey(String),
    /// HTTP basic authentication.
    Basic { username: String, password: String },
    /// No authentication, for local development clusters.
    Anonymous,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Credentials::ApiKey(_) => f.write_str("ApiKey(<redacted>)"),
            Credentials::Basic { username, .. } => f
                .debug_struct("Basic")
                .field("username", username)
                .field("password", &"<redacted>")
                .finish(),
            Credentials::Anonymous => f.write_str("Anonymous"),
        }
    }
}

/// Endpoint and credentials for the document store.
#[derive(Debug, Clone, PartialEq)]
pub struct StoreConfig {
    /// Store endpoint, e.g. `https://search.example.com:9200`.
    pub url: String,
    pub credentials: Credentials,
}

impl StoreConfig {
    pub fn new(url: impl Into<String>, credentials: Credentials) -> Self {
        Self {
            url: url.into(),
            credentials,
        }
    }

    /// Check the settings before any connection is attempted.
    ///
    /// # Returns
    ///
    /// * `Ok(Url)` - The parsed endpoint
    /// * `Err(StoreError::ConfigError)` - Naming the first missing, malformed
    ///   or placeholder value
    pub fn validate(&self) -> Result<Url, StoreError> {
        require_value("endpoint URL", &self.url)?;

        let url = Url::parse(self.url.trim())
            .map_err(|e| StoreError::config(format!("Invalid endpoint URL '{}': {}", self.url, e)))?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(StoreError::config(format!(
                "Endpoint URL must use http or https, got '{}'",
                url.scheme()
            )));
        }

        if url.host_str().map(is_placeholder).unwrap_or(true) {
            return Err(StoreError::config(format!(
                "Endpoint URL '{}' has no real host; replace the placeholder",
                self.url
            )));
        }

        match &self.credentials {
            Credentials::ApiKey(key) => require_value("API key", key)?,
            Credentials::Basic { username, password } => {
                require_value("username", username)?;
                require_value("password", password)?;
            }
            Credentials::Anonymous => {}
        }

        Ok(url)
    }

    /// The endpoint with any embedded username and password removed, for
    /// logs and console output.
    pub fn redacted_url(&self) -> String {
        match Url::parse(self.url.trim()) {
            Ok(mut url) => {
                // Only fails for URLs that cannot carry credentials at all.
                let _ = url.set_username("");
                let _ = url.set_password(None);
                url.to_string()
            }
            Err(_) => "<invalid url>".to_string(),
        }
    }
}

/// Whether a configured value is empty or an unreplaced sample value such as
/// `your_api_key` or `YOUR_CLOUD_ID_HERE`.
pub fn is_placeholder(value: &str) -> bool {
    let normalized = value.trim().to_ascii_lowercase();

    normalized.is_empty()
        || normalized.starts_with("your_")
        || normalized.starts_with("your-")
        || normalized.ends_with("_here")
        || (normalized.starts_with('<') && normalized.ends_with('>'))
        || PLACEHOLDER_VALUES.contains(&normalized.as_str())
}

fn require_value(name: &str, value: &str) -> Result<(), StoreError> {
    if value.trim().is_empty() {
        return Err(StoreError::config(format!("{} is not set", name)));
    }
    if is_placeholder(value) {
        return Err(StoreError::config(format!(
            "{} is still the placeholder '{}'; replace it with a real value",
            name, value
        )));
    }
    Ok(())
}
