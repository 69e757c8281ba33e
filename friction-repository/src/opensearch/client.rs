//! OpenSearch client implementation.
//!
//! This module provides the concrete implementation of `DocumentStore`
//! using the OpenSearch Rust client.

use async_trait::async_trait;
use opensearch::{
    auth::Credentials as TransportCredentials,
    http::headers::{HeaderValue, AUTHORIZATION},
    http::request::JsonBody,
    http::response::Response,
    http::transport::{SingleNodeConnectionPool, TransportBuilder},
    indices::{IndicesCreateParts, IndicesDeleteParts, IndicesExistsParts, IndicesRefreshParts},
    BulkParts, CountParts, OpenSearch,
};
use serde_json::{json, Value};
use tracing::{debug, error, info, instrument, warn};

use crate::config::{Credentials, StoreConfig};
use crate::errors::StoreError;
use crate::interfaces::DocumentStore;
use crate::types::{BulkItemError, BulkSummary};

/// OpenSearch-backed document store.
///
/// # Example
///
/// ```ignore
/// use friction_repository::{Credentials, StoreConfig};
/// let config = StoreConfig::new("https://search.example.com:9200", Credentials::ApiKey(key));
/// let store = OpenSearchStore::new(&config)?;
///
/// if store.ping().await? {
///     store.create_index("error-logs", &index_body(RecordKind::ErrorLogs)).await?;
/// }
/// ```
pub struct OpenSearchStore {
    client: OpenSearch,
}

impl OpenSearchStore {
    /// Build a client for the configured endpoint.
    ///
    /// The configuration is validated first, so a placeholder credential is
    /// reported before any request is made.
    ///
    /// # Returns
    ///
    /// * `Ok(OpenSearchStore)` - A new client instance
    /// * `Err(StoreError::ConfigError)` - If the configuration is invalid
    /// * `Err(StoreError::ConnectionError)` - If the transport cannot be built
    pub fn new(config: &StoreConfig) -> Result<Self, StoreError> {
        let url = config.validate()?;

        let conn_pool = SingleNodeConnectionPool::new(url.clone());
        let mut builder = TransportBuilder::new(conn_pool).disable_proxy();

        builder = match &config.credentials {
            Credentials::ApiKey(key) => {
                let value = HeaderValue::from_str(&format!("ApiKey {}", key.trim()))
                    .map_err(|e| StoreError::config(format!("API key is not a valid header value: {}", e)))?;
                builder.header(AUTHORIZATION, value)
            }
            Credentials::Basic { username, password } => {
                builder.auth(TransportCredentials::Basic(username.clone(), password.clone()))
            }
            Credentials::Anonymous => builder,
        };

        let transport = builder
            .build()
            .map_err(|e| StoreError::connection(e.to_string()))?;

        info!(url = %url, credentials = ?config.credentials, "Created OpenSearch client");

        Ok(Self {
            client: OpenSearch::new(transport),
        })
    }

    /// Summarize a bulk response body.
    ///
    /// Every entry in `items` is one submitted document; an entry carrying an
    /// `error` or a non-2xx `status` was rejected.
    fn parse_bulk_response(body: &Value, submitted: usize) -> Result<BulkSummary, StoreError> {
        let items = body
            .get("items")
            .and_then(|items| items.as_array())
            .ok_or_else(|| StoreError::parse("Bulk response has no items array"))?;

        if items.len() != submitted {
            warn!(
                submitted = submitted,
                acknowledged = items.len(),
                "Bulk response item count differs from documents submitted"
            );
        }

        let mut errors = Vec::new();
        for (position, item) in items.iter().enumerate() {
            // Each item is keyed by its action name, e.g. {"index": {...}}.
            let Some(result) = item.as_object().and_then(|o| o.values().next()) else {
                continue;
            };

            let status = result
                .get("status")
                .and_then(|s| s.as_u64())
                .and_then(|s| u16::try_from(s).ok())
                .unwrap_or(0);

            let rejected = result.get("error").is_some() || !(200..300).contains(&status);
            if rejected {
                errors.push(BulkItemError {
                    position,
                    status,
                    reason: Self::item_error_reason(result.get("error")),
                });
            }
        }

        // Documents the store never acknowledged count as rejected.
        let unacknowledged = submitted.saturating_sub(items.len());
        let failed = (errors.len() + unacknowledged).min(submitted);

        Ok(BulkSummary {
            total: submitted,
            succeeded: submitted - failed,
            failed,
            errors,
        })
    }

    fn item_error_reason(error: Option<&Value>) -> String {
        match error {
            Some(Value::Object(err)) => {
                let kind = err.get("type").and_then(|t| t.as_str()).unwrap_or("unknown");
                match err.get("reason").and_then(|r| r.as_str()) {
                    Some(reason) => format!("{}: {}", kind, reason),
                    None => kind.to_string(),
                }
            }
            Some(other) => other.to_string(),
            None => "rejected without an error body".to_string(),
        }
    }

    /// Turn a non-success response into an error built by `make_error`.
    async fn ensure_success(
        response: Response,
        action: &str,
        make_error: fn(String) -> StoreError,
    ) -> Result<Response, StoreError> {
        let status = response.status_code();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        error!(status = %status, body = %body, action = action, "Request failed");
        Err(make_error(format!("{} failed with status {}: {}", action, status, body)))
    }
}

#[async_trait]
impl DocumentStore for OpenSearchStore {
    #[instrument(skip(self))]
    async fn ping(&self) -> Result<bool, StoreError> {
        let response = self
            .client
            .ping()
            .send()
            .await
            .map_err(|e| StoreError::connection(e.to_string()))?;

        let status = response.status_code();
        debug!(status = %status, "Ping answered");
        Ok(status.is_success())
    }

    #[instrument(skip(self))]
    async fn index_exists(&self, index: &str) -> Result<bool, StoreError> {
        let response = self
            .client
            .indices()
            .exists(IndicesExistsParts::Index(&[index]))
            .send()
            .await
            .map_err(|e| StoreError::query(e.to_string()))?;

        match response.status_code().as_u16() {
            200 => Ok(true),
            404 => Ok(false),
            status => Err(StoreError::query(format!(
                "Existence check for '{}' returned status {}",
                index, status
            ))),
        }
    }

    #[instrument(skip(self))]
    async fn delete_index(&self, index: &str) -> Result<(), StoreError> {
        let response = self
            .client
            .indices()
            .delete(IndicesDeleteParts::Index(&[index]))
            .send()
            .await
            .map_err(|e| StoreError::index_deletion(e.to_string()))?;

        Self::ensure_success(response, "Index deletion", StoreError::IndexDeletionError).await?;
        debug!(index = %index, "Index deleted");
        Ok(())
    }

    #[instrument(skip(self, body))]
    async fn create_index(&self, index: &str, body: &Value) -> Result<(), StoreError> {
        let response = self
            .client
            .indices()
            .create(IndicesCreateParts::Index(index))
            .body(body.clone())
            .send()
            .await
            .map_err(|e| StoreError::index_creation(e.to_string()))?;

        Self::ensure_success(response, "Index creation", StoreError::IndexCreationError).await?;
        debug!(index = %index, "Index created");
        Ok(())
    }

    #[instrument(skip(self, documents), fields(document_count = documents.len()))]
    async fn bulk_index(&self, index: &str, documents: &[Value]) -> Result<BulkSummary, StoreError> {
        if documents.is_empty() {
            return Ok(BulkSummary::all_succeeded(0));
        }

        let mut body: Vec<JsonBody<Value>> = Vec::with_capacity(documents.len() * 2);
        for doc in documents {
            body.push(json!({"index": {}}).into());
            body.push(doc.clone().into());
        }

        let response = self
            .client
            .bulk(BulkParts::Index(index))
            .body(body)
            .send()
            .await
            .map_err(|e| StoreError::bulk_index(e.to_string()))?;

        let response = Self::ensure_success(response, "Bulk write", StoreError::BulkIndexError).await?;
        let response_body: Value = response
            .json()
            .await
            .map_err(|e| StoreError::parse(e.to_string()))?;

        let summary = Self::parse_bulk_response(&response_body, documents.len())?;
        if summary.has_failures() {
            warn!(
                index = %index,
                failed = summary.failed,
                first_error = ?summary.errors.first().map(|e| &e.reason),
                "Bulk write rejected some documents"
            );
        }
        Ok(summary)
    }

    #[instrument(skip(self))]
    async fn refresh_index(&self, index: &str) -> Result<(), StoreError> {
        let response = self
            .client
            .indices()
            .refresh(IndicesRefreshParts::Index(&[index]))
            .send()
            .await
            .map_err(|e| StoreError::query(e.to_string()))?;

        Self::ensure_success(response, "Index refresh", StoreError::QueryError).await?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn count(&self, index: &str) -> Result<u64, StoreError> {
        let response = self
            .client
            .count(CountParts::Index(&[index]))
            .send()
            .await
            .map_err(|e| StoreError::query(e.to_string()))?;

        let response = Self::ensure_success(response, "Count", StoreError::QueryError).await?;
        let body: Value = response
            .json()
            .await
            .map_err(|e| StoreError::parse(e.to_string()))?;

        body.get("count")
            .and_then(|c| c.as_u64())
            .ok_or_else(|| StoreError::parse(format!("Count response for '{}' has no count", index)))
    }
}
