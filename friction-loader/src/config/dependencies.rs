//! Store construction and the connectivity check.

use tracing::{error, info};

use friction_repository::{DocumentStore, OpenSearchStore, StoreConfig};

use crate::LoaderError;

/// Build the OpenSearch store and confirm it answers.
///
/// # Returns
///
/// * `Ok(OpenSearchStore)` - A reachable store
/// * `Err(LoaderError::ConfigError)` - If the settings are invalid
/// * `Err(LoaderError::ConnectionError)` - If the store does not answer
pub async fn connect(config: &StoreConfig) -> Result<OpenSearchStore, LoaderError> {
    info!(url = %config.redacted_url(), "Connecting to OpenSearch");

    let store = OpenSearchStore::new(config).map_err(LoaderError::from_store)?;
    ensure_reachable(&store).await?;

    info!("OpenSearch connection verified");
    Ok(store)
}

/// Ping the store, turning any failure into a connection error.
pub async fn ensure_reachable(store: &dyn DocumentStore) -> Result<(), LoaderError> {
    match store.ping().await {
        Ok(true) => Ok(()),
        Ok(false) => {
            error!("Document store rejected the connectivity check");
            Err(LoaderError::connection(
                "Document store rejected the connectivity check",
            ))
        }
        Err(e) => {
            error!(error = %e, "Connectivity check failed");
            Err(LoaderError::connection(format!("Failed to connect: {}", e)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::MockStore;
    use friction_repository::Credentials;

    #[tokio::test]
    async fn test_reachable_store() {
        let store = MockStore::new();
        assert!(ensure_reachable(&store).await.is_ok());
    }

    #[tokio::test]
    async fn test_unreachable_store() {
        let store = MockStore::unreachable();
        let err = ensure_reachable(&store).await.unwrap_err();
        assert!(matches!(err, LoaderError::ConnectionError(_)));
    }

    #[tokio::test]
    async fn test_connect_rejects_placeholders_before_network() {
        let config = StoreConfig::new(
            "https://search.example.com",
            Credentials::ApiKey("your_api_key".to_string()),
        );

        let result = connect(&config).await;
        assert!(matches!(result, Err(LoaderError::ConfigError(_))));
    }
}
