//! # Friction Loader
//!
//! Generates a synthetic e-commerce telemetry dataset and loads it into the
//! document store: one freshly provisioned index per record kind, one bulk
//! write per index, then a count per index to confirm what landed.
//!
//! The stages are exposed separately so provisioning and loading can be
//! exercised on their own:
//!
//! - [`config`] reads and validates connection settings and connects.
//! - [`loader::Loader`] resets indices, bulk-loads documents and verifies counts.
//! - [`run`] sequences generation and ingestion and reports progress.

pub mod config;
pub mod loader;
pub mod reporter;
pub mod run;

#[cfg(test)]
mod test_support;

pub use config::Settings;
pub use loader::Loader;
pub use reporter::ConsoleReporter;

use friction_repository::StoreError;
use thiserror::Error;

/// Errors that can halt a generate-and-load run.
#[derive(Error, Debug)]
pub enum LoaderError {
    /// Settings are missing or still hold placeholder values.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// The document store could not be reached.
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// A store operation failed outright.
    #[error("Store error: {0}")]
    StoreError(#[from] StoreError),

    /// Records could not be turned into documents.
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl LoaderError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }

    /// Create a connection error.
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::ConnectionError(msg.into())
    }

    /// Lift a store error, keeping configuration problems distinct.
    pub fn from_store(err: StoreError) -> Self {
        match err {
            StoreError::ConfigError(msg) => Self::ConfigError(msg),
            StoreError::ConnectionError(msg) => Self::ConnectionError(msg),
            other => Self::StoreError(other),
        }
    }
}
