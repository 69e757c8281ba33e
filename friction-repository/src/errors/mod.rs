//! Error types for the friction repository.

mod store_error;

pub use store_error::StoreError;
