//! # Friction Shared
//!
//! Record types shared by the telemetry generator and the loader.
//!
//! Every record is a flat document: field names map one-to-one onto the
//! properties of the index that stores it (see [`RecordKind::index_name`]).

pub mod kind;
pub mod records;

pub use kind::RecordKind;
pub use records::{
    CartAction, CartEvent, CheckoutStage, CheckoutStep, ErrorLog, PageAction, SearchQuery,
    SessionView,
};
