//! Configuration and dependency wiring for the loader.

pub mod dependencies;
pub mod settings;

pub use dependencies::{connect, ensure_reachable};
pub use settings::Settings;
