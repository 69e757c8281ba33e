//! Synthetic e-commerce telemetry generation.
//!
//! Builds five in-memory record collections (page views, searches, cart
//! events, checkout funnels and error logs) from an immutable [`Catalog`],
//! injecting friction patterns along the way: slow payment pages, searches
//! that return nothing, checkouts abandoned part way through the funnel and
//! links to retired product pages.
//!
//! # Usage
//!
//! ```rust
//! use friction_generator::{Catalog, Generator, GeneratorConfig};
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let catalog = Catalog::storefront();
//! let generator = Generator::new(&catalog, GeneratorConfig::default());
//!
//! // Seeded for a reproducible dataset; use `StdRng::from_entropy()` otherwise.
//! let mut rng = StdRng::seed_from_u64(7);
//! let dataset = generator.generate(&mut rng);
//!
//! assert_eq!(dataset.user_sessions.len(), 2000);
//! ```

pub mod catalog;
pub mod config;
pub mod dataset;
pub mod generator;

pub use catalog::{Catalog, Product};
pub use config::GeneratorConfig;
pub use dataset::Dataset;
pub use generator::Generator;
