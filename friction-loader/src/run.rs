//! Sequencing of a full run: generate, provision, load, verify.

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

use friction_generator::{Catalog, Dataset, Generator, GeneratorConfig};

use crate::loader::{IndexLoad, Loader, ResetOutcome, Verification};
use crate::reporter::ConsoleReporter;
use crate::LoaderError;

/// What an ingestion pass did to the store.
#[derive(Debug, Clone, PartialEq)]
pub struct IngestReport {
    pub resets: Vec<ResetOutcome>,
    pub loads: Vec<IndexLoad>,
    /// `None` when verification was skipped.
    pub verifications: Option<Vec<Verification>>,
}

impl IngestReport {
    /// Documents the store accepted across all indices.
    pub fn total_ingested(&self) -> usize {
        self.loads.iter().map(|load| load.summary.succeeded).sum()
    }

    /// Documents the store rejected across all indices.
    pub fn total_failed(&self) -> usize {
        self.loads.iter().map(|load| load.summary.failed).sum()
    }
}

/// Build the dataset, seeded when `seed` is given.
pub fn generate(
    catalog: &Catalog,
    config: GeneratorConfig,
    seed: Option<u64>,
    reporter: &ConsoleReporter,
) -> Dataset {
    let mut rng = match seed {
        Some(seed) => {
            info!(seed, "Using seeded generator");
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_entropy(),
    };

    reporter.banner("Generating synthetic e-commerce data");
    let generator = Generator::new(catalog, config);
    let dataset = generator.generate_with(&mut rng, |kind, count| reporter.generating(kind, count));
    reporter.generated(&dataset);

    info!(total = dataset.total_records(), "Generation complete");
    dataset
}

/// Reset every index, bulk-load the dataset and optionally verify counts.
///
/// Stops at the first store failure. Documents rejected individually are
/// reported and do not stop the run.
pub async fn ingest(
    loader: &Loader,
    dataset: &Dataset,
    verify: bool,
    reporter: &ConsoleReporter,
) -> Result<IngestReport, LoaderError> {
    reporter.section("Creating indices...");
    let resets = loader
        .reset_indices(|outcome| reporter.index_reset(outcome))
        .await?;

    reporter.section("Ingesting documents...");
    let loads = loader
        .load_dataset(dataset, |load| reporter.ingested(load))
        .await?;
    reporter.ingested_total(&loads);

    let verifications = if verify {
        reporter.section("Verifying data...");
        let verifications = loader.verify(&loads).await?;
        for verification in &verifications {
            reporter.verified(verification);
        }
        Some(verifications)
    } else {
        info!("Skipping count verification");
        None
    };

    let report = IngestReport {
        resets,
        loads,
        verifications,
    };
    info!(
        ingested = report.total_ingested(),
        failed = report.total_failed(),
        "Ingestion complete"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::MockStore;
    use friction_repository::DocumentStore;
    use std::sync::Arc;

    fn small_config() -> GeneratorConfig {
        GeneratorConfig::empty()
            .with_user_sessions(40)
            .with_search_queries(20)
            .with_cart_events(16)
            .with_checkouts(12)
            .with_error_logs(6)
    }

    #[test]
    fn test_seeded_generation_is_reproducible() {
        let catalog = Catalog::storefront();
        let reporter = ConsoleReporter::silent();

        let first = generate(&catalog, small_config(), Some(42), &reporter);
        let second = generate(&catalog, small_config(), Some(42), &reporter);

        let ids = |d: &Dataset| d.user_sessions.iter().map(|s| s.session_id.clone()).collect::<Vec<_>>();
        assert_eq!(ids(&first), ids(&second));
        assert_eq!(first.search_queries[0].search_term, second.search_queries[0].search_term);
    }

    #[test]
    fn test_unseeded_generation_differs() {
        let catalog = Catalog::storefront();
        let reporter = ConsoleReporter::silent();

        let first = generate(&catalog, small_config(), None, &reporter);
        let second = generate(&catalog, small_config(), None, &reporter);

        assert_ne!(first.user_sessions[0].session_id, second.user_sessions[0].session_id);
    }

    #[tokio::test]
    async fn test_ingest_full_dataset() {
        let store = Arc::new(MockStore::new());
        let loader = Loader::new(store.clone());
        let catalog = Catalog::storefront();
        let reporter = ConsoleReporter::silent();
        let dataset = generate(&catalog, small_config(), Some(3), &reporter);

        let report = ingest(&loader, &dataset, true, &reporter).await.unwrap();

        assert_eq!(report.resets.len(), 5);
        assert!(report.resets.iter().all(|r| !r.deleted_existing));
        assert_eq!(report.total_ingested(), dataset.total_records());
        assert_eq!(report.total_failed(), 0);

        let verifications = report.verifications.unwrap();
        assert!(verifications.iter().all(|v| v.matches()));
        assert_eq!(
            store.count("checkout-flows").await.unwrap() as usize,
            dataset.checkout_flows.len()
        );
    }

    #[tokio::test]
    async fn test_ingest_twice_reports_deleted_indices() {
        let store = Arc::new(MockStore::new());
        let loader = Loader::new(store.clone());
        let catalog = Catalog::storefront();
        let reporter = ConsoleReporter::silent();

        let first = generate(&catalog, small_config(), Some(1), &reporter);
        ingest(&loader, &first, false, &reporter).await.unwrap();

        let second = generate(&catalog, small_config().with_error_logs(2), Some(2), &reporter);
        let report = ingest(&loader, &second, false, &reporter).await.unwrap();

        assert!(report.resets.iter().all(|r| r.deleted_existing));
        assert!(report.verifications.is_none());
        assert_eq!(store.count("error-logs").await.unwrap(), 2);
        assert_eq!(store.count("user-sessions").await.unwrap(), 40);
    }
}
