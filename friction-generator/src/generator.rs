//! Record generation.
//!
//! All randomness comes from the caller's [`Rng`], so a seeded generator
//! yields the same dataset every time for a fixed `now`.

use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use tracing::debug;
use uuid::Builder;

use crate::catalog::Catalog;
use crate::config::GeneratorConfig;
use crate::dataset::Dataset;
use friction_shared::{
    CartAction, CartEvent, CheckoutStage, CheckoutStep, ErrorLog, PageAction, RecordKind,
    SearchQuery, SessionView,
};

/// Pages slower than this (seconds) may bounce.
const BOUNCE_THRESHOLD_SECS: f64 = 4.0;

/// A slow page bounces when a uniform roll lands above this (70% of the time).
const BOUNCE_ROLL: f64 = 0.3;

/// Error codes served by live pages.
const LIVE_PAGE_ERROR_CODES: [u16; 3] = [500, 502, 404];

/// Builds telemetry records from a catalog.
#[derive(Debug, Clone)]
pub struct Generator<'a> {
    catalog: &'a Catalog,
    config: GeneratorConfig,
    now: DateTime<Utc>,
}

impl<'a> Generator<'a> {
    /// Create a generator whose timestamps are relative to the current time.
    pub fn new(catalog: &'a Catalog, config: GeneratorConfig) -> Self {
        Self::at(catalog, config, Utc::now())
    }

    /// Create a generator whose timestamps are relative to `now`.
    pub fn at(catalog: &'a Catalog, config: GeneratorConfig, now: DateTime<Utc>) -> Self {
        Self {
            catalog,
            config,
            now,
        }
    }

    /// Generate the full dataset.
    pub fn generate<R: Rng>(&self, rng: &mut R) -> Dataset {
        self.generate_with(rng, |_, _| {})
    }

    /// Generate the full dataset, calling `on_kind` with the kind and the
    /// requested count before each collection is built.
    pub fn generate_with<R, F>(&self, rng: &mut R, mut on_kind: F) -> Dataset
    where
        R: Rng,
        F: FnMut(RecordKind, usize),
    {
        on_kind(RecordKind::UserSessions, self.config.user_sessions);
        let user_sessions = self.user_sessions(rng);

        on_kind(RecordKind::SearchQueries, self.config.search_queries);
        let search_queries = self.search_queries(rng);

        on_kind(RecordKind::CartEvents, self.config.cart_events);
        let cart_events = self.cart_events(rng);

        on_kind(RecordKind::CheckoutFlows, self.config.checkouts);
        let checkout_flows = self.checkout_flows(rng);

        on_kind(RecordKind::ErrorLogs, self.config.error_logs);
        let error_logs = self.error_logs(rng);

        let dataset = Dataset {
            user_sessions,
            search_queries,
            cart_events,
            checkout_flows,
            error_logs,
        };

        debug!(total = dataset.total_records(), "Generated dataset");
        dataset
    }

    pub fn user_sessions<R: Rng>(&self, rng: &mut R) -> Vec<SessionView> {
        (0..self.config.user_sessions)
            .map(|_| self.session_view(rng))
            .collect()
    }

    pub fn search_queries<R: Rng>(&self, rng: &mut R) -> Vec<SearchQuery> {
        (0..self.config.search_queries)
            .map(|_| self.search_query(rng))
            .collect()
    }

    pub fn cart_events<R: Rng>(&self, rng: &mut R) -> Vec<CartEvent> {
        (0..self.config.cart_events)
            .map(|_| self.cart_event(rng))
            .collect()
    }

    /// Step records for every checkout, checkouts kept contiguous.
    pub fn checkout_flows<R: Rng>(&self, rng: &mut R) -> Vec<CheckoutStep> {
        let mut steps = Vec::with_capacity(self.config.checkouts * CheckoutStage::FUNNEL.len());
        for _ in 0..self.config.checkouts {
            steps.extend(self.checkout(rng));
        }
        steps
    }

    pub fn error_logs<R: Rng>(&self, rng: &mut R) -> Vec<ErrorLog> {
        let urls = self.catalog.error_urls();
        (0..self.config.error_logs)
            .map(|_| self.error_log(rng, &urls))
            .collect()
    }

    fn session_view<R: Rng>(&self, rng: &mut R) -> SessionView {
        let page_url = pick(rng, &self.catalog.site_urls).clone();
        let page_load_time = page_load_time(rng, &page_url);
        let bounce = page_load_time > BOUNCE_THRESHOLD_SECS && rng.gen::<f64>() > BOUNCE_ROLL;

        SessionView {
            session_id: short_id(rng, "sess", 12),
            user_id: self.user_id(rng),
            timestamp: self.timestamp(rng),
            page_url,
            page_load_time,
            action: *pick(rng, &PageAction::ALL),
            bounce,
        }
    }

    fn search_query<R: Rng>(&self, rng: &mut R) -> SearchQuery {
        let search_term = pick(rng, &self.catalog.search_terms).clone();
        let results_count = if self.catalog.is_problematic(&search_term) {
            0
        } else {
            rng.gen_range(1..=15)
        };

        SearchQuery {
            query_id: short_id(rng, "q", 8),
            user_id: self.user_id(rng),
            search_term,
            results_count,
            timestamp: self.timestamp(rng),
        }
    }

    fn cart_event<R: Rng>(&self, rng: &mut R) -> CartEvent {
        let product = pick(rng, &self.catalog.products);
        let quantity: u32 = rng.gen_range(1..=3);

        CartEvent {
            cart_id: short_id(rng, "cart", 12),
            user_id: self.user_id(rng),
            action: CartAction::AddToCart,
            product_id: product.id.clone(),
            product_name: product.name.clone(),
            timestamp: self.timestamp(rng),
            cart_value: round2(product.price * f64::from(quantity)),
        }
    }

    /// One checkout: the funnel prefix up to a random stopping stage.
    fn checkout<R: Rng>(&self, rng: &mut R) -> Vec<CheckoutStep> {
        let checkout_id = short_id(rng, "co", 12);
        let user_id = self.user_id(rng);
        let last = rng.gen_range(0..CheckoutStage::FUNNEL.len());

        CheckoutStage::FUNNEL[..=last]
            .iter()
            .enumerate()
            .map(|(idx, &step)| {
                let time_spent = if step == CheckoutStage::Payment {
                    rng.gen_range(60..=180)
                } else {
                    rng.gen_range(10..=45)
                };

                CheckoutStep {
                    checkout_id: checkout_id.clone(),
                    user_id: user_id.clone(),
                    step,
                    time_spent,
                    completed: step.is_complete(),
                    abandoned: idx == last && !step.is_complete(),
                    timestamp: self.timestamp(rng),
                    cart_value: round2(rng.gen_range(50.0..=500.0)),
                }
            })
            .collect()
    }

    fn error_log<R: Rng>(&self, rng: &mut R, urls: &[&str]) -> ErrorLog {
        let url = pick(rng, urls).to_string();
        let error_code = if self.catalog.is_broken(&url) {
            404
        } else {
            *pick(rng, &LIVE_PAGE_ERROR_CODES)
        };

        ErrorLog {
            error_id: short_id(rng, "err", 8),
            url,
            error_code,
            timestamp: self.timestamp(rng),
            user_id: self.user_id(rng),
        }
    }

    fn user_id<R: Rng>(&self, rng: &mut R) -> String {
        format!("user_{:04}", rng.gen_range(1..=self.catalog.user_pool))
    }

    /// A moment up to a week (plus a day's worth of hours) before `now`.
    fn timestamp<R: Rng>(&self, rng: &mut R) -> DateTime<Utc> {
        self.now
            - Duration::days(rng.gen_range(0..=7))
            - Duration::hours(rng.gen_range(0..=23))
            - Duration::minutes(rng.gen_range(0..=59))
    }
}

/// Payment pages are slow; everything else loads quickly.
fn page_load_time<R: Rng>(rng: &mut R, url: &str) -> f64 {
    if url.contains("payment") {
        round2(rng.gen_range(3.5..=8.0))
    } else {
        round2(rng.gen_range(0.5..=3.0))
    }
}

/// `{prefix}_` followed by the first `len` (at most 32) hex digits of a
/// random v4 UUID.
fn short_id<R: Rng>(rng: &mut R, prefix: &str, len: usize) -> String {
    let uuid = Builder::from_random_bytes(rng.gen()).into_uuid();
    let hex = uuid.simple().to_string();
    format!("{}_{}", prefix, &hex[..len])
}

/// Uniform choice from a non-empty slice.
///
/// Panics if `items` is empty.
fn pick<'i, T, R: Rng>(rng: &mut R, items: &'i [T]) -> &'i T {
    &items[rng.gen_range(0..items.len())]
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
