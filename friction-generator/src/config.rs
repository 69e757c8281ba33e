//! Record counts for a generation run.

/// How many records of each kind to generate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneratorConfig {
    pub user_sessions: usize,
    pub search_queries: usize,
    pub cart_events: usize,
    /// Number of checkouts; each emits between one and five step records.
    pub checkouts: usize,
    pub error_logs: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            user_sessions: 2000,
            search_queries: 1000,
            cart_events: 800,
            checkouts: 600,
            error_logs: 300,
        }
    }
}

impl GeneratorConfig {
    /// A config that generates nothing; combine with the `with_*` setters.
    pub fn empty() -> Self {
        Self {
            user_sessions: 0,
            search_queries: 0,
            cart_events: 0,
            checkouts: 0,
            error_logs: 0,
        }
    }

    pub fn with_user_sessions(mut self, count: usize) -> Self {
        self.user_sessions = count;
        self
    }

    pub fn with_search_queries(mut self, count: usize) -> Self {
        self.search_queries = count;
        self
    }

    pub fn with_cart_events(mut self, count: usize) -> Self {
        self.cart_events = count;
        self
    }

    pub fn with_checkouts(mut self, count: usize) -> Self {
        self.checkouts = count;
        self
    }

    pub fn with_error_logs(mut self, count: usize) -> Self {
        self.error_logs = count;
        self
    }
}
