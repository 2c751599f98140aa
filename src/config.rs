/// Default Sherdog site root.
pub const DEFAULT_SHERDOG_URL: &str = "https://www.sherdog.com";

/// Default UFC site root, used for the roster listing.
pub const DEFAULT_UFC_URL: &str = "https://www.ufc.com";

/// Default cap on simultaneous in-flight fighter resolutions.
pub const DEFAULT_MAX_CONCURRENCY: usize = 30;

/// Site roots and limits shared by every scraping operation.
///
/// The base URLs are configurable so the whole pipeline can be pointed at a
/// mirror or a local mock server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScraperConfig {
    pub sherdog_base_url: String,
    pub ufc_base_url: String,
    pub max_concurrency: usize,
    pub user_agent: Option<String>,
}

impl ScraperConfig {
    /// Overrides the Sherdog site root.
    #[must_use]
    pub fn with_sherdog_base_url(mut self, url: &str) -> Self {
        url.trim_end_matches('/')
            .clone_into(&mut self.sherdog_base_url);
        self
    }

    /// Overrides the UFC site root.
    #[must_use]
    pub fn with_ufc_base_url(mut self, url: &str) -> Self {
        url.trim_end_matches('/').clone_into(&mut self.ufc_base_url);
        self
    }

    /// Overrides the concurrency cap. Zero is treated as one.
    #[must_use]
    pub fn with_max_concurrency(mut self, max_concurrency: usize) -> Self {
        self.max_concurrency = max_concurrency.max(1);
        self
    }

    /// Sets the `User-Agent` header sent with every request.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: &str) -> Self {
        self.user_agent = Some(user_agent.to_owned());
        self
    }

    /// Number of workers for a batch of `len` tasks: `min(cap, len)`, at least one.
    pub fn workers_for(&self, len: usize) -> usize {
        self.max_concurrency.min(len).max(1)
    }
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            sherdog_base_url: DEFAULT_SHERDOG_URL.to_owned(),
            ufc_base_url: DEFAULT_UFC_URL.to_owned(),
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
            user_agent: None,
        }
    }
}
