use tracing::instrument;

use crate::batch::{self, BatchReport};
use crate::config::ScraperConfig;
use crate::crawl::{self, CrawlOptions};
use crate::error::{Result, SherdogError};
use crate::model::*;
use crate::resolver::{self, Resolution};
use crate::scraper;

/// The main entry point for scraping Sherdog and the UFC roster.
///
/// `SherdogClient` wraps a [`reqwest::Client`] together with a
/// [`ScraperConfig`] and exposes the search resolver, the profile scraper,
/// the roster collector and the batch orchestrator.
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> sherdog_scraper::Result<()> {
/// use sherdog_scraper::{FighterQuery, SherdogClient};
///
/// let client = SherdogClient::new();
/// let query = FighterQuery::new("Jon Jones", "Light Heavyweight", "NA");
/// if let Some(fighter) = client.find_fighter(&query).await? {
///     println!("{} has {} pro fights", fighter.name, fighter.fights.opponents.len());
/// }
/// # Ok(())
/// # }
/// ```
pub struct SherdogClient {
    http: reqwest::Client,
    config: ScraperConfig,
}

impl SherdogClient {
    /// Create a new client with default settings.
    pub fn new() -> Self {
        Self {
            http: reqwest::Client::new(),
            config: ScraperConfig::default(),
        }
    }

    /// Create a new client using the provided [`reqwest::Client`].
    ///
    /// Use this when you need to configure timeouts, proxies, headers, etc.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self {
            http: client,
            config: ScraperConfig::default(),
        }
    }

    /// Replace the configuration, keeping the HTTP client.
    #[must_use]
    pub fn with_config(mut self, config: ScraperConfig) -> Self {
        self.config = config;
        self
    }

    /// Build a client whose HTTP client honours the configured user agent.
    pub fn from_config(config: ScraperConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(user_agent) = &config.user_agent {
            builder = builder.user_agent(user_agent);
        }
        let http = builder.build().map_err(SherdogError::ClientBuild)?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &ScraperConfig {
        &self.config
    }

    /// Run a single fight finder search and return the profile URLs it lists.
    #[instrument(skip(self))]
    pub async fn search(&self, text: &str, weight: Option<WeightClass>) -> Result<Vec<String>> {
        scraper::search::search_fighters(&self.http, &self.config.sherdog_base_url, text, weight)
            .await
    }

    /// Resolve a query to a single profile URL using the tiered search.
    pub async fn resolve(&self, query: &FighterQuery) -> Result<Resolution> {
        resolver::resolve(&self.http, &self.config.sherdog_base_url, query).await
    }

    /// Fetch a fighter profile by URL. `Ok(None)` if the page has no fighter name.
    #[instrument(skip(self))]
    pub async fn get_fighter(&self, url: &str) -> Result<Option<Fighter>> {
        scraper::fighter::get_fighter(&self.http, url).await
    }

    /// Fetch a fighter profile by its numeric Sherdog id.
    #[instrument(skip(self))]
    pub async fn get_fighter_by_index(&self, index: u64) -> Result<Option<Fighter>> {
        scraper::fighter::get_fighter_by_index(&self.http, &self.config.sherdog_base_url, index)
            .await
    }

    /// Resolve a query and scrape the matching profile, if exactly one matched.
    #[instrument(skip(self, query), fields(query = %query))]
    pub async fn find_fighter(&self, query: &FighterQuery) -> Result<Option<Fighter>> {
        let Resolution::Found { url, .. } = self.resolve(query).await? else {
            return Ok(None);
        };
        let fighter = self.get_fighter(&url).await?.map(|mut fighter| {
            fighter.gender = query.gender;
            fighter
        });
        Ok(fighter)
    }

    /// Collect the active UFC roster for both genders.
    #[instrument(skip(self))]
    pub async fn get_roster(&self) -> Result<Roster> {
        scraper::roster::get_roster(&self.http, &self.config.ufc_base_url).await
    }

    /// Collect one gender partition of the UFC roster.
    #[instrument(skip(self))]
    pub async fn get_roster_partition(&self, gender: Gender) -> Result<Vec<FighterQuery>> {
        scraper::roster::get_roster_partition(&self.http, &self.config.ufc_base_url, gender).await
    }

    /// Resolve and scrape many queries concurrently, bounded by the configured cap.
    pub async fn scrape_fighters(&self, queries: Vec<FighterQuery>) -> BatchReport {
        batch::scrape_fighters(&self.http, &self.config, queries).await
    }

    /// Walk profile ids upward until too many in a row are empty.
    pub async fn crawl(&self, options: CrawlOptions) -> Vec<Fighter> {
        crawl::crawl_fighters(&self.http, &self.config.sherdog_base_url, options).await
    }
}

impl Default for SherdogClient {
    fn default() -> Self {
        Self::new()
    }
}
