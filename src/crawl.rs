use tracing::{debug, info, instrument};

use crate::model::Fighter;
use crate::scraper::fighter;

/// Where a profile-id crawl starts and when it gives up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CrawlOptions {
    pub start: u64,
    /// The crawl stops once more than this many ids in a row yield no fighter.
    pub max_misses: u32,
}

impl Default for CrawlOptions {
    fn default() -> Self {
        Self {
            start: 0,
            max_misses: 10,
        }
    }
}

/// Walk Sherdog profile ids upward from `options.start`, collecting every
/// page that carries a fighter name.
#[instrument(skip(client))]
pub(crate) async fn crawl_fighters(
    client: &reqwest::Client,
    base_url: &str,
    options: CrawlOptions,
) -> Vec<Fighter> {
    let mut fighters = vec![];
    let mut misses = 0;
    let mut index = options.start;

    while misses <= options.max_misses {
        match fighter::get_fighter_by_index(client, base_url, index).await {
            Ok(Some(fighter)) => {
                fighters.push(fighter);
                misses = 0;
            }
            Ok(None) => misses += 1,
            Err(e) => {
                debug!(index, error = %e, "no profile at index");
                misses += 1;
            }
        }
        index += 1;
    }

    info!(
        count = fighters.len(),
        last_index = index.saturating_sub(1),
        "crawl finished"
    );
    fighters
}
