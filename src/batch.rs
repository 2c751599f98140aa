//! Concurrent fan-out of resolver and profile scraping over many queries.

use std::collections::HashSet;

use futures::stream::{self, StreamExt as _};
use serde::Serialize;
use tracing::{info, instrument, warn};

use crate::config::ScraperConfig;
use crate::model::{Fighter, FighterQuery};
use crate::resolver::{self, Resolution};
use crate::scraper::fighter;

/// Aggregated result of a batch run.
///
/// Fighters appear in completion order, not input order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchReport {
    pub fighters: Vec<Fighter>,
    pub requested: usize,
    /// Queries no search tier could single out.
    pub unresolved: Vec<FighterQuery>,
    /// Resolved profile pages that carried no fighter name.
    pub discarded: usize,
    /// Tasks that hit a transport or parse error.
    pub failed: usize,
    /// Records dropped because another query already resolved to the same profile.
    pub duplicates: usize,
}

impl BatchReport {
    /// Queries that produced no fighter record because of an unresolved search or an error.
    pub fn failures(&self) -> usize {
        self.unresolved.len() + self.failed
    }

    /// Records whose fight history columns disagreed in length.
    pub fn unvalidated(&self) -> usize {
        self.fighters.iter().filter(|f| !f.validated).count()
    }
}

enum TaskOutcome {
    Scraped(Box<Fighter>),
    Unresolved(FighterQuery),
    Discarded,
    Failed,
}

/// Resolve and scrape every query with at most `min(max_concurrency, len)`
/// tasks in flight. A failing task never affects its siblings.
#[instrument(skip_all, fields(queries = queries.len()))]
pub(crate) async fn scrape_fighters(
    client: &reqwest::Client,
    config: &ScraperConfig,
    queries: Vec<FighterQuery>,
) -> BatchReport {
    let requested = queries.len();
    let workers = config.workers_for(requested);
    let base_url = config.sherdog_base_url.as_str();
    info!(requested, workers, "starting batch");

    let outcomes: Vec<TaskOutcome> = stream::iter(
        queries
            .into_iter()
            .map(|query| scrape_one(client, base_url, query)),
    )
    .buffer_unordered(workers)
    .collect()
    .await;

    let mut report = BatchReport {
        requested,
        ..Default::default()
    };
    let mut seen = HashSet::new();
    for outcome in outcomes {
        match outcome {
            TaskOutcome::Scraped(fighter) => {
                if seen.insert(fighter.url.clone()) {
                    report.fighters.push(*fighter);
                } else {
                    report.duplicates += 1;
                }
            }
            TaskOutcome::Unresolved(query) => report.unresolved.push(query),
            TaskOutcome::Discarded => report.discarded += 1,
            TaskOutcome::Failed => report.failed += 1,
        }
    }

    info!(
        scraped = report.fighters.len(),
        unresolved = report.unresolved.len(),
        discarded = report.discarded,
        failed = report.failed,
        duplicates = report.duplicates,
        unvalidated = report.unvalidated(),
        "batch finished"
    );
    report
}

async fn scrape_one(client: &reqwest::Client, base_url: &str, query: FighterQuery) -> TaskOutcome {
    let url = match resolver::resolve(client, base_url, &query).await {
        Ok(Resolution::Found { url, .. }) => url,
        Ok(Resolution::NotFound { .. }) => {
            warn!(query = %query, "could not resolve fighter; check the name and nickname");
            return TaskOutcome::Unresolved(query);
        }
        Err(e) => {
            warn!(query = %query, error = %e, "search failed");
            return TaskOutcome::Failed;
        }
    };

    match fighter::get_fighter(client, &url).await {
        Ok(Some(mut fighter)) => {
            fighter.gender = query.gender;
            TaskOutcome::Scraped(Box::new(fighter))
        }
        Ok(None) => {
            warn!(query = %query, url = %url, "resolved profile has no fighter name");
            TaskOutcome::Discarded
        }
        Err(e) => {
            warn!(query = %query, url = %url, error = %e, "failed to scrape fighter profile");
            TaskOutcome::Failed
        }
    }
}
