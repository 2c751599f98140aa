//! Scrape MMA fighter biographies and fight histories from Sherdog, and the
//! active roster from the UFC athlete listing.
//!
//! A roster entry carries only a name, a division and a nickname. The
//! [`resolver`] turns such a [`FighterQuery`] into a single Sherdog profile
//! through progressively narrower fight finder searches, and the
//! [`SherdogClient`] runs that resolution concurrently over a whole roster
//! before the records are written out with [`export`].

mod batch;
mod client;
pub mod config;
mod crawl;
pub mod error;
pub mod export;
pub mod model;
pub mod resolver;
mod scraper;

pub use batch::BatchReport;
pub use client::SherdogClient;
pub use config::ScraperConfig;
pub use crawl::CrawlOptions;
pub use error::{Result, SherdogError};
pub use model::*;
pub use resolver::{Resolution, SearchTier};
