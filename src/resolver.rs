//! Tiered disambiguation of a [`FighterQuery`] to a single Sherdog profile.
//!
//! The fight finder has no stable fighter id to search by, so a query is
//! resolved by trying progressively narrower searches and accepting the first
//! one that lists exactly one candidate. Multiple candidates are never ranked:
//! a query that stays ambiguous at every tier is reported as not found.

use serde::Serialize;
use tracing::{debug, instrument, warn};

use crate::error::Result;
use crate::model::{FighterQuery, WeightClass};
use crate::scraper::search;

/// One fight finder search variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, strum_macros::Display)]
#[strum(serialize_all = "snake_case")]
pub enum SearchTier {
    NameOnly,
    NameWeight,
    NameNickname,
    NameNicknameWeight,
}

impl SearchTier {
    /// Free-text and weight filter for this tier, or `None` if the query
    /// lacks what the tier needs.
    fn request(self, query: &FighterQuery) -> Option<(String, Option<WeightClass>)> {
        let with_nickname = || {
            query
                .nickname
                .as_deref()
                .map(|nickname| format!("{} {nickname}", query.name))
        };
        match self {
            SearchTier::NameOnly => Some((query.name.clone(), None)),
            SearchTier::NameWeight => query
                .weight_filter()
                .map(|weight| (query.name.clone(), Some(weight))),
            SearchTier::NameNickname => with_nickname().map(|text| (text, None)),
            SearchTier::NameNicknameWeight => {
                let weight = query.weight_filter()?;
                with_nickname().map(|text| (text, Some(weight)))
            }
        }
    }
}

/// Outcome of resolving one query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Resolution {
    /// A tier listed exactly one candidate.
    Found { url: String, tier: SearchTier },
    /// Every usable tier listed zero or several candidates.
    NotFound { tried: Vec<SearchTier> },
}

impl Resolution {
    pub fn url(&self) -> Option<&str> {
        match self {
            Resolution::Found { url, .. } => Some(url),
            Resolution::NotFound { .. } => None,
        }
    }
}

/// Order in which the tiers are tried for `query`.
///
/// A known nickname is tried before the weight class. Without a nickname the
/// nickname tiers would repeat the name-only and name+weight searches, and a
/// weight class missing from the lookup table makes its tiers unusable, so
/// those are left out.
pub fn tier_plan(query: &FighterQuery) -> Vec<SearchTier> {
    let order = if query.nickname.is_some() {
        [
            SearchTier::NameOnly,
            SearchTier::NameNickname,
            SearchTier::NameWeight,
            SearchTier::NameNicknameWeight,
        ]
    } else {
        [
            SearchTier::NameOnly,
            SearchTier::NameWeight,
            SearchTier::NameNickname,
            SearchTier::NameNicknameWeight,
        ]
    };
    order
        .into_iter()
        .filter(|tier| tier.request(query).is_some())
        .collect()
}

/// Resolve `query` to a profile URL, issuing each tier's search only when
/// the previous tiers failed to single out one candidate.
#[instrument(skip(client, query), fields(query = %query))]
pub(crate) async fn resolve(
    client: &reqwest::Client,
    base_url: &str,
    query: &FighterQuery,
) -> Result<Resolution> {
    let plan = tier_plan(query);
    if query.weight_filter().is_none() {
        debug!(weight_class = %query.weight_class, "unknown weight class, skipping weight tiers");
    }

    let mut tried = Vec::with_capacity(plan.len());
    for tier in plan {
        let Some((text, weight)) = tier.request(query) else {
            continue;
        };
        let mut candidates = search::search_fighters(client, base_url, &text, weight).await?;
        tried.push(tier);
        if candidates.len() == 1 {
            let url = candidates.remove(0);
            debug!(%tier, url = %url, "resolved fighter");
            return Ok(Resolution::Found { url, tier });
        }
        debug!(%tier, candidates = candidates.len(), "search did not single out a fighter");
    }

    warn!(tiers = tried.len(), "no search tier singled out a fighter");
    Ok(Resolution::NotFound { tried })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_with_nickname_prefers_nickname_over_weight() {
        let query = FighterQuery::new("Steve Garcia", "Featherweight", "Mr. Taco");
        assert_eq!(
            tier_plan(&query),
            vec![
                SearchTier::NameOnly,
                SearchTier::NameNickname,
                SearchTier::NameWeight,
                SearchTier::NameNicknameWeight,
            ]
        );
    }

    #[test]
    fn test_plan_without_nickname_never_tries_nickname_tiers() {
        let query = FighterQuery::new("Jon Jones", "Light Heavyweight", "NA");
        assert_eq!(
            tier_plan(&query),
            vec![SearchTier::NameOnly, SearchTier::NameWeight]
        );
    }

    #[test]
    fn test_plan_skips_unknown_weight_class() {
        let query = FighterQuery::new("Someone", "Openweight", "Nick");
        assert_eq!(
            tier_plan(&query),
            vec![SearchTier::NameOnly, SearchTier::NameNickname]
        );

        let query = FighterQuery::new("Someone", "Openweight", "NA");
        assert_eq!(tier_plan(&query), vec![SearchTier::NameOnly]);
    }

    #[test]
    fn test_tier_requests() {
        let query = FighterQuery::new("Steve Garcia", "Featherweight", "Mr. Taco");
        assert_eq!(
            SearchTier::NameOnly.request(&query),
            Some(("Steve Garcia".to_string(), None))
        );
        assert_eq!(
            SearchTier::NameWeight.request(&query),
            Some(("Steve Garcia".to_string(), Some(WeightClass::Featherweight)))
        );
        assert_eq!(
            SearchTier::NameNickname.request(&query),
            Some(("Steve Garcia Mr. Taco".to_string(), None))
        );
        assert_eq!(
            SearchTier::NameNicknameWeight.request(&query),
            Some((
                "Steve Garcia Mr. Taco".to_string(),
                Some(WeightClass::Featherweight)
            ))
        );
    }

    #[test]
    fn test_resolution_url() {
        let found = Resolution::Found {
            url: "https://www.sherdog.com/fighter/Jon-Jones-27944".to_string(),
            tier: SearchTier::NameOnly,
        };
        assert_eq!(
            found.url(),
            Some("https://www.sherdog.com/fighter/Jon-Jones-27944")
        );
        assert_eq!(Resolution::NotFound { tried: vec![] }.url(), None);
        assert_eq!(SearchTier::NameNicknameWeight.to_string(), "name_nickname_weight");
    }
}
