use chrono::NaiveDate;
use serde::Serialize;

use super::query::Gender;

/// Placeholder for a missing opponent, opponent URL or result in exported rows.
pub const MISSING_PRIMARY: &str = "N/A";

/// Placeholder for any other missing per-fight value in exported rows.
pub const MISSING: &str = "NA";

/// One fighter's biography and professional fight history, scraped from a
/// single Sherdog profile page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Fighter {
    /// Profile page the record was built from.
    pub url: String,
    pub name: String,
    pub nickname: Option<String>,
    pub gender: Option<Gender>,
    pub birth_date: Option<NaiveDate>,
    pub height: Option<String>,
    pub weight: Option<String>,
    pub locality: Option<String>,
    pub nationality: Option<String>,
    pub weight_class: Option<String>,
    pub record: FightRecord,
    pub associations: Vec<Association>,
    pub fights: FightColumns,
    /// Whether every per-fight column had the same length as the opponents column.
    pub validated: bool,
}

impl Fighter {
    /// Fight history rows, one per opponent.
    ///
    /// Columns shorter than the opponents column are back-filled with
    /// [`MISSING_PRIMARY`] or [`MISSING`] at the out-of-range indices.
    pub fn fight_history(&self) -> Vec<FightHistoryEntry> {
        let fights = &self.fights;
        (0..fights.opponents.len())
            .map(|i| FightHistoryEntry {
                opponent: value_at(&fights.opponents, i, MISSING_PRIMARY),
                opponent_url: value_at(&fights.opponent_urls, i, MISSING_PRIMARY),
                result: value_at(&fights.results, i, MISSING_PRIMARY),
                event: value_at(&fights.events, i, MISSING),
                date: value_at(&fights.event_dates, i, MISSING),
                method: value_at(&fights.methods, i, MISSING),
                judge: value_at(&fights.judges, i, MISSING),
                round: value_at(&fights.rounds, i, MISSING),
                time: value_at(&fights.times, i, MISSING),
            })
            .collect()
    }
}

fn value_at(column: &[String], index: usize, placeholder: &str) -> String {
    column
        .get(index)
        .cloned()
        .unwrap_or_else(|| placeholder.to_string())
}

/// Win/loss/draw/no-contest counters from the profile header.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FightRecord {
    pub wins: Option<u32>,
    pub losses: Option<u32>,
    pub draws: u32,
    pub no_contests: u32,
}

/// A gym the fighter is affiliated with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Association {
    #[serde(rename = "gymName")]
    pub name: String,
    #[serde(rename = "gymUrl")]
    pub url: String,
}

/// Per-fight values as scraped, one list per column.
///
/// The lists are parallel: index `i` of each refers to the same fight.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FightColumns {
    pub results: Vec<String>,
    pub opponents: Vec<String>,
    pub opponent_urls: Vec<String>,
    pub events: Vec<String>,
    pub event_dates: Vec<String>,
    pub methods: Vec<String>,
    pub judges: Vec<String>,
    pub rounds: Vec<String>,
    pub times: Vec<String>,
}

impl FightColumns {
    /// True when every column has as many values as there are opponents.
    pub fn is_consistent(&self) -> bool {
        let expected = self.opponents.len();
        [
            &self.results,
            &self.opponent_urls,
            &self.events,
            &self.event_dates,
            &self.methods,
            &self.judges,
            &self.rounds,
            &self.times,
        ]
        .iter()
        .all(|column| column.len() == expected)
    }
}

/// A single row of a fighter's professional fight history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FightHistoryEntry {
    pub opponent: String,
    pub opponent_url: String,
    pub result: String,
    pub event: String,
    pub date: String,
    pub method: String,
    pub judge: String,
    pub round: String,
    pub time: String,
}
