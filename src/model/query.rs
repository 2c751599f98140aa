use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Sentinel used in roster listings and CSV files for a missing nickname or division.
pub const NOT_AVAILABLE: &str = "NA";

/// Gender partition of the UFC roster.
#[derive(
    Debug,
    Clone,
    Copy,
    Hash,
    Eq,
    PartialEq,
    Serialize,
    Deserialize,
    strum_macros::Display,
    strum_macros::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Gender {
    Men,
    Women,
}

impl Gender {
    /// Value of the roster listing's `gender` query parameter.
    pub fn roster_code(self) -> u8 {
        match self {
            Gender::Men => 1,
            Gender::Women => 2,
        }
    }
}

/// Weight classes understood by the Sherdog fight finder.
#[derive(
    Debug,
    Clone,
    Copy,
    Hash,
    Eq,
    PartialEq,
    Serialize,
    strum_macros::Display,
    strum_macros::EnumString,
    strum_macros::EnumIter,
)]
pub enum WeightClass {
    #[strum(serialize = "Heavyweight")]
    Heavyweight,
    #[strum(serialize = "Light Heavyweight")]
    LightHeavyweight,
    #[strum(serialize = "Middleweight")]
    Middleweight,
    #[strum(serialize = "Welterweight")]
    Welterweight,
    #[strum(serialize = "Lightweight")]
    Lightweight,
    #[strum(serialize = "Featherweight")]
    Featherweight,
    #[strum(serialize = "Bantamweight")]
    Bantamweight,
    #[strum(serialize = "Flyweight")]
    Flyweight,
    #[strum(serialize = "Women's Strawweight")]
    WomensStrawweight,
    #[strum(serialize = "Women's Flyweight")]
    WomensFlyweight,
    #[strum(serialize = "Women's Bantamweight")]
    WomensBantamweight,
    #[strum(serialize = "Women's Featherweight")]
    WomensFeatherweight,
    #[strum(serialize = "Catchweight")]
    Catchweight,
}

impl WeightClass {
    /// Numeric code of the fight finder's `weight` filter.
    pub fn filter_code(self) -> u8 {
        match self {
            WeightClass::Heavyweight => 2,
            WeightClass::LightHeavyweight => 3,
            WeightClass::Middleweight => 4,
            WeightClass::Welterweight => 5,
            WeightClass::Lightweight => 6,
            WeightClass::Featherweight | WeightClass::WomensFeatherweight => 7,
            WeightClass::Bantamweight | WeightClass::WomensBantamweight => 9,
            WeightClass::Flyweight | WeightClass::WomensFlyweight => 10,
            WeightClass::Catchweight => 11,
            WeightClass::WomensStrawweight => 13,
        }
    }
}

/// A (name, weight class, nickname) tuple identifying one fighter to look up.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct FighterQuery {
    pub name: String,
    /// Division text as it appears in the roster, e.g. `"Light Heavyweight"`.
    pub weight_class: String,
    pub nickname: Option<String>,
    /// Roster partition the query came from, copied onto the scraped record.
    pub gender: Option<Gender>,
}

impl FighterQuery {
    pub fn new(name: &str, weight_class: &str, nickname: &str) -> Self {
        Self {
            name: name.trim().to_string(),
            weight_class: weight_class.trim().to_string(),
            nickname: parse_optional(nickname),
            gender: None,
        }
    }

    #[must_use]
    pub fn with_gender(mut self, gender: Gender) -> Self {
        self.gender = Some(gender);
        self
    }

    /// The weight class as a fight finder filter, if it is a known one.
    pub fn weight_filter(&self) -> Option<WeightClass> {
        WeightClass::from_str(&self.weight_class).ok()
    }

    /// Nickname text, or the `"NA"` sentinel.
    pub fn nickname_or_na(&self) -> &str {
        self.nickname.as_deref().unwrap_or(NOT_AVAILABLE)
    }
}

impl fmt::Display for FighterQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}, {})",
            self.name,
            self.weight_class,
            self.nickname_or_na()
        )
    }
}

/// Maps the `"NA"` sentinel and blank text to `None`.
pub(crate) fn parse_optional(text: &str) -> Option<String> {
    let text = text.trim();
    if text.is_empty() || text == NOT_AVAILABLE {
        None
    } else {
        Some(text.to_string())
    }
}
