use serde::Serialize;

use super::query::{FighterQuery, Gender};

/// Active UFC athletes, split by gender partition.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Roster {
    pub men: Vec<FighterQuery>,
    pub women: Vec<FighterQuery>,
}

impl Roster {
    pub fn len(&self) -> usize {
        self.men.len() + self.women.len()
    }

    pub fn is_empty(&self) -> bool {
        self.men.is_empty() && self.women.is_empty()
    }

    /// Entries of one partition.
    pub fn partition(&self, gender: Gender) -> &[FighterQuery] {
        match gender {
            Gender::Men => &self.men,
            Gender::Women => &self.women,
        }
    }

    /// Merge both partitions, men first, tagging each query with its gender.
    pub fn into_queries(self) -> Vec<FighterQuery> {
        let men = self.men.into_iter().map(|q| q.with_gender(Gender::Men));
        let women = self.women.into_iter().map(|q| q.with_gender(Gender::Women));
        men.chain(women).collect()
    }

    /// Only one partition, tagged with its gender.
    pub fn into_partition_queries(self, gender: Gender) -> Vec<FighterQuery> {
        let entries = match gender {
            Gender::Men => self.men,
            Gender::Women => self.women,
        };
        entries.into_iter().map(|q| q.with_gender(gender)).collect()
    }
}
