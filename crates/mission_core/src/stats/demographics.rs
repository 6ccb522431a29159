//! Client gender breakdown.

use crate::model::{Client, Gender};
use serde::Serialize;

/// Client counts per normalized gender.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct GenderCounts {
    pub female: usize,
    pub male: usize,
    pub non_binary: usize,
    /// Blank or unrecognized intake values.
    pub unspecified: usize,
}

impl GenderCounts {
    pub fn total(&self) -> usize {
        self.female + self.male + self.non_binary + self.unspecified
    }

    pub fn get(&self, gender: Gender) -> usize {
        match gender {
            Gender::Female => self.female,
            Gender::Male => self.male,
            Gender::NonBinary => self.non_binary,
        }
    }
}

pub fn gender_breakdown(clients: &[Client]) -> GenderCounts {
    clients
        .iter()
        .fold(GenderCounts::default(), |mut counts, client| {
            match client.gender() {
                Some(Gender::Female) => counts.female += 1,
                Some(Gender::Male) => counts.male += 1,
                Some(Gender::NonBinary) => counts.non_binary += 1,
                None => counts.unspecified += 1,
            }
            counts
        })
}
