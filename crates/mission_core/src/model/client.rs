//! Client registry model and demographic normalization.

use super::event::ClientId;
use serde::{Deserialize, Serialize};

/// Registered shelter client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    pub client_id: ClientId,
    pub full_name: String,
    #[serde(default)]
    pub dob: Option<String>,
    /// Free-text gender as captured at intake.
    #[serde(default)]
    pub gender: Option<String>,
}

/// Normalized gender category used by the demographics chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Female,
    Male,
    NonBinary,
}

impl Gender {
    /// Maps intake free text to a category.
    ///
    /// Exact codes are checked first, then substring heuristics; `female`
    /// is tested before `male` because it contains it.
    pub fn normalize(raw: &str) -> Option<Self> {
        let value = raw.trim().to_ascii_lowercase();
        match value.as_str() {
            "" => return None,
            "f" | "female" | "woman" | "fema" => return Some(Self::Female),
            "m" | "male" | "man" => return Some(Self::Male),
            "nb" | "non-binary" | "nonbinary" | "non binary" => return Some(Self::NonBinary),
            _ => {}
        }

        if value.contains("female") {
            Some(Self::Female)
        } else if value.contains("male") {
            Some(Self::Male)
        } else if value.contains("non") && value.contains("bin") {
            Some(Self::NonBinary)
        } else {
            None
        }
    }
}

impl Client {
    pub fn gender(&self) -> Option<Gender> {
        self.gender.as_deref().and_then(Gender::normalize)
    }
}
