//! Person details

use super::catalog::CatalogItem;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Career taxonomy; the site uses many more labels than these
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Career {
    Actor,
    Producer,
    Director,
    Writer,
    Editor,
    Operator,
    Composer,
    Artist,
}

impl Career {
    pub const ALL: [Self; 8] = [
        Self::Actor,
        Self::Producer,
        Self::Director,
        Self::Writer,
        Self::Editor,
        Self::Operator,
        Self::Composer,
        Self::Artist,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Actor => "Актер",
            Self::Producer => "Продюсер",
            Self::Director => "Режиссер",
            Self::Writer => "Сценарист",
            Self::Editor => "Монтажер",
            Self::Operator => "Оператор",
            Self::Composer => "Композитор",
            Self::Artist => "Художник",
        }
    }

    /// Case-insensitive exact match against the known labels
    pub fn from_label(label: &str) -> Option<Self> {
        let wanted = label.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|career| career.label().to_lowercase() == wanted)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonDetails {
    pub id: u64,
    pub url: String,
    pub name: String,
    pub original_name: Option<String>,
    pub photo: Option<String>,
    pub careers: Vec<Career>,
    /// Metres
    pub height: Option<f32>,
    pub birth_date: Option<String>,
    pub birth_place: Option<String>,
    pub death_date: Option<String>,
    pub death_place: Option<String>,
    /// Role heading → items credited under it
    pub filmography: BTreeMap<String, Vec<CatalogItem>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_career_matching_ignores_case() {
        assert_eq!(Career::from_label("актер"), Some(Career::Actor));
        assert_eq!(Career::from_label(" РЕЖИССЕР "), Some(Career::Director));
        assert_eq!(Career::from_label("Каскадер"), None);
    }
}
