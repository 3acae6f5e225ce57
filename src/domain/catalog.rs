//! Catalog listing records
//!
//! Lightweight entries produced once per listing-page card, plus the small
//! enumerations used to address catalog sections.

use serde::{Deserialize, Serialize};

/// One card on a browse, search or filmography listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogItem {
    pub id: u64,
    pub url: String,
    pub title: String,
    pub image_url: Option<String>,
    /// Type tag shown on the card ("Фильм", "Сериал", ...)
    #[serde(rename = "type")]
    pub kind: String,
    pub details: Option<String>,
    pub additional_info: Option<String>,
}

/// Named hyperlink (genres, collections, lists)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Link {
    pub name: String,
    pub url: String,
}

pub type GenreInfo = Link;

/// Top-level catalog sections
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ContentType {
    Films,
    Series,
    Cartoons,
    Anime,
}

impl ContentType {
    pub const ALL: [Self; 4] = [Self::Films, Self::Series, Self::Cartoons, Self::Anime];

    /// Navigation label used by the site
    pub fn label(self) -> &'static str {
        match self {
            Self::Films => "Фильмы",
            Self::Series => "Сериалы",
            Self::Cartoons => "Мультфильмы",
            Self::Anime => "Аниме",
        }
    }

    /// Path segment of the section's listing
    pub fn path(self) -> &'static str {
        match self {
            Self::Films => "films",
            Self::Series => "series",
            Self::Cartoons => "cartoons",
            Self::Anime => "animation",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::ALL.into_iter().find(|kind| kind.label() == label)
    }
}

/// Listing sort order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListingFilter {
    Last,
    Popular,
    Soon,
    Watching,
}

impl ListingFilter {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Last => "last",
            Self::Popular => "popular",
            Self::Soon => "soon",
            Self::Watching => "watching",
        }
    }
}

/// Entry of the signed-in user's "continue watching" list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WatchedItem {
    pub id: u64,
    pub url: String,
    pub title: String,
    pub image_url: Option<String>,
    pub details: Option<String>,
    pub last_watched_info: Option<String>,
    /// `YYYY-MM-DD`
    pub last_watched_at: String,
}
