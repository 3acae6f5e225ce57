//! Long-form item (movie / show) details

use super::catalog::Link;
use serde::{Deserialize, Serialize};

/// Credited person on an item page
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PersonCredit {
    pub id: u64,
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    pub score: f32,
    pub votes: u64,
}

/// Up to three independent rating sources
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Ratings {
    pub imdb: Option<Rating>,
    pub kinopoisk: Option<Rating>,
    /// The site's own rating
    pub site: Option<Rating>,
}

impl Ratings {
    pub fn is_empty(&self) -> bool {
        self.imdb.is_none() && self.kinopoisk.is_none() && self.site.is_none()
    }
}

/// Dubbing team offering an alternate version of the item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Translator {
    pub id: u64,
    pub name: String,
    /// Share of viewers, in percent
    pub popularity: Option<f32>,
    pub paid: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Episode {
    pub id: u32,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Season {
    pub id: u32,
    pub title: String,
    pub episodes: Vec<Episode>,
}

/// Playback selection preloaded by the page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentWatch {
    pub translator_id: u64,
    /// Absent for movies
    pub season: Option<u32>,
    pub episode: Option<u32>,
}

/// Announced future episode
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoadmapEntry {
    pub season: u32,
    pub episode: u32,
    pub title: Option<String>,
    pub release_date: Option<String>,
}

/// Sibling entry of the item's franchise
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FranchiseEntry {
    pub position: Option<u32>,
    pub title: String,
    /// Absent for the item itself
    pub url: Option<String>,
    pub year: Option<String>,
    pub rating: Option<f32>,
    pub is_current: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemDetails {
    pub id: u64,
    pub url: String,
    pub title: String,
    pub original_title: Option<String>,
    pub poster: Option<String>,
    pub description: Option<String>,

    pub slogan: Option<String>,
    /// `YYYY-MM-DD`
    pub release_date: Option<String>,
    pub country: Option<String>,
    pub quality: Option<String>,
    pub age_restriction: Option<u32>,
    /// Minutes
    pub duration: Option<u32>,

    pub directors: Option<Vec<PersonCredit>>,
    pub actors: Option<Vec<PersonCredit>>,
    pub genres: Option<Vec<Link>>,
    pub collections: Option<Vec<Link>>,
    pub lists: Option<Vec<Link>>,

    pub rating: Option<Ratings>,

    pub seasons: Option<Vec<Season>>,
    pub current_watch: Option<CurrentWatch>,
    pub roadmap: Option<Vec<RoadmapEntry>>,
    pub franchise: Option<Vec<FranchiseEntry>>,
    pub translators: Option<Vec<Translator>>,
}
