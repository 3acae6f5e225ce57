//! Parsing configuration for HTML extraction
//!
//! Selector sets for listing cards live here so the same assembler can read
//! catalog pages and the differently marked filmography blocks.

use crate::infrastructure::config::defaults;
use serde::{Deserialize, Serialize};

/// Main parsing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParsingConfig {
    /// Base URL for resolving relative links
    pub base_url: String,

    /// Catalog card selectors used on browse and search pages
    pub catalog_item_selectors: CatalogItemSelectors,
}

impl Default for ParsingConfig {
    fn default() -> Self {
        Self::with_base_url(defaults::BASE_URL)
    }
}

impl ParsingConfig {
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            catalog_item_selectors: CatalogItemSelectors::default(),
        }
    }
}

/// CSS selectors for one catalog card
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogItemSelectors {
    /// Card container; carries the `data-id` attribute
    pub container: String,

    /// Link to the item page
    pub link: String,

    pub title: String,

    pub image: String,

    /// Type tag; `None` when the kind is derived from the category class instead
    pub kind: Option<String>,

    /// Category element whose `series` class marks a show
    pub category: String,

    pub details: String,

    pub additional_info: Option<String>,

    /// Next-page control of the listing
    pub next_page: String,
}

impl Default for CatalogItemSelectors {
    fn default() -> Self {
        Self {
            container: ".b-content__inline_item".to_string(),
            link: ".b-content__inline_item-cover a".to_string(),
            title: ".b-content__inline_item-link a".to_string(),
            image: ".b-content__inline_item-cover img".to_string(),
            kind: Some(".cat i.entity".to_string()),
            category: ".cat".to_string(),
            details: ".b-content__inline_item-link div".to_string(),
            additional_info: Some(".info".to_string()),
            next_page: ".b-navigation__next".to_string(),
        }
    }
}

impl CatalogItemSelectors {
    /// Cards inside a person's filmography block
    pub fn filmography() -> Self {
        Self {
            container: ".b-sidelist .b-content__inline_item".to_string(),
            kind: None,
            details: ".misc".to_string(),
            additional_info: None,
            ..Self::default()
        }
    }
}
