//! Rezka Scraper - extraction and deobfuscation engine for HDRezka
//!
//! Fetches catalog listings, item and person pages, comments and player
//! payloads through a [`Transport`](infrastructure::Transport), and turns the
//! site's markup into the typed records of [`domain`]. Optional fields degrade
//! to `None` with a warning; required ones fail the record.

// Module declarations
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;

pub use application::{BrowseQuery, BrowseSection, EpisodeSelection, RezkaScraper};
pub use error::{ScraperError, ScraperResult};
pub use infrastructure::stream_decoder::decode_streams;
