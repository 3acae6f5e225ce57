//! Application layer module
//!
//! Services that fetch pages through the transport and hand them to the
//! parsers. Every service call returns a [`ScraperResult`](crate::error::ScraperResult).

pub mod account_service;
pub mod catalog_service;
pub mod comment_service;
pub mod item_service;
pub mod paginated_collector;
pub mod person_service;
pub mod session;
pub mod stream_service;

pub use account_service::AccountService;
pub use catalog_service::{BrowseQuery, BrowseSection, CatalogService};
pub use comment_service::CommentService;
pub use item_service::ItemService;
pub use paginated_collector::{CatalogPageSource, PageSource, PaginatedCollector, SearchPageSource};
pub use person_service::PersonService;
pub use session::RezkaScraper;
pub use stream_service::{EpisodeSelection, StreamService};
