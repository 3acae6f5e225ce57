//! Domain module - extracted records
//!
//! Plain value types produced per request. No I/O and no parsing lives here;
//! the assemblers in `infrastructure::parsing` build these records.

pub mod account;
pub mod catalog;
pub mod comment;
pub mod item;
pub mod pagination;
pub mod person;
pub mod stream;

pub use account::{LoginResult, UserProfile};
pub use catalog::{CatalogItem, ContentType, GenreInfo, Link, ListingFilter, WatchedItem};
pub use comment::{Comment, CommentAuthor, CommentLike};
pub use item::{
    CurrentWatch, Episode, FranchiseEntry, ItemDetails, PersonCredit, Rating, Ratings,
    RoadmapEntry, Season, Translator,
};
pub use pagination::{PageMeta, Paginated};
pub use person::{Career, PersonDetails};
pub use stream::{StreamBundle, StreamDescriptor, SubtitleDescriptor};
