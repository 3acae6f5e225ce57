//! HTML extraction and entity assembly
//!
//! [`extractor`] holds the fail-fast primitives; the `*_parser` modules
//! compose them into domain records, guarding each optional field through
//! [`field::FieldOutcome`].

pub mod account_parser;
pub mod catalog_list_parser;
pub mod comment_parser;
pub mod config;
pub mod context;
pub mod dates;
pub mod error;
pub mod extractor;
pub mod field;
pub mod franchise_parser;
pub mod genre_parser;
pub mod item_detail_parser;
pub mod person_parser;
pub mod translator_parser;
pub mod watch_history_parser;

// Re-export public types
pub use catalog_list_parser::CatalogListParser;
pub use config::{CatalogItemSelectors, ParsingConfig};
pub use context::ParseContext;
pub use error::{ParsingError, ParsingResult};
pub use extractor::{extract_attribute, extract_text};
pub use field::{AbsenceReason, FieldOutcome};
pub use item_detail_parser::ItemDetailParser;
pub use person_parser::PersonParser;
