//! Parsing context for record assembly
//!
//! Carries the identity of the record being assembled so that degraded
//! optional fields can be logged with enough detail to diagnose markup drift.

use std::fmt;

/// Context information for parsing operations
#[derive(Debug, Clone)]
pub struct ParseContext {
    /// Kind of record being assembled ("item", "person", "comment", ...)
    pub record_kind: &'static str,

    /// Source URL of the document
    pub url: String,

    /// Record identity when it is already known
    pub record_id: Option<u64>,

    /// Listing page the document came from
    pub page: Option<u32>,
}

impl ParseContext {
    /// Create new parse context
    pub fn new(record_kind: &'static str, url: impl Into<String>) -> Self {
        Self {
            record_kind,
            url: url.into(),
            record_id: None,
            page: None,
        }
    }

    /// Attach record identity once the id has been extracted
    pub fn with_record_id(mut self, id: u64) -> Self {
        self.record_id = Some(id);
        self
    }

    /// Set source listing page
    pub fn with_page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }
}

impl fmt::Display for ParseContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.record_kind)?;
        if let Some(id) = self.record_id {
            write!(f, " #{id}")?;
        }
        if let Some(page) = self.page {
            write!(f, " (page {page})")?;
        }
        write!(f, " at {}", self.url)
    }
}
