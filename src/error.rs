//! Top-level error type returned by every service call

use crate::infrastructure::parsing_error::{ParsingError, TransportError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScraperError {
    #[error(transparent)]
    Parsing(#[from] ParsingError),

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("Unexpected JSON response: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Not logged in")]
    NotLoggedIn,

    #[error("Request rejected by the site: {message}")]
    Rejected { message: String },
}

impl ScraperError {
    pub fn rejected(message: Option<String>, fallback: &str) -> Self {
        Self::Rejected {
            message: message
                .filter(|message| !message.trim().is_empty())
                .unwrap_or_else(|| fallback.to_string()),
        }
    }

    /// Whether the requested page or record does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Transport(TransportError::NotFound { .. }))
    }
}

pub type ScraperResult<T> = Result<T, ScraperError>;
