//! Error module re-export
//!
//! This module re-exports the parsing error types.

pub use crate::infrastructure::parsing_error::{ParsingError, ParsingResult, StreamDecodeError};
