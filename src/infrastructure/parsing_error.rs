//! Error types for the extraction engine
//!
//! Extraction failures, stream decode failures and transport failures are kept
//! in separate enums so callers can tell "the markup drifted" apart from "the
//! site is unreachable" without string matching.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParsingError {
    #[error("Required field not found: selector '{selector}'{}", attribute_suffix(.attribute))]
    RequiredFieldMissing {
        selector: String,
        attribute: Option<String>,
    },

    #[error("Field is empty: selector '{selector}'{}", attribute_suffix(.attribute))]
    EmptyValue {
        selector: String,
        attribute: Option<String>,
    },

    #[error("Invalid CSS selector: {selector} - {reason}")]
    InvalidSelector { selector: String, reason: String },

    #[error("Field '{field}' is not numeric: '{raw}'")]
    InvalidNumber { field: String, raw: String },

    #[error("No numeric id found in URL: {url}")]
    IdentityMissing { url: String },

    #[error("Failed to resolve URL '{url}': {reason}")]
    UrlResolutionFailed { url: String, reason: String },

    #[error("Unexpected payload: {reason}")]
    InvalidPayload { reason: String },
}

fn attribute_suffix(attribute: &Option<String>) -> String {
    attribute
        .as_ref()
        .map(|name| format!(", attribute '{name}'"))
        .unwrap_or_default()
}

impl ParsingError {
    /// Create a required field missing error for a selector and optional attribute
    pub fn required_field_missing(selector: &str, attribute: Option<&str>) -> Self {
        Self::RequiredFieldMissing {
            selector: selector.to_string(),
            attribute: attribute.map(str::to_string),
        }
    }

    /// Create an empty value error for a selector and optional attribute
    pub fn empty_value(selector: &str, attribute: Option<&str>) -> Self {
        Self::EmptyValue {
            selector: selector.to_string(),
            attribute: attribute.map(str::to_string),
        }
    }

    pub fn invalid_selector(selector: &str, reason: impl Into<String>) -> Self {
        Self::InvalidSelector {
            selector: selector.to_string(),
            reason: reason.into(),
        }
    }

    pub fn invalid_number(field: &str, raw: &str) -> Self {
        Self::InvalidNumber {
            field: field.to_string(),
            raw: raw.to_string(),
        }
    }

    pub fn identity_missing(url: &str) -> Self {
        Self::IdentityMissing {
            url: url.to_string(),
        }
    }

    pub fn invalid_payload(reason: impl Into<String>) -> Self {
        Self::InvalidPayload {
            reason: reason.into(),
        }
    }

    /// Selector the failure refers to, if any
    pub fn selector(&self) -> Option<&str> {
        match self {
            Self::RequiredFieldMissing { selector, .. }
            | Self::EmptyValue { selector, .. }
            | Self::InvalidSelector { selector, .. } => Some(selector),
            _ => None,
        }
    }
}

pub type ParsingResult<T> = Result<T, ParsingError>;

/// Failure while recovering stream URLs from an obfuscated payload
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StreamDecodeError {
    #[error("Stream payload is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("Decoded stream listing is not UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Failure reported by the transport collaborator
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("Resource not found at {url}")]
    NotFound { url: String },

    #[error("Request to {url} failed: {reason}")]
    Network { url: String, reason: String },

    #[error("HTTP request failed with status {status}: {url}")]
    Status { url: String, status: u16 },

    #[error("HTTP client error: {reason}")]
    Client { reason: String },
}

impl TransportError {
    /// Network failures are the only ones worth another attempt
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Network { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_carry_selector_and_attribute() {
        let err = ParsingError::required_field_missing(".b-post__title h1", None);
        assert_eq!(
            err.to_string(),
            "Required field not found: selector '.b-post__title h1'"
        );

        let err = ParsingError::empty_value(".b-sidecover img", Some("src"));
        assert_eq!(
            err.to_string(),
            "Field is empty: selector '.b-sidecover img', attribute 'src'"
        );
        assert_eq!(err.selector(), Some(".b-sidecover img"));
    }

    #[test]
    fn test_only_network_errors_are_retryable() {
        let network = TransportError::Network {
            url: "https://rezka.ag/".to_string(),
            reason: "connection reset".to_string(),
        };
        let missing = TransportError::NotFound {
            url: "https://rezka.ag/missing/".to_string(),
        };
        assert!(network.is_retryable());
        assert!(!missing.is_retryable());
    }
}
