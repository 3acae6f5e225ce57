//! Optional field outcomes
//!
//! Assemblers guard each optional enrichment separately. A field is either
//! present or absent with a reason; turning the outcome into an `Option`
//! logs the reason together with the record's context.

use super::extractor::select_all;
use super::{ParseContext, ParsingError, ParsingResult};
use lazy_static::lazy_static;
use regex::Regex;
use scraper::ElementRef;
use std::fmt;
use std::str::FromStr;
use tracing::{debug, warn};

lazy_static! {
    static ref LEADING_NUMBER: Regex =
        Regex::new(r"^\s*(-?\d+(?:[.,]\d+)?)").expect("leading number pattern is valid");
}

/// Why an optional field ended up absent
#[derive(Debug, Clone, PartialEq)]
pub enum AbsenceReason {
    /// The markup did not contain the field
    Extraction(ParsingError),
    /// The field was found but did not parse as a number
    NotNumeric { raw: String },
}

impl fmt::Display for AbsenceReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Extraction(error) => write!(f, "{error}"),
            Self::NotNumeric { raw } => write!(f, "not numeric: '{raw}'"),
        }
    }
}

/// Outcome of one optional sub-extraction
#[derive(Debug, Clone, PartialEq)]
pub enum FieldOutcome<T> {
    Present(T),
    Absent(AbsenceReason),
}

impl<T> FieldOutcome<T> {
    pub fn from_result(result: ParsingResult<T>) -> Self {
        match result {
            Ok(value) => Self::Present(value),
            Err(error) => Self::Absent(AbsenceReason::Extraction(error)),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> FieldOutcome<U> {
        match self {
            Self::Present(value) => FieldOutcome::Present(f(value)),
            Self::Absent(reason) => FieldOutcome::Absent(reason),
        }
    }

    pub fn and_then<U>(self, f: impl FnOnce(T) -> FieldOutcome<U>) -> FieldOutcome<U> {
        match self {
            Self::Present(value) => f(value),
            Self::Absent(reason) => FieldOutcome::Absent(reason),
        }
    }

    /// Discard the reason without logging
    pub fn ok(self) -> Option<T> {
        match self {
            Self::Present(value) => Some(value),
            Self::Absent(_) => None,
        }
    }

    /// Resolve to an `Option`, logging why the field is absent
    pub fn into_option(self, field: &str, context: &ParseContext) -> Option<T> {
        match self {
            Self::Present(value) => Some(value),
            Self::Absent(reason @ AbsenceReason::Extraction(_)) => {
                warn!("Optional field '{}' omitted for {}: {}", field, context, reason);
                None
            }
            Self::Absent(reason) => {
                debug!("Optional field '{}' omitted for {}: {}", field, context, reason);
                None
            }
        }
    }
}

impl FieldOutcome<String> {
    /// Parse-then-validate numeric coercion; a non-numeric value is absent, never zero
    pub fn numeric<N: FromStr>(self) -> FieldOutcome<N> {
        self.and_then(|raw| match parse_leading_number(&raw) {
            Some(number) => FieldOutcome::Present(number),
            None => FieldOutcome::Absent(AbsenceReason::NotNumeric { raw }),
        })
    }
}

impl<T> From<ParsingResult<T>> for FieldOutcome<T> {
    fn from(result: ParsingResult<T>) -> Self {
        Self::from_result(result)
    }
}

/// Optional block of a page
///
/// A missing container means the page simply has no such block and yields
/// `None` quietly. A container that exists but cannot be read is logged as a
/// degraded field.
pub fn optional_section<T>(
    root: ElementRef<'_>,
    container: &str,
    field: &str,
    context: &ParseContext,
    extract: impl FnOnce(ElementRef<'_>) -> ParsingResult<T>,
) -> Option<T> {
    let section = match select_all(root, container) {
        Ok(found) => found.into_iter().next(),
        Err(e) => return FieldOutcome::<T>::from_result(Err(e)).into_option(field, context),
    };
    match section {
        Some(section) => FieldOutcome::from_result(extract(section)).into_option(field, context),
        None => {
            debug!("No '{}' section for {}", field, context);
            None
        }
    }
}

/// Fail with `RequiredFieldMissing` when a list extraction found nothing
pub fn non_empty<T>(items: Vec<T>, selector: &str) -> ParsingResult<Vec<T>> {
    if items.is_empty() {
        Err(ParsingError::required_field_missing(selector, None))
    } else {
        Ok(items)
    }
}

/// Number at the start of `raw` ("120 мин." → 120, "18+" → 18, "1,83 м" → 1.83)
pub fn parse_leading_number<N: FromStr>(raw: &str) -> Option<N> {
    let captures = LEADING_NUMBER.captures(raw)?;
    let number = captures.get(1)?.as_str().replace(',', ".");
    number.parse().ok()
}

/// Digits of a vote counter such as "(1 234 567)" or "(12,345)"
pub fn parse_grouped_count(raw: &str) -> Option<u64> {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return None;
    }
    digits.parse().ok()
}
