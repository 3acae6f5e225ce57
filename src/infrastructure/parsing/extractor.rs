//! Fail-fast field extraction over parsed documents
//!
//! Every extraction either yields a non-empty value or an explicit
//! [`ParsingError`] naming the selector (and attribute) that failed. Nothing
//! here substitutes a default; callers decide whether a field is optional.

use super::{ParsingError, ParsingResult};
use lazy_static::lazy_static;
use regex::Regex;
use scraper::{ElementRef, Selector};
use url::Url;

lazy_static! {
    static ref URL_ID: Regex = Regex::new(r"/(\d+)-").expect("url id pattern is valid");
}

/// Label used in diagnostics when the root itself is the target
const ROOT_TARGET: &str = ":root";

/// Compile a selector string, reporting the selector on failure
pub fn compile_selector(selector: &str) -> ParsingResult<Selector> {
    Selector::parse(selector)
        .map_err(|e| ParsingError::invalid_selector(selector, e.to_string()))
}

/// All elements under `root` matching `selector`, in document order
pub fn select_all<'a>(root: ElementRef<'a>, selector: &str) -> ParsingResult<Vec<ElementRef<'a>>> {
    let compiled = compile_selector(selector)?;
    Ok(root.select(&compiled).collect())
}

/// First element under `root` matching `selector`
pub fn select_first<'a>(root: ElementRef<'a>, selector: &str) -> ParsingResult<ElementRef<'a>> {
    let compiled = compile_selector(selector)?;
    root.select(&compiled)
        .next()
        .ok_or_else(|| ParsingError::required_field_missing(selector, None))
}

fn resolve_targets<'a>(
    root: ElementRef<'a>,
    selector: Option<&str>,
) -> ParsingResult<Vec<ElementRef<'a>>> {
    match selector {
        Some(selector) => select_all(root, selector),
        None => Ok(vec![root]),
    }
}

/// Trimmed text content of the target set
///
/// With a selector the text of every matching descendant is concatenated in
/// document order; without one the root's own text is used.
pub fn extract_text(root: ElementRef<'_>, selector: Option<&str>) -> ParsingResult<String> {
    let label = selector.unwrap_or(ROOT_TARGET);
    let targets = resolve_targets(root, selector)?;
    if targets.is_empty() {
        return Err(ParsingError::required_field_missing(label, None));
    }

    let text: String = targets.iter().flat_map(|element| element.text()).collect();
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ParsingError::empty_value(label, None));
    }
    Ok(trimmed.to_string())
}

/// Exact attribute value of the first element in the target set
pub fn extract_attribute(
    root: ElementRef<'_>,
    attribute: &str,
    selector: Option<&str>,
) -> ParsingResult<String> {
    let label = selector.unwrap_or(ROOT_TARGET);
    let targets = resolve_targets(root, selector)?;
    let first = targets
        .first()
        .ok_or_else(|| ParsingError::required_field_missing(label, Some(attribute)))?;

    match first.value().attr(attribute) {
        None => Err(ParsingError::required_field_missing(label, Some(attribute))),
        Some(value) if value.trim().is_empty() => {
            Err(ParsingError::empty_value(label, Some(attribute)))
        }
        Some(value) => Ok(value.to_string()),
    }
}

/// Whether any element under `root` matches `selector`
pub fn exists(root: ElementRef<'_>, selector: &str) -> ParsingResult<bool> {
    let compiled = compile_selector(selector)?;
    Ok(root.select(&compiled).next().is_some())
}

/// Direct element children of `element` with the given tag name
pub fn child_elements<'a>(element: ElementRef<'a>, tag: &str) -> Vec<ElementRef<'a>> {
    element
        .children()
        .filter_map(ElementRef::wrap)
        .filter(|child| child.value().name() == tag)
        .collect()
}

/// Text of the element's own text nodes, ignoring nested elements
pub fn own_text(element: ElementRef<'_>) -> String {
    element
        .children()
        .filter_map(|node| node.value().as_text())
        .map(|text| &**text)
        .collect::<String>()
        .trim()
        .to_string()
}

pub fn has_class(element: ElementRef<'_>, class: &str) -> bool {
    element.value().classes().any(|name| name == class)
}

/// Table row whose first cell contains `label`
///
/// Info tables label each row in the first cell ("Слоган:", "Страна:", ...);
/// CSS has no text predicate, so rows are matched here.
pub fn find_labeled_row<'a>(table: ElementRef<'a>, label: &str) -> ParsingResult<ElementRef<'a>> {
    let row_selector = compile_selector("tr")?;
    let cell_selector = compile_selector("td, th")?;

    table
        .select(&row_selector)
        .find(|row| {
            row.select(&cell_selector)
                .next()
                .is_some_and(|cell| cell.text().collect::<String>().contains(label))
        })
        .ok_or_else(|| ParsingError::required_field_missing(&format!("tr:contains({label})"), None))
}

/// Value cell (last cell) of a labeled row, as trimmed text
pub fn labeled_row_value(table: ElementRef<'_>, label: &str) -> ParsingResult<String> {
    let row = find_labeled_row(table, label)?;
    let cells = select_all(row, "td")?;
    let value = cells
        .last()
        .ok_or_else(|| ParsingError::required_field_missing(&format!("tr:contains({label}) td"), None))?;
    extract_text(*value, None)
        .map_err(|_| ParsingError::empty_value(&format!("tr:contains({label}) td:last-child"), None))
}

/// Absolute form of `href`, resolved against `base_url` when relative
pub fn resolve_url(href: &str, base_url: &str) -> ParsingResult<String> {
    if href.starts_with("http://") || href.starts_with("https://") {
        return Ok(href.to_string());
    }
    let base = Url::parse(base_url).map_err(|e| ParsingError::UrlResolutionFailed {
        url: base_url.to_string(),
        reason: format!("invalid base URL: {e}"),
    })?;
    base.join(href)
        .map(String::from)
        .map_err(|e| ParsingError::UrlResolutionFailed {
            url: href.to_string(),
            reason: e.to_string(),
        })
}

/// Numeric id embedded in a canonical URL (`/films/drama/1171-name.html` → 1171)
pub fn id_from_url(url: &str) -> ParsingResult<u64> {
    URL_ID
        .captures(url)
        .and_then(|captures| captures[1].parse().ok())
        .ok_or_else(|| ParsingError::identity_missing(url))
}
