//! Franchise ("Все части") block of an item page

use super::extractor::{extract_attribute, extract_text, has_class, resolve_url, select_all};
use super::field::{non_empty, parse_leading_number};
use super::{ParseContext, ParsingResult};
use crate::domain::FranchiseEntry;
use scraper::ElementRef;
use tracing::error;

pub const FRANCHISE_BLOCK: &str = ".b-post__partcontent";
const FRANCHISE_ITEM: &str = ".b-post__partcontent_item";
const CURRENT_CLASS: &str = "current";

fn parse_entry(item: ElementRef<'_>, base_url: &str) -> ParsingResult<FranchiseEntry> {
    let title = extract_text(item, Some(".title"))?;
    // the current part is rendered without a link
    let url = extract_attribute(item, "href", Some(".title a"))
        .or_else(|_| extract_attribute(item, "data-url", None))
        .ok()
        .map(|href| resolve_url(&href, base_url))
        .transpose()?;

    Ok(FranchiseEntry {
        position: extract_text(item, Some(".num"))
            .ok()
            .and_then(|raw| parse_leading_number(&raw)),
        title,
        url,
        year: extract_text(item, Some(".year")).ok(),
        rating: extract_text(item, Some(".rating"))
            .ok()
            .and_then(|raw| parse_leading_number(&raw)),
        is_current: has_class(item, CURRENT_CLASS),
    })
}

/// Entries of the franchise block, in the order the site lists them
pub fn parse_franchise(
    block: ElementRef<'_>,
    base_url: &str,
    context: &ParseContext,
) -> ParsingResult<Vec<FranchiseEntry>> {
    let mut entries = Vec::new();
    for (index, item) in select_all(block, FRANCHISE_ITEM)?.into_iter().enumerate() {
        match parse_entry(item, base_url) {
            Ok(entry) => entries.push(entry),
            Err(e) => error!("Failed to extract franchise entry {} of {}: {}", index, context, e),
        }
    }
    non_empty(entries, FRANCHISE_ITEM)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::parsing::extractor::select_first;
    use scraper::Html;

    #[test]
    fn test_franchise_entries() {
        let html = Html::parse_document(
            r#"<div class="b-post__partcontent">
                <div class="b-post__partcontent_item" data-url="https://rezka.ag/series/646-x.html">
                    <div class="num">1</div>
                    <div class="title"><a href="https://rezka.ag/series/646-x.html">Во все тяжкие</a></div>
                    <div class="year">2008 год</div>
                    <div class="rating"><i>9.5</i></div>
                </div>
                <div class="b-post__partcontent_item current">
                    <div class="num">2</div>
                    <div class="title">Лучше звоните Солу</div>
                    <div class="year">2015 год</div>
                    <div class="rating"><i>—</i></div>
                </div>
            </div>"#,
        );
        let block = select_first(html.root_element(), FRANCHISE_BLOCK).unwrap();
        let context = ParseContext::new("item", "https://rezka.ag/series/1-y.html");
        let entries = parse_franchise(block, "https://rezka.ag/", &context).unwrap();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].position, Some(1));
        assert_eq!(entries[0].url.as_deref(), Some("https://rezka.ag/series/646-x.html"));
        assert_eq!(entries[0].rating, Some(9.5));
        assert!(!entries[0].is_current);

        assert_eq!(entries[1].title, "Лучше звоните Солу");
        assert_eq!(entries[1].url, None);
        assert_eq!(entries[1].year.as_deref(), Some("2015 год"));
        assert_eq!(entries[1].rating, None);
        assert!(entries[1].is_current);
    }
}
