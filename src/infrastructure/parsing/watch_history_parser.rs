//! "Continue watching" page of a signed-in user

use super::dates::parse_history_date;
use super::extractor::{extract_attribute, extract_text, own_text, select_all, select_first};
use super::{ParseContext, ParsingError, ParsingResult};
use crate::domain::WatchedItem;
use chrono::NaiveDate;
use scraper::{ElementRef, Html};
use tracing::error;

const ENTRY: &str = ".b-videosaves__list_item";
const ENTRY_ID_PREFIX: &str = "videosave-";

fn parse_entry(entry: ElementRef<'_>, today: NaiveDate) -> ParsingResult<WatchedItem> {
    let raw_id = extract_attribute(entry, "id", None)?;
    let id = raw_id
        .strip_prefix(ENTRY_ID_PREFIX)
        .and_then(|digits| digits.parse().ok())
        .ok_or_else(|| ParsingError::invalid_number("id", &raw_id))?;

    let link = select_first(entry, ".td.title a")?;
    let url = extract_attribute(link, "href", None)?;
    let title = extract_text(link, None)?;

    let last_watched_info = select_first(entry, ".td.info")
        .ok()
        .map(own_text)
        .filter(|text| !text.is_empty());
    let raw_date = extract_text(entry, Some(".td.date")).unwrap_or_default();

    Ok(WatchedItem {
        id,
        url,
        title,
        image_url: extract_attribute(link, "data-cover_url", None).ok(),
        details: extract_text(entry, Some(".td.title small")).ok(),
        last_watched_info,
        last_watched_at: parse_history_date(&raw_date, today),
    })
}

/// Entries of the history list; the header row and broken rows are skipped
pub fn parse_watch_history(html: &Html, today: NaiveDate, context: &ParseContext) -> ParsingResult<Vec<WatchedItem>> {
    let mut items = Vec::new();
    for entry in select_all(html.root_element(), ENTRY)? {
        let is_entry = entry
            .value()
            .attr("id")
            .is_some_and(|id| id.starts_with(ENTRY_ID_PREFIX));
        if !is_entry {
            continue;
        }
        match parse_entry(entry, today) {
            Ok(item) => items.push(item),
            Err(e) => error!("Failed to extract history entry of {}: {}", context, e),
        }
    }
    Ok(items)
}
