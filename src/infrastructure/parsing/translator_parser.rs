//! Translator list with popularity joined from the statistics tooltip

use super::extractor::{extract_attribute, extract_text, has_class, select_all};
use super::field::{non_empty, parse_leading_number};
use super::{ParseContext, ParsingError, ParsingResult};
use crate::domain::Translator;
use scraper::{ElementRef, Html};
use std::collections::HashMap;
use tracing::{debug, error};

const TRANSLATOR_ITEM: &str = ".b-translator__item";
const STATS_HOLDER: &str = ".b-rgstats__help";
const STATS_ITEM: &str = ".b-rgstats__list_item";
const PAID_CLASS: &str = "b-prem_translator";

/// Lowercased name with whitespace runs collapsed
pub fn normalize_name(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Name → share of viewers, read from the HTML embedded in the stats tooltip
///
/// The tooltip is itself a document stored in the `title` attribute, so it
/// gets a second parse.
pub fn parse_popularity(root: ElementRef<'_>) -> ParsingResult<HashMap<String, f32>> {
    let embedded = extract_attribute(root, "title", Some(STATS_HOLDER))?;
    let stats = Html::parse_fragment(&embedded);

    let mut popularity = HashMap::new();
    for item in select_all(stats.root_element(), STATS_ITEM)? {
        let Ok(name) = extract_text(item, Some(".title")) else {
            continue;
        };
        let share = extract_text(item, Some(".count"))
            .ok()
            .and_then(|raw| parse_leading_number::<f32>(&raw));
        if let Some(share) = share {
            popularity.insert(normalize_name(&name), share);
        }
    }
    Ok(popularity)
}

fn parse_translator(item: ElementRef<'_>) -> ParsingResult<Translator> {
    let raw_id = extract_attribute(item, "data-translator_id", None)?;
    let id = raw_id
        .trim()
        .parse()
        .map_err(|_| ParsingError::invalid_number("data-translator_id", &raw_id))?;
    let name = extract_attribute(item, "title", None)
        .map(|title| title.trim().to_string())
        .or_else(|_| extract_text(item, None))?;

    Ok(Translator {
        id,
        name,
        popularity: None,
        paid: Some(has_class(item, PAID_CLASS)),
    })
}

/// Translators offered on an item page
///
/// Popularity is attached when the statistics block is present; a missing
/// or unreadable block leaves every translator without it.
pub fn parse_translators(root: ElementRef<'_>, context: &ParseContext) -> ParsingResult<Vec<Translator>> {
    let mut translators = Vec::new();
    for (index, item) in select_all(root, TRANSLATOR_ITEM)?.into_iter().enumerate() {
        match parse_translator(item) {
            Ok(translator) => translators.push(translator),
            Err(e) => error!("Failed to extract translator {} of {}: {}", index, context, e),
        }
    }
    let mut translators = non_empty(translators, TRANSLATOR_ITEM)?;

    match parse_popularity(root) {
        Ok(popularity) => {
            for translator in &mut translators {
                translator.popularity = popularity.get(&normalize_name(&translator.name)).copied();
            }
        }
        Err(e) => debug!("No translator statistics for {}: {}", context, e),
    }

    Ok(translators)
}
