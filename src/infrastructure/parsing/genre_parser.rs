//! Genre directory from the home page navigation

use super::extractor::{extract_attribute, extract_text, resolve_url, select_all};
use super::{ParseContext, ParsingResult};
use crate::domain::{ContentType, GenreInfo};
use scraper::Html;
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Genre links per content section of the top navigation menu
pub fn parse_genres(
    html: &Html,
    base_url: &str,
    context: &ParseContext,
) -> ParsingResult<BTreeMap<ContentType, Vec<GenreInfo>>> {
    let mut directory = BTreeMap::new();

    for menu_item in select_all(html.root_element(), "#topnav-menu .b-topnav__item")? {
        let Some(kind) = extract_text(menu_item, Some(".b-topnav__item-link"))
            .ok()
            .and_then(|label| ContentType::from_label(&label))
        else {
            continue;
        };

        let mut genres = Vec::new();
        for anchor in select_all(menu_item, ".b-topnav__sub ul.left a")? {
            let name = extract_text(anchor, None);
            let href = extract_attribute(anchor, "href", None);
            match (name, href) {
                (Ok(name), Ok(href)) => genres.push(GenreInfo {
                    name,
                    url: resolve_url(&href, base_url)?,
                }),
                (Err(e), _) | (_, Err(e)) => {
                    warn!("Skipping genre link under {:?} in {}: {}", kind, context, e);
                }
            }
        }
        debug!("{} genres under {:?}", genres.len(), kind);
        directory.insert(kind, genres);
    }

    Ok(directory)
}
