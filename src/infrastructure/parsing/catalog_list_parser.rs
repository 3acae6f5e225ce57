//! Catalog listing parser
//!
//! Reads the card grid shared by browse, search and filmography pages. A card
//! missing a required field is logged and skipped; the rest of the page is
//! still returned.

use super::config::{CatalogItemSelectors, ParsingConfig};
use super::extractor::{extract_attribute, extract_text, has_class, resolve_url, select_all, select_first};
use super::field::FieldOutcome;
use super::{ParseContext, ParsingError, ParsingResult};
use crate::domain::CatalogItem;
use scraper::{ElementRef, Html};
use tracing::{debug, error};

const SERIES_CLASS: &str = "series";
const DISABLED_CLASS: &str = "disabled";

/// Parser for catalog cards
#[derive(Debug, Clone)]
pub struct CatalogListParser {
    selectors: CatalogItemSelectors,
    base_url: String,
}

impl CatalogListParser {
    pub fn new(config: &ParsingConfig) -> Self {
        Self::with_selectors(config.catalog_item_selectors.clone(), &config.base_url)
    }

    pub fn with_selectors(selectors: CatalogItemSelectors, base_url: &str) -> Self {
        Self {
            selectors,
            base_url: base_url.to_string(),
        }
    }

    /// Parser for the cards of a person's filmography
    pub fn filmography(base_url: &str) -> Self {
        Self::with_selectors(CatalogItemSelectors::filmography(), base_url)
    }

    /// Parse every card on a listing document
    ///
    /// An empty result means the listing is exhausted.
    pub fn parse_items(&self, html: &Html, context: &ParseContext) -> Vec<CatalogItem> {
        self.parse_items_in(html.root_element(), context)
    }

    /// Parse every card below `root`
    pub fn parse_items_in(&self, root: ElementRef<'_>, context: &ParseContext) -> Vec<CatalogItem> {
        let cards = match select_all(root, &self.selectors.container) {
            Ok(cards) => cards,
            Err(e) => {
                error!("Cannot select catalog cards for {}: {}", context, e);
                return Vec::new();
            }
        };

        let mut items = Vec::with_capacity(cards.len());
        for (index, card) in cards.into_iter().enumerate() {
            match self.parse_card(card, context) {
                Ok(item) => items.push(item),
                Err(e) => {
                    error!("Failed to extract catalog card {} of {}: {}", index, context, e);
                }
            }
        }

        debug!("Extracted {} catalog items from {}", items.len(), context);
        items
    }

    fn parse_card(&self, card: ElementRef<'_>, context: &ParseContext) -> ParsingResult<CatalogItem> {
        let raw_id = extract_attribute(card, "data-id", None)?;
        let id = raw_id
            .trim()
            .parse::<u64>()
            .map_err(|_| ParsingError::invalid_number("data-id", &raw_id))?;
        let context = context.clone().with_record_id(id);

        let href = extract_attribute(card, "href", Some(&self.selectors.link))?;
        let url = resolve_url(&href, &self.base_url)?;
        let title = extract_text(card, Some(&self.selectors.title))?;
        let kind = self.extract_kind(card)?;

        let image_url = FieldOutcome::from(extract_attribute(card, "src", Some(&self.selectors.image)))
            .into_option("image_url", &context);
        let details = FieldOutcome::from(extract_text(card, Some(&self.selectors.details)))
            .into_option("details", &context);
        let additional_info = self
            .selectors
            .additional_info
            .as_deref()
            .and_then(|selector| extract_text(card, Some(selector)).ok());

        Ok(CatalogItem {
            id,
            url,
            title,
            image_url,
            kind,
            details,
            additional_info,
        })
    }

    fn extract_kind(&self, card: ElementRef<'_>) -> ParsingResult<String> {
        if let Some(selector) = &self.selectors.kind {
            return extract_text(card, Some(selector));
        }
        let category = select_first(card, &self.selectors.category)?;
        let kind = if has_class(category, SERIES_CLASS) { "series" } else { "movie" };
        Ok(kind.to_string())
    }

    /// Whether the listing shows an active next-page control
    ///
    /// The control is a link only while another page exists; on the last
    /// page it degrades to a plain span or carries a `disabled` class.
    pub fn has_next_page(&self, html: &Html) -> bool {
        let Ok(controls) = select_all(html.root_element(), &self.selectors.next_page) else {
            return false;
        };
        controls.into_iter().any(|control| {
            if has_class(control, DISABLED_CLASS) {
                return false;
            }
            let link = if control.value().name() == "a" {
                Some(control)
            } else {
                control
                    .parent()
                    .and_then(ElementRef::wrap)
                    .filter(|parent| parent.value().name() == "a")
                    .or_else(|| select_first(control, "a").ok())
            };
            link.and_then(|a| a.value().attr("href"))
                .is_some_and(|href| !href.trim().is_empty())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LISTING: &str = r#"
        <div class="b-content__inline_items">
            <div class="b-content__inline_item" data-id="646">
                <div class="b-content__inline_item-cover">
                    <a href="https://rezka.ag/series/thriller/646-vo-vse-tyazhkie-2008.html">
                        <img src="https://static.example/646.jpg" />
                        <span class="cat series"><i class="entity">Сериал</i></span>
                        <span class="info">5 сезонов</span>
                    </a>
                </div>
                <div class="b-content__inline_item-link">
                    <a href="https://rezka.ag/series/thriller/646-vo-vse-tyazhkie-2008.html">Во все тяжкие</a>
                    <div>2008 - 2013, США, Триллеры</div>
                </div>
            </div>
            <div class="b-content__inline_item" data-id="broken">
                <div class="b-content__inline_item-link"><a href="/x">Без номера</a></div>
            </div>
            <div class="b-content__inline_item" data-id="1171">
                <div class="b-content__inline_item-cover">
                    <a href="/films/drama/1171-zelenaya-milya-1999.html">
                        <span class="cat films"><i class="entity">Фильм</i></span>
                    </a>
                </div>
                <div class="b-content__inline_item-link">
                    <a href="/films/drama/1171-zelenaya-milya-1999.html">Зеленая миля</a>
                    <div>1999, США, Драмы</div>
                </div>
            </div>
        </div>
        <div class="b-navigation">
            <span class="b-navigation__prev i-sprt">&nbsp;</span>
            <a href="https://rezka.ag/films/page/2/"><span class="b-navigation__next i-sprt">&nbsp;</span></a>
        </div>
    "#;

    fn parser() -> CatalogListParser {
        CatalogListParser::new(&ParsingConfig::with_base_url("https://rezka.ag/"))
    }

    fn context() -> ParseContext {
        ParseContext::new("catalog page", "https://rezka.ag/films/").with_page(1)
    }

    #[test]
    fn test_cards_are_extracted_and_broken_card_skipped() {
        let html = Html::parse_document(LISTING);
        let items = parser().parse_items(&html, &context());

        assert_eq!(items.len(), 2);
        let first = &items[0];
        assert_eq!(first.id, 646);
        assert_eq!(first.title, "Во все тяжкие");
        assert_eq!(first.kind, "Сериал");
        assert_eq!(first.image_url.as_deref(), Some("https://static.example/646.jpg"));
        assert_eq!(first.details.as_deref(), Some("2008 - 2013, США, Триллеры"));
        assert_eq!(first.additional_info.as_deref(), Some("5 сезонов"));

        let second = &items[1];
        assert_eq!(second.url, "https://rezka.ag/films/drama/1171-zelenaya-milya-1999.html");
        assert_eq!(second.image_url, None);
        assert_eq!(second.additional_info, None);
    }

    #[test]
    fn test_next_page_link_is_detected() {
        let html = Html::parse_document(LISTING);
        assert!(parser().has_next_page(&html));
    }

    #[test]
    fn test_inactive_next_page_control() {
        let html = Html::parse_document(
            r#"<div class="b-navigation"><span class="b-navigation__next i-sprt">&nbsp;</span></div>"#,
        );
        assert!(!parser().has_next_page(&html));

        let disabled = Html::parse_document(
            r#"<a href="/page/3/" class="b-navigation__next disabled">next</a>"#,
        );
        assert!(!parser().has_next_page(&disabled));
    }

    #[test]
    fn test_empty_listing_yields_no_items() {
        let html = Html::parse_document("<div class=\"b-content__inline_items\"></div>");
        assert!(parser().parse_items(&html, &context()).is_empty());
    }

    #[test]
    fn test_filmography_cards_use_category_class() {
        let html = Html::parse_document(
            r#"<div class="b-sidelist">
                <div class="b-content__inline_item" data-id="646">
                    <div class="b-content__inline_item-cover">
                        <a href="/series/thriller/646-vo-vse-tyazhkie-2008.html"><span class="cat series"></span></a>
                    </div>
                    <div class="b-content__inline_item-link">
                        <a href="/series/thriller/646-vo-vse-tyazhkie-2008.html">Во все тяжкие</a>
                        <div class="misc">2008 - 2013</div>
                    </div>
                </div>
            </div>"#,
        );
        let items = CatalogListParser::filmography("https://rezka.ag/").parse_items(&html, &context());
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].kind, "series");
        assert_eq!(items[0].details.as_deref(), Some("2008 - 2013"));
    }
}
