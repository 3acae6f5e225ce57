//! Person page assembler

use super::catalog_list_parser::CatalogListParser;
use super::dates::parse_long_date;
use super::extractor::{
    extract_attribute, extract_text, find_labeled_row, id_from_url, labeled_row_value, select_all,
    select_first,
};
use super::field::{FieldOutcome, optional_section};
use super::{ParseContext, ParsingConfig, ParsingResult};
use crate::domain::{Career, CatalogItem, PersonDetails};
use scraper::{ElementRef, Html};
use std::collections::BTreeMap;
use tracing::debug;

const INFO_TABLE: &str = ".b-post__info";
const CAREER_BLOCK: &str = ".b-person__career";

mod labels {
    pub const CAREER: &str = "Карьера";
    pub const HEIGHT: &str = "Рост";
    pub const BIRTH_DATE: &str = "Дата рождения";
    pub const BIRTH_PLACE: &str = "Место рождения";
    pub const DEATH_DATE: &str = "Дата смерти";
    pub const DEATH_PLACE: &str = "Место смерти";
}

/// Assembler for person pages
#[derive(Debug, Clone)]
pub struct PersonParser {
    filmography: CatalogListParser,
}

impl PersonParser {
    pub fn new(config: &ParsingConfig) -> Self {
        Self {
            filmography: CatalogListParser::filmography(&config.base_url),
        }
    }

    pub fn parse(&self, html: &Html, url: &str) -> ParsingResult<PersonDetails> {
        let root = html.root_element();
        let id = id_from_url(url)?;
        let context = ParseContext::new("person", url).with_record_id(id);
        let name = extract_text(root, Some(".b-post__title .t1"))?;
        debug!("Assembling {} '{}'", context, name);

        let original_name = extract_text(root, Some(".b-post__title .t2")).ok();
        let photo = FieldOutcome::from(extract_attribute(root, "src", Some(".b-sidecover img")))
            .into_option("photo", &context);

        let info = select_first(root, INFO_TABLE).ok();
        let row = |label: &str| info.and_then(|table| labeled_row_value(table, label).ok());

        let careers = info
            .and_then(|table| FieldOutcome::from(parse_careers(table)).into_option("careers", &context))
            .unwrap_or_default();
        let height = row(labels::HEIGHT).and_then(|raw| {
            FieldOutcome::Present(raw)
                .numeric::<f32>()
                .into_option("height", &context)
        });
        let birth_date = dated_row(info, "birthDate", labels::BIRTH_DATE);
        let birth_place = row(labels::BIRTH_PLACE);
        let death_date = dated_row(info, "deathDate", labels::DEATH_DATE);
        let death_place = row(labels::DEATH_PLACE);

        let filmography = optional_section(root, CAREER_BLOCK, "filmography", &context, |_| {
            self.parse_filmography(root, &context)
        })
        .unwrap_or_default();

        Ok(PersonDetails {
            id,
            url: url.to_string(),
            name,
            original_name,
            photo,
            careers,
            height,
            birth_date,
            birth_place,
            death_date,
            death_place,
            filmography,
        })
    }

    fn parse_filmography(
        &self,
        root: ElementRef<'_>,
        context: &ParseContext,
    ) -> ParsingResult<BTreeMap<String, Vec<CatalogItem>>> {
        let mut filmography = BTreeMap::new();
        for block in select_all(root, CAREER_BLOCK)? {
            let Ok(role) = extract_text(block, Some("h2")) else {
                continue;
            };
            let items = self.filmography.parse_items_in(block, context);
            filmography.insert(role, items);
        }
        Ok(filmography)
    }
}

/// Career tags of the "Карьера" row; labels outside the taxonomy are dropped
fn parse_careers(table: ElementRef<'_>) -> ParsingResult<Vec<Career>> {
    let row = find_labeled_row(table, labels::CAREER)?;
    let mut careers = Vec::new();
    for anchor in select_all(row, "a")? {
        let Ok(label) = extract_text(anchor, None) else {
            continue;
        };
        if let Some(career) = Career::from_label(&label) {
            if !careers.contains(&career) {
                careers.push(career);
            }
        }
    }
    Ok(careers)
}

/// Machine-readable `time[itemprop]` value, else the row's long date
fn dated_row(info: Option<ElementRef<'_>>, itemprop: &str, label: &str) -> Option<String> {
    let table = info?;
    extract_attribute(table, "datetime", Some(&format!("time[itemprop=\"{itemprop}\"]")))
        .ok()
        .or_else(|| {
            labeled_row_value(table, label)
                .ok()
                .and_then(|raw| parse_long_date(&raw))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_career_labels_are_dropped() {
        let html = Html::parse_document(
            r#"<table class="b-post__info"><tr>
                <td><h2>Карьера</h2>:</td>
                <td><a href="/person/actor/">Актер</a>, <a href="/x/">Каскадер</a>, <a href="/y/">продюсер</a></td>
            </tr></table>"#,
        );
        let table = select_first(html.root_element(), INFO_TABLE).unwrap();
        assert_eq!(parse_careers(table).unwrap(), vec![Career::Actor, Career::Producer]);
    }
}
