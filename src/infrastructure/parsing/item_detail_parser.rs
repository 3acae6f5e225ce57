//! Item (movie / show) page assembler
//!
//! Identity and title are required; every other block is extracted on its own
//! and dropped with a warning when the markup does not match.

use super::dates::parse_long_date;
use super::extractor::{
    compile_selector, extract_attribute, extract_text, find_labeled_row, id_from_url,
    labeled_row_value, resolve_url, select_all, select_first,
};
use super::field::{FieldOutcome, non_empty, optional_section, parse_grouped_count, parse_leading_number};
use super::franchise_parser::{FRANCHISE_BLOCK, parse_franchise};
use super::translator_parser::parse_translators;
use super::{ParseContext, ParsingConfig, ParsingError, ParsingResult};
use crate::domain::{
    CurrentWatch, Episode, ItemDetails, Link, PersonCredit, Rating, Ratings, RoadmapEntry, Season,
    Translator,
};
use lazy_static::lazy_static;
use regex::Regex;
use scraper::{ElementRef, Html};
use tracing::debug;

lazy_static! {
    static ref PLAYER_INIT: Regex = Regex::new(r"initCDN(Series|Movies)Events\(([^)]*)\)")
        .expect("player init pattern is valid");
    static ref ROADMAP_EPISODE: Regex =
        Regex::new(r"(\d+)\s*сезон\s*(\d+)\s*серия").expect("roadmap pattern is valid");
}

const INFO_TABLE: &str = ".b-post__info";
const SEASON_TABS: &str = "#simple-seasons-tabs";
const ROADMAP_TABLE: &str = ".b-post__schedule_list";
const TRANSLATOR_NAME_FALLBACK: &str = "Unknown";

/// Info table row labels
mod labels {
    pub const SLOGAN: &str = "Слоган";
    pub const RELEASE_DATE: &str = "Дата выхода";
    pub const COUNTRY: &str = "Страна";
    pub const QUALITY: &str = "В качестве";
    pub const AGE: &str = "Возраст";
    pub const DURATION: &str = "Время";
    pub const DIRECTORS: &str = "Режиссер";
    pub const ACTORS: &str = "В ролях актеры";
    pub const GENRES: &str = "Жанр";
    pub const COLLECTIONS: &str = "Из серии";
    pub const LISTS: &str = "Входит в списки";
}

/// Assembler for item pages
#[derive(Debug, Clone)]
pub struct ItemDetailParser {
    base_url: String,
}

impl ItemDetailParser {
    pub fn new(config: &ParsingConfig) -> Self {
        Self {
            base_url: config.base_url.clone(),
        }
    }

    /// Assemble the item found at `url`
    pub fn parse(&self, html: &Html, url: &str) -> ParsingResult<ItemDetails> {
        let root = html.root_element();

        let id = id_from_url(url)?;
        let context = ParseContext::new("item", url).with_record_id(id);
        let title = extract_text(root, Some(".b-post__title h1"))?;
        debug!("Assembling {} '{}'", context, title);

        let original_title = extract_text(root, Some(".b-post__origtitle")).ok();
        let poster = FieldOutcome::from(extract_attribute(root, "src", Some(".b-sidecover img")))
            .into_option("poster", &context);
        let description = FieldOutcome::from(extract_text(root, Some(".b-post__description_text")))
            .into_option("description", &context);

        let info = select_first(root, INFO_TABLE);
        let row_text = |label: &str| -> FieldOutcome<String> {
            FieldOutcome::from(info.clone().and_then(|table| labeled_row_value(table, label)))
        };

        let slogan = row_text(labels::SLOGAN)
            .map(|raw| raw.replace(['«', '»'], "").trim().to_string())
            .into_option("slogan", &context)
            .filter(|slogan| !slogan.is_empty());
        let release_date = row_text(labels::RELEASE_DATE)
            .into_option("release_date", &context)
            .and_then(|raw| parse_long_date(&raw));
        let country = row_text(labels::COUNTRY).into_option("country", &context);
        let quality = row_text(labels::QUALITY).into_option("quality", &context);
        let age_restriction = row_text(labels::AGE)
            .numeric::<u32>()
            .into_option("age_restriction", &context);
        let duration = row_text(labels::DURATION)
            .numeric::<u32>()
            .into_option("duration", &context);

        let credits = |label: &str, field: &str| -> Option<Vec<PersonCredit>> {
            FieldOutcome::from(info.clone().and_then(|table| parse_persons(table, label)))
                .into_option(field, &context)
        };
        let directors = credits(labels::DIRECTORS, "directors");
        let actors = credits(labels::ACTORS, "actors");

        let links = |label: &str, field: &str| -> Option<Vec<Link>> {
            FieldOutcome::from(info.clone().and_then(|table| self.parse_links(table, label)))
                .into_option(field, &context)
        };
        let genres = links(labels::GENRES, "genres");
        let collections = links(labels::COLLECTIONS, "collections");
        let lists = links(labels::LISTS, "lists");

        let rating = FieldOutcome::from(parse_ratings(root)).into_option("rating", &context);

        let seasons = optional_section(root, SEASON_TABS, "seasons", &context, |tabs| {
            parse_seasons(root, tabs)
        });
        let current_watch = parse_current_watch(html);
        let roadmap = optional_section(root, ROADMAP_TABLE, "roadmap", &context, parse_roadmap);
        let franchise = optional_section(root, FRANCHISE_BLOCK, "franchise", &context, |block| {
            parse_franchise(block, &self.base_url, &context)
        });

        // single-voice items carry their translator only in the player init call
        let translators = FieldOutcome::from(parse_translators(root, &context))
            .into_option("translators", &context)
            .or_else(|| {
                current_watch.as_ref().map(|watch| {
                    vec![Translator {
                        id: watch.translator_id,
                        name: TRANSLATOR_NAME_FALLBACK.to_string(),
                        popularity: None,
                        paid: None,
                    }]
                })
            });

        Ok(ItemDetails {
            id,
            url: url.to_string(),
            title,
            original_title,
            poster,
            description,
            slogan,
            release_date,
            country,
            quality,
            age_restriction,
            duration,
            directors,
            actors,
            genres,
            collections,
            lists,
            rating,
            seasons,
            current_watch,
            roadmap,
            franchise,
            translators,
        })
    }

    fn parse_links(&self, table: ElementRef<'_>, label: &str) -> ParsingResult<Vec<Link>> {
        let row = find_labeled_row(table, label)?;
        let links = select_all(row, "a")?
            .into_iter()
            .filter_map(|anchor| {
                let name = extract_text(anchor, None).ok()?;
                let href = extract_attribute(anchor, "href", None).ok()?;
                let url = resolve_url(&href, &self.base_url).ok()?;
                Some(Link { name, url })
            })
            .collect();
        non_empty(links, &format!("tr:contains({label}) a"))
    }
}

/// People credited in the labeled info row
fn parse_persons(table: ElementRef<'_>, label: &str) -> ParsingResult<Vec<PersonCredit>> {
    let row = find_labeled_row(table, label)?;
    let persons = select_all(row, ".persons-list-holder .item .person-name-item")?
        .into_iter()
        .filter_map(|person| {
            let id = extract_attribute(person, "data-id", None).ok()?.trim().parse().ok()?;
            let name = extract_text(person, Some("span[itemprop=\"name\"]")).ok()?;
            Some(PersonCredit { id, name })
        })
        .collect();
    non_empty(persons, &format!("tr:contains({label}) .person-name-item"))
}

fn parse_rating_source(root: ElementRef<'_>, source: &str) -> Option<Rating> {
    let holder = select_first(root, source).ok()?;
    let score = parse_leading_number(&extract_text(holder, Some(".bold")).ok()?)?;
    let votes = parse_grouped_count(&extract_text(holder, Some("i")).ok()?)?;
    Some(Rating { score, votes })
}

/// IMDb, Kinopoisk and site ratings; a source counts only with both score and votes
fn parse_ratings(root: ElementRef<'_>) -> ParsingResult<Ratings> {
    let site = select_first(root, ".b-post__rating").ok().and_then(|holder| {
        let score = parse_leading_number(&extract_text(holder, Some(".num")).ok()?)?;
        let votes = parse_grouped_count(&extract_text(holder, Some(".votes")).ok()?)?;
        Some(Rating { score, votes })
    });

    let ratings = Ratings {
        imdb: parse_rating_source(root, ".b-post__info_rates.imdb"),
        kinopoisk: parse_rating_source(root, ".b-post__info_rates.kp"),
        site,
    };
    if ratings.is_empty() {
        return Err(ParsingError::required_field_missing(".b-post__info_rates", None));
    }
    Ok(ratings)
}

fn parse_seasons(root: ElementRef<'_>, tabs: ElementRef<'_>) -> ParsingResult<Vec<Season>> {
    let mut seasons = Vec::new();
    for tab in select_all(tabs, ".b-simple_season__item")? {
        let Some(id) = extract_attribute(tab, "data-tab_id", None)
            .ok()
            .and_then(|raw| raw.trim().parse::<u32>().ok())
        else {
            continue;
        };
        let episodes = select_all(
            root,
            &format!("#simple-episodes-list-{id} .b-simple_episode__item"),
        )?
        .into_iter()
        .filter_map(|episode| {
            let id = extract_attribute(episode, "data-episode_id", None)
                .ok()?
                .trim()
                .parse()
                .ok()?;
            let title = extract_text(episode, None).ok()?;
            Some(Episode { id, title })
        })
        .collect();

        seasons.push(Season {
            id,
            title: extract_text(tab, None)?,
            episodes,
        });
    }
    non_empty(seasons, ".b-simple_season__item")
}

/// Translator and episode preselected by the player init script
fn parse_current_watch(html: &Html) -> Option<CurrentWatch> {
    let script_selector = compile_selector("script").ok()?;
    let (kind, args) = html
        .select(&script_selector)
        .filter_map(|script| {
            let source: String = script.text().collect();
            let captures = PLAYER_INIT.captures(&source)?;
            Some((captures[1].to_string(), captures[2].to_string()))
        })
        .last()?;

    let args: Vec<&str> = args.split(',').map(str::trim).collect();
    let number = |index: usize| -> Option<u64> { args.get(index)?.trim_matches('"').parse().ok() };

    let translator_id = number(1)?;
    let (season, episode) = if kind == "Series" {
        (
            number(2).and_then(|n| u32::try_from(n).ok()),
            number(3).and_then(|n| u32::try_from(n).ok()),
        )
    } else {
        (None, None)
    };
    Some(CurrentWatch {
        translator_id,
        season,
        episode,
    })
}

fn parse_roadmap(table: ElementRef<'_>) -> ParsingResult<Vec<RoadmapEntry>> {
    let entries = select_all(table, "tr")?
        .into_iter()
        .filter_map(|row| {
            let label = extract_text(row, Some(".td-1")).ok()?;
            let captures = ROADMAP_EPISODE.captures(&label)?;
            let release_date = extract_text(row, Some(".td-4"))
                .ok()
                .map(|raw| parse_long_date(&raw).unwrap_or(raw));
            Some(RoadmapEntry {
                season: captures[1].parse().ok()?,
                episode: captures[2].parse().ok()?,
                title: extract_text(row, Some(".td-2 b")).ok(),
                release_date,
            })
        })
        .collect();
    non_empty(entries, ".b-post__schedule_list tr")
}
