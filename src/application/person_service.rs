//! Person pages

use crate::domain::PersonDetails;
use crate::error::{ScraperError, ScraperResult};
use crate::infrastructure::config::site;
use crate::infrastructure::parsing::extractor::resolve_url;
use crate::infrastructure::parsing::{ParsingConfig, PersonParser};
use crate::infrastructure::transport::{Transport, TransportRequest};
use scraper::Html;
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;

#[derive(Debug, Deserialize)]
struct PersonInfoResponse {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    person: Option<PersonLink>,
}

#[derive(Debug, Deserialize)]
struct PersonLink {
    link: String,
}

pub struct PersonService {
    transport: Arc<dyn Transport>,
    parser: PersonParser,
    config: ParsingConfig,
}

impl PersonService {
    pub fn new(transport: Arc<dyn Transport>, config: ParsingConfig) -> Self {
        Self {
            parser: PersonParser::new(&config),
            transport,
            config,
        }
    }

    pub async fn person(&self, url: &str) -> ScraperResult<PersonDetails> {
        let url = resolve_url(url, &self.config.base_url)?;
        info!("Fetching person {}", url);
        let response = self.transport.send(TransportRequest::get(&url)).await?;
        let html = Html::parse_document(&response.body);
        Ok(self.parser.parse(&html, &url)?)
    }

    /// Person credited on item `item_id`, addressed by their numeric id
    pub async fn person_by_ids(&self, person_id: u64, item_id: u64) -> ScraperResult<PersonDetails> {
        let request = TransportRequest::post(site::PERSON_INFO)
            .with_form("id", person_id)
            .with_form("pid", item_id);
        let body: PersonInfoResponse = self.transport.send(request).await?.json()?;

        match body.person {
            Some(person) if body.success && !person.link.is_empty() => self.person(&person.link).await,
            _ => Err(ScraperError::rejected(body.message, "person lookup failed")),
        }
    }
}
