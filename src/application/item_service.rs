//! Item pages and id lookup

use crate::domain::ItemDetails;
use crate::error::ScraperResult;
use crate::infrastructure::config::site;
use crate::infrastructure::parsing::account_parser::parse_quick_content_url;
use crate::infrastructure::parsing::extractor::resolve_url;
use crate::infrastructure::parsing::{ItemDetailParser, ParsingConfig};
use crate::infrastructure::transport::{Transport, TransportRequest};
use scraper::Html;
use std::sync::Arc;
use tracing::{debug, info};

pub struct ItemService {
    transport: Arc<dyn Transport>,
    parser: ItemDetailParser,
    config: ParsingConfig,
}

impl ItemService {
    pub fn new(transport: Arc<dyn Transport>, config: ParsingConfig) -> Self {
        Self {
            parser: ItemDetailParser::new(&config),
            transport,
            config,
        }
    }

    /// Canonical page URL of the item with numeric `id`
    pub async fn url_for_id(&self, id: u64) -> ScraperResult<String> {
        let request = TransportRequest::post(site::QUICK_CONTENT)
            .with_form("id", id)
            .with_form("is_touch", 1);
        let response = self.transport.send(request).await?;
        let html = Html::parse_document(&response.body);
        let url = parse_quick_content_url(&html)?;
        debug!("Item {} lives at {}", id, url);
        Ok(url)
    }

    /// Full details of the item page at `url`
    pub async fn item(&self, url: &str) -> ScraperResult<ItemDetails> {
        let url = resolve_url(url, &self.config.base_url)?;
        info!("Fetching item {}", url);
        let response = self.transport.send(TransportRequest::get(&url)).await?;
        let html = Html::parse_document(&response.body);
        Ok(self.parser.parse(&html, &url)?)
    }

    pub async fn item_by_id(&self, id: u64) -> ScraperResult<ItemDetails> {
        let url = self.url_for_id(id).await?;
        self.item(&url).await
    }
}
