//! Entry point that wires one transport into every service

use super::{
    AccountService, CatalogService, CommentService, ItemService, PersonService, StreamService,
};
use crate::infrastructure::config::SiteConfig;
use crate::infrastructure::http_client::{HttpClient, HttpClientConfig};
use crate::infrastructure::parsing::ParsingConfig;
use crate::infrastructure::transport::Transport;
use anyhow::Result;
use std::sync::Arc;

/// All services of one site session
///
/// Services share the transport, so a login through [`RezkaScraper::account`]
/// authenticates every later request.
pub struct RezkaScraper {
    catalog: CatalogService,
    items: ItemService,
    persons: PersonService,
    streams: StreamService,
    comments: CommentService,
    account: AccountService,
}

impl RezkaScraper {
    /// Scraper talking to the live site described by `site`
    pub fn new(site: &SiteConfig) -> Result<Self> {
        let client = HttpClient::new(HttpClientConfig::from_site_config(site))?;
        Ok(Self::with_transport(Arc::new(client), site))
    }

    pub fn with_transport(transport: Arc<dyn Transport>, site: &SiteConfig) -> Self {
        let config = ParsingConfig::with_base_url(site.base_url.clone());
        Self {
            catalog: CatalogService::new(Arc::clone(&transport), config.clone()),
            items: ItemService::new(Arc::clone(&transport), config.clone()),
            persons: PersonService::new(Arc::clone(&transport), config),
            streams: StreamService::new(Arc::clone(&transport)),
            comments: CommentService::new(Arc::clone(&transport)),
            account: AccountService::new(transport),
        }
    }

    pub fn catalog(&self) -> &CatalogService {
        &self.catalog
    }

    pub fn items(&self) -> &ItemService {
        &self.items
    }

    pub fn persons(&self) -> &PersonService {
        &self.persons
    }

    pub fn streams(&self) -> &StreamService {
        &self.streams
    }

    pub fn comments(&self) -> &CommentService {
        &self.comments
    }

    pub fn account(&self) -> &AccountService {
        &self.account
    }
}
