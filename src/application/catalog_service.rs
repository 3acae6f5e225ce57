//! Catalog browsing, search and the genre directory

use super::paginated_collector::{CatalogPageSource, PageSource, PaginatedCollector, SearchPageSource};
use crate::domain::{CatalogItem, ContentType, GenreInfo, ListingFilter, Paginated};
use crate::error::ScraperResult;
use crate::infrastructure::parsing::genre_parser::parse_genres;
use crate::infrastructure::parsing::{CatalogListParser, ParseContext, ParsingConfig};
use crate::infrastructure::transport::{Transport, TransportRequest};
use scraper::Html;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::info;

/// Which part of the catalog to list
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowseSection {
    /// Everything, newest first
    All,
    Content(ContentType),
    /// Genre or collection URL (absolute or relative to the site)
    Path(String),
}

impl BrowseSection {
    fn path(&self) -> String {
        match self {
            Self::All => String::new(),
            Self::Content(kind) => kind.path().to_string(),
            Self::Path(path) => path.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowseQuery {
    pub section: BrowseSection,
    pub filter: Option<ListingFilter>,
}

impl BrowseQuery {
    pub fn new(section: BrowseSection) -> Self {
        Self {
            section,
            filter: None,
        }
    }

    pub fn with_filter(mut self, filter: ListingFilter) -> Self {
        self.filter = Some(filter);
        self
    }
}

pub struct CatalogService {
    transport: Arc<dyn Transport>,
    parser: Arc<CatalogListParser>,
    config: ParsingConfig,
}

impl CatalogService {
    pub fn new(transport: Arc<dyn Transport>, config: ParsingConfig) -> Self {
        Self {
            parser: Arc::new(CatalogListParser::new(&config)),
            transport,
            config,
        }
    }

    fn collector(&self, source: Arc<dyn PageSource>, record_kind: &'static str) -> PaginatedCollector<CatalogItem> {
        let parser = Arc::clone(&self.parser);
        let next_page = Arc::clone(&self.parser);
        PaginatedCollector::new(source, move |html, context| parser.parse_items(html, context))
            .with_next_page(move |html| next_page.has_next_page(html))
            .with_record_kind(record_kind)
    }

    fn browse_collector(&self, query: &BrowseQuery) -> PaginatedCollector<CatalogItem> {
        let source = CatalogPageSource::new(Arc::clone(&self.transport), query.section.path(), query.filter);
        self.collector(Arc::new(source), "catalog page")
    }

    fn search_collector(&self, query: &str) -> PaginatedCollector<CatalogItem> {
        let source = SearchPageSource::new(Arc::clone(&self.transport), query);
        self.collector(Arc::new(source), "search page")
    }

    /// One page of a catalog section, annotated with the requested page size
    pub async fn browse_page(
        &self,
        query: &BrowseQuery,
        page: u32,
        page_size: u32,
    ) -> ScraperResult<Paginated<CatalogItem>> {
        info!("Browsing {:?} page {} (size {})", query.section, page, page_size);
        Ok(self.browse_collector(query).collect_page(page, page_size).await?)
    }

    /// Every item of a catalog section
    pub async fn browse_all(&self, query: &BrowseQuery) -> ScraperResult<Vec<CatalogItem>> {
        info!("Collecting all of {:?}", query.section);
        Ok(self.browse_collector(query).collect_all().await?)
    }

    pub async fn search_page(&self, query: &str, page: u32, page_size: u32) -> ScraperResult<Paginated<CatalogItem>> {
        info!("Searching '{}' page {} (size {})", query, page, page_size);
        Ok(self.search_collector(query).collect_page(page, page_size).await?)
    }

    pub async fn search_all(&self, query: &str) -> ScraperResult<Vec<CatalogItem>> {
        info!("Collecting all results for '{}'", query);
        Ok(self.search_collector(query).collect_all().await?)
    }

    /// Genre links of each content section, read from the home page menu
    pub async fn genres(&self) -> ScraperResult<BTreeMap<ContentType, Vec<GenreInfo>>> {
        let response = self.transport.send(TransportRequest::get("")).await?;
        let html = Html::parse_document(&response.body);
        let context = ParseContext::new("genre menu", self.config.base_url.clone());
        Ok(parse_genres(&html, &self.config.base_url, &context)?)
    }
}
