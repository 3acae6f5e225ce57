//! Paginated collection over listing pages
//!
//! Pages are fetched one at a time from page 1. An empty page ends the
//! crawl, as does a page whose next-page control is missing or inactive.
//! A transport failure on any page fails the whole crawl; entities already
//! collected are discarded.

use crate::domain::{Paginated, ListingFilter};
use crate::infrastructure::config::site;
use crate::infrastructure::parsing::ParseContext;
use crate::infrastructure::parsing_error::TransportError;
use crate::infrastructure::transport::{Transport, TransportRequest};
use async_trait::async_trait;
use scraper::Html;
use std::sync::Arc;
use tracing::{debug, info};

/// Source of raw listing pages, numbered from 1
#[async_trait]
pub trait PageSource: Send + Sync {
    async fn fetch_page(&self, page: u32) -> Result<String, TransportError>;

    /// Human-readable address of `page`, used in diagnostics
    fn describe(&self, page: u32) -> String;
}

type EntityParser<T> = dyn Fn(&Html, &ParseContext) -> Vec<T> + Send + Sync;
type NextPagePredicate = dyn Fn(&Html) -> bool + Send + Sync;

/// Drives a [`PageSource`] until the listing is exhausted
pub struct PaginatedCollector<T> {
    source: Arc<dyn PageSource>,
    parse_entities: Box<EntityParser<T>>,
    has_next_page: Option<Box<NextPagePredicate>>,
    record_kind: &'static str,
}

impl<T> PaginatedCollector<T> {
    pub fn new(
        source: Arc<dyn PageSource>,
        parse_entities: impl Fn(&Html, &ParseContext) -> Vec<T> + Send + Sync + 'static,
    ) -> Self {
        Self {
            source,
            parse_entities: Box::new(parse_entities),
            has_next_page: None,
            record_kind: "listing page",
        }
    }

    /// Stop after the first page for which `predicate` reports no next page
    pub fn with_next_page(mut self, predicate: impl Fn(&Html) -> bool + Send + Sync + 'static) -> Self {
        self.has_next_page = Some(Box::new(predicate));
        self
    }

    pub fn with_record_kind(mut self, record_kind: &'static str) -> Self {
        self.record_kind = record_kind;
        self
    }

    /// Parse one page body; the document is dropped before returning
    fn parse_page(&self, body: &str, page: u32) -> (Vec<T>, bool) {
        let html = Html::parse_document(body);
        let context = ParseContext::new(self.record_kind, self.source.describe(page)).with_page(page);
        let entities = (self.parse_entities)(&html, &context);
        let has_more = self
            .has_next_page
            .as_ref()
            .is_none_or(|predicate| predicate(&html));
        (entities, has_more)
    }

    /// Every entity of every page, in page order
    pub async fn collect_all(&self) -> Result<Vec<T>, TransportError> {
        let (collected, contributing_pages) = self.crawl().await?;
        info!(
            "Collected {} entities from {} page(s) of {}",
            collected.len(),
            contributing_pages,
            self.source.describe(1)
        );
        Ok(collected)
    }

    /// Entities of every page together with the number of non-empty pages
    async fn crawl(&self) -> Result<(Vec<T>, u32), TransportError> {
        let mut collected = Vec::new();
        let mut page = 1;
        let mut contributing_pages = 0;

        loop {
            let body = self.source.fetch_page(page).await?;
            let (entities, has_more) = self.parse_page(&body, page);
            if entities.is_empty() {
                debug!("Page {} of {} is empty, stopping", page, self.source.describe(1));
                break;
            }
            collected.extend(entities);
            contributing_pages += 1;
            if !has_more {
                debug!("No next page after page {}", page);
                break;
            }
            page += 1;
        }
        Ok((collected, contributing_pages))
    }

    /// Entities of a single page, without totals
    pub async fn collect_page(&self, page: u32, page_size: u32) -> Result<Paginated<T>, TransportError> {
        let page = page.max(1);
        let body = self.source.fetch_page(page).await?;
        let (entities, _) = self.parse_page(&body, page);
        debug!("Page {} of {}: {} entities", page, self.source.describe(page), entities.len());
        Ok(Paginated::page(entities, page, page_size))
    }
}

/// Catalog section (`films/`, a genre path, ...) with an optional sort filter
pub struct CatalogPageSource {
    transport: Arc<dyn Transport>,
    section: String,
    filter: Option<ListingFilter>,
}

impl CatalogPageSource {
    pub fn new(transport: Arc<dyn Transport>, section: impl Into<String>, filter: Option<ListingFilter>) -> Self {
        Self {
            transport,
            section: section.into(),
            filter,
        }
    }

    fn request(&self, page: u32) -> TransportRequest {
        let request = TransportRequest::get(site::listing_page(&self.section, page));
        match self.filter {
            Some(filter) => request.with_query("filter", filter.as_str()),
            None => request,
        }
    }
}

#[async_trait]
impl PageSource for CatalogPageSource {
    async fn fetch_page(&self, page: u32) -> Result<String, TransportError> {
        Ok(self.transport.send(self.request(page)).await?.body)
    }

    fn describe(&self, page: u32) -> String {
        site::listing_page(&self.section, page)
    }
}

/// Search results for one query
pub struct SearchPageSource {
    transport: Arc<dyn Transport>,
    query: String,
}

impl SearchPageSource {
    pub fn new(transport: Arc<dyn Transport>, query: impl Into<String>) -> Self {
        Self {
            transport,
            query: query.into(),
        }
    }
}

#[async_trait]
impl PageSource for SearchPageSource {
    async fn fetch_page(&self, page: u32) -> Result<String, TransportError> {
        let request = TransportRequest::get(site::SEARCH)
            .with_query("do", "search")
            .with_query("subaction", "search")
            .with_query("q", &self.query)
            .with_query("page", page);
        Ok(self.transport.send(request).await?.body)
    }

    fn describe(&self, page: u32) -> String {
        format!("{}?q={} (page {page})", site::SEARCH, self.query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Pages of comma-separated numbers; `None` marks a failing page
    struct FakeSource {
        pages: Vec<Option<&'static str>>,
        fetched: Mutex<Vec<u32>>,
    }

    impl FakeSource {
        fn new(pages: Vec<Option<&'static str>>) -> Arc<Self> {
            Arc::new(Self {
                pages,
                fetched: Mutex::new(Vec::new()),
            })
        }

        fn fetches(&self) -> Vec<u32> {
            self.fetched.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl PageSource for FakeSource {
        async fn fetch_page(&self, page: u32) -> Result<String, TransportError> {
            self.fetched.lock().unwrap().push(page);
            match self.pages.get(page as usize - 1) {
                Some(Some(body)) => Ok(format!("<p class=\"data\">{body}</p><a class=\"next\" href=\"#\">next</a>")),
                Some(None) => Err(TransportError::Network {
                    url: format!("fake/{page}"),
                    reason: "connection reset".to_string(),
                }),
                None => Ok("<p class=\"data\"></p>".to_string()),
            }
        }

        fn describe(&self, page: u32) -> String {
            format!("fake/{page}")
        }
    }

    fn numbers(html: &Html, _context: &ParseContext) -> Vec<u32> {
        let selector = scraper::Selector::parse("p.data").unwrap();
        html.select(&selector)
            .flat_map(|p| p.text().collect::<String>().split(',').filter_map(|n| n.trim().parse().ok()).collect::<Vec<_>>())
            .collect()
    }

    #[tokio::test]
    async fn test_stops_at_first_empty_page() {
        let source = FakeSource::new(vec![Some("1,2"), Some("3"), Some("4,5")]);
        let collector = PaginatedCollector::new(source.clone(), numbers);

        let collected = collector.collect_all().await.unwrap();
        assert_eq!(collected, vec![1, 2, 3, 4, 5]);
        assert_eq!(source.fetches(), vec![1, 2, 3, 4]);
    }

    #[tokio::test]
    async fn test_trailing_empty_page_is_not_counted() {
        let source = FakeSource::new(vec![Some("1,2"), Some("3")]);
        let collector = PaginatedCollector::new(source.clone(), numbers);

        let (collected, contributing_pages) = collector.crawl().await.unwrap();
        assert_eq!(collected, vec![1, 2, 3]);
        assert_eq!(contributing_pages, 2);
        assert_eq!(source.fetches(), vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_missing_next_page_stops_after_first_page() {
        let source = FakeSource::new(vec![Some("1,2"), Some("3")]);
        let collector = PaginatedCollector::new(source.clone(), numbers).with_next_page(|_| false);

        let collected = collector.collect_all().await.unwrap();
        assert_eq!(collected, vec![1, 2]);
        assert_eq!(source.fetches(), vec![1]);
    }

    #[tokio::test]
    async fn test_mid_crawl_failure_fails_whole_crawl() {
        let source = FakeSource::new(vec![Some("1"), None, Some("3")]);
        let collector = PaginatedCollector::new(source.clone(), numbers);

        let err = collector.collect_all().await.unwrap_err();
        assert!(matches!(err, TransportError::Network { .. }));
        assert_eq!(source.fetches(), vec![1, 2]);
    }

    #[tokio::test]
    async fn test_single_page_is_annotated_without_totals() {
        let source = FakeSource::new(vec![Some("1,2"), Some("3,4,5")]);
        let collector = PaginatedCollector::new(source.clone(), numbers);

        let page = collector.collect_page(2, 36).await.unwrap();
        assert_eq!(page.data, vec![3, 4, 5]);
        assert_eq!(page.meta.current_page, 2);
        assert_eq!(page.meta.page_size, 36);
        assert_eq!(page.meta.total, None);
        assert_eq!(source.fetches(), vec![2]);
    }
}
