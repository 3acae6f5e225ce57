//! HTTP client with rate limiting and retry
//!
//! Implements [`Transport`] over `reqwest`. Keeps a cookie store so a login
//! carries over to later requests, and paces requests through `governor`.

use crate::infrastructure::config::{SiteConfig, defaults};
use crate::infrastructure::parsing_error::TransportError;
use crate::infrastructure::transport::{Method, Transport, TransportRequest, TransportResponse};
use anyhow::{Context, Result};
use async_trait::async_trait;
use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use reqwest::header::{HeaderMap, HeaderValue, ORIGIN, REFERER, SET_COOKIE, USER_AGENT};
use reqwest::{Client, StatusCode, Url};
use std::num::NonZeroU32;
use std::time::Duration;
use tracing::{debug, info, warn};

const AJAX_HEADER: &str = "X-Requested-With";
const AJAX_HEADER_VALUE: &str = "XMLHttpRequest";

/// HTTP client configuration
#[derive(Debug, Clone, serde::Serialize)]
pub struct HttpClientConfig {
    pub base_url: String,
    pub user_agent: String,
    pub timeout_seconds: u64,
    pub max_requests_per_second: u32,
    pub max_retries: u32,
    pub retry_delay_ms: u64,
}

impl HttpClientConfig {
    pub fn from_site_config(site: &SiteConfig) -> Self {
        Self {
            base_url: site.base_url.clone(),
            user_agent: site.user_agent.clone(),
            timeout_seconds: site.timeout_seconds,
            max_requests_per_second: site.max_requests_per_second,
            max_retries: site.retry_count,
            retry_delay_ms: site.retry_delay_ms,
        }
    }
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self::from_site_config(&SiteConfig::default())
    }
}

/// Rate-limited HTTP client bound to one site mirror
pub struct HttpClient {
    client: Client,
    rate_limiter: RateLimiter<NotKeyed, InMemoryState, DefaultClock>,
    base_url: Url,
    config: HttpClientConfig,
}

impl HttpClient {
    pub fn new(config: HttpClientConfig) -> Result<Self> {
        let base_url = Url::parse(&config.base_url)
            .with_context(|| format!("Invalid base URL: {}", config.base_url))?;

        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&config.user_agent).context("Invalid user agent")?,
        );
        headers.insert(
            REFERER,
            HeaderValue::from_str(base_url.as_str()).context("Invalid referer")?,
        );
        headers.insert(
            ORIGIN,
            HeaderValue::from_str(base_url.origin().ascii_serialization().as_str())
                .context("Invalid origin")?,
        );

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .default_headers(headers)
            .cookie_store(true)
            .gzip(true)
            .brotli(true)
            .redirect(reqwest::redirect::Policy::limited(defaults::MAX_REDIRECTS))
            .build()
            .context("Failed to create HTTP client")?;

        let quota = Quota::per_second(
            NonZeroU32::new(config.max_requests_per_second)
                .context("Rate limit must be greater than 0")?,
        );

        Ok(Self {
            client,
            rate_limiter: RateLimiter::direct(quota),
            base_url,
            config,
        })
    }

    /// Absolute URL of a request target
    pub fn resolve(&self, target: &str) -> Result<Url, TransportError> {
        self.base_url
            .join(target)
            .map_err(|e| TransportError::Client {
                reason: format!("invalid request target '{target}': {e}"),
            })
    }

    async fn send_once(&self, request: &TransportRequest, url: &Url) -> Result<TransportResponse, TransportError> {
        self.rate_limiter.until_ready().await;

        let builder = match request.method {
            Method::Get => self.client.get(url.clone()),
            Method::Post => self.client.post(url.clone()).form(&request.form),
        };
        let builder = if request.query.is_empty() {
            builder
        } else {
            builder.query(&request.query)
        };
        let builder = if request.ajax {
            builder.header(AJAX_HEADER, AJAX_HEADER_VALUE)
        } else {
            builder
        };

        let response = builder.send().await.map_err(|e| TransportError::Network {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(TransportError::NotFound { url: url.to_string() });
        }
        if !status.is_success() {
            return Err(TransportError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let set_cookies = response
            .headers()
            .get_all(SET_COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .map(str::to_string)
            .collect();
        let body = response.text().await.map_err(|e| TransportError::Network {
            url: url.to_string(),
            reason: format!("failed to read response body: {e}"),
        })?;

        debug!("Fetched {} ({}, {} bytes)", url, status, body.len());
        Ok(TransportResponse {
            status: status.as_u16(),
            body,
            set_cookies,
        })
    }
}

#[async_trait]
impl Transport for HttpClient {
    /// Send with linear backoff; only network failures are retried
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse, TransportError> {
        let url = self.resolve(&request.target)?;
        info!("HTTP {:?} {}", request.method, url);

        let mut attempt = 0;
        loop {
            match self.send_once(&request, &url).await {
                Ok(response) => return Ok(response),
                Err(e) if e.is_retryable() && attempt < self.config.max_retries => {
                    attempt += 1;
                    let delay = Duration::from_millis(self.config.retry_delay_ms * u64::from(attempt));
                    warn!("Attempt {} failed for {}: {}; retrying in {:?}", attempt, url, e, delay);
                    tokio::time::sleep(delay).await;
                }
                Err(e) => return Err(e),
            }
        }
    }
}
