//! Playable streams for a translator / episode selection

use crate::domain::StreamBundle;
use crate::error::ScraperResult;
use crate::infrastructure::config::site;
use crate::infrastructure::stream_decoder::{decode_streams, parse_subtitles};
use crate::infrastructure::transport::{Transport, TransportRequest};
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::{info, warn};

/// Player endpoint response; `url` and `subtitle` are `false` when absent
#[derive(Debug, Deserialize)]
struct CdnResponse {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    url: Value,
    #[serde(default)]
    subtitle: Value,
}

/// Episode of a show to play
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EpisodeSelection {
    pub season: u32,
    pub episode: u32,
}

pub struct StreamService {
    transport: Arc<dyn Transport>,
}

impl StreamService {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Streams of one episode of a show
    pub async fn series_streams(
        &self,
        item_id: u64,
        translator_id: u64,
        selection: EpisodeSelection,
    ) -> ScraperResult<StreamBundle> {
        info!(
            "Fetching streams of item {} (translator {}, s{}e{})",
            item_id, translator_id, selection.season, selection.episode
        );
        let request = TransportRequest::post(site::CDN_SERIES)
            .with_form("id", item_id)
            .with_form("translator_id", translator_id)
            .with_form("season", selection.season)
            .with_form("episode", selection.episode)
            .with_form("action", "get_stream");
        self.fetch(request).await
    }

    /// Streams of a movie
    pub async fn movie_streams(&self, item_id: u64, translator_id: u64) -> ScraperResult<StreamBundle> {
        info!("Fetching streams of item {} (translator {})", item_id, translator_id);
        let request = TransportRequest::post(site::CDN_SERIES)
            .with_form("id", item_id)
            .with_form("translator_id", translator_id)
            .with_form("is_camrip", 0)
            .with_form("is_ads", 0)
            .with_form("is_director", 0)
            .with_form("action", "get_movie");
        self.fetch(request).await
    }

    /// Decode the player response; "nothing playable" is an empty bundle, not an error
    async fn fetch(&self, request: TransportRequest) -> ScraperResult<StreamBundle> {
        let response: CdnResponse = self.transport.send(request).await?.json()?;
        if !response.success {
            warn!(
                "Player endpoint reported no streams: {}",
                response.message.as_deref().unwrap_or("no message")
            );
            return Ok(StreamBundle::default());
        }

        let streams = match response.url.as_str() {
            Some(payload) => decode_streams(payload).unwrap_or_else(|e| {
                warn!("Stream payload could not be decoded: {}", e);
                Vec::new()
            }),
            None => Vec::new(),
        };
        let subtitles = response
            .subtitle
            .as_str()
            .map(parse_subtitles)
            .unwrap_or_default();

        Ok(StreamBundle { streams, subtitles })
    }
}
