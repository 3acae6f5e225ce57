//! Comments of an item, with likes

use crate::domain::{Comment, CommentLike, Paginated};
use crate::error::ScraperResult;
use crate::infrastructure::config::site;
use crate::infrastructure::parsing::ParseContext;
use crate::infrastructure::parsing::comment_parser::{
    parse_comment_likes, parse_comment_tree, parse_total_pages,
};
use crate::infrastructure::parsing::dates::local_today;
use crate::infrastructure::transport::{Transport, TransportRequest};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Debug, Deserialize)]
struct CommentsResponse {
    #[serde(default)]
    comments: String,
    #[serde(default)]
    navigation: String,
}

#[derive(Debug, Deserialize)]
struct LikesResponse {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    message: String,
}

pub struct CommentService {
    transport: Arc<dyn Transport>,
}

impl CommentService {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// One page of comment threads of item `item_id`
    pub async fn comments(&self, item_id: u64, page: u32) -> ScraperResult<Paginated<Comment>> {
        let page = page.max(1);
        info!("Fetching comments of item {} page {}", item_id, page);
        let request = TransportRequest::post(site::COMMENTS)
            .with_form("news_id", item_id)
            .with_form("cstart", page)
            .with_form("type", 0)
            .with_form("comment_id", 0)
            .with_form("skin", "hdrezka");
        let response: CommentsResponse = self.transport.send(request).await?.json()?;

        let context = ParseContext::new("comments", site::COMMENTS)
            .with_record_id(item_id)
            .with_page(page);
        let comments = parse_comment_tree(&response.comments, local_today(), &context);
        let total_pages = parse_total_pages(&response.navigation, page);
        let page_size = u32::try_from(comments.len()).unwrap_or(u32::MAX);

        Ok(Paginated::page(comments, page, page_size).with_total_pages(total_pages))
    }

    /// Like a comment as the signed-in user
    pub async fn like_comment(&self, comment_id: u64) -> ScraperResult<()> {
        info!("Liking comment {}", comment_id);
        let request = TransportRequest::get(site::COMMENT_LIKE)
            .with_query("id", comment_id)
            .ajax();
        self.transport.send(request).await?;
        Ok(())
    }

    /// Users who liked a comment
    pub async fn comment_likes(&self, comment_id: u64) -> ScraperResult<Vec<CommentLike>> {
        let request = TransportRequest::post(site::COMMENT_LIKES).with_form("comment_id", comment_id);
        let response: LikesResponse = self.transport.send(request).await?.json()?;
        if !response.success {
            warn!("Likes of comment {} are not available", comment_id);
            return Ok(Vec::new());
        }
        Ok(parse_comment_likes(&response.message))
    }
}
