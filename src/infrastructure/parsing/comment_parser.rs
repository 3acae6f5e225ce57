//! Comment tree assembler
//!
//! The comments endpoint returns an HTML fragment of nested `<ol>` lists.
//! Each `<li>` holds the comment body followed by an `<ol>` of replies.

use super::dates::parse_comment_timestamp;
use super::extractor::{child_elements, exists, extract_attribute, extract_text, select_all, select_first};
use super::field::FieldOutcome;
use super::{ParseContext, ParsingError, ParsingResult};
use crate::domain::{Comment, CommentAuthor, CommentLike};
use chrono::NaiveDate;
use scraper::{ElementRef, Html};
use tracing::{debug, error, warn};

const REPLY_LIST: &str = "ol";
const COMMENT_NODE: &str = "li";

/// First direct child that is not the reply list
fn comment_body(node: ElementRef<'_>) -> Option<ElementRef<'_>> {
    node.children()
        .filter_map(ElementRef::wrap)
        .find(|child| child.value().name() != REPLY_LIST)
}

fn parse_comment(node: ElementRef<'_>, today: NaiveDate, context: &ParseContext) -> ParsingResult<Comment> {
    let raw_id = extract_attribute(node, "data-id", None)?;
    let id = raw_id
        .trim()
        .parse()
        .map_err(|_| ParsingError::invalid_number("data-id", &raw_id))?;
    let context = context.clone().with_record_id(id);
    let replies = parse_reply_lists(node, today, &context);

    let Some(body) = comment_body(node) else {
        warn!("Comment body missing for {}", context);
        return Ok(Comment {
            id,
            author: CommentAuthor {
                name: String::new(),
                avatar: None,
            },
            text: String::new(),
            date: None,
            likes: None,
            is_spoiler: false,
            replies,
        });
    };

    let author = CommentAuthor {
        name: FieldOutcome::from_result(extract_text(body, Some(".name")))
            .into_option("author.name", &context)
            .unwrap_or_default(),
        avatar: extract_attribute(body, "src", Some(".ava img")).ok(),
    };
    let text = FieldOutcome::from_result(select_first(body, ".text").and_then(|text| extract_text(text, None)))
        .into_option("text", &context)
        .unwrap_or_default();
    let date = extract_text(body, Some(".date"))
        .ok()
        .and_then(|raw| parse_comment_timestamp(&raw, today));
    let likes = extract_text(body, Some(".b-comment__likes_count i"))
        .ok()
        .and_then(|raw| raw.trim().parse().ok());
    let is_spoiler = exists(body, ".text.spoiler").unwrap_or(false)
        || exists(body, ".text .text_spoiler").unwrap_or(false);

    Ok(Comment {
        id,
        author,
        text,
        date,
        likes,
        is_spoiler,
        replies,
    })
}

/// Comments of every `<ol>` directly under `parent`, recursively
fn parse_reply_lists(parent: ElementRef<'_>, today: NaiveDate, context: &ParseContext) -> Vec<Comment> {
    let mut comments = Vec::new();
    for list in child_elements(parent, REPLY_LIST) {
        for node in child_elements(list, COMMENT_NODE) {
            match parse_comment(node, today, context) {
                Ok(comment) => comments.push(comment),
                Err(e) => error!("Failed to extract comment in {}: {}", context, e),
            }
        }
    }
    comments
}

/// Top-level comments of a `comments` fragment, each with its reply tree
pub fn parse_comment_tree(fragment: &str, today: NaiveDate, context: &ParseContext) -> Vec<Comment> {
    let html = Html::parse_document(fragment);
    let comments = match select_first(html.root_element(), "body") {
        Ok(body) => parse_reply_lists(body, today, context),
        Err(_) => Vec::new(),
    };
    debug!(
        "Extracted {} comment threads ({} comments) from {}",
        comments.len(),
        comments.iter().map(Comment::thread_size).sum::<usize>(),
        context
    );
    comments
}

/// Page count from the `navigation` fragment; the last link holds the highest page
pub fn parse_total_pages(navigation: &str, current_page: u32) -> u32 {
    let html = Html::parse_document(navigation);
    select_all(html.root_element(), ".b-navigation a")
        .ok()
        .and_then(|links| links.last().copied())
        .and_then(|last| extract_text(last, None).ok())
        .and_then(|text| text.trim().parse().ok())
        .map_or(current_page, |total: u32| total.max(current_page))
}

/// Users listed in the likes popup fragment
pub fn parse_comment_likes(fragment: &str) -> Vec<CommentLike> {
    let html = Html::parse_document(fragment);
    select_all(html.root_element(), ".b-comment__likescontent_inner li")
        .unwrap_or_default()
        .into_iter()
        .filter_map(|item| {
            let name = extract_text(item, Some("b")).ok()?;
            Some(CommentLike {
                author: CommentAuthor {
                    name,
                    avatar: extract_attribute(item, "src", Some(".ava img")).ok(),
                },
            })
        })
        .collect()
}
