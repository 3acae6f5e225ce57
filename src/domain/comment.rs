//! Comment tree records

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentAuthor {
    pub name: String,
    pub avatar: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: u64,
    pub author: CommentAuthor,
    pub text: String,
    /// `YYYY-MM-DDTHH:MM:SS`
    pub date: Option<String>,
    pub likes: Option<u32>,
    pub is_spoiler: bool,
    pub replies: Vec<Comment>,
}

impl Comment {
    /// Number of comments in this subtree, including this one
    pub fn thread_size(&self) -> usize {
        1 + self.replies.iter().map(Comment::thread_size).sum::<usize>()
    }
}

/// User who liked a comment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentLike {
    pub author: CommentAuthor,
}
