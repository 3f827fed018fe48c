use serde::{Deserialize, Serialize};

use super::pull_request::GithubUser;

/// Issue comments and review comments share this shape; `path` and `line`
/// only exist on review comments.
#[derive(Debug, Deserialize, Clone)]
pub struct GithubComment {
    pub id: u64,
    pub user: Option<GithubUser>,
    pub body: Option<String>,
    pub created_at: String,
    pub updated_at: String,
    pub html_url: String,
    pub path: Option<String>,
    pub line: Option<u64>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CommentKind {
    Issue,
    Review,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Comment {
    pub id: u64,
    pub author: String,
    pub body: String,
    pub created_at: String,
    pub updated_at: String,
    pub html_url: String,
    pub path: Option<String>,
    pub line: Option<u64>,
    pub kind: CommentKind,
}

impl Comment {
    pub fn from_github(comment: GithubComment, kind: CommentKind) -> Self {
        Self {
            id: comment.id,
            author: comment.user.map(|user| user.login).unwrap_or_default(),
            body: comment.body.unwrap_or_default(),
            created_at: comment.created_at,
            updated_at: comment.updated_at,
            html_url: comment.html_url,
            path: comment.path,
            line: comment.line,
            kind,
        }
    }
}

pub fn sort_by_created(comments: &mut [Comment]) {
    // GitHub timestamps are RFC 3339 in UTC, so string order is time order.
    comments.sort_by(|a, b| a.created_at.cmp(&b.created_at));
}
