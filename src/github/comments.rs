use crate::utils::comment::{Comment, CommentKind, GithubComment};
use crate::utils::config::GithubSettings;

use super::config::{get_api_json, GithubError, PER_PAGE};

pub async fn list_issue_comments_github(settings: &GithubSettings, pr_number: u64) -> Result<Vec<Comment>, GithubError> {
    let path = format!("{}/issues/{}/comments", settings.repo_path(), pr_number);
    fetch_comments(settings, &path, CommentKind::Issue).await
}

pub async fn list_review_comments_github(settings: &GithubSettings, pr_number: u64) -> Result<Vec<Comment>, GithubError> {
    let path = format!("{}/pulls/{}/comments", settings.repo_path(), pr_number);
    fetch_comments(settings, &path, CommentKind::Review).await
}

async fn fetch_comments(settings: &GithubSettings, path: &str, kind: CommentKind) -> Result<Vec<Comment>, GithubError> {
    let raw: Vec<GithubComment> = get_api_json(settings, path, &[("per_page", PER_PAGE)]).await?;
    log::debug!("[fetch_comments] Fetched {} {:?} comments from {}", raw.len(), kind, path);
    let comments = raw
        .into_iter()
        .map(|comment| Comment::from_github(comment, kind))
        .collect();
    return Ok(comments);
}
