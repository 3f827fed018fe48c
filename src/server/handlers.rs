use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;

use crate::github::comments::{list_issue_comments_github, list_review_comments_github};
use crate::github::prs::{filter_prs, get_pr_info_github, list_prs_github};
use crate::github::search::{is_valid_login, search_review_requests_github};
use crate::utils::comment::{sort_by_created, Comment};
use crate::utils::pull_request::{PrState, PullRequest};

use super::error::ApiError;
use super::AppState;

#[derive(Debug, Deserialize)]
pub struct ListPullsQuery {
    #[serde(default)]
    pub state: PrState,
    pub author: Option<String>,
    pub reviewer: Option<String>,
}

#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CommentScope {
    #[default]
    Issue,
    Review,
    All,
}

#[derive(Debug, Deserialize)]
pub struct CommentsQuery {
    #[serde(default)]
    pub kind: CommentScope,
}

#[derive(Debug, Deserialize)]
pub struct ReviewRequestsQuery {
    pub reviewer: Option<String>,
    #[serde(default)]
    pub state: PrState,
}

pub async fn list_pulls(
    State(state): State<AppState>,
    Query(query): Query<ListPullsQuery>,
) -> Result<Json<Vec<PullRequest>>, ApiError> {
    let prs = list_prs_github(&state.github, query.state.as_str()).await?;
    let author = non_empty(query.author.as_deref());
    let reviewer = non_empty(query.reviewer.as_deref());
    if author.is_none() && reviewer.is_none() {
        return Ok(Json(prs));
    }
    let total = prs.len();
    let filtered = filter_prs(prs, author, reviewer);
    log::debug!(
        "[list_pulls] {} of {} PRs kept for author {:?}, reviewer {:?}",
        filtered.len(), total, author, reviewer
    );
    Ok(Json(filtered))
}

pub async fn get_pull(
    State(state): State<AppState>,
    Path(number): Path<u64>,
) -> Result<Json<PullRequest>, ApiError> {
    let pr = get_pr_info_github(&state.github, number).await?;
    Ok(Json(pr))
}

pub async fn list_comments(
    State(state): State<AppState>,
    Path(number): Path<u64>,
    Query(query): Query<CommentsQuery>,
) -> Result<Json<Vec<Comment>>, ApiError> {
    let comments = match query.kind {
        CommentScope::Issue => {
            let mut issue = list_issue_comments_github(&state.github, number).await?;
            sort_by_created(&mut issue);
            issue
        }
        CommentScope::Review => {
            let mut review = list_review_comments_github(&state.github, number).await?;
            sort_by_created(&mut review);
            review
        }
        CommentScope::All => {
            let (mut issue, mut review) = tokio::try_join!(
                list_issue_comments_github(&state.github, number),
                list_review_comments_github(&state.github, number),
            )?;
            sort_by_created(&mut issue);
            sort_by_created(&mut review);
            issue.append(&mut review);
            issue
        }
    };
    Ok(Json(comments))
}

pub async fn review_requests(
    State(state): State<AppState>,
    Query(query): Query<ReviewRequestsQuery>,
) -> Result<Json<Vec<PullRequest>>, ApiError> {
    let reviewer = non_empty(query.reviewer.as_deref());
    if let Some(login) = reviewer {
        if !is_valid_login(login) {
            return Err(ApiError::BadRequest(format!("invalid reviewer login: {:?}", login)));
        }
    }
    let prs = search_review_requests_github(&state.github, reviewer, query.state).await?;
    Ok(Json(prs))
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
