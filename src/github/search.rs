use crate::utils::config::GithubSettings;
use crate::utils::pull_request::{GithubSearchResult, PrState, PullRequest};

use super::config::{get_api_json, GithubError, PER_PAGE};

const MAX_LOGIN_LEN: usize = 39;

/// GitHub logins are ASCII alphanumerics and hyphens; apps carry a `[bot]` suffix.
pub fn is_valid_login(login: &str) -> bool {
    let name = login.strip_suffix("[bot]").unwrap_or(login);
    !name.is_empty()
        && name.len() <= MAX_LOGIN_LEN
        && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
}

/// Search qualifiers for PRs in one repo awaiting a review. Without a
/// reviewer the token owner (`@me`) is used.
pub fn review_request_query(owner: &str, repo: &str, reviewer: Option<&str>, state: PrState) -> String {
    let mut qualifiers = vec!["is:pr".to_string(), format!("repo:{}/{}", owner, repo)];
    if state != PrState::All {
        qualifiers.push(format!("state:{}", state.as_str()));
    }
    match reviewer {
        Some(login) => qualifiers.push(format!("review-requested:{}", login)),
        None => qualifiers.push("user-review-requested:@me".to_string()),
    }
    qualifiers.join(" ")
}

pub async fn search_review_requests_github(
    settings: &GithubSettings,
    reviewer: Option<&str>,
    state: PrState,
) -> Result<Vec<PullRequest>, GithubError> {
    let query = review_request_query(&settings.owner, &settings.repo, reviewer, state);
    let params = [("q", query.as_str()), ("per_page", PER_PAGE)];
    let result: GithubSearchResult = get_api_json(settings, "/search/issues", &params).await?;
    if result.incomplete_results {
        log::warn!("[search_review_requests_github] GitHub returned incomplete results for {:?}", &query);
    }
    log::debug!(
        "[search_review_requests_github] {} of {} results for {:?}",
        result.items.len(), result.total_count, &query
    );
    Ok(result.items.into_iter().map(PullRequest::from).collect())
}

#[cfg(test)]
mod tests {
    use mockito::{Matcher, Server};
    use serde_json::json;

    use super::*;

    #[test]
    fn test_review_request_query_for_reviewer() {
        let query = review_request_query("octo", "hello", Some("hubot"), PrState::Open);
        assert_eq!(query, "is:pr repo:octo/hello state:open review-requested:hubot");
    }

    #[test]
    fn test_is_valid_login() {
        assert!(is_valid_login("hubot"));
        assert!(is_valid_login("Mona-Lisa42"));
        assert!(is_valid_login("dependabot[bot]"));
        assert!(!is_valid_login(""));
        assert!(!is_valid_login("[bot]"));
        assert!(!is_valid_login("x repo:evil/secret"));
        assert!(!is_valid_login("x+repo:evil/secret"));
        assert!(!is_valid_login("octo:cat"));
        assert!(!is_valid_login(&"a".repeat(40)));
    }

    #[test]
    fn test_review_request_query_defaults_to_token_owner() {
        let query = review_request_query("octo", "hello", None, PrState::All);
        assert_eq!(query, "is:pr repo:octo/hello user-review-requested:@me");
    }

    #[tokio::test]
    async fn test_search_review_requests_github_maps_items() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/search/issues")
            .match_query(Matcher::UrlEncoded(
                "q".into(),
                "is:pr repo:octo/hello state:closed review-requested:hubot".into(),
            ))
            .with_status(200)
            .with_body(
                json!({
                    "total_count": 1,
                    "incomplete_results": false,
                    "items": [{
                        "number": 12,
                        "title": "Fix webhook",
                        "user": { "login": "octocat" },
                        "state": "closed",
                        "draft": false,
                        "html_url": "https://github.com/octo/hello/pull/12",
                        "body": "Fixes it",
                        "created_at": "2024-01-01T00:00:00Z",
                        "updated_at": "2024-01-05T00:00:00Z",
                        "labels": [{ "name": "bug" }],
                        "pull_request": { "url": "https://api.github.com/repos/octo/hello/pulls/12" }
                    }]
                })
                .to_string(),
            )
            .create_async()
            .await;
        let settings = GithubSettings::new(&server.url(), "octo", "hello", "");

        let prs = search_review_requests_github(&settings, Some("hubot"), PrState::Closed)
            .await
            .unwrap();
        mock.assert_async().await;
        assert_eq!(prs.len(), 1);
        assert_eq!(prs[0].number, 12);
        assert_eq!(prs[0].labels, vec!["bug"]);
        assert!(prs[0].requested_reviewers.is_empty());
    }
}
