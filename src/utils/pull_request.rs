use serde::{Deserialize, Serialize};

/// A GitHub user as embedded in pulls, issues and comments.
#[derive(Debug, Deserialize, Clone)]
pub struct GithubUser {
    pub login: String,
    pub avatar_url: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct GithubLabel {
    pub name: String,
}

/// Pull request as returned by `/pulls` and, with fewer fields, by `/search/issues`.
#[derive(Debug, Deserialize, Clone)]
pub struct GithubPull {
    pub number: u64,
    pub title: String,
    pub user: Option<GithubUser>,
    pub state: String,
    pub draft: Option<bool>,
    pub html_url: String,
    pub body: Option<String>,
    pub created_at: String,
    pub updated_at: String,
    pub requested_reviewers: Option<Vec<GithubUser>>,
    pub labels: Option<Vec<GithubLabel>>,
}

#[derive(Debug, Deserialize)]
pub struct GithubSearchResult {
    pub total_count: u64,
    #[serde(default)]
    pub incomplete_results: bool,
    pub items: Vec<GithubPull>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct PullRequest {
    pub number: u64,
    pub title: String,
    pub author: String,
    pub author_avatar_url: String,
    pub state: String,
    pub draft: bool,
    pub html_url: String,
    pub body: String,
    pub created_at: String,
    pub updated_at: String,
    pub requested_reviewers: Vec<String>,
    pub labels: Vec<String>,
}

impl From<GithubPull> for PullRequest {
    fn from(pull: GithubPull) -> Self {
        let (author, author_avatar_url) = match pull.user {
            Some(user) => (user.login, user.avatar_url.unwrap_or_default()),
            None => (String::new(), String::new()),
        };
        Self {
            number: pull.number,
            title: pull.title,
            author,
            author_avatar_url,
            state: pull.state,
            draft: pull.draft.unwrap_or(false),
            html_url: pull.html_url,
            body: pull.body.unwrap_or_default(),
            created_at: pull.created_at,
            updated_at: pull.updated_at,
            requested_reviewers: pull
                .requested_reviewers
                .unwrap_or_default()
                .into_iter()
                .map(|reviewer| reviewer.login)
                .collect(),
            labels: pull
                .labels
                .unwrap_or_default()
                .into_iter()
                .map(|label| label.name)
                .collect(),
        }
    }
}

impl PullRequest {
    pub fn is_authored_by(&self, login: &str) -> bool {
        self.author.eq_ignore_ascii_case(login)
    }

    pub fn has_requested_reviewer(&self, login: &str) -> bool {
        self.requested_reviewers
            .iter()
            .any(|reviewer| reviewer.eq_ignore_ascii_case(login))
    }
}

/// The `state` filter GitHub accepts for pull request listings.
#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PrState {
    #[default]
    Open,
    Closed,
    All,
}

impl PrState {
    pub fn as_str(&self) -> &'static str {
        match self {
            PrState::Open => "open",
            PrState::Closed => "closed",
            PrState::All => "all",
        }
    }
}
