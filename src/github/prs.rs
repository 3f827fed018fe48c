use crate::utils::config::GithubSettings;
use crate::utils::pull_request::{GithubPull, PullRequest};

use super::config::{get_api_json, GithubError, PER_PAGE};

pub async fn list_prs_github(settings: &GithubSettings, state: &str) -> Result<Vec<PullRequest>, GithubError> {
    let path = format!("{}/pulls", settings.repo_path());
    let params = [("state", state), ("per_page", PER_PAGE)];
    let pulls: Vec<GithubPull> = get_api_json(settings, &path, &params).await?;
    log::debug!(
        "[list_prs_github] Fetched {} {} PRs for {}/{}",
        pulls.len(), state, &settings.owner, &settings.repo
    );
    Ok(pulls.into_iter().map(PullRequest::from).collect())
}

pub async fn get_pr_info_github(settings: &GithubSettings, pr_number: u64) -> Result<PullRequest, GithubError> {
    let path = format!("{}/pulls/{}", settings.repo_path(), pr_number);
    let pull: GithubPull = get_api_json(settings, &path, &[]).await?;
    let pr_info = PullRequest::from(pull);
    log::debug!("[get_pr_info_github] PR info: {:?}", &pr_info);
    Ok(pr_info)
}

/// Keeps PRs matching every filter given. `None` disables a filter.
pub fn filter_prs(prs: Vec<PullRequest>, author: Option<&str>, reviewer: Option<&str>) -> Vec<PullRequest> {
    prs.into_iter()
        .filter(|pr| author.map_or(true, |login| pr.is_authored_by(login)))
        .filter(|pr| reviewer.map_or(true, |login| pr.has_requested_reviewer(login)))
        .collect()
}
