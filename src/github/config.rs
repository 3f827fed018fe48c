use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT};
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::utils::config::GithubSettings;
use crate::utils::reqwest_client::get_client;

pub const PER_PAGE: &str = "100";
const GITHUB_ACCEPT: &str = "application/vnd.github+json";
const GITHUB_API_VERSION: &str = "2022-11-28";
const PROXY_USER_AGENT: &str = "pr-review-proxy";

/// Failures talking to GitHub. The `Display` text is what clients receive.
#[derive(Debug, Error)]
pub enum GithubError {
    #[error("invalid request header: {0}")]
    Header(String),
    #[error("{0}")]
    Request(String),
    #[error("GitHub API error: {body}")]
    Status { status: u16, body: String },
    #[error("{0}")]
    Decode(String),
}

pub fn prepare_headers(access_token: &str) -> Result<HeaderMap, GithubError> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static(GITHUB_ACCEPT));
    headers.insert(USER_AGENT, HeaderValue::from_static(PROXY_USER_AGENT));
    headers.insert("x-github-api-version", HeaderValue::from_static(GITHUB_API_VERSION));

    if access_token.is_empty() {
        return Ok(headers);
    }
    let mut auth_header = HeaderValue::from_str(&format!("Bearer {}", access_token)).map_err(|e| {
        log::error!("[prepare_headers] Invalid auth header: {:?}", e);
        GithubError::Header(e.to_string())
    })?;
    auth_header.set_sensitive(true);
    headers.insert(AUTHORIZATION, auth_header);
    return Ok(headers);
}

/// Issues a single GET against the GitHub API and decodes the JSON body.
pub async fn get_api_json<T: DeserializeOwned>(
    settings: &GithubSettings,
    path: &str,
    params: &[(&str, &str)],
) -> Result<T, GithubError> {
    let headers = prepare_headers(settings.token())?;
    let url = format!("{}{}", settings.base_url, path);
    log::debug!("[get_api_json] GET {} params: {:?}", &url, params);

    let mut request = get_client().get(&url).headers(headers);
    if !params.is_empty() {
        request = request.query(params);
    }
    let response = request.send().await.map_err(|e| {
        log::error!("[get_api_json] Failed to send the request to {}: {:?}", &url, e);
        GithubError::Request(e.to_string())
    })?;

    let status = response.status();
    if !status.is_success() {
        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                log::error!("[get_api_json] Unable to read error body from {}: {:?}", &url, e);
                format!("(unable to read response body: {})", e)
            }
        };
        log::error!(
            "[get_api_json] Request to {} failed with status {}: {}",
            &url, status, &body
        );
        return Err(GithubError::Status { status: status.as_u16(), body });
    }

    let text = response.text().await.map_err(|e| {
        log::error!("[get_api_json] Unable to read response body from {}: {:?}", &url, e);
        GithubError::Request(e.to_string())
    })?;
    serde_json::from_str::<T>(&text).map_err(|e| {
        log::error!("[get_api_json] Failed to parse JSON from {}: {:?}", &url, e);
        GithubError::Decode(e.to_string())
    })
}

#[cfg(test)]
mod tests {
    use mockito::Server;
    use serde_json::Value;

    use super::*;

    #[test]
    fn test_prepare_headers_with_token() {
        let headers = prepare_headers("ghp_abc").unwrap();
        assert_eq!(headers.get(AUTHORIZATION).unwrap(), "Bearer ghp_abc");
        assert_eq!(headers.get(ACCEPT).unwrap(), GITHUB_ACCEPT);
        assert_eq!(headers.get("x-github-api-version").unwrap(), GITHUB_API_VERSION);
        assert_eq!(headers.get(USER_AGENT).unwrap(), PROXY_USER_AGENT);
    }

    #[test]
    fn test_prepare_headers_without_token_skips_auth() {
        let headers = prepare_headers("").unwrap();
        assert!(headers.get(AUTHORIZATION).is_none());
        assert!(headers.get(ACCEPT).is_some());
    }

    #[test]
    fn test_prepare_headers_rejects_control_characters() {
        let err = prepare_headers("bad\ntoken").unwrap_err();
        assert!(matches!(err, GithubError::Header(_)));
    }

    #[tokio::test]
    async fn test_get_api_json_forwards_upstream_error_body() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/repos/o/r/pulls/9")
            .with_status(404)
            .with_body(r#"{"message":"Not Found"}"#)
            .create_async()
            .await;
        let settings = GithubSettings::new(&server.url(), "o", "r", "");

        let err = get_api_json::<Value>(&settings, "/repos/o/r/pulls/9", &[])
            .await
            .unwrap_err();
        mock.assert_async().await;
        match &err {
            GithubError::Status { status, body } => {
                assert_eq!(*status, 404);
                assert_eq!(body, r#"{"message":"Not Found"}"#);
            }
            other => panic!("unexpected error: {:?}", other),
        }
        assert_eq!(err.to_string(), r#"GitHub API error: {"message":"Not Found"}"#);
    }

    #[tokio::test]
    async fn test_get_api_json_reports_decode_failure() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/repos/o/r/pulls")
            .with_status(200)
            .with_body("not json")
            .create_async()
            .await;
        let settings = GithubSettings::new(&server.url(), "o", "r", "");

        let err = get_api_json::<Vec<Value>>(&settings, "/repos/o/r/pulls", &[])
            .await
            .unwrap_err();
        assert!(matches!(err, GithubError::Decode(_)));
    }

    #[tokio::test]
    async fn test_get_api_json_reports_unreadable_error_body() {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 1024];
            let _ = socket.read(&mut buf).await;
            // promise more bytes than are sent, then hang up
            let _ = socket
                .write_all(b"HTTP/1.1 502 Bad Gateway\r\nContent-Length: 100\r\n\r\npartial")
                .await;
        });
        let settings = GithubSettings::new(&format!("http://{}", addr), "o", "r", "");

        let err = get_api_json::<Value>(&settings, "/repos/o/r/pulls", &[])
            .await
            .unwrap_err();
        match err {
            GithubError::Status { status, body } => {
                assert_eq!(status, 502);
                assert!(body.starts_with("(unable to read response body"), "body: {}", body);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_get_api_json_reports_unreachable_host() {
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let settings = GithubSettings::new(&format!("http://127.0.0.1:{}", port), "o", "r", "");
        let err = get_api_json::<Value>(&settings, "/rate_limit", &[])
            .await
            .unwrap_err();
        assert!(matches!(err, GithubError::Request(_)));
    }
}
