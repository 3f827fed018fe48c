use std::env;
use std::fmt;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use log::LevelFilter;
use thiserror::Error;

pub const DEFAULT_GITHUB_BASE_URL: &str = "https://api.github.com";
pub const DEFAULT_OWNER: &str = "julofinance";
pub const DEFAULT_REPO: &str = "whatsapp-service";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
pub const DEFAULT_STATIC_FILE: &str = "static/index.html";
const DEFAULT_LOG_RETENTION_DAYS: u64 = 30;
const SECS_PER_DAY: u64 = 24 * 60 * 60;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {var}: {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// Where outbound calls go and which repository they target.
#[derive(Clone)]
pub struct GithubSettings {
    pub base_url: String,
    pub owner: String,
    pub repo: String,
    token: String,
}

impl GithubSettings {
    pub fn new(base_url: &str, owner: &str, repo: &str, token: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            owner: owner.to_string(),
            repo: repo.to_string(),
            token: token.to_string(),
        }
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn repo_path(&self) -> String {
        format!("/repos/{}/{}", self.owner, self.repo)
    }
}

impl fmt::Debug for GithubSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let token = if self.token.is_empty() { "<unset>" } else { "[REDACTED]" };
        f.debug_struct("GithubSettings")
            .field("base_url", &self.base_url)
            .field("owner", &self.owner)
            .field("repo", &self.repo)
            .field("token", &token)
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub github: GithubSettings,
    pub bind_addr: SocketAddr,
    pub static_file: PathBuf,
    pub log_level: LevelFilter,
    pub log_dir: Option<PathBuf>,
    pub log_retention: Duration,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let github = GithubSettings::new(
            &get("GITHUB_BASE_URL").unwrap_or_else(|| DEFAULT_GITHUB_BASE_URL.to_string()),
            &get("GITHUB_OWNER").unwrap_or_else(|| DEFAULT_OWNER.to_string()),
            &get("GITHUB_REPO").unwrap_or_else(|| DEFAULT_REPO.to_string()),
            &get("GITHUB_TOKEN").unwrap_or_default(),
        );
        let bind_addr = parse_var(
            "BIND_ADDR",
            &get("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
        )?;
        let static_file = PathBuf::from(
            get("STATIC_FILE").unwrap_or_else(|| DEFAULT_STATIC_FILE.to_string()),
        );
        let log_level = parse_var("LOG_LEVEL", &get("LOG_LEVEL").unwrap_or_else(|| "info".to_string()))?;
        let log_dir = get("LOG_DIR").map(PathBuf::from);
        let retention_days: u64 = match get("LOG_RETENTION_DAYS") {
            Some(value) => parse_var("LOG_RETENTION_DAYS", &value)?,
            None => DEFAULT_LOG_RETENTION_DAYS,
        };

        Ok(Self {
            github,
            bind_addr,
            static_file,
            log_level,
            log_dir,
            log_retention: Duration::from_secs(retention_days.saturating_mul(SECS_PER_DAY)),
        })
    }
}

fn parse_var<T>(var: &'static str, value: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    value.trim().parse::<T>().map_err(|e| ConfigError::Invalid {
        var,
        value: value.to_string(),
        reason: e.to_string(),
    })
}
