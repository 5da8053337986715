use facts_logging::{facts_debug, facts_info};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use url::Url;

use crate::settings::{join_segments, parse_base};
use crate::{EngineError, EngineEvent, EngineSettings, FailureKind, FetchError, GithubProfile, LookupId, Stage};

const GITHUB_JSON: &str = "application/vnd.github+json";

pub trait ProgressSink: Send + Sync {
    fn emit(&self, event: EngineEvent);
}

pub struct ChannelProgressSink {
    tx: std::sync::mpsc::Sender<EngineEvent>,
}

impl ChannelProgressSink {
    pub fn new(tx: std::sync::mpsc::Sender<EngineEvent>) -> Self {
        Self { tx }
    }
}

impl ProgressSink for ChannelProgressSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.tx.send(event);
    }
}

#[async_trait::async_trait]
pub trait ProfileFetcher: Send + Sync {
    /// Resolves the public profile of `username` and its star total.
    ///
    /// Either both lookups succeed or an error is returned; there is no partial profile.
    async fn fetch(
        &self,
        lookup_id: LookupId,
        username: &str,
        sink: &dyn ProgressSink,
    ) -> Result<GithubProfile, FetchError>;
}

#[derive(Debug, Deserialize)]
struct UserResponse {
    login: String,
    avatar_url: String,
    html_url: String,
    public_repos: u64,
    followers: u64,
}

#[derive(Debug, Deserialize)]
struct RepoResponse {
    #[serde(default)]
    stargazers_count: Option<u64>,
}

/// Sums star counts, treating a missing count as zero.
fn sum_stars(repos: &[RepoResponse]) -> u64 {
    repos
        .iter()
        .map(|repo| repo.stargazers_count.unwrap_or(0))
        .fold(0u64, u64::saturating_add)
}

#[derive(Debug, Clone)]
pub struct ReqwestProfileFetcher {
    client: reqwest::Client,
    base: Url,
    per_page: u32,
}

impl ReqwestProfileFetcher {
    pub fn new(settings: &EngineSettings) -> Result<Self, EngineError> {
        Ok(Self {
            client: settings.build_client(GITHUB_JSON)?,
            base: parse_base(&settings.github_api_base)?,
            per_page: settings.repos_per_page,
        })
    }

    fn user_url(&self, username: &str) -> Result<Url, FetchError> {
        join_segments(&self.base, &["users", username])
            .ok_or_else(|| FetchError::new(FailureKind::InvalidUrl, self.base.to_string()))
    }

    fn repos_url(&self, username: &str) -> Result<Url, FetchError> {
        let mut url = join_segments(&self.base, &["users", username, "repos"])
            .ok_or_else(|| FetchError::new(FailureKind::InvalidUrl, self.base.to_string()))?;
        url.query_pairs_mut()
            .append_pair("per_page", &self.per_page.to_string());
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(FetchError::new(FailureKind::NotFound, String::new()));
        }
        if !status.is_success() {
            return Err(FetchError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        let body = response.bytes().await.map_err(map_reqwest_error)?;
        serde_json::from_slice(&body)
            .map_err(|err| FetchError::new(FailureKind::MalformedResponse, err.to_string()))
    }
}

#[async_trait::async_trait]
impl ProfileFetcher for ReqwestProfileFetcher {
    async fn fetch(
        &self,
        lookup_id: LookupId,
        username: &str,
        sink: &dyn ProgressSink,
    ) -> Result<GithubProfile, FetchError> {
        let username = username.trim();
        if username.is_empty() {
            return Err(FetchError::new(FailureKind::InvalidUsername, "empty username"));
        }

        sink.emit(EngineEvent::Progress {
            lookup_id,
            stage: Stage::FetchingProfile,
        });
        let user: UserResponse = self.get_json(self.user_url(username)?).await?;
        facts_debug!(
            "lookup {} resolved user {} ({} public repos)",
            lookup_id,
            user.login,
            user.public_repos
        );

        sink.emit(EngineEvent::Progress {
            lookup_id,
            stage: Stage::FetchingRepositories,
        });
        // Single page only: stars beyond the first `per_page` repositories are not counted.
        let repos: Vec<RepoResponse> = self.get_json(self.repos_url(username)?).await?;
        let stars = sum_stars(&repos);
        facts_info!(
            "lookup {} counted {} stars over {} repositories for {}",
            lookup_id,
            stars,
            repos.len(),
            user.login
        );

        Ok(GithubProfile {
            login: user.login,
            avatar_url: user.avatar_url,
            html_url: user.html_url,
            public_repos: user.public_repos,
            followers: user.followers,
            stars,
        })
    }
}

pub(crate) fn map_reqwest_error(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        return FetchError::new(FailureKind::Timeout, err.to_string());
    }
    if err.is_decode() {
        return FetchError::new(FailureKind::MalformedResponse, err.to_string());
    }
    FetchError::new(FailureKind::Network, err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_and_missing_star_counts_count_as_zero() {
        let repos: Vec<RepoResponse> = serde_json::from_str(
            r#"[{"stargazers_count": 10}, {"stargazers_count": null}, {"name": "no-count"}]"#,
        )
        .unwrap();
        assert_eq!(sum_stars(&repos), 10);
    }

    #[test]
    fn star_sum_saturates() {
        let repos = vec![
            RepoResponse {
                stargazers_count: Some(u64::MAX),
            },
            RepoResponse {
                stargazers_count: Some(1),
            },
        ];
        assert_eq!(sum_stars(&repos), u64::MAX);
    }

    #[test]
    fn repos_url_requests_single_full_page() {
        let fetcher = ReqwestProfileFetcher::new(&EngineSettings::default()).unwrap();
        let url = fetcher.repos_url("octocat").unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.github.com/users/octocat/repos?per_page=100"
        );
    }
}
