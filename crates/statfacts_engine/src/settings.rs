use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};
use url::Url;

use crate::{EngineError, FactFetchMode, TriviaCategory};

pub const DEFAULT_GITHUB_API_BASE: &str = "https://api.github.com";
pub const DEFAULT_NUMBERS_API_BASE: &str = "https://numbersapi.com";
/// GitHub's maximum page size; only one page is ever requested.
pub const REPOS_PER_PAGE: u32 = 100;

#[derive(Debug, Clone)]
pub struct EngineSettings {
    pub github_api_base: String,
    pub numbers_api_base: String,
    pub repos_per_page: u32,
    pub trivia_category: TriviaCategory,
    pub fact_mode: FactFetchMode,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub user_agent: String,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            github_api_base: DEFAULT_GITHUB_API_BASE.to_string(),
            numbers_api_base: DEFAULT_NUMBERS_API_BASE.to_string(),
            repos_per_page: REPOS_PER_PAGE,
            trivia_category: TriviaCategory::Math,
            fact_mode: FactFetchMode::Sequential,
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            user_agent: concat!("statfacts/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl EngineSettings {
    pub(crate) fn build_client(&self, accept: &'static str) -> Result<reqwest::Client, EngineError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(accept));
        if let Ok(agent) = HeaderValue::from_str(&self.user_agent) {
            headers.insert(USER_AGENT, agent);
        }

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .connect_timeout(self.connect_timeout)
            .timeout(self.request_timeout)
            .build()?;
        Ok(client)
    }
}

/// Parses a base url so that path segments can be appended to it.
pub(crate) fn parse_base(raw: &str) -> Result<Url, EngineError> {
    let url = Url::parse(raw.trim()).map_err(|err| EngineError::BaseUrl {
        url: raw.to_string(),
        message: err.to_string(),
    })?;
    if url.cannot_be_a_base() {
        return Err(EngineError::BaseUrl {
            url: raw.to_string(),
            message: "not a hierarchical url".to_string(),
        });
    }
    Ok(url)
}

/// Appends `segments` to `base`, escaping each one.
pub(crate) fn join_segments(base: &Url, segments: &[&str]) -> Option<Url> {
    let mut url = base.clone();
    {
        let mut path = url.path_segments_mut().ok()?;
        path.pop_if_empty();
        for segment in segments {
            path.push(segment);
        }
    }
    Some(url)
}
