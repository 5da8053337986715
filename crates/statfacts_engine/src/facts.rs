use facts_logging::{facts_debug, facts_warn};
use futures_util::future::join_all;
use serde::Deserialize;
use url::Url;

use crate::github::map_reqwest_error;
use crate::settings::{join_segments, parse_base};
use crate::{EngineError, EngineSettings, FactFetchMode, FailureKind, FetchError, TriviaCategory};

/// Text used whenever no trivia could be fetched for `number`.
pub fn fallback_fact(number: u64) -> String {
    format!("No interesting fact found for number {number}")
}

#[async_trait::async_trait]
pub trait FactSource: Send + Sync {
    /// Returns a trivia sentence about `number`. Never fails: errors degrade to
    /// [`fallback_fact`].
    async fn fact_for(&self, number: u64, category: TriviaCategory) -> String;
}

/// Enriches every count independently, returning facts in the order of `counts`.
pub async fn facts_for(
    source: &dyn FactSource,
    counts: &[u64],
    category: TriviaCategory,
    mode: FactFetchMode,
) -> Vec<String> {
    match mode {
        FactFetchMode::Sequential => {
            let mut facts = Vec::with_capacity(counts.len());
            for &count in counts {
                facts.push(source.fact_for(count, category).await);
            }
            facts
        }
        FactFetchMode::Concurrent => {
            join_all(counts.iter().map(|&count| source.fact_for(count, category))).await
        }
    }
}

#[derive(Debug, Deserialize)]
struct FactResponse {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ReqwestFactEnricher {
    client: reqwest::Client,
    base: Url,
}

impl ReqwestFactEnricher {
    pub fn new(settings: &EngineSettings) -> Result<Self, EngineError> {
        Ok(Self {
            client: settings.build_client("application/json")?,
            base: parse_base(&settings.numbers_api_base)?,
        })
    }

    fn fact_url(&self, number: u64, category: TriviaCategory) -> Result<Url, FetchError> {
        let number = number.to_string();
        let mut url = join_segments(&self.base, &[number.as_str(), category.as_str()])
            .ok_or_else(|| FetchError::new(FailureKind::InvalidUrl, self.base.to_string()))?;
        // The service switches to a JSON envelope when the bare `json` flag is present.
        url.set_query(Some("json"));
        Ok(url)
    }

    async fn try_fact(&self, number: u64, category: TriviaCategory) -> Result<String, FetchError> {
        let response = self
            .client
            .get(self.fact_url(number, category)?)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        let body = response.bytes().await.map_err(map_reqwest_error)?;
        let parsed: FactResponse = serde_json::from_slice(&body)
            .map_err(|err| FetchError::new(FailureKind::MalformedResponse, err.to_string()))?;
        match parsed.text {
            Some(text) if !text.trim().is_empty() => Ok(text),
            _ => Err(FetchError::new(
                FailureKind::MalformedResponse,
                "missing text field",
            )),
        }
    }
}

#[async_trait::async_trait]
impl FactSource for ReqwestFactEnricher {
    async fn fact_for(&self, number: u64, category: TriviaCategory) -> String {
        match self.try_fact(number, category).await {
            Ok(text) => {
                facts_debug!("fact for {} ({}): {}", number, category, text);
                text
            }
            Err(err) => {
                facts_warn!("no {} fact for {}: {}", category, number, err);
                fallback_fact(number)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_names_the_number() {
        assert_eq!(fallback_fact(42), "No interesting fact found for number 42");
    }

    #[test]
    fn fact_url_uses_number_category_and_json_flag() {
        let enricher = ReqwestFactEnricher::new(&EngineSettings::default()).unwrap();
        let url = enricher.fact_url(500, TriviaCategory::Math).unwrap();
        assert_eq!(url.as_str(), "https://numbersapi.com/500/math?json");
    }
}
