//! Statfacts engine: remote lookups and effect execution.
mod engine;
mod facts;
mod github;
mod settings;
mod types;

pub use engine::EngineHandle;
pub use facts::{fallback_fact, facts_for, FactSource, ReqwestFactEnricher};
pub use github::{ChannelProgressSink, ProfileFetcher, ProgressSink, ReqwestProfileFetcher};
pub use settings::{EngineSettings, DEFAULT_GITHUB_API_BASE, DEFAULT_NUMBERS_API_BASE, REPOS_PER_PAGE};
pub use types::{
    EngineError, EngineEvent, FactFetchMode, FailureKind, FetchError, GithubProfile, LookupId,
    Stage, TriviaCategory,
};
