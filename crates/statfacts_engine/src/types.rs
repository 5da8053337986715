use std::fmt;

pub type LookupId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    FetchingProfile,
    FetchingRepositories,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    Progress {
        lookup_id: LookupId,
        stage: Stage,
    },
    ProfileFetched {
        lookup_id: LookupId,
        result: Result<GithubProfile, FetchError>,
    },
    /// One fact per requested count, in request order.
    FactsFetched {
        lookup_id: LookupId,
        counts: Vec<u64>,
        facts: Vec<String>,
    },
}

/// Profile fields plus the star total over the first page of repositories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GithubProfile {
    pub login: String,
    pub avatar_url: String,
    pub html_url: String,
    pub public_repos: u64,
    pub followers: u64,
    pub stars: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TriviaCategory {
    Trivia,
    #[default]
    Math,
    Date,
    Year,
}

impl TriviaCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            TriviaCategory::Trivia => "trivia",
            TriviaCategory::Math => "math",
            TriviaCategory::Date => "date",
            TriviaCategory::Year => "year",
        }
    }
}

impl fmt::Display for TriviaCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FactFetchMode {
    /// Await each fact before requesting the next.
    #[default]
    Sequential,
    /// Request all facts at once and join them, keeping request order.
    Concurrent,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchError {
    pub kind: FailureKind,
    pub message: String,
}

impl FetchError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.message.is_empty() {
            write!(f, "{}", self.kind)
        } else {
            write!(f, "{}: {}", self.kind, self.message)
        }
    }
}

impl std::error::Error for FetchError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUsername,
    InvalidUrl,
    NotFound,
    HttpStatus(u16),
    Timeout,
    MalformedResponse,
    Network,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUsername => write!(f, "invalid username"),
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::NotFound => write!(f, "user not found"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::MalformedResponse => write!(f, "malformed response"),
            FailureKind::Network => write!(f, "network error"),
        }
    }
}

/// Failures while setting up the engine itself, before any lookup runs.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("failed to build http client: {0}")]
    Client(#[from] reqwest::Error),
    #[error("failed to start async runtime: {0}")]
    Runtime(#[from] std::io::Error),
    #[error("invalid base url {url}: {message}")]
    BaseUrl { url: String, message: String },
}
