//! Optional `statfacts.ron` configuration for the terminal host.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use statfacts_engine::{
    EngineSettings, FactFetchMode, TriviaCategory, DEFAULT_GITHUB_API_BASE,
    DEFAULT_NUMBERS_API_BASE, REPOS_PER_PAGE,
};
use thiserror::Error;

use super::logging::LogDestination;

pub const CONFIG_FILENAME: &str = "statfacts.ron";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Category {
    Trivia,
    #[default]
    Math,
    Date,
    Year,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum FactMode {
    #[default]
    Sequential,
    Concurrent,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub default_username: String,
    pub github_api_base: String,
    pub numbers_api_base: String,
    pub trivia_category: Category,
    pub fact_mode: FactMode,
    pub repos_per_page: u32,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
    pub log_destination: LogDestination,
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            default_username: "ghana7989".to_string(),
            github_api_base: DEFAULT_GITHUB_API_BASE.to_string(),
            numbers_api_base: DEFAULT_NUMBERS_API_BASE.to_string(),
            trivia_category: Category::Math,
            fact_mode: FactMode::Sequential,
            repos_per_page: REPOS_PER_PAGE,
            connect_timeout_secs: 10,
            request_timeout_secs: 30,
            log_destination: LogDestination::File,
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    pub fn engine_settings(&self) -> EngineSettings {
        EngineSettings {
            github_api_base: self.github_api_base.clone(),
            numbers_api_base: self.numbers_api_base.clone(),
            repos_per_page: self.repos_per_page.clamp(1, REPOS_PER_PAGE),
            trivia_category: map_category(self.trivia_category),
            fact_mode: map_mode(self.fact_mode),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs.max(1)),
            request_timeout: Duration::from_secs(self.request_timeout_secs.max(1)),
            ..EngineSettings::default()
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse {path:?}: {message}")]
    Parse { path: PathBuf, message: String },
}

/// Loads the config at `path`. A missing file is not an error and yields `None`.
pub fn load_config(path: &Path) -> Result<Option<AppConfig>, ConfigError> {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    ron::from_str(&content)
        .map(Some)
        .map_err(|err| ConfigError::Parse {
            path: path.to_path_buf(),
            message: err.to_string(),
        })
}

fn map_category(category: Category) -> TriviaCategory {
    match category {
        Category::Trivia => TriviaCategory::Trivia,
        Category::Math => TriviaCategory::Math,
        Category::Date => TriviaCategory::Date,
        Category::Year => TriviaCategory::Year,
    }
}

fn map_mode(mode: FactMode) -> FactFetchMode {
    match mode {
        FactMode::Sequential => FactFetchMode::Sequential,
        FactMode::Concurrent => FactFetchMode::Concurrent,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn missing_file_yields_none() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = load_config(&dir.path().join(CONFIG_FILENAME)).unwrap();
        assert_eq!(loaded, None);
    }

    #[test]
    fn partial_file_keeps_defaults_for_the_rest() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        fs::write(
            &path,
            r#"(default_username: "octocat", fact_mode: Concurrent, log_destination: Both)"#,
        )
        .unwrap();

        let config = load_config(&path).unwrap().expect("config present");
        assert_eq!(config.default_username, "octocat");
        assert_eq!(config.fact_mode, FactMode::Concurrent);
        assert_eq!(config.log_destination, LogDestination::Both);
        assert_eq!(config.github_api_base, DEFAULT_GITHUB_API_BASE);
        assert_eq!(config.trivia_category, Category::Math);
        assert_eq!(config.repos_per_page, 100);
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        fs::write(&path, "(default_username: 42").unwrap();

        let err = load_config(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn engine_settings_follow_config() {
        let config = AppConfig {
            numbers_api_base: "http://localhost:8080".to_string(),
            trivia_category: Category::Trivia,
            fact_mode: FactMode::Concurrent,
            repos_per_page: 500,
            request_timeout_secs: 0,
            ..AppConfig::default()
        };

        let settings = config.engine_settings();
        assert_eq!(settings.numbers_api_base, "http://localhost:8080");
        assert_eq!(settings.trivia_category, TriviaCategory::Trivia);
        assert_eq!(settings.fact_mode, FactFetchMode::Concurrent);
        assert_eq!(settings.repos_per_page, 100);
        assert_eq!(settings.request_timeout, Duration::from_secs(1));
    }

    #[test]
    fn default_config_round_trips_through_ron() {
        let text =
            ron::ser::to_string_pretty(&AppConfig::default(), ron::ser::PrettyConfig::new())
                .unwrap();
        let parsed: AppConfig = ron::from_str(&text).unwrap();
        assert_eq!(parsed, AppConfig::default());
    }
}
