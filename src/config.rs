use crate::browser::BrowserConfig;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Directory receiving one CSV per table
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// SQLite file populated by `load` and read by `serve`
    #[serde(default = "default_database_path")]
    pub database_path: PathBuf,

    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    #[serde(default)]
    pub targets: Targets,

    #[serde(default)]
    pub browser: BrowserConfig,

    #[serde(default)]
    pub timings: Timings,

    /// Role slug -> category labels the site may render it under, tried in order
    #[serde(default = "default_role_aliases")]
    pub role_aliases: BTreeMap<String, Vec<String>>,

    /// Per-review container selector; when set, review titles and bodies are
    /// read from the same container instead of paired by position
    #[serde(default)]
    pub review_container: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Targets {
    #[serde(default = "default_top_list_url")]
    pub top_list_url: String,

    #[serde(default = "default_filmography_url")]
    pub filmography_url: String,

    #[serde(default = "default_reviews_url")]
    pub reviews_url: String,

    #[serde(default = "default_max_reviews")]
    pub max_reviews: usize,
}

/// Wait budgets, all in milliseconds
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct Timings {
    /// Pause between two probes of a polled condition
    #[serde(default = "default_poll_interval")]
    pub poll_interval_ms: u64,

    /// Presence wait per candidate container
    #[serde(default = "default_resolve_timeout")]
    pub resolve_timeout_ms: u64,

    /// Presence and interactability wait for UI controls
    #[serde(default = "default_interaction_timeout")]
    pub interaction_timeout_ms: u64,

    /// Settle after a control has been clicked
    #[serde(default = "default_interaction_settle")]
    pub interaction_settle_ms: u64,

    /// Wait for the first review titles to render
    #[serde(default = "default_review_wait")]
    pub review_wait_ms: u64,

    #[serde(default = "default_top_list_settle")]
    pub top_list_settle_ms: u64,

    #[serde(default = "default_filmography_settle")]
    pub filmography_settle_ms: u64,

    #[serde(default = "default_reviews_settle")]
    pub reviews_settle_ms: u64,
}

fn default_output_dir() -> PathBuf { PathBuf::from("output") }
fn default_database_path() -> PathBuf { PathBuf::from("imdb_data.db") }
fn default_bind_addr() -> String { "127.0.0.1:8000".to_string() }
fn default_top_list_url() -> String { "https://www.imdb.com/chart/top/".to_string() }
fn default_filmography_url() -> String { "https://www.imdb.com/name/nm0000189/".to_string() }
fn default_reviews_url() -> String { "https://www.imdb.com/title/tt1663202/reviews/".to_string() }
fn default_max_reviews() -> usize { 30 }
fn default_poll_interval() -> u64 { 100 }
fn default_resolve_timeout() -> u64 { 5_000 }
fn default_interaction_timeout() -> u64 { 10_000 }
fn default_interaction_settle() -> u64 { 5_000 }
fn default_review_wait() -> u64 { 10_000 }
fn default_top_list_settle() -> u64 { 3_000 }
fn default_filmography_settle() -> u64 { 5_000 }
fn default_reviews_settle() -> u64 { 3_000 }

fn default_role_aliases() -> BTreeMap<String, Vec<String>> {
    let mut aliases = BTreeMap::new();
    aliases.insert(
        "actor".to_string(),
        vec!["actor".to_string(), "actress".to_string()],
    );
    aliases
}

impl Default for Targets {
    fn default() -> Self {
        Self {
            top_list_url: default_top_list_url(),
            filmography_url: default_filmography_url(),
            reviews_url: default_reviews_url(),
            max_reviews: default_max_reviews(),
        }
    }
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            poll_interval_ms: default_poll_interval(),
            resolve_timeout_ms: default_resolve_timeout(),
            interaction_timeout_ms: default_interaction_timeout(),
            interaction_settle_ms: default_interaction_settle(),
            review_wait_ms: default_review_wait(),
            top_list_settle_ms: default_top_list_settle(),
            filmography_settle_ms: default_filmography_settle(),
            reviews_settle_ms: default_reviews_settle(),
        }
    }
}

impl Timings {
    /// No settling and single-probe waits, for static pages
    pub fn instant() -> Self {
        Self {
            poll_interval_ms: 0,
            resolve_timeout_ms: 0,
            interaction_timeout_ms: 0,
            interaction_settle_ms: 0,
            review_wait_ms: 0,
            top_list_settle_ms: 0,
            filmography_settle_ms: 0,
            reviews_settle_ms: 0,
        }
    }

    pub fn poll_interval(&self) -> Duration { Duration::from_millis(self.poll_interval_ms) }
    pub fn resolve_timeout(&self) -> Duration { Duration::from_millis(self.resolve_timeout_ms) }
    pub fn interaction_timeout(&self) -> Duration { Duration::from_millis(self.interaction_timeout_ms) }
    pub fn interaction_settle(&self) -> Duration { Duration::from_millis(self.interaction_settle_ms) }
    pub fn review_wait(&self) -> Duration { Duration::from_millis(self.review_wait_ms) }
    pub fn top_list_settle(&self) -> Duration { Duration::from_millis(self.top_list_settle_ms) }
    pub fn filmography_settle(&self) -> Duration { Duration::from_millis(self.filmography_settle_ms) }
    pub fn reviews_settle(&self) -> Duration { Duration::from_millis(self.reviews_settle_ms) }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            database_path: default_database_path(),
            bind_addr: default_bind_addr(),
            targets: Targets::default(),
            browser: BrowserConfig::default(),
            timings: Timings::default(),
            role_aliases: default_role_aliases(),
            review_container: None,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

impl Config {
    /// `config.toml` from the working directory, or defaults when absent
    pub fn load() -> Result<Self, ConfigError> {
        let path = Path::new("config.toml");
        if path.exists() {
            Self::load_from(path)
        } else {
            log::debug!("No config.toml found, using defaults");
            Ok(Self::default())
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}
