//! Source provider - reads a local file or fetches a URL
//!
//! The retrieved text is flagged as markup when it contains a `<script` tag,
//! in which case its script elements are scanned as separate units.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use domsentry_core::SourceSet;
use domsentry_core::config::FetchConfig;
use domsentry_core::markup::looks_like_markup;
use tracing::debug;

#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("Failed to read '{path}': {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to fetch '{url}': {source}")]
    Request { url: String, source: reqwest::Error },
    #[error("HTTP error! status: {status}")]
    Status { status: u16 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceLocation {
    File(PathBuf),
    Url(String),
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceLocation::File(path) => write!(f, "{}", path.display()),
            SourceLocation::Url(url) => write!(f, "{}", url),
        }
    }
}

#[derive(Debug, Clone)]
pub struct FetchOptions {
    pub timeout: Duration,
    pub user_agent: String,
}

impl From<&FetchConfig> for FetchOptions {
    fn from(config: &FetchConfig) -> Self {
        Self {
            timeout: Duration::from_secs(config.timeout_secs),
            user_agent: config.user_agent.clone(),
        }
    }
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self::from(&FetchConfig::default())
    }
}

#[derive(Debug, Clone)]
pub struct SourceText {
    pub origin: String,
    pub content: String,
    pub is_markup: bool,
}

impl SourceText {
    pub fn new(origin: impl Into<String>, content: String) -> Self {
        let is_markup = looks_like_markup(&content);
        Self {
            origin: origin.into(),
            content,
            is_markup,
        }
    }

    pub fn source_set(&self) -> SourceSet {
        SourceSet::from_content(&self.content, self.is_markup)
    }
}

pub fn load(location: &SourceLocation, options: &FetchOptions) -> Result<SourceText, SourceError> {
    match location {
        SourceLocation::File(path) => read_file(path),
        SourceLocation::Url(url) => fetch_url(url, options),
    }
}

fn read_file(path: &Path) -> Result<SourceText, SourceError> {
    let content = std::fs::read_to_string(path).map_err(|e| SourceError::Read {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(SourceText::new(path.display().to_string(), content))
}

fn fetch_url(url: &str, options: &FetchOptions) -> Result<SourceText, SourceError> {
    let request_error = |e: reqwest::Error| SourceError::Request {
        url: url.to_string(),
        source: e,
    };

    let client = reqwest::blocking::Client::builder()
        .timeout(options.timeout)
        .user_agent(options.user_agent.as_str())
        .build()
        .map_err(request_error)?;

    let response = client.get(url).send().map_err(request_error)?;

    let status = response.status();
    if !status.is_success() {
        debug!(url, status = status.as_u16(), "fetch failed");
        return Err(SourceError::Status {
            status: status.as_u16(),
        });
    }

    let content = response.text().map_err(request_error)?;
    debug!(url, bytes = content.len(), "fetched source");
    Ok(SourceText::new(url, content))
}
