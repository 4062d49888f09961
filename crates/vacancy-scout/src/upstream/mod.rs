mod headhunter;

pub use headhunter::HeadHunterClient;

use crate::vacancies::parser::lenient;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

/// One page of search results as returned by the upstream API.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct RawPage {
    #[serde(default, deserialize_with = "lenient")]
    pub items: Option<Vec<Value>>,
}

impl RawPage {
    pub fn with_items(items: Vec<Value>) -> Self {
        Self { items: Some(items) }
    }
}

/// Upstream collaborator that serves raw listing pages.
#[async_trait]
pub trait VacancySource: Send + Sync {
    async fn fetch_page(&self, query: &str, area: &str, page: u32)
        -> Result<RawPage, SourceError>;
}

/// Failures raised by the upstream API client.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("cannot reach {url}: {source}")]
    Connectivity {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("request for page {page} failed: {source}")]
    Request {
        page: u32,
        #[source]
        source: reqwest::Error,
    },
    #[error("invalid API base URL '{0}'")]
    InvalidBaseUrl(String),
    #[error("upstream unavailable: {0}")]
    Unavailable(String),
}
