use super::{RawPage, SourceError, VacancySource};
use crate::config::ApiConfig;
use async_trait::async_trait;
use reqwest::header::USER_AGENT;
use reqwest::{Client, Request, Url};
use std::time::Duration;
use tracing::{debug, info};

/// Client for the public hh.ru vacancy search API.
#[derive(Debug, Clone)]
pub struct HeadHunterClient {
    http: Client,
    base_url: String,
    per_page: u32,
    user_agent: String,
}

impl HeadHunterClient {
    pub fn new(config: &ApiConfig) -> Result<Self, SourceError> {
        let base_url = config.base_url.trim_end_matches('/').to_string();
        Url::parse(&base_url)
            .map_err(|_| SourceError::InvalidBaseUrl(config.base_url.clone()))?;

        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|err| SourceError::Unavailable(err.to_string()))?;

        Ok(Self {
            http,
            base_url,
            per_page: config.per_page,
            user_agent: default_user_agent(),
        })
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// Verifies that the API root answers with a success status.
    pub async fn check_connection(&self) -> Result<(), SourceError> {
        let connectivity = |source: reqwest::Error| SourceError::Connectivity {
            url: self.base_url.clone(),
            source,
        };

        self.http
            .get(&self.base_url)
            .header(USER_AGENT, &self.user_agent)
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(connectivity)?;

        info!(url = %self.base_url, "upstream API reachable");
        Ok(())
    }

    pub fn page_request(
        &self,
        query: &str,
        area: &str,
        page: u32,
    ) -> Result<Request, SourceError> {
        self.http
            .get(format!("{}/vacancies", self.base_url))
            .header(USER_AGENT, &self.user_agent)
            .query(&[
                ("text", query.to_string()),
                ("area", area.to_string()),
                ("page", page.to_string()),
                ("per_page", self.per_page.to_string()),
            ])
            .build()
            .map_err(|source| SourceError::Request { page, source })
    }
}

#[async_trait]
impl VacancySource for HeadHunterClient {
    async fn fetch_page(
        &self,
        query: &str,
        area: &str,
        page: u32,
    ) -> Result<RawPage, SourceError> {
        let request = self.page_request(query, area, page)?;
        debug!(url = %request.url(), "requesting vacancy page");

        let response = self
            .http
            .execute(request)
            .await
            .and_then(|response| response.error_for_status())
            .map_err(|source| SourceError::Request { page, source })?;

        response
            .json::<RawPage>()
            .await
            .map_err(|source| SourceError::Request { page, source })
    }
}

fn default_user_agent() -> String {
    format!(
        "{}/{} ({}; {}) reqwest",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        std::env::consts::OS,
        std::env::consts::ARCH
    )
}
