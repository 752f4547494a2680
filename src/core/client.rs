use crate::domain::model::PaginatedResponse;
use crate::utils::error::{CitiesError, Result};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::Client;
use url::Url;

/// Thin wrapper over `reqwest` for the paginated cities endpoint.
#[derive(Debug, Clone)]
pub struct CitiesClient {
    client: Client,
    endpoint: Url,
}

impl CitiesClient {
    pub fn new(endpoint: &str) -> Result<Self> {
        let endpoint = Url::parse(endpoint).map_err(|e| CitiesError::InvalidConfigValueError {
            field: "api_endpoint".to_string(),
            value: endpoint.to_string(),
            reason: format!("Invalid URL format: {}", e),
        })?;

        Ok(Self {
            client: Client::new(),
            endpoint,
        })
    }

    /// Fetches one page. Non-2xx answers and bodies without a `content`
    /// array of named entries are errors.
    pub async fn fetch_page(&self, page: u32, size: u32) -> Result<PaginatedResponse> {
        tracing::debug!(
            "Making API request to: {} (page={}, size={})",
            self.endpoint,
            page,
            size
        );

        let response = self
            .client
            .get(self.endpoint.clone())
            .query(&[("page", page), ("size", size)])
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        tracing::debug!("API response status: {}", response.status());
        let response = response.error_for_status()?;

        let body = response.bytes().await?;
        let page: PaginatedResponse = serde_json::from_slice(&body)?;
        Ok(page)
    }
}
