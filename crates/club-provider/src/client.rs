use crate::dto::{RawMatch, RawMatchList};
use crate::error::ProviderError;
use crate::normalize::{normalize_match, normalize_match_summary};
use crate::types::{Match, MatchSummary};
use chrono::{DateTime, Utc};
use log::debug;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub base_url: String,
    pub tenant_id: String,
    pub timeout: Duration,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.reservation-provider.example".to_string(),
            tenant_id: String::new(),
            timeout: Duration::from_secs(10),
        }
    }
}

/// Read-only HTTP client to the reservation provider (spec.md §4.1, C1).
pub struct ProviderClient {
    client: reqwest::Client,
    config: ProviderConfig,
}

impl ProviderClient {
    pub fn new(config: ProviderConfig) -> Result<Self, ProviderError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(ProviderError::RequestBuildError)?;

        Ok(Self { client, config })
    }

    /// `list_matches(tenant_id, from_start_date) -> [MatchSummary]`.
    pub async fn list_matches(
        &self,
        from_start_date: Option<DateTime<Utc>>,
    ) -> Result<Vec<MatchSummary>, ProviderError> {
        let url = format!(
            "{}/tenants/{}/matches",
            self.config.base_url, self.config.tenant_id
        );

        debug!(
            "Listing matches for tenant {} from {:?}",
            self.config.tenant_id, from_start_date
        );

        let mut request = self.client.get(&url);
        if let Some(from) = from_start_date {
            request = request.query(&[("from_start_date", from.to_rfc3339())]);
        }

        let response = request
            .send()
            .await
            .map_err(ProviderError::RequestExecuteError)?
            .error_for_status()
            .map_err(ProviderError::ProviderStatusError)?;

        let body = response
            .text()
            .await
            .map_err(ProviderError::RequestBodyError)?;

        let list: RawMatchList =
            serde_json::from_str(&body).map_err(ProviderError::DeserializeError)?;

        Ok(list
            .matches
            .into_iter()
            .map(normalize_match_summary)
            .collect())
    }

    /// `get_match(match_id) -> Match`.
    pub async fn get_match(&self, match_id: &str) -> Result<Match, ProviderError> {
        let url = format!("{}/matches/{}", self.config.base_url, match_id);

        debug!("Fetching full match detail for {match_id}");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(ProviderError::RequestExecuteError)?
            .error_for_status()
            .map_err(ProviderError::ProviderStatusError)?;

        let body = response
            .text()
            .await
            .map_err(ProviderError::RequestBodyError)?;

        let raw: RawMatch = serde_json::from_str(&body).map_err(ProviderError::DeserializeError)?;

        normalize_match(raw)
    }
}
