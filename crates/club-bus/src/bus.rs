//! `Publish(topic, payload)` (spec.md §2 C4): posts to the pub/sub
//! substrate's REST publish endpoint, following the same
//! build-request/execute/check-status chain club-provider's client uses
//! against the reservation provider.

use crate::error::BusError;
use base64::Engine;
use serde::Serialize;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct BusConfig {
    pub base_url: String,
    pub project_id: String,
    pub timeout: Duration,
}

impl Default for BusConfig {
    fn default() -> Self {
        Self {
            base_url: "https://pubsub.googleapis.com/v1".to_string(),
            project_id: String::new(),
            timeout: Duration::from_secs(10),
        }
    }
}

pub struct EventBus {
    client: reqwest::Client,
    config: BusConfig,
}

impl EventBus {
    pub fn new(config: BusConfig) -> Result<Self, BusError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(BusError::RequestBuildError)?;

        Ok(Self { client, config })
    }

    /// Publishes `payload` (serialized to JSON, then base64-encoded per the
    /// substrate's wire format) to `topic`.
    pub async fn publish<T: Serialize>(&self, topic: &str, payload: &T) -> Result<(), BusError> {
        let json = serde_json::to_vec(payload).map_err(BusError::SerializeError)?;
        let data = base64::engine::general_purpose::STANDARD.encode(json);

        let url = format!(
            "{}/projects/{}/topics/{}:publish",
            self.config.base_url, self.config.project_id, topic
        );

        self.client
            .post(&url)
            .json(&serde_json::json!({ "messages": [{ "data": data }] }))
            .send()
            .await
            .map_err(BusError::RequestExecuteError)?
            .error_for_status()
            .map_err(BusError::PublishStatusError)?;

        Ok(())
    }
}
