use crate::error::NotifyError;
use crate::render::{render_booking_announcement, render_result_announcement, RenderedMessage};
use chrono_tz::Tz;
use club_provider::Match;
use log::{info, warn};
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct NotifyConfig {
    pub base_url: String,
    pub channel_id: String,
    pub bot_token: String,
    pub timezone: Tz,
    pub dry_run: bool,
}

impl Default for NotifyConfig {
    fn default() -> Self {
        Self {
            base_url: "https://slack.com/api".to_string(),
            channel_id: String::new(),
            bot_token: String::new(),
            timezone: chrono_tz::Europe::Copenhagen,
            dry_run: false,
        }
    }
}

/// `(channel_id, message_ts)` per spec.md §4.3 — returned for downstream
/// reference but never persisted by the core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentMessage {
    pub channel_id: String,
    pub message_ts: String,
}

#[derive(Debug, Deserialize)]
struct PostMessageResponse {
    ok: bool,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    channel: Option<String>,
    #[serde(default)]
    ts: Option<String>,
}

pub struct Notifier {
    client: reqwest::Client,
    config: NotifyConfig,
}

impl Notifier {
    pub fn new(config: NotifyConfig) -> Result<Self, NotifyError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(NotifyError::RequestBuildError)?;

        Ok(Self { client, config })
    }

    pub async fn send_booking_announcement(
        &self,
        m: &Match,
        ball_bringer_name: Option<&str>,
    ) -> Result<SentMessage, NotifyError> {
        let rendered = render_booking_announcement(m, ball_bringer_name, self.config.timezone);
        self.send(rendered, None).await
    }

    pub async fn send_result_announcement(
        &self,
        m: &Match,
        ball_bringer_name: Option<&str>,
    ) -> Result<SentMessage, NotifyError> {
        let rendered = render_result_announcement(m, ball_bringer_name, self.config.timezone);
        self.send(rendered, None).await
    }

    /// Used by the matchmaking collaborator; the core never calls this.
    pub async fn send_direct_message(
        &self,
        user_id: &str,
        text: &str,
    ) -> Result<SentMessage, NotifyError> {
        let rendered = RenderedMessage {
            text: text.to_string(),
            blocks: serde_json::json!({}),
        };
        self.send(rendered, Some(user_id.to_string())).await
    }

    /// Used by the matchmaking collaborator; the core never calls this.
    pub async fn send_threaded_reply(
        &self,
        thread_ts: &str,
        text: &str,
    ) -> Result<SentMessage, NotifyError> {
        if self.config.dry_run {
            info!("dry-run: threaded reply to {thread_ts}: {text}");
            return Ok(SentMessage {
                channel_id: self.config.channel_id.clone(),
                message_ts: format!("dry-run-reply-{thread_ts}"),
            });
        }

        let response = self
            .client
            .post(format!("{}/chat.postMessage", self.config.base_url))
            .bearer_auth(&self.config.bot_token)
            .json(&serde_json::json!({
                "channel": self.config.channel_id,
                "text": text,
                "thread_ts": thread_ts,
            }))
            .send()
            .await
            .map_err(NotifyError::RequestExecuteError)?
            .error_for_status()
            .map_err(NotifyError::ResponseStatusError)?
            .json::<PostMessageResponse>()
            .await
            .map_err(NotifyError::DeserializeError)?;

        if !response.ok {
            return Err(NotifyError::ProviderRejected(
                response.error.unwrap_or_default(),
            ));
        }

        Ok(SentMessage {
            channel_id: response.channel.unwrap_or_default(),
            message_ts: response.ts.unwrap_or_default(),
        })
    }

    async fn send(
        &self,
        rendered: RenderedMessage,
        target_channel: Option<String>,
    ) -> Result<SentMessage, NotifyError> {
        let channel = target_channel.unwrap_or_else(|| self.config.channel_id.clone());

        if self.config.dry_run {
            info!("dry-run notification to {channel}: {}", rendered.text);
            return Ok(SentMessage {
                channel_id: channel,
                message_ts: "dry-run-0".to_string(),
            });
        }

        let mut body = rendered.blocks;
        body["channel"] = serde_json::Value::String(channel);
        body["text"] = serde_json::Value::String(rendered.text);

        let response = self
            .client
            .post(format!("{}/chat.postMessage", self.config.base_url))
            .bearer_auth(&self.config.bot_token)
            .json(&body)
            .send()
            .await
            .map_err(NotifyError::RequestExecuteError)?
            .error_for_status()
            .map_err(NotifyError::ResponseStatusError)?
            .json::<PostMessageResponse>()
            .await
            .map_err(NotifyError::DeserializeError)?;

        if !response.ok {
            warn!("chat provider rejected a notification: {:?}", response.error);
            return Err(NotifyError::ProviderRejected(
                response.error.unwrap_or_default(),
            ));
        }

        Ok(SentMessage {
            channel_id: response.channel.unwrap_or_default(),
            message_ts: response.ts.unwrap_or_default(),
        })
    }
}
