//! Chat slash-command / event webhook (spec.md §2 "Non-core HTTP
//! (collaborators)"): signature-verified, but otherwise a thin read path —
//! the only core-relevant requirement (spec.md §6) is that senders are
//! authenticated by HMAC signature, not that the command surface itself is
//! part of the core.

use crate::error::AppError;
use crate::web::run_blocking;
use crate::AppState;
use hmac::{Hmac, Mac};
use rocket::serde::json::Json;
use rocket::{post, State};
use serde::{Deserialize, Serialize};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

fn verify_signature(secret: &str, body: &str, signature_hex: &str) -> Result<(), AppError> {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).map_err(|_| AppError::BadSignature)?;
    mac.update(body.as_bytes());

    let expected = hex::decode(signature_hex).map_err(|_| AppError::BadSignature)?;
    mac.verify_slice(&expected).map_err(|_| AppError::BadSignature)
}

#[derive(Debug, Deserialize)]
pub struct ChatEvent {
    command: String,
    text: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ChatReply {
    text: String,
}

/// Single webhook entry point for chat slash-commands and event callbacks.
/// Currently understands the `/stats <name>` fuzzy lookup; anything else is
/// acknowledged with a no-op reply so the chat provider doesn't retry it as
/// a delivery failure.
#[post("/chat/events", format = "json", data = "<body>")]
pub async fn chat_event(
    state: &State<AppState>,
    signature: ChatSignature,
    body: String,
) -> Result<Json<ChatReply>, AppError> {
    verify_signature(&state.signing_secret, &body, &signature.0)?;

    let event: ChatEvent = serde_json::from_str(&body)
        .map_err(|_| AppError::InvalidInput("malformed chat event payload".to_string()))?;

    let reply = match event.command.as_str() {
        "/stats" => {
            let name = event
                .text
                .filter(|t| !t.trim().is_empty())
                .ok_or_else(|| AppError::InvalidInput("usage: /stats <name>".to_string()))?;

            run_blocking(state.pool.clone(), move |conn| {
                let lookup = club_store::get_player_stats_by_name(conn, &name, None)
                    .map_err(AppError::from)?;
                Ok(format_stats_reply(&lookup))
            })
            .await?
        }
        other => format!("unrecognized command: {other}"),
    };

    Ok(Json(ChatReply { text: reply }))
}

fn format_stats_reply(lookup: &club_store::PlayerStatsLookup) -> String {
    let mut lines = vec![format!("Stats for {}:", lookup.player.name)];

    if let Some(s) = &lookup.singles {
        lines.push(format!(
            "Singles: {}W-{}L ({} matches)",
            s.matches_won, s.matches_lost, s.matches_played
        ));
    }

    if let Some(d) = &lookup.doubles {
        lines.push(format!(
            "Doubles: {}W-{}L ({} matches)",
            d.matches_won, d.matches_lost, d.matches_played
        ));
    }

    if lookup.singles.is_none() && lookup.doubles.is_none() {
        lines.push("No recorded matches yet.".to_string());
    }

    lines.join("\n")
}

use rocket::http::Status;
use rocket::request::{FromRequest, Outcome};
use rocket::Request;

/// Extracts the provider's `X-Signature` header (hex-encoded HMAC-SHA256).
pub struct ChatSignature(String);

#[rocket::async_trait]
impl<'r> FromRequest<'r> for ChatSignature {
    type Error = ();

    async fn from_request(req: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        match req.headers().get_one("X-Signature") {
            Some(sig) => Outcome::Success(ChatSignature(sig.to_string())),
            None => Outcome::Error((Status::Unauthorized, ())),
        }
    }
}
