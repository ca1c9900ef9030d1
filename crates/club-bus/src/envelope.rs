//! Pub/sub push envelope (spec.md §6): `{"subscription": "<id>", "message":
//! {"data": "<base64>"}}`, decoded bytes are a JSON-encoded match entity.

use crate::error::BusError;
use base64::Engine;
use club_provider::Match;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct PushEnvelope {
    #[allow(dead_code)]
    subscription: String,
    message: PushMessage,
}

#[derive(Debug, Deserialize)]
struct PushMessage {
    data: String,
}

/// Decodes a raw HTTP push request body into the match it carries.
pub fn decode_match_envelope(body: &str) -> Result<Match, BusError> {
    let envelope: PushEnvelope =
        serde_json::from_str(body).map_err(BusError::BadEnvelopeWrapper)?;

    let decoded = base64::engine::general_purpose::STANDARD
        .decode(envelope.message.data)
        .map_err(BusError::BadEnvelopeBase64)?;

    serde_json::from_slice(&decoded).map_err(BusError::BadEnvelopePayload)
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::Engine;

    #[test]
    fn decodes_a_wrapped_match() {
        let payload = serde_json::json!({
            "match_id": "m1",
            "owner_id": "p1",
            "owner_name": "Alice",
            "start": 1,
            "end": 2,
            "created_at": 0,
            "status": "CONFIRMED",
            "game_status": "PLAYED",
            "results_status": "CONFIRMED",
            "resource_name": "Court 1",
            "access_code": null,
            "price": null,
            "tenant_id": "t",
            "tenant_name": "Club",
            "match_type": "Singles",
            "teams": [],
            "results": []
        });
        let data = base64::engine::general_purpose::STANDARD.encode(payload.to_string());
        let body = serde_json::json!({
            "subscription": "projects/x/subscriptions/y",
            "message": { "data": data },
        })
        .to_string();

        let m = decode_match_envelope(&body).unwrap();
        assert_eq!(m.match_id, "m1");
    }

    #[test]
    fn rejects_bad_base64() {
        let body = serde_json::json!({
            "subscription": "x",
            "message": { "data": "not-valid-base64!!" },
        })
        .to_string();

        assert!(matches!(
            decode_match_envelope(&body),
            Err(BusError::BadEnvelopeBase64(_))
        ));
    }

    #[test]
    fn rejects_malformed_wrapper() {
        assert!(matches!(
            decode_match_envelope("not json"),
            Err(BusError::BadEnvelopeWrapper(_))
        ));
    }
}
