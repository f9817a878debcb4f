//! HTTP ingestion for platform events.
//!
//! Interactions arrive as signed webhook POSTs; the gateway relay feeds
//! message-delete notifications through a token-authenticated side route.
//! Acknowledgments flow back through the REST callback endpoints, so command
//! posts are answered with 202 once handed to the dispatcher.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use bot_store::{BotStore, DeletedMessage};
use chrono::Utc;
use discord_client::{Interaction, InteractionResponse, INTERACTION_PING};
use ed25519_dalek::{Signature, Verifier, VerifyingKey};
use interactions::{DispatchError, Dispatcher};
use serde::Deserialize;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{debug, warn};

/// Shared server state.
#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Arc<Dispatcher>,
    pub store: Arc<BotStore>,
    pub verify_key: VerifyingKey,
    pub relay_token: Option<String>,
}

/// Parse the hex-encoded Ed25519 public key from the application settings.
pub fn parse_public_key(hex_key: &str) -> anyhow::Result<VerifyingKey> {
    let bytes = hex::decode(hex_key.trim())?;
    let bytes: [u8; 32] = bytes
        .as_slice()
        .try_into()
        .map_err(|_| anyhow::anyhow!("public key must be 32 bytes"))?;
    Ok(VerifyingKey::from_bytes(&bytes)?)
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/interactions", post(interactions))
        .route("/events", post(events))
        .route("/healthz", get(healthz))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn healthz() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

/// Signed interaction webhook. Pings are answered in-band; application
/// commands are converted and handed to the dispatcher.
async fn interactions(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let signature = headers
        .get("x-signature-ed25519")
        .and_then(|v| v.to_str().ok());
    let timestamp = headers
        .get("x-signature-timestamp")
        .and_then(|v| v.to_str().ok());

    let (Some(signature), Some(timestamp)) = (signature, timestamp) else {
        return (StatusCode::UNAUTHORIZED, "missing signature headers").into_response();
    };
    if !verify_signature(&state.verify_key, signature, timestamp, &body) {
        warn!("rejecting interaction with invalid signature");
        return (StatusCode::UNAUTHORIZED, "invalid request signature").into_response();
    }

    let interaction: Interaction = match serde_json::from_slice(&body) {
        Ok(interaction) => interaction,
        Err(e) => {
            warn!(error = %e, "undecodable interaction payload");
            return StatusCode::BAD_REQUEST.into_response();
        }
    };

    if interaction.kind == INTERACTION_PING {
        return Json(InteractionResponse::pong()).into_response();
    }

    match interaction.to_event() {
        Some(event) => match state.dispatcher.dispatch(event) {
            Ok(_) => StatusCode::ACCEPTED.into_response(),
            // Already logged and dropped by the dispatcher.
            Err(DispatchError::UnknownCommand(_)) => StatusCode::ACCEPTED.into_response(),
            Err(DispatchError::Closed) => StatusCode::SERVICE_UNAVAILABLE.into_response(),
        },
        None => {
            debug!(kind = interaction.kind, "ignoring non-command interaction");
            StatusCode::ACCEPTED.into_response()
        }
    }
}

/// Gateway relay events. Only message deletions are consumed; they feed the
/// snipe history.
#[derive(Debug, Deserialize)]
struct RelayEvent {
    #[serde(rename = "type")]
    kind: String,
    channel_id: String,
    author_id: String,
    #[serde(default)]
    author_name: String,
    #[serde(default)]
    content: String,
}

async fn events(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(event): Json<RelayEvent>,
) -> Response {
    let Some(expected) = state.relay_token.as_deref() else {
        return (StatusCode::FORBIDDEN, "relay ingestion disabled").into_response();
    };
    let presented = headers.get("x-relay-token").and_then(|v| v.to_str().ok());
    if presented != Some(expected) {
        return StatusCode::UNAUTHORIZED.into_response();
    }

    if event.kind != "MESSAGE_DELETE" {
        debug!(kind = %event.kind, "ignoring relay event");
        return StatusCode::ACCEPTED.into_response();
    }

    let (Ok(channel_id), Ok(author_id)) =
        (event.channel_id.parse::<u64>(), event.author_id.parse::<u64>())
    else {
        return StatusCode::BAD_REQUEST.into_response();
    };

    state
        .store
        .record_deleted(DeletedMessage {
            channel_id,
            author_id,
            author_name: event.author_name,
            content: event.content,
            deleted_at: Utc::now(),
        })
        .await;

    StatusCode::ACCEPTED.into_response()
}

fn verify_signature(
    key: &VerifyingKey,
    signature_hex: &str,
    timestamp: &str,
    body: &[u8],
) -> bool {
    let Ok(bytes) = hex::decode(signature_hex) else {
        return false;
    };
    let Ok(signature) = Signature::from_slice(&bytes) else {
        return false;
    };

    let mut message = Vec::with_capacity(timestamp.len() + body.len());
    message.extend_from_slice(timestamp.as_bytes());
    message.extend_from_slice(body);
    key.verify(&message, &signature).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ed25519_dalek::{Signer, SigningKey};

    fn keypair() -> (SigningKey, VerifyingKey) {
        let signing = SigningKey::from_bytes(&[7u8; 32]);
        let verifying = signing.verifying_key();
        (signing, verifying)
    }

    #[test]
    fn test_valid_signature_accepted() {
        let (signing, verifying) = keypair();
        let body = br#"{"type":1}"#;
        let timestamp = "1700000000";

        let mut message = timestamp.as_bytes().to_vec();
        message.extend_from_slice(body);
        let signature = hex::encode(signing.sign(&message).to_bytes());

        assert!(verify_signature(&verifying, &signature, timestamp, body));
    }

    #[test]
    fn test_tampered_body_rejected() {
        let (signing, verifying) = keypair();
        let timestamp = "1700000000";

        let mut message = timestamp.as_bytes().to_vec();
        message.extend_from_slice(br#"{"type":1}"#);
        let signature = hex::encode(signing.sign(&message).to_bytes());

        assert!(!verify_signature(
            &verifying,
            &signature,
            timestamp,
            br#"{"type":2}"#
        ));
    }

    #[test]
    fn test_garbage_signature_rejected() {
        let (_, verifying) = keypair();
        assert!(!verify_signature(&verifying, "not-hex", "0", b"{}"));
        assert!(!verify_signature(&verifying, "abcd", "0", b"{}"));
    }

    #[test]
    fn test_parse_public_key_round_trip() {
        let (_, verifying) = keypair();
        let hex_key = hex::encode(verifying.as_bytes());

        let parsed = parse_public_key(&hex_key).unwrap();
        assert_eq!(parsed.as_bytes(), verifying.as_bytes());
    }

    #[test]
    fn test_parse_public_key_rejects_bad_input() {
        assert!(parse_public_key("zz").is_err());
        assert!(parse_public_key("abcd").is_err());
    }

    #[test]
    fn test_relay_event_parse() {
        let event: RelayEvent = serde_json::from_str(
            r#"{
                "type": "MESSAGE_DELETE",
                "channel_id": "123",
                "author_id": "456",
                "author_name": "alice",
                "content": "oops"
            }"#,
        )
        .unwrap();

        assert_eq!(event.kind, "MESSAGE_DELETE");
        assert_eq!(event.channel_id, "123");
        assert_eq!(event.content, "oops");
    }
}
