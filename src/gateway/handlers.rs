use crate::compliance::MAX_MESSAGE_CHARS;
use crate::error::RelayError;
use crate::relay::{Relay, SendRequest};
use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode, header},
    response::{Html, IntoResponse, Json},
};
use serde::de::DeserializeOwned;

use super::{AppState, SendMessageBody, ValidateBody};

const INDEX_HTML: &str = include_str!("../../assets/index.html");

type JsonResponse = (StatusCode, Json<serde_json::Value>);

fn error_response(status: StatusCode, error: impl Into<String>) -> JsonResponse {
    (status, Json(serde_json::json!({"error": error.into()})))
}

fn parse_body<T: DeserializeOwned>(body: &Bytes) -> Result<T, JsonResponse> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(error_response(StatusCode::BAD_REQUEST, "No body provided"));
    }
    serde_json::from_slice(body)
        .map_err(|e| error_response(StatusCode::BAD_REQUEST, format!("Invalid JSON: {e}")))
}

fn header_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

/// `client-ip`, then the first `x-forwarded-for` hop, else `unknown`.
pub(super) fn client_ip(headers: &HeaderMap) -> String {
    header_value(headers, "client-ip")
        .or_else(|| {
            header_value(headers, "x-forwarded-for")
                .and_then(|v| v.split(',').next())
                .map(str::trim)
        })
        .unwrap_or("unknown")
        .to_string()
}

fn user_agent(headers: &HeaderMap) -> String {
    header_value(headers, header::USER_AGENT.as_str())
        .unwrap_or("unknown")
        .to_string()
}

pub(super) async fn handle_index() -> impl IntoResponse {
    Html(INDEX_HTML)
}

pub(super) async fn handle_health(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "provider": state.relay.provider_name(),
    }))
}

pub(super) async fn handle_validate(body: Bytes) -> impl IntoResponse {
    let ValidateBody { message } = match parse_body(&body) {
        Ok(b) => b,
        Err(response) => return response,
    };

    let check = Relay::check(&message);
    let reason = check.result.rejection();
    let body = serde_json::json!({
        "valid": check.result.is_compliant(),
        "reason": reason.map(|r| r.code()),
        "error": reason.map(|r| r.to_string()),
        "length": check.length,
        "maxLength": MAX_MESSAGE_CHARS,
        "segmentCount": check.segment_count,
        "segments": check.segments,
    });
    (StatusCode::OK, Json(body))
}

pub(super) async fn handle_send_message(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> impl IntoResponse {
    let payload: SendMessageBody = match parse_body(&body) {
        Ok(b) => b,
        Err(response) => return response,
    };

    let request = SendRequest {
        phone_number: payload.phone_number.unwrap_or_default(),
        message: payload.message.unwrap_or_default(),
        ip_address: client_ip(&headers),
        user_agent: user_agent(&headers),
    };

    match state.relay.send(request).await {
        Ok(outcome) => {
            let body = serde_json::json!({
                "success": true,
                "message": "Message queued successfully",
                "messageId": outcome.message_id,
                "recordId": outcome.record_id,
                "segments": outcome.segments,
            });
            (StatusCode::OK, Json(body))
        }
        Err(RelayError::MissingFields) => {
            error_response(StatusCode::BAD_REQUEST, RelayError::MissingFields.to_string())
        }
        Err(RelayError::Rejected(reason)) => {
            let body = serde_json::json!({
                "error": reason.to_string(),
                "reason": reason.code(),
            });
            (StatusCode::BAD_REQUEST, Json(body))
        }
        Err(RelayError::Provider(e)) => {
            let body = serde_json::json!({
                "error": "Failed to send message",
                "details": e.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, Json(body))
        }
    }
}
