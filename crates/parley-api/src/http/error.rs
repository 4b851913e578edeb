//! Application error type mapping domain errors to HTTP responses.
//!
//! The chatbot and payment routes keep the body shapes their frontend
//! already consumes, so the two families are rendered differently:
//!
//! - chatbot: `{"error": "<message>", "details"?, "timestamp"?}`
//! - payment: `{"error": {"message", "type"?, "code"?}}`

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::{Map, Value, json};

use parley_types::error::{ChatError, PaymentError};
use parley_types::time::now_iso8601;

/// Summary message for backend failures on the chatbot route.
pub const CHAT_FAILURE_MESSAGE: &str = "Failed to process request";

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    Chat(ChatError),
    Payment(PaymentError),
}

impl From<ChatError> for AppError {
    fn from(e: ChatError) -> Self {
        AppError::Chat(e)
    }
}

impl From<PaymentError> for AppError {
    fn from(e: PaymentError) -> Self {
        AppError::Payment(e)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::Chat(e) => chat_error_body(&e),
            AppError::Payment(e) => payment_error_body(e),
        };
        (status, Json(body)).into_response()
    }
}

fn chat_error_body(error: &ChatError) -> (StatusCode, Value) {
    match error {
        ChatError::ClientUninitialized => (
            StatusCode::INTERNAL_SERVER_ERROR,
            json!({ "error": error.to_string(), "timestamp": now_iso8601() }),
        ),
        ChatError::Validation(e) => (StatusCode::BAD_REQUEST, json!({ "error": e.to_string() })),
        ChatError::Upstream(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            json!({
                "error": CHAT_FAILURE_MESSAGE,
                "details": e.to_string(),
                "timestamp": now_iso8601(),
            }),
        ),
    }
}

fn payment_error_body(error: PaymentError) -> (StatusCode, Value) {
    let status = match error {
        PaymentError::InvalidAmount => StatusCode::BAD_REQUEST,
        PaymentError::NotConfigured | PaymentError::Upstream { .. } => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    let mut object = Map::new();
    object.insert("message".to_string(), Value::String(error.to_string()));
    if let PaymentError::Upstream { kind, code, .. } = error {
        if let Some(kind) = kind {
            object.insert("type".to_string(), Value::String(kind));
        }
        if let Some(code) = code {
            object.insert("code".to_string(), Value::String(code));
        }
    }

    (status, json!({ "error": object }))
}
