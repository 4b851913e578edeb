//! HTTP handlers.

pub mod chatbot;
pub mod health;
pub mod payment;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use serde_json::Value;
use tracing::debug;

/// Turn an optional JSON extraction into the payload the services expect.
///
/// A missing or unparsable body is passed on as `None` so the service can
/// apply its own checks in order (readiness before validation).
pub(crate) fn payload(body: Result<Json<Value>, JsonRejection>) -> Option<Value> {
    match body {
        Ok(Json(value)) => Some(value),
        Err(rejection) => {
            debug!(reason = %rejection.body_text(), "request body is not usable JSON");
            None
        }
    }
}
