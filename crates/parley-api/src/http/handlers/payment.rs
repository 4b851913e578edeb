//! POST {base}/payment - create a payment intent and return its client secret.

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use serde_json::Value;

use parley_types::payment::PaymentIntentCreated;

use crate::http::error::AppError;
use crate::state::AppState;

pub async fn create_payment_intent(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<PaymentIntentCreated>, AppError> {
    let payload = super::payload(body);
    let created = state.payments.create_intent(payload.as_ref()).await?;
    Ok(Json(created))
}
