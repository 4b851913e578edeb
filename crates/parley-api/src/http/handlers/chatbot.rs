//! POST {base}/chatbot - one message in, one NLU reply out.

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use serde_json::Value;

use parley_types::chat::ChatReply;

use crate::http::error::AppError;
use crate::state::AppState;

pub async fn chatbot(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<ChatReply>, AppError> {
    let payload = super::payload(body);
    let reply = state.chat.handle_payload(payload.as_ref()).await?;
    Ok(Json(reply))
}
