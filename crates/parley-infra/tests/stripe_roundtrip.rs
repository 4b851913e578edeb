//! Stripe client against a local mock of `POST /v1/payment_intents`.

use std::collections::HashMap;

use axum::extract::Form;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use secrecy::SecretString;
use serde_json::json;

use parley_core::payment::processor::PaymentProcessor;
use parley_infra::stripe::StripeClient;
use parley_types::error::PaymentError;
use parley_types::payment::PaymentIntentRequest;

async fn create_intent(headers: HeaderMap, Form(form): Form<HashMap<String, String>>) -> Response {
    let key = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    if key != "Bearer sk_test_valid" {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": {
                "message": "Invalid API Key provided: sk_test_****",
                "type": "invalid_request_error"
            }})),
        )
            .into_response();
    }

    let amount: u64 = form
        .get("amount")
        .and_then(|a| a.parse().ok())
        .unwrap_or_default();
    if amount < 50 {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": {
                "message": "Amount must be at least ₹0.50 inr",
                "type": "invalid_request_error",
                "code": "amount_too_small",
                "param": "amount"
            }})),
        )
            .into_response();
    }

    Json(json!({
        "id": "pi_mock",
        "object": "payment_intent",
        "amount": amount,
        "currency": form.get("currency").cloned().unwrap_or_default(),
        "client_secret": "pi_mock_secret_123",
        "status": "requires_payment_method"
    }))
    .into_response()
}

async fn spawn_mock() -> String {
    let app = Router::new().route("/v1/payment_intents", post(create_intent));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

fn request(amount: u64) -> PaymentIntentRequest {
    PaymentIntentRequest {
        amount,
        currency: "inr".to_string(),
    }
}

#[tokio::test]
async fn test_create_intent() {
    let base = spawn_mock().await;
    let client = StripeClient::new(SecretString::from("sk_test_valid"), base).unwrap();

    let intent = client.create_intent(&request(49900)).await.unwrap();
    assert_eq!(intent.client_secret, "pi_mock_secret_123");
    assert_eq!(intent.amount, 49900);
    assert_eq!(intent.currency, "inr");
}

#[tokio::test]
async fn test_error_object_is_carried() {
    let base = spawn_mock().await;
    let client = StripeClient::new(SecretString::from("sk_test_valid"), base).unwrap();

    match client.create_intent(&request(10)).await.unwrap_err() {
        PaymentError::Upstream {
            kind, code, status, ..
        } => {
            assert_eq!(kind.as_deref(), Some("invalid_request_error"));
            assert_eq!(code.as_deref(), Some("amount_too_small"));
            assert_eq!(status, Some(400));
        }
        other => panic!("unexpected: {other:?}"),
    }
}

#[tokio::test]
async fn test_invalid_key() {
    let base = spawn_mock().await;
    let client = StripeClient::new(SecretString::from("sk_test_wrong"), base).unwrap();

    let err = client.create_intent(&request(49900)).await.unwrap_err();
    assert_eq!(err.to_string(), "Invalid API Key provided: sk_test_****");
}
