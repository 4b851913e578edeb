//! Axum router configuration with middleware.
//!
//! Chatbot and payment routes are nested under the configured base path;
//! `/health` stays at the root. Middleware: CORS, tracing.

use axum::Router;
use axum::http::{HeaderValue, Method, header};
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::state::AppState;

/// Router-level settings taken from the CLI.
#[derive(Debug, Clone)]
pub struct RouterConfig {
    pub base_path: String,
    /// `None` allows any origin, without credentials.
    pub cors_origin: Option<HeaderValue>,
}

impl RouterConfig {
    /// Parse a CORS origin string; `*` means any origin.
    pub fn new(base_path: &str, cors_origin: &str) -> anyhow::Result<Self> {
        let cors_origin = match cors_origin.trim() {
            "*" => None,
            origin => Some(
                HeaderValue::from_str(origin)
                    .map_err(|e| anyhow::anyhow!("invalid CORS origin '{origin}': {e}"))?,
            ),
        };
        Ok(Self {
            base_path: normalize_base_path(base_path),
            cors_origin,
        })
    }
}

/// `"api2/"` -> `"/api2"`; `"/"` and `""` -> `""` (routes at the root).
pub fn normalize_base_path(base_path: &str) -> String {
    let trimmed = base_path.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{trimmed}")
    }
}

/// Build the complete router with all routes and middleware.
pub fn build_router(state: AppState, config: &RouterConfig) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);
    let cors = match &config.cors_origin {
        // Credentialed requests need a concrete origin; `Any` with credentials is invalid.
        Some(origin) => cors.allow_origin(origin.clone()).allow_credentials(true),
        None => cors.allow_origin(Any),
    };

    let api_routes = Router::new()
        .route("/chatbot", post(handlers::chatbot::chatbot))
        .route("/payment", post(handlers::payment::create_payment_intent));

    let router = if config.base_path.is_empty() {
        Router::new().merge(api_routes)
    } else {
        Router::new().nest(&config.base_path, api_routes)
    };

    router
        .route("/health", get(handlers::health::health_check))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use parley_core::chat::service::ChatService;
    use parley_core::nlu::backend::NluBackend;
    use parley_core::nlu::box_backend::BoxNluBackend;
    use parley_core::nlu::handle::ClientHandle;
    use parley_core::nlu::state::NluClientSlot;
    use parley_core::payment::processor::{BoxPaymentProcessor, PaymentProcessor};
    use parley_core::payment::service::PaymentService;
    use parley_types::chat::{DetectIntentRequest, DetectIntentResult};
    use parley_types::error::{NluError, PaymentError};
    use parley_types::payment::{PaymentIntent, PaymentIntentRequest};

    #[derive(Clone)]
    struct ScriptedBackend {
        calls: Arc<AtomicU32>,
        sessions: Arc<std::sync::Mutex<Vec<String>>>,
        fail: bool,
    }

    impl ScriptedBackend {
        fn new(fail: bool) -> Self {
            Self {
                calls: Arc::new(AtomicU32::new(0)),
                sessions: Arc::new(std::sync::Mutex::new(Vec::new())),
                fail,
            }
        }
    }

    impl NluBackend for ScriptedBackend {
        fn name(&self) -> &str {
            "scripted"
        }

        async fn detect_intent(
            &self,
            request: &DetectIntentRequest,
        ) -> Result<DetectIntentResult, NluError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.sessions
                .lock()
                .unwrap()
                .push(request.session_path.clone());
            if self.fail {
                return Err(NluError::Upstream {
                    message: "Session not found".to_string(),
                });
            }
            Ok(DetectIntentResult {
                fulfillment_text: Some(format!("Echo: {}", request.text)),
                ..Default::default()
            })
        }
    }

    struct FixedProcessor;

    impl PaymentProcessor for FixedProcessor {
        fn name(&self) -> &str {
            "fixed"
        }

        async fn create_intent(
            &self,
            request: &PaymentIntentRequest,
        ) -> Result<PaymentIntent, PaymentError> {
            Ok(PaymentIntent {
                id: "pi_1".to_string(),
                client_secret: "pi_1_secret".to_string(),
                amount: request.amount,
                currency: request.currency.clone(),
                status: "requires_payment_method".to_string(),
            })
        }
    }

    fn config() -> RouterConfig {
        RouterConfig::new("/api2", "http://localhost:5173").unwrap()
    }

    fn app_with(slot: NluClientSlot, payments: PaymentService) -> Router {
        let state = AppState::new(ChatService::new(Arc::new(slot)), payments);
        build_router(state, &config())
    }

    fn ready_app(backend: ScriptedBackend) -> Router {
        let handle = ClientHandle::new(BoxNluBackend::new(backend), "demo-project");
        app_with(
            NluClientSlot::ready(handle),
            PaymentService::new(Some(BoxPaymentProcessor::new(FixedProcessor)), "inr"),
        )
    }

    fn post_json(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    #[test]
    fn test_normalize_base_path() {
        assert_eq!(normalize_base_path("/api2"), "/api2");
        assert_eq!(normalize_base_path("api2/"), "/api2");
        assert_eq!(normalize_base_path("/"), "");
        assert_eq!(normalize_base_path(""), "");
    }

    #[test]
    fn test_invalid_cors_origin() {
        assert!(RouterConfig::new("/api2", "bad\norigin").is_err());
        assert!(RouterConfig::new("/api2", "*").unwrap().cors_origin.is_none());
    }

    #[tokio::test]
    async fn test_chatbot_reply() {
        let app = ready_app(ScriptedBackend::new(false));
        let (status, body) = send(app, post_json("/api2/chatbot", r#"{"message":"hello"}"#)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["reply"], "Echo: hello");
        assert!(body["timestamp"].is_string());
    }

    #[tokio::test]
    async fn test_chatbot_distinct_sessions() {
        let backend = ScriptedBackend::new(false);
        let app = ready_app(backend.clone());

        for _ in 0..2 {
            let (status, _) = send(
                app.clone(),
                post_json("/api2/chatbot", r#"{"message":"hello"}"#),
            )
            .await;
            assert_eq!(status, StatusCode::OK);
        }

        let sessions = backend.sessions.lock().unwrap();
        assert_eq!(sessions.len(), 2);
        assert_ne!(sessions[0], sessions[1]);
    }

    #[tokio::test]
    async fn test_chatbot_validation() {
        let app = ready_app(ScriptedBackend::new(false));

        let (status, body) = send(app.clone(), post_json("/api2/chatbot", "{}")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "'message' is required." }));

        let (status, body) =
            send(app.clone(), post_json("/api2/chatbot", r#"{"message":123}"#)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "'message' must be a string." }));

        let (status, body) = send(app, post_json("/api2/chatbot", "not json")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "'message' is required." }));
    }

    #[tokio::test]
    async fn test_chatbot_uninitialized() {
        let app = app_with(NluClientSlot::new(), PaymentService::new(None, "inr"));

        let (status, body) = send(app, post_json("/api2/chatbot", r#"{"message":"hello"}"#)).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Dialogflow client not initialized");
        assert!(body["timestamp"].is_string());
    }

    #[tokio::test]
    async fn test_chatbot_upstream_failure() {
        let backend = ScriptedBackend::new(true);
        let app = ready_app(backend.clone());

        let (status, body) = send(app, post_json("/api2/chatbot", r#"{"message":"hello"}"#)).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Failed to process request");
        assert_eq!(body["details"], "Session not found");
        assert_eq!(backend.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_payment_routes() {
        let app = ready_app(ScriptedBackend::new(false));

        let (status, body) =
            send(app.clone(), post_json("/api2/payment", r#"{"amount":49900}"#)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "clientSecret": "pi_1_secret" }));

        let (status, body) = send(app, post_json("/api2/payment", r#"{"amount":-1}"#)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["message"], "'amount' must be a positive integer.");
    }

    #[tokio::test]
    async fn test_payment_not_configured() {
        let app = app_with(NluClientSlot::new(), PaymentService::new(None, "inr"));

        let (status, body) = send(app, post_json("/api2/payment", r#"{"amount":100}"#)).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body,
            json!({ "error": { "message": "Payment processor not configured" } })
        );
    }

    #[tokio::test]
    async fn test_health() {
        let app = app_with(NluClientSlot::new(), PaymentService::new(None, "inr"));
        let request = Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap();

        let (status, body) = send(app, request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["chatbot"], "uninitialized");
        assert_eq!(body["payments"], false);
    }

    #[tokio::test]
    async fn test_routes_outside_base_path_are_not_found() {
        let app = ready_app(ScriptedBackend::new(false));
        let (status, _) = send(app, post_json("/chatbot", r#"{"message":"hello"}"#)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_cors_preflight() {
        let app = ready_app(ScriptedBackend::new(false));
        let request = Request::builder()
            .method("OPTIONS")
            .uri("/api2/chatbot")
            .header("origin", "http://localhost:5173")
            .header("access-control-request-method", "POST")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(
            response.headers().get("access-control-allow-origin").unwrap(),
            "http://localhost:5173"
        );
        assert_eq!(
            response
                .headers()
                .get("access-control-allow-credentials")
                .unwrap(),
            "true"
        );
    }

    #[tokio::test]
    async fn test_wildcard_origin_omits_credentials() {
        let state = AppState::new(
            ChatService::new(Arc::new(NluClientSlot::new())),
            PaymentService::new(None, "inr"),
        );
        let app = build_router(state, &RouterConfig::new("/api2", "*").unwrap());
        let request = Request::builder()
            .method("OPTIONS")
            .uri("/api2/payment")
            .header("origin", "https://shop.example.com")
            .header("access-control-request-method", "POST")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(
            response.headers().get("access-control-allow-origin").unwrap(),
            "*"
        );
        assert!(
            response
                .headers()
                .get("access-control-allow-credentials")
                .is_none()
        );
    }
}
