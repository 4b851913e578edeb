//! HTTP layer for Parley.
//!
//! Axum router with `POST {base}/chatbot`, `POST {base}/payment` and
//! `GET /health`, plus CORS and request tracing.

pub mod error;
pub mod handlers;
pub mod router;
