//! Dialogflow ES NLU backend.
//!
//! This module provides [`DialogflowClient`], which implements the
//! [`NluBackend`](parley_core::nlu::backend::NluBackend) trait over the
//! Dialogflow v2 REST API, and [`DialogflowClientFactory`], which validates
//! service-account configuration and builds the client at startup.

pub mod auth;
pub mod client;
pub mod factory;
pub mod types;

pub use client::DialogflowClient;
pub use factory::{DialogflowClientFactory, DialogflowSettings};
