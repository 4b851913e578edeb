//! Business logic and backend trait definitions for Parley.
//!
//! This crate defines the "ports" (NLU backend, payment processor, client
//! factory) that the infrastructure layer implements. It depends only on
//! `parley-types` and `parley-observe` -- never on `parley-infra` or any
//! HTTP client crate.

pub mod chat;
pub mod credentials;
pub mod nlu;
pub mod payment;
pub mod retry;
