//! Shared domain types for Parley.
//!
//! This crate contains the domain types used across the Parley backend:
//! service credentials, NLU client status, chat and payment payloads, and
//! their associated error types.
//!
//! Zero infrastructure dependencies -- only serde, uuid, chrono, thiserror, secrecy.

pub mod chat;
pub mod client;
pub mod credentials;
pub mod error;
pub mod payment;
pub mod time;
