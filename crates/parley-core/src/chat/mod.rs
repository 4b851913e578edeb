//! Chatbot request flow.
//!
//! `validation` checks the inbound payload; `service` turns a valid message
//! into a single detect-intent call against the ready NLU client.

pub mod service;
pub mod validation;
