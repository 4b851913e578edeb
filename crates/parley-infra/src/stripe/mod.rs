//! Stripe payment processor.
//!
//! This module provides [`StripeClient`], which implements the
//! [`PaymentProcessor`](parley_core::payment::processor::PaymentProcessor)
//! trait over the Stripe REST API.

pub mod client;
pub mod types;

pub use client::StripeClient;
