//! Payment intent creation.
//!
//! - `PaymentProcessor`: RPITIT trait for concrete processors (Stripe)
//! - `BoxPaymentProcessor`: object-safe wrapper for dynamic dispatch
//! - `PaymentService`: amount validation and processor call

pub mod processor;
pub mod service;
