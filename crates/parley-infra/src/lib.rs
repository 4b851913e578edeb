//! Infrastructure implementations for Parley.
//!
//! Concrete adapters for the ports defined in `parley-core`:
//! - `dialogflow`: Dialogflow ES REST client behind `NluBackend`, plus the
//!   `NluClientFactory` used at startup
//! - `stripe`: Stripe REST client behind `PaymentProcessor`
//! - `env`: environment-backed configuration source

pub mod dialogflow;
pub mod env;
pub mod stripe;
