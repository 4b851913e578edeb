//! Payment intent types.

use serde::{Deserialize, Serialize};

/// Currency used when none is configured (lowercase ISO 4217).
pub const DEFAULT_CURRENCY: &str = "inr";

/// Request to create a payment intent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentIntentRequest {
    /// Amount in the smallest currency unit (paise for INR).
    pub amount: u64,
    pub currency: String,
}

/// A created payment intent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentIntent {
    pub id: String,
    pub client_secret: String,
    pub amount: u64,
    pub currency: String,
    pub status: String,
}

/// Success body for the payment route.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentIntentCreated {
    pub client_secret: String,
}
