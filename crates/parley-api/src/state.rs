//! Application state shared by the HTTP handlers.

use std::sync::Arc;

use parley_core::chat::service::ChatService;
use parley_core::payment::service::PaymentService;

/// Services injected into every handler through axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub chat: ChatService,
    pub payments: Arc<PaymentService>,
}

impl AppState {
    pub fn new(chat: ChatService, payments: PaymentService) -> Self {
        Self {
            chat,
            payments: Arc::new(payments),
        }
    }
}
