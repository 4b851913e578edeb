use super::box_backend::BoxNluBackend;

/// A ready-to-use NLU client bound to one account/project.
///
/// Created at most once per successful initialization attempt and never
/// mutated afterwards.
pub struct ClientHandle {
    backend: BoxNluBackend,
    account_id: String,
}

impl ClientHandle {
    pub fn new(backend: BoxNluBackend, account_id: impl Into<String>) -> Self {
        Self {
            backend,
            account_id: account_id.into(),
        }
    }

    pub fn backend(&self) -> &BoxNluBackend {
        &self.backend
    }

    pub fn account_id(&self) -> &str {
        &self.account_id
    }
}

impl std::fmt::Debug for ClientHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientHandle")
            .field("backend", &self.backend.name())
            .field("account_id", &self.account_id)
            .finish()
    }
}
