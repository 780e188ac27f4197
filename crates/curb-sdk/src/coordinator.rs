use std::sync::Arc;

use curb_access::AccessControl;
use curb_crypto::CredentialVault;
use curb_ledger::{AssignmentLedger, FeedbackLedger, ReferenceCatalog, RequestLedger};
use curb_store::{CoordinationStore, InMemoryStore};

/// The assembled coordination core.
///
/// Owns one store and the components built over it. Components share the
/// store, so a status cascade driven by the assignment ledger is
/// immediately visible through the request ledger.
pub struct Coordinator {
    access: AccessControl,
    catalog: ReferenceCatalog,
    requests: RequestLedger,
    assignments: AssignmentLedger,
    feedback: FeedbackLedger,
}

impl Coordinator {
    /// Assemble over an in-memory store, for tests and embedding.
    pub fn in_memory() -> Self {
        Self::with_store(Arc::new(InMemoryStore::new()))
    }

    /// Assemble over an injected store backend.
    pub fn with_store(store: Arc<dyn CoordinationStore>) -> Self {
        Self {
            access: AccessControl::new(store.clone(), CredentialVault::new()),
            catalog: ReferenceCatalog::new(store.clone()),
            requests: RequestLedger::new(store.clone()),
            assignments: AssignmentLedger::new(store.clone()),
            feedback: FeedbackLedger::new(store),
        }
    }

    pub fn access(&self) -> &AccessControl {
        &self.access
    }

    pub fn catalog(&self) -> &ReferenceCatalog {
        &self.catalog
    }

    pub fn requests(&self) -> &RequestLedger {
        &self.requests
    }

    pub fn assignments(&self) -> &AssignmentLedger {
        &self.assignments
    }

    pub fn feedback(&self) -> &FeedbackLedger {
        &self.feedback
    }
}

impl Default for Coordinator {
    fn default() -> Self {
        Self::in_memory()
    }
}
