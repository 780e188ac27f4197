//! High-level SDK for Curbline.
//!
//! Provides a unified entry point for applications embedding the
//! waste-pickup coordination core: one [`Coordinator`] owning the store,
//! the credential vault, the ledgers, and access control.

pub mod coordinator;

pub use coordinator::Coordinator;

// Re-export the public surface so embedders need only this crate.
pub use curb_access::{is_allowed, permissions, AccessControl, AccessError, Capability, Registration};
pub use curb_crypto::{CredentialVault, CryptoError};
pub use curb_ledger::{
    AssignmentLedger, FeedbackLedger, LedgerError, ReferenceCatalog, RequestLedger,
};
pub use curb_store::{CoordinationStore, InMemoryStore, StoreError};
pub use curb_types::{
    Actor, ActorId, Assignment, AssignmentId, AssignmentStatus, CategoryId, Feedback, FeedbackId,
    PickupRequest, RequestId, RequestStatus, Role, WasteCategory,
};
