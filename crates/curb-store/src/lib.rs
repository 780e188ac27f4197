//! Persistence boundary for Curbline.
//!
//! The ledgers consume these traits; they never see a concrete backend.
//! The two assignment operations (`create_assignment`,
//! `transition_assignment`) are the only places the workflow mutates two
//! entities at once, and every implementation must execute each as a
//! single atomic unit; that is what keeps a request's derived status
//! consistent with its active assignment under concurrent callers.
//!
//! [`InMemoryStore`] is the reference implementation, used by tests and
//! the SDK facade.

pub mod error;
pub mod memory;
pub mod traits;

pub use error::{StoreError, StoreResult};
pub use memory::InMemoryStore;
pub use traits::{
    ActorStore, AssignmentStore, CategoryStore, CoordinationStore, FeedbackStore, RequestStore,
};
