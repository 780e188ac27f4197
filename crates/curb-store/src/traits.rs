//! Store trait boundaries, one per entity.
//!
//! All implementations must satisfy these invariants:
//! - Uniqueness of actor handle, actor contact email, one active
//!   assignment per request, and one feedback per request is enforced
//!   here, as the invariant of last resort.
//! - `create_assignment` and `transition_assignment` each run their
//!   check and both of their writes as one atomic unit. Two concurrent
//!   calls must never both succeed against the same pre-state; the loser
//!   observes [`StoreError::StaleState`].
//! - Reads take no entity-level locks and may be served from a replica;
//!   the atomic transitions are the only cross-entity mutation path.
//! - Backend failures are propagated, never masked.

use curb_types::{
    Actor, ActorId, Assignment, AssignmentId, AssignmentStatus, CategoryId, Feedback,
    PickupRequest, RequestId, RequestStatus, Role, WasteCategory,
};

use crate::error::StoreResult;

/// Storage for registered actors.
pub trait ActorStore: Send + Sync {
    /// Insert a new actor.
    ///
    /// Fails with `UniqueViolation` if the handle or contact email is
    /// already taken.
    fn insert_actor(&self, actor: &Actor) -> StoreResult<()>;

    fn actor_by_id(&self, id: ActorId) -> StoreResult<Option<Actor>>;

    fn actor_by_handle(&self, handle: &str) -> StoreResult<Option<Actor>>;

    /// Overwrite an existing actor's mutable fields.
    ///
    /// Fails with `NotFound` for an unknown id and `UniqueViolation` if
    /// the new contact email belongs to another actor. The handle and
    /// role of the stored record are preserved.
    fn update_actor(&self, actor: &Actor) -> StoreResult<()>;

    fn actors_by_role(&self, role: Role) -> StoreResult<Vec<Actor>>;
}

/// Storage for waste-category reference data.
pub trait CategoryStore: Send + Sync {
    fn insert_category(&self, category: &WasteCategory) -> StoreResult<()>;

    fn category_by_id(&self, id: CategoryId) -> StoreResult<Option<WasteCategory>>;

    fn update_category(&self, category: &WasteCategory) -> StoreResult<()>;

    /// Delete a category. Returns `true` if it existed.
    fn delete_category(&self, id: CategoryId) -> StoreResult<bool>;

    fn list_categories(&self) -> StoreResult<Vec<WasteCategory>>;

    /// Whether any request references this category.
    fn category_in_use(&self, id: CategoryId) -> StoreResult<bool>;
}

/// Storage for pickup requests.
///
/// Request status is never written through this trait; it only moves
/// inside [`AssignmentStore`]'s atomic transitions.
pub trait RequestStore: Send + Sync {
    fn insert_request(&self, request: &PickupRequest) -> StoreResult<()>;

    fn request_by_id(&self, id: RequestId) -> StoreResult<Option<PickupRequest>>;

    /// Delete a request, conditional on it still being `Pending`.
    ///
    /// Fails with `StaleState` once an assignment exists, `NotFound` for
    /// an unknown id.
    fn delete_request_if_pending(&self, id: RequestId) -> StoreResult<()>;

    /// Requests for one requester, most recently created first.
    fn requests_by_requester(&self, requester: ActorId) -> StoreResult<Vec<PickupRequest>>;

    /// Requests in one status, most recently created first.
    fn requests_by_status(&self, status: RequestStatus) -> StoreResult<Vec<PickupRequest>>;

    /// All requests, most recently created first.
    fn list_requests(&self) -> StoreResult<Vec<PickupRequest>>;
}

/// Storage for assignments, including the two atomic lifecycle writes.
pub trait AssignmentStore: Send + Sync {
    /// Bind a request to a collector: one atomic unit covering the
    /// `Pending` check, the assignment insert, and the cascading request
    /// status write to `Assigned`.
    ///
    /// Fails with `NotFound` if the request does not exist and
    /// `StaleState` if it is no longer `Pending` (which also covers an
    /// already-active assignment).
    fn create_assignment(&self, assignment: &Assignment) -> StoreResult<()>;

    /// Compare-and-swap the assignment status, cascading the matching
    /// request status in the same atomic unit. When `next` is
    /// `Completed`, the request's pickup date is recorded as well.
    ///
    /// Fails with `StaleState` if the current status differs from
    /// `expected` (the caller lost a race or repeated a terminal call),
    /// and with `NotFound` for an unknown assignment. Returns the
    /// updated assignment.
    fn transition_assignment(
        &self,
        id: AssignmentId,
        expected: AssignmentStatus,
        next: AssignmentStatus,
    ) -> StoreResult<Assignment>;

    fn assignment_by_id(&self, id: AssignmentId) -> StoreResult<Option<Assignment>>;

    /// The non-terminal assignment for a request, if one exists.
    fn active_assignment_for_request(&self, request: RequestId)
        -> StoreResult<Option<Assignment>>;

    /// The most recent assignment for a request, active or completed.
    fn assignment_for_request(&self, request: RequestId) -> StoreResult<Option<Assignment>>;

    /// Assignments for one collector, most recently assigned first.
    fn assignments_by_collector(&self, collector: ActorId) -> StoreResult<Vec<Assignment>>;

    /// Assignments in one status, most recently assigned first.
    fn assignments_by_status(&self, status: AssignmentStatus) -> StoreResult<Vec<Assignment>>;

    /// All assignments, most recently assigned first.
    fn list_assignments(&self) -> StoreResult<Vec<Assignment>>;
}

/// Storage for feedback records.
pub trait FeedbackStore: Send + Sync {
    /// Insert feedback. Fails with `UniqueViolation` if the request
    /// already has feedback.
    fn insert_feedback(&self, feedback: &Feedback) -> StoreResult<()>;

    fn feedback_by_request(&self, request: RequestId) -> StoreResult<Option<Feedback>>;

    fn feedback_by_requester(&self, requester: ActorId) -> StoreResult<Vec<Feedback>>;

    fn list_feedback(&self) -> StoreResult<Vec<Feedback>>;
}

/// The full store boundary the ledgers are constructed over.
pub trait CoordinationStore:
    ActorStore + CategoryStore + RequestStore + AssignmentStore + FeedbackStore
{
}

impl<T> CoordinationStore for T where
    T: ActorStore + CategoryStore + RequestStore + AssignmentStore + FeedbackStore
{
}
