//! In-memory store for tests and embedding.
//!
//! All entities live in plain maps behind a single `RwLock`, so every
//! conditional transition naturally runs as one atomic unit: the check
//! and both writes happen under the same write guard. Data is lost when
//! the store is dropped.

use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::Utc;
use curb_types::{
    Actor, ActorId, Assignment, AssignmentId, AssignmentStatus, CategoryId, Feedback,
    PickupRequest, RequestId, RequestStatus, Role, WasteCategory,
};

use crate::error::{StoreError, StoreResult};
use crate::traits::{ActorStore, AssignmentStore, CategoryStore, FeedbackStore, RequestStore};

/// An in-memory implementation of the full store boundary.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    inner: RwLock<StoreState>,
}

#[derive(Debug, Default)]
struct StoreState {
    actors: HashMap<ActorId, Actor>,
    handle_index: HashMap<String, ActorId>,
    email_index: HashMap<String, ActorId>,
    categories: HashMap<CategoryId, WasteCategory>,
    requests: HashMap<RequestId, PickupRequest>,
    assignments: HashMap<AssignmentId, Assignment>,
    active_assignment_index: HashMap<RequestId, AssignmentId>,
    feedback: HashMap<RequestId, Feedback>,
}

impl InMemoryStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> StoreResult<RwLockReadGuard<'_, StoreState>> {
        self.inner
            .read()
            .map_err(|e| StoreError::Unavailable(format!("lock poisoned: {e}")))
    }

    fn write(&self) -> StoreResult<RwLockWriteGuard<'_, StoreState>> {
        self.inner
            .write()
            .map_err(|e| StoreError::Unavailable(format!("lock poisoned: {e}")))
    }
}

/// Most recently created first; ids are time-ordered so they break ties.
fn sort_requests(mut requests: Vec<PickupRequest>) -> Vec<PickupRequest> {
    requests.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
    requests
}

fn sort_assignments(mut assignments: Vec<Assignment>) -> Vec<Assignment> {
    assignments.sort_by(|a, b| (b.assigned_at, b.id).cmp(&(a.assigned_at, a.id)));
    assignments
}

impl ActorStore for InMemoryStore {
    fn insert_actor(&self, actor: &Actor) -> StoreResult<()> {
        let mut state = self.write()?;
        if state.handle_index.contains_key(&actor.handle) {
            return Err(StoreError::UniqueViolation {
                constraint: "actor.handle",
            });
        }
        if state.email_index.contains_key(&actor.contact_email) {
            return Err(StoreError::UniqueViolation {
                constraint: "actor.contact_email",
            });
        }
        state.handle_index.insert(actor.handle.clone(), actor.id);
        state
            .email_index
            .insert(actor.contact_email.clone(), actor.id);
        state.actors.insert(actor.id, actor.clone());
        Ok(())
    }

    fn actor_by_id(&self, id: ActorId) -> StoreResult<Option<Actor>> {
        Ok(self.read()?.actors.get(&id).cloned())
    }

    fn actor_by_handle(&self, handle: &str) -> StoreResult<Option<Actor>> {
        let state = self.read()?;
        Ok(state
            .handle_index
            .get(handle)
            .and_then(|id| state.actors.get(id))
            .cloned())
    }

    fn update_actor(&self, actor: &Actor) -> StoreResult<()> {
        let mut state = self.write()?;
        let existing = state
            .actors
            .get(&actor.id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound {
                entity: "actor",
                id: actor.id.to_string(),
            })?;
        if actor.contact_email != existing.contact_email {
            if state.email_index.contains_key(&actor.contact_email) {
                return Err(StoreError::UniqueViolation {
                    constraint: "actor.contact_email",
                });
            }
            state.email_index.remove(&existing.contact_email);
            state
                .email_index
                .insert(actor.contact_email.clone(), actor.id);
        }
        // Handle and role are immutable after registration.
        let mut updated = actor.clone();
        updated.handle = existing.handle;
        updated.role = existing.role;
        state.actors.insert(updated.id, updated);
        Ok(())
    }

    fn actors_by_role(&self, role: Role) -> StoreResult<Vec<Actor>> {
        let state = self.read()?;
        let mut actors: Vec<Actor> = state
            .actors
            .values()
            .filter(|a| a.role == role)
            .cloned()
            .collect();
        actors.sort_by(|a, b| a.handle.cmp(&b.handle));
        Ok(actors)
    }
}

impl CategoryStore for InMemoryStore {
    fn insert_category(&self, category: &WasteCategory) -> StoreResult<()> {
        self.write()?
            .categories
            .insert(category.id, category.clone());
        Ok(())
    }

    fn category_by_id(&self, id: CategoryId) -> StoreResult<Option<WasteCategory>> {
        Ok(self.read()?.categories.get(&id).cloned())
    }

    fn update_category(&self, category: &WasteCategory) -> StoreResult<()> {
        let mut state = self.write()?;
        if !state.categories.contains_key(&category.id) {
            return Err(StoreError::NotFound {
                entity: "category",
                id: category.id.to_string(),
            });
        }
        state.categories.insert(category.id, category.clone());
        Ok(())
    }

    fn delete_category(&self, id: CategoryId) -> StoreResult<bool> {
        Ok(self.write()?.categories.remove(&id).is_some())
    }

    fn list_categories(&self) -> StoreResult<Vec<WasteCategory>> {
        let mut categories: Vec<WasteCategory> =
            self.read()?.categories.values().cloned().collect();
        categories.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(categories)
    }

    fn category_in_use(&self, id: CategoryId) -> StoreResult<bool> {
        Ok(self
            .read()?
            .requests
            .values()
            .any(|r| r.category_id == id))
    }
}

impl RequestStore for InMemoryStore {
    fn insert_request(&self, request: &PickupRequest) -> StoreResult<()> {
        self.write()?.requests.insert(request.id, request.clone());
        Ok(())
    }

    fn request_by_id(&self, id: RequestId) -> StoreResult<Option<PickupRequest>> {
        Ok(self.read()?.requests.get(&id).cloned())
    }

    fn delete_request_if_pending(&self, id: RequestId) -> StoreResult<()> {
        let mut state = self.write()?;
        let request = state.requests.get(&id).ok_or_else(|| StoreError::NotFound {
            entity: "request",
            id: id.to_string(),
        })?;
        if request.status != RequestStatus::Pending {
            return Err(StoreError::StaleState {
                entity: "request",
                expected: RequestStatus::Pending.to_string(),
                actual: request.status.to_string(),
            });
        }
        state.requests.remove(&id);
        Ok(())
    }

    fn requests_by_requester(&self, requester: ActorId) -> StoreResult<Vec<PickupRequest>> {
        let state = self.read()?;
        Ok(sort_requests(
            state
                .requests
                .values()
                .filter(|r| r.requester_id == requester)
                .cloned()
                .collect(),
        ))
    }

    fn requests_by_status(&self, status: RequestStatus) -> StoreResult<Vec<PickupRequest>> {
        let state = self.read()?;
        Ok(sort_requests(
            state
                .requests
                .values()
                .filter(|r| r.status == status)
                .cloned()
                .collect(),
        ))
    }

    fn list_requests(&self) -> StoreResult<Vec<PickupRequest>> {
        Ok(sort_requests(
            self.read()?.requests.values().cloned().collect(),
        ))
    }
}

impl AssignmentStore for InMemoryStore {
    fn create_assignment(&self, assignment: &Assignment) -> StoreResult<()> {
        let mut state = self.write()?;
        let request = state
            .requests
            .get(&assignment.request_id)
            .ok_or_else(|| StoreError::NotFound {
                entity: "request",
                id: assignment.request_id.to_string(),
            })?;
        if request.status != RequestStatus::Pending {
            return Err(StoreError::StaleState {
                entity: "request",
                expected: RequestStatus::Pending.to_string(),
                actual: request.status.to_string(),
            });
        }
        if state
            .active_assignment_index
            .contains_key(&assignment.request_id)
        {
            // Unreachable while the status invariant holds; last resort.
            return Err(StoreError::UniqueViolation {
                constraint: "assignment.one_active_per_request",
            });
        }

        state
            .assignments
            .insert(assignment.id, assignment.clone());
        state
            .active_assignment_index
            .insert(assignment.request_id, assignment.id);
        if let Some(request) = state.requests.get_mut(&assignment.request_id) {
            request.status = assignment.status.cascades_to();
        }
        Ok(())
    }

    fn transition_assignment(
        &self,
        id: AssignmentId,
        expected: AssignmentStatus,
        next: AssignmentStatus,
    ) -> StoreResult<Assignment> {
        let mut state = self.write()?;
        let current = state
            .assignments
            .get(&id)
            .ok_or_else(|| StoreError::NotFound {
                entity: "assignment",
                id: id.to_string(),
            })?
            .status;
        if current != expected {
            return Err(StoreError::StaleState {
                entity: "assignment",
                expected: expected.to_string(),
                actual: current.to_string(),
            });
        }

        let assignment = state
            .assignments
            .get_mut(&id)
            .expect("assignment present under write lock");
        assignment.status = next;
        let request_id = assignment.request_id;
        let updated = assignment.clone();

        if next.is_terminal() {
            state.active_assignment_index.remove(&request_id);
        }
        if let Some(request) = state.requests.get_mut(&request_id) {
            request.status = next.cascades_to();
            if next.is_terminal() && request.pickup_date.is_none() {
                request.pickup_date = Some(Utc::now().date_naive());
            }
        }
        Ok(updated)
    }

    fn assignment_by_id(&self, id: AssignmentId) -> StoreResult<Option<Assignment>> {
        Ok(self.read()?.assignments.get(&id).cloned())
    }

    fn active_assignment_for_request(
        &self,
        request: RequestId,
    ) -> StoreResult<Option<Assignment>> {
        let state = self.read()?;
        Ok(state
            .active_assignment_index
            .get(&request)
            .and_then(|id| state.assignments.get(id))
            .cloned())
    }

    fn assignment_for_request(&self, request: RequestId) -> StoreResult<Option<Assignment>> {
        let state = self.read()?;
        Ok(sort_assignments(
            state
                .assignments
                .values()
                .filter(|a| a.request_id == request)
                .cloned()
                .collect(),
        )
        .into_iter()
        .next())
    }

    fn assignments_by_collector(&self, collector: ActorId) -> StoreResult<Vec<Assignment>> {
        let state = self.read()?;
        Ok(sort_assignments(
            state
                .assignments
                .values()
                .filter(|a| a.collector_id == collector)
                .cloned()
                .collect(),
        ))
    }

    fn assignments_by_status(&self, status: AssignmentStatus) -> StoreResult<Vec<Assignment>> {
        let state = self.read()?;
        Ok(sort_assignments(
            state
                .assignments
                .values()
                .filter(|a| a.status == status)
                .cloned()
                .collect(),
        ))
    }

    fn list_assignments(&self) -> StoreResult<Vec<Assignment>> {
        Ok(sort_assignments(
            self.read()?.assignments.values().cloned().collect(),
        ))
    }
}

impl FeedbackStore for InMemoryStore {
    fn insert_feedback(&self, feedback: &Feedback) -> StoreResult<()> {
        let mut state = self.write()?;
        if state.feedback.contains_key(&feedback.request_id) {
            return Err(StoreError::UniqueViolation {
                constraint: "feedback.one_per_request",
            });
        }
        state.feedback.insert(feedback.request_id, feedback.clone());
        Ok(())
    }

    fn feedback_by_request(&self, request: RequestId) -> StoreResult<Option<Feedback>> {
        Ok(self.read()?.feedback.get(&request).cloned())
    }

    fn feedback_by_requester(&self, requester: ActorId) -> StoreResult<Vec<Feedback>> {
        let state = self.read()?;
        let mut records: Vec<Feedback> = state
            .feedback
            .values()
            .filter(|f| f.requester_id == requester)
            .cloned()
            .collect();
        records.sort_by(|a, b| (b.submitted_at, b.id).cmp(&(a.submitted_at, a.id)));
        Ok(records)
    }

    fn list_feedback(&self) -> StoreResult<Vec<Feedback>> {
        let state = self.read()?;
        let mut records: Vec<Feedback> = state.feedback.values().cloned().collect();
        records.sort_by(|a, b| (b.submitted_at, b.id).cmp(&(a.submitted_at, a.id)));
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use curb_types::HashedSecret;

    fn actor(handle: &str, email: &str, role: Role) -> Actor {
        Actor::new(
            handle,
            HashedSecret::from_encoded("ZmFrZQ==".into()),
            "Test Actor",
            role,
            email,
            None,
        )
    }

    fn pending_request(store: &InMemoryStore) -> PickupRequest {
        let requester = actor("ana_r", "ana@example.com", Role::Requester);
        store.insert_actor(&requester).unwrap();
        let category = WasteCategory::new("Organic", "Garden and food waste");
        store.insert_category(&category).unwrap();
        let request = PickupRequest::new(
            requester.id,
            category.id,
            12.5,
            "12 Bin Lane",
            NaiveDate::from_ymd_opt(2026, 9, 1).unwrap(),
        );
        store.insert_request(&request).unwrap();
        request
    }

    #[test]
    fn duplicate_handle_rejected() {
        let store = InMemoryStore::new();
        store
            .insert_actor(&actor("ana_r", "ana@example.com", Role::Requester))
            .unwrap();
        let err = store
            .insert_actor(&actor("ana_r", "other@example.com", Role::Requester))
            .unwrap_err();
        assert_eq!(
            err,
            StoreError::UniqueViolation {
                constraint: "actor.handle"
            }
        );
    }

    #[test]
    fn duplicate_email_rejected() {
        let store = InMemoryStore::new();
        store
            .insert_actor(&actor("ana_r", "ana@example.com", Role::Requester))
            .unwrap();
        let err = store
            .insert_actor(&actor("ben_c", "ana@example.com", Role::Collector))
            .unwrap_err();
        assert_eq!(
            err,
            StoreError::UniqueViolation {
                constraint: "actor.contact_email"
            }
        );
    }

    #[test]
    fn update_preserves_handle_and_role() {
        let store = InMemoryStore::new();
        let registered = actor("ana_r", "ana@example.com", Role::Requester);
        store.insert_actor(&registered).unwrap();

        let mut edited = registered.clone();
        edited.handle = "hijacked".into();
        edited.role = Role::Dispatcher;
        edited.display_name = "Ana B".into();
        store.update_actor(&edited).unwrap();

        let stored = store.actor_by_id(registered.id).unwrap().unwrap();
        assert_eq!(stored.handle, "ana_r");
        assert_eq!(stored.role, Role::Requester);
        assert_eq!(stored.display_name, "Ana B");
    }

    #[test]
    fn create_assignment_cascades_into_request() {
        let store = InMemoryStore::new();
        let request = pending_request(&store);
        let collector = actor("ben_c", "ben@example.com", Role::Collector);
        store.insert_actor(&collector).unwrap();

        store
            .create_assignment(&Assignment::new(request.id, collector.id))
            .unwrap();

        let stored = store.request_by_id(request.id).unwrap().unwrap();
        assert_eq!(stored.status, RequestStatus::Assigned);
        assert!(store
            .active_assignment_for_request(request.id)
            .unwrap()
            .is_some());
    }

    #[test]
    fn second_assignment_on_same_request_is_stale() {
        let store = InMemoryStore::new();
        let request = pending_request(&store);
        let collector = actor("ben_c", "ben@example.com", Role::Collector);
        store.insert_actor(&collector).unwrap();

        store
            .create_assignment(&Assignment::new(request.id, collector.id))
            .unwrap();
        let err = store
            .create_assignment(&Assignment::new(request.id, collector.id))
            .unwrap_err();
        assert!(matches!(err, StoreError::StaleState { .. }));
    }

    #[test]
    fn transition_checks_expected_state() {
        let store = InMemoryStore::new();
        let request = pending_request(&store);
        let collector = actor("ben_c", "ben@example.com", Role::Collector);
        store.insert_actor(&collector).unwrap();
        let assignment = Assignment::new(request.id, collector.id);
        store.create_assignment(&assignment).unwrap();

        let err = store
            .transition_assignment(
                assignment.id,
                AssignmentStatus::InProgress,
                AssignmentStatus::Completed,
            )
            .unwrap_err();
        assert!(matches!(err, StoreError::StaleState { .. }));
    }

    #[test]
    fn completion_records_pickup_date_and_frees_request() {
        let store = InMemoryStore::new();
        let request = pending_request(&store);
        let collector = actor("ben_c", "ben@example.com", Role::Collector);
        store.insert_actor(&collector).unwrap();
        let assignment = Assignment::new(request.id, collector.id);
        store.create_assignment(&assignment).unwrap();

        store
            .transition_assignment(
                assignment.id,
                AssignmentStatus::Assigned,
                AssignmentStatus::Completed,
            )
            .unwrap();

        let stored = store.request_by_id(request.id).unwrap().unwrap();
        assert_eq!(stored.status, RequestStatus::Collected);
        assert!(stored.pickup_date.is_some());
        assert!(store
            .active_assignment_for_request(request.id)
            .unwrap()
            .is_none());
        // Completed assignment remains queryable.
        assert!(store.assignment_for_request(request.id).unwrap().is_some());
    }

    #[test]
    fn delete_request_only_while_pending() {
        let store = InMemoryStore::new();
        let request = pending_request(&store);
        let collector = actor("ben_c", "ben@example.com", Role::Collector);
        store.insert_actor(&collector).unwrap();
        store
            .create_assignment(&Assignment::new(request.id, collector.id))
            .unwrap();

        let err = store.delete_request_if_pending(request.id).unwrap_err();
        assert!(matches!(err, StoreError::StaleState { .. }));
    }

    #[test]
    fn one_feedback_per_request() {
        let store = InMemoryStore::new();
        let request = pending_request(&store);
        store
            .insert_feedback(&Feedback::new(request.requester_id, request.id, 4, "ok"))
            .unwrap();
        let err = store
            .insert_feedback(&Feedback::new(request.requester_id, request.id, 5, "again"))
            .unwrap_err();
        assert_eq!(
            err,
            StoreError::UniqueViolation {
                constraint: "feedback.one_per_request"
            }
        );
    }
}
