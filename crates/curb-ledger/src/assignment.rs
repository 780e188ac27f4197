//! The assignment state machine.
//!
//! ```text
//! (none) --assign--> Assigned --advance--> InProgress --complete--> Completed
//!                       \_________________complete________________/
//! ```
//!
//! Every assignment status change cascades into the owning request, and
//! the cascade happens inside the store's atomic transitions: either both
//! entities move or neither does. A caller that loses a race observes
//! `InvalidTransition`, never a silently overwritten newer state.

use std::sync::Arc;

use tracing::info;

use curb_store::CoordinationStore;
use curb_types::{ActorId, Assignment, AssignmentId, AssignmentStatus, RequestId, Role};

use crate::error::LedgerError;

/// Owns assignments and drives the cascading status writes into the
/// request ledger's entities.
pub struct AssignmentLedger {
    store: Arc<dyn CoordinationStore>,
}

impl AssignmentLedger {
    pub fn new(store: Arc<dyn CoordinationStore>) -> Self {
        Self { store }
    }

    /// Bind a pending request to a collector.
    ///
    /// Fails with `UnknownCollector` unless `collector_id` references an
    /// actor with the collector role, and with `InvalidTransition` unless
    /// the request is still `Pending`. The pending check, the assignment
    /// insert, and the request's move to `Assigned` are one atomic unit
    /// in the store, so concurrent assign calls on the same request
    /// cannot both succeed.
    pub fn assign(
        &self,
        request_id: RequestId,
        collector_id: ActorId,
    ) -> Result<Assignment, LedgerError> {
        let collector = self.store.actor_by_id(collector_id)?;
        if !collector.is_some_and(|actor| actor.role == Role::Collector) {
            return Err(LedgerError::UnknownCollector(collector_id.to_string()));
        }

        let assignment = Assignment::new(request_id, collector_id);
        self.store.create_assignment(&assignment)?;
        info!(
            assignment = %assignment.id,
            request = %request_id,
            collector = %collector_id,
            "request assigned"
        );
        Ok(assignment)
    }

    /// Move an assignment from `Assigned` to `InProgress`; the request
    /// mirrors the change.
    pub fn advance(&self, id: AssignmentId) -> Result<Assignment, LedgerError> {
        let updated = self.store.transition_assignment(
            id,
            AssignmentStatus::Assigned,
            AssignmentStatus::InProgress,
        )?;
        info!(assignment = %id, "assignment in progress");
        Ok(updated)
    }

    /// Complete an assignment from `Assigned` or `InProgress`; the
    /// request becomes `Collected` and its pickup date is recorded.
    ///
    /// `Completed` is terminal: any further transition call on this
    /// assignment fails with `InvalidTransition`.
    pub fn complete(&self, id: AssignmentId) -> Result<Assignment, LedgerError> {
        let current = self.get(id)?.status;
        if !current.can_transition_to(AssignmentStatus::Completed) {
            return Err(LedgerError::InvalidTransition(format!(
                "assignment is {current}, cannot complete"
            )));
        }
        // The store re-checks `current` under its write lock; if the
        // status moved in between, the caller gets InvalidTransition
        // rather than a stale overwrite.
        let updated =
            self.store
                .transition_assignment(id, current, AssignmentStatus::Completed)?;
        info!(assignment = %id, request = %updated.request_id, "assignment completed");
        Ok(updated)
    }

    pub fn get(&self, id: AssignmentId) -> Result<Assignment, LedgerError> {
        self.store
            .assignment_by_id(id)?
            .ok_or_else(|| LedgerError::NotFound {
                entity: "assignment",
                id: id.to_string(),
            })
    }

    /// The most recent assignment for a request, if any.
    pub fn get_by_request(&self, request: RequestId) -> Result<Option<Assignment>, LedgerError> {
        Ok(self.store.assignment_for_request(request)?)
    }

    pub fn list_by_collector(&self, collector: ActorId) -> Result<Vec<Assignment>, LedgerError> {
        Ok(self.store.assignments_by_collector(collector)?)
    }

    pub fn list_by_status(
        &self,
        status: AssignmentStatus,
    ) -> Result<Vec<Assignment>, LedgerError> {
        Ok(self.store.assignments_by_status(status)?)
    }

    pub fn list_all(&self) -> Result<Vec<Assignment>, LedgerError> {
        Ok(self.store.list_assignments()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use curb_store::{ActorStore, CategoryStore, InMemoryStore, RequestStore};
    use curb_types::{Actor, HashedSecret, PickupRequest, RequestStatus, WasteCategory};

    struct Fixture {
        store: Arc<InMemoryStore>,
        ledger: AssignmentLedger,
        request: RequestId,
        collector: ActorId,
    }

    fn fixture() -> Fixture {
        let store = Arc::new(InMemoryStore::new());
        let requester = Actor::new(
            "ana_r",
            HashedSecret::from_encoded("ZmFrZQ==".into()),
            "Ana",
            Role::Requester,
            "ana@example.com",
            None,
        );
        let collector = Actor::new(
            "ben_c",
            HashedSecret::from_encoded("ZmFrZQ==".into()),
            "Ben",
            Role::Collector,
            "ben@example.com",
            None,
        );
        store.insert_actor(&requester).unwrap();
        store.insert_actor(&collector).unwrap();
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
        Fixture {
            ledger: AssignmentLedger::new(store.clone()),
            store,
            request: request.id,
            collector: collector.id,
        }
    }

    fn request_status(f: &Fixture) -> RequestStatus {
        f.store.request_by_id(f.request).unwrap().unwrap().status
    }

    #[test]
    fn assign_cascades_to_request() {
        let f = fixture();
        let assignment = f.ledger.assign(f.request, f.collector).unwrap();
        assert_eq!(assignment.status, AssignmentStatus::Assigned);
        assert_eq!(request_status(&f), RequestStatus::Assigned);
    }

    #[test]
    fn assign_rejects_non_collector() {
        let f = fixture();
        let dispatcher = Actor::new(
            "dora_d",
            HashedSecret::from_encoded("ZmFrZQ==".into()),
            "Dora",
            Role::Dispatcher,
            "dora@example.com",
            None,
        );
        f.store.insert_actor(&dispatcher).unwrap();

        assert!(matches!(
            f.ledger.assign(f.request, dispatcher.id),
            Err(LedgerError::UnknownCollector(_))
        ));
        assert!(matches!(
            f.ledger.assign(f.request, ActorId::new()),
            Err(LedgerError::UnknownCollector(_))
        ));
        // Neither attempt disturbed the request.
        assert_eq!(request_status(&f), RequestStatus::Pending);
    }

    #[test]
    fn assign_on_non_pending_request_fails() {
        let f = fixture();
        f.ledger.assign(f.request, f.collector).unwrap();
        assert!(matches!(
            f.ledger.assign(f.request, f.collector),
            Err(LedgerError::InvalidTransition(_))
        ));
        // Exactly one assignment exists.
        assert_eq!(f.ledger.list_all().unwrap().len(), 1);
    }

    #[test]
    fn advance_then_complete() {
        let f = fixture();
        let assignment = f.ledger.assign(f.request, f.collector).unwrap();

        let advanced = f.ledger.advance(assignment.id).unwrap();
        assert_eq!(advanced.status, AssignmentStatus::InProgress);
        assert_eq!(request_status(&f), RequestStatus::InProgress);

        let completed = f.ledger.complete(assignment.id).unwrap();
        assert_eq!(completed.status, AssignmentStatus::Completed);
        assert_eq!(request_status(&f), RequestStatus::Collected);
    }

    #[test]
    fn direct_completion_from_assigned() {
        let f = fixture();
        let assignment = f.ledger.assign(f.request, f.collector).unwrap();
        f.ledger.complete(assignment.id).unwrap();
        assert_eq!(request_status(&f), RequestStatus::Collected);
    }

    #[test]
    fn advance_twice_fails() {
        let f = fixture();
        let assignment = f.ledger.assign(f.request, f.collector).unwrap();
        f.ledger.advance(assignment.id).unwrap();
        assert!(matches!(
            f.ledger.advance(assignment.id),
            Err(LedgerError::InvalidTransition(_))
        ));
    }

    #[test]
    fn complete_is_terminal() {
        let f = fixture();
        let assignment = f.ledger.assign(f.request, f.collector).unwrap();
        f.ledger.complete(assignment.id).unwrap();

        assert!(matches!(
            f.ledger.complete(assignment.id),
            Err(LedgerError::InvalidTransition(_))
        ));
        assert!(matches!(
            f.ledger.advance(assignment.id),
            Err(LedgerError::InvalidTransition(_))
        ));
        // The second complete left the request untouched.
        assert_eq!(request_status(&f), RequestStatus::Collected);
    }

    #[test]
    fn unknown_assignment_is_not_found() {
        let f = fixture();
        assert!(matches!(
            f.ledger.advance(AssignmentId::new()),
            Err(LedgerError::NotFound { .. })
        ));
        assert!(matches!(
            f.ledger.complete(AssignmentId::new()),
            Err(LedgerError::NotFound { .. })
        ));
    }

    #[test]
    fn listings_order_most_recent_first() {
        let store = Arc::new(InMemoryStore::new());
        let requester = Actor::new(
            "ana_r",
            HashedSecret::from_encoded("ZmFrZQ==".into()),
            "Ana",
            Role::Requester,
            "ana@example.com",
            None,
        );
        let collector = Actor::new(
            "ben_c",
            HashedSecret::from_encoded("ZmFrZQ==".into()),
            "Ben",
            Role::Collector,
            "ben@example.com",
            None,
        );
        store.insert_actor(&requester).unwrap();
        store.insert_actor(&collector).unwrap();
        let category = WasteCategory::new("Organic", "");
        store.insert_category(&category).unwrap();
        let ledger = AssignmentLedger::new(store.clone());

        let mut created = Vec::new();
        for street in ["1 First St", "2 Second St", "3 Third St"] {
            let request = PickupRequest::new(
                requester.id,
                category.id,
                1.0,
                street,
                NaiveDate::from_ymd_opt(2026, 9, 1).unwrap(),
            );
            store.insert_request(&request).unwrap();
            created.push(ledger.assign(request.id, collector.id).unwrap().id);
        }

        let listed: Vec<AssignmentId> = ledger
            .list_by_collector(collector.id)
            .unwrap()
            .into_iter()
            .map(|a| a.id)
            .collect();
        created.reverse();
        assert_eq!(listed, created);
    }

    #[test]
    fn concurrent_assign_has_exactly_one_winner() {
        let f = fixture();
        let ledger = Arc::new(AssignmentLedger::new(f.store.clone()));
        let barrier = Arc::new(std::sync::Barrier::new(2));

        let handles: Vec<_> = (0..2)
            .map(|_| {
                let ledger = Arc::clone(&ledger);
                let barrier = Arc::clone(&barrier);
                let (request, collector) = (f.request, f.collector);
                std::thread::spawn(move || {
                    barrier.wait();
                    ledger.assign(request, collector)
                })
            })
            .collect();

        let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        let winners = results.iter().filter(|r| r.is_ok()).count();
        assert_eq!(winners, 1);
        assert!(results
            .iter()
            .filter(|r| r.is_err())
            .all(|r| matches!(r, Err(LedgerError::InvalidTransition(_)))));
        assert_eq!(ledger.list_all().unwrap().len(), 1);
    }
}
