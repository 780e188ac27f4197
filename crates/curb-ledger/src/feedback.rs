//! Post-collection feedback, gated on request state.

use std::sync::Arc;

use tracing::info;

use curb_store::{CoordinationStore, StoreError};
use curb_types::{validation, ActorId, Feedback, RequestId, TypeError};

use crate::error::LedgerError;

/// Owns feedback records: append-only, at most one per request, and only
/// once the request has been collected.
pub struct FeedbackLedger {
    store: Arc<dyn CoordinationStore>,
}

impl FeedbackLedger {
    pub fn new(store: Arc<dyn CoordinationStore>) -> Self {
        Self { store }
    }

    /// Submit feedback for a collected request.
    ///
    /// The submitter must be the request's own requester. No update or
    /// delete is exposed; feedback is final once written.
    pub fn submit(
        &self,
        requester_id: ActorId,
        request_id: RequestId,
        rating: u8,
        comments: &str,
    ) -> Result<Feedback, LedgerError> {
        validation::validate_rating(rating)?;
        validation::validate_comments(comments)?;

        let request = self
            .store
            .request_by_id(request_id)?
            .ok_or_else(|| LedgerError::NotFound {
                entity: "request",
                id: request_id.to_string(),
            })?;
        if request.requester_id != requester_id {
            return Err(
                TypeError::invalid("requester", "feedback must come from the request's requester")
                    .into(),
            );
        }
        if !request.status.is_collected() {
            return Err(LedgerError::RequestNotCollected);
        }
        if self.store.feedback_by_request(request_id)?.is_some() {
            return Err(LedgerError::DuplicateFeedback(request_id.to_string()));
        }

        let feedback = Feedback::new(requester_id, request_id, rating, comments.trim());
        self.store.insert_feedback(&feedback).map_err(|err| match err {
            // Raced with another submission between check and insert.
            StoreError::UniqueViolation { .. } => {
                LedgerError::DuplicateFeedback(request_id.to_string())
            }
            other => other.into(),
        })?;
        info!(feedback = %feedback.id, request = %request_id, rating, "feedback submitted");
        Ok(feedback)
    }

    pub fn get_by_request(&self, request: RequestId) -> Result<Option<Feedback>, LedgerError> {
        Ok(self.store.feedback_by_request(request)?)
    }

    pub fn list_by_requester(&self, requester: ActorId) -> Result<Vec<Feedback>, LedgerError> {
        Ok(self.store.feedback_by_requester(requester)?)
    }

    pub fn list_all(&self) -> Result<Vec<Feedback>, LedgerError> {
        Ok(self.store.list_feedback()?)
    }

    /// Mean rating across all feedback, `None` while there is none.
    pub fn average_rating(&self) -> Result<Option<f64>, LedgerError> {
        let records = self.store.list_feedback()?;
        if records.is_empty() {
            return Ok(None);
        }
        let sum: u32 = records.iter().map(|f| u32::from(f.rating)).sum();
        Ok(Some(f64::from(sum) / records.len() as f64))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use curb_store::{ActorStore, AssignmentStore, CategoryStore, InMemoryStore, RequestStore};
    use curb_types::{Actor, Assignment, AssignmentStatus, HashedSecret, PickupRequest, Role, WasteCategory};

    struct Fixture {
        store: Arc<InMemoryStore>,
        ledger: FeedbackLedger,
        requester: ActorId,
        request: RequestId,
    }

    /// A request driven all the way to `Collected`.
    fn collected_fixture() -> Fixture {
        let f = pending_fixture();
        let collector = Actor::new(
            "ben_c",
            HashedSecret::from_encoded("ZmFrZQ==".into()),
            "Ben",
            Role::Collector,
            "ben@example.com",
            None,
        );
        f.store.insert_actor(&collector).unwrap();
        let assignment = Assignment::new(f.request, collector.id);
        f.store.create_assignment(&assignment).unwrap();
        f.store
            .transition_assignment(
                assignment.id,
                AssignmentStatus::Assigned,
                AssignmentStatus::Completed,
            )
            .unwrap();
        f
    }

    fn pending_fixture() -> Fixture {
        let store = Arc::new(InMemoryStore::new());
        let requester = Actor::new(
            "ana_r",
            HashedSecret::from_encoded("ZmFrZQ==".into()),
            "Ana",
            Role::Requester,
            "ana@example.com",
            None,
        );
        store.insert_actor(&requester).unwrap();
        let category = WasteCategory::new("Organic", "");
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
            ledger: FeedbackLedger::new(store.clone()),
            store,
            requester: requester.id,
            request: request.id,
        }
    }

    #[test]
    fn submit_for_collected_request() {
        let f = collected_fixture();
        let feedback = f
            .ledger
            .submit(f.requester, f.request, 4, "Prompt pickup")
            .unwrap();
        assert_eq!(feedback.rating, 4);
        assert_eq!(f.ledger.get_by_request(f.request).unwrap(), Some(feedback));
    }

    #[test]
    fn rejects_uncollected_request() {
        let f = pending_fixture();
        assert_eq!(
            f.ledger.submit(f.requester, f.request, 4, "too early"),
            Err(LedgerError::RequestNotCollected)
        );
    }

    #[test]
    fn second_submission_is_duplicate() {
        let f = collected_fixture();
        f.ledger
            .submit(f.requester, f.request, 4, "Prompt pickup")
            .unwrap();
        assert!(matches!(
            f.ledger.submit(f.requester, f.request, 5, "again"),
            Err(LedgerError::DuplicateFeedback(_))
        ));
    }

    #[test]
    fn rejects_bad_rating_and_empty_comments() {
        let f = collected_fixture();
        for bad in [0, 6] {
            assert!(matches!(
                f.ledger.submit(f.requester, f.request, bad, "fine"),
                Err(LedgerError::InvalidInput(_))
            ));
        }
        assert!(matches!(
            f.ledger.submit(f.requester, f.request, 4, "   "),
            Err(LedgerError::InvalidInput(_))
        ));
    }

    #[test]
    fn rejects_foreign_requester() {
        let f = collected_fixture();
        assert!(matches!(
            f.ledger.submit(ActorId::new(), f.request, 4, "not mine"),
            Err(LedgerError::InvalidInput(_))
        ));
    }

    #[test]
    fn average_rating_over_all_feedback() {
        let f = collected_fixture();
        assert_eq!(f.ledger.average_rating().unwrap(), None);
        f.ledger
            .submit(f.requester, f.request, 4, "Prompt pickup")
            .unwrap();
        assert_eq!(f.ledger.average_rating().unwrap(), Some(4.0));
    }
}
