//! Pickup request submission and queries.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::info;

use curb_store::CoordinationStore;
use curb_types::{
    validation, ActorId, CategoryId, PickupRequest, RequestId, RequestStatus, Role, TypeError,
};

use crate::error::LedgerError;

/// Owns pickup requests.
///
/// Request status is derived state: this ledger initializes it to
/// `Pending` and never writes it again. The only other writer is the
/// store's atomic assignment transitions, driven by the assignment
/// ledger.
pub struct RequestLedger {
    store: Arc<dyn CoordinationStore>,
}

impl RequestLedger {
    pub fn new(store: Arc<dyn CoordinationStore>) -> Self {
        Self { store }
    }

    /// Submit a new pickup request, initialized to `Pending`.
    pub fn submit(
        &self,
        requester_id: ActorId,
        category_id: CategoryId,
        quantity_kg: f64,
        address: &str,
        requested_date: NaiveDate,
    ) -> Result<PickupRequest, LedgerError> {
        validation::validate_quantity(quantity_kg)?;
        validation::validate_address(address)?;

        let requester =
            self.store
                .actor_by_id(requester_id)?
                .ok_or_else(|| LedgerError::NotFound {
                    entity: "actor",
                    id: requester_id.to_string(),
                })?;
        if requester.role != Role::Requester {
            return Err(TypeError::invalid("requester", "actor is not a requester").into());
        }
        if self.store.category_by_id(category_id)?.is_none() {
            return Err(LedgerError::NotFound {
                entity: "category",
                id: category_id.to_string(),
            });
        }

        let request = PickupRequest::new(
            requester_id,
            category_id,
            quantity_kg,
            address.trim(),
            requested_date,
        );
        self.store.insert_request(&request)?;
        info!(request = %request.id, requester = %requester_id, "request submitted");
        Ok(request)
    }

    /// Withdraw a request that has not been assigned yet.
    ///
    /// Fails with `InvalidTransition` once a collector is bound; the
    /// request is then owned by the assignment lifecycle.
    pub fn cancel(&self, id: RequestId) -> Result<(), LedgerError> {
        self.store.delete_request_if_pending(id)?;
        info!(request = %id, "request cancelled");
        Ok(())
    }

    pub fn get(&self, id: RequestId) -> Result<PickupRequest, LedgerError> {
        self.store
            .request_by_id(id)?
            .ok_or_else(|| LedgerError::NotFound {
                entity: "request",
                id: id.to_string(),
            })
    }

    pub fn list_by_requester(&self, requester: ActorId) -> Result<Vec<PickupRequest>, LedgerError> {
        Ok(self.store.requests_by_requester(requester)?)
    }

    pub fn list_by_status(&self, status: RequestStatus) -> Result<Vec<PickupRequest>, LedgerError> {
        Ok(self.store.requests_by_status(status)?)
    }

    pub fn list_all(&self) -> Result<Vec<PickupRequest>, LedgerError> {
        Ok(self.store.list_requests()?)
    }
}
