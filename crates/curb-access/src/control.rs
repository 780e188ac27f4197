//! Registration, authentication, and profile maintenance.

use std::sync::Arc;

use tracing::{debug, info};

use curb_crypto::CredentialVault;
use curb_store::CoordinationStore;
use curb_types::{validation, Actor, ActorId, Role};

use crate::error::AccessError;

/// Input for [`AccessControl::register`].
#[derive(Clone, Debug)]
pub struct Registration {
    pub handle: String,
    pub secret: String,
    pub display_name: String,
    pub role: Role,
    pub contact_email: String,
    pub contact_phone: Option<String>,
}

/// Authenticates actors and maintains their records.
///
/// The role chosen at registration is permanent; nothing here (or
/// anywhere else in the core) can change it afterwards.
pub struct AccessControl {
    store: Arc<dyn CoordinationStore>,
    vault: CredentialVault,
}

impl AccessControl {
    pub fn new(store: Arc<dyn CoordinationStore>, vault: CredentialVault) -> Self {
        Self { store, vault }
    }

    /// Register a new actor.
    ///
    /// Fails with `DuplicateHandle` / `DuplicateContact` when the handle
    /// or email is taken, and `InvalidInput` for format violations. The
    /// secret is hashed before anything is stored.
    pub fn register(&self, registration: Registration) -> Result<Actor, AccessError> {
        validation::validate_handle(&registration.handle)?;
        validation::validate_secret(&registration.secret)?;
        validation::validate_display_name(&registration.display_name)?;
        validation::validate_email(&registration.contact_email)?;
        if let Some(phone) = &registration.contact_phone {
            validation::validate_phone(phone)?;
        }

        let secret_hash = self
            .vault
            .hash(&registration.secret)
            .map_err(|e| AccessError::Crypto(e.to_string()))?;
        let actor = Actor::new(
            registration.handle.trim(),
            secret_hash,
            registration.display_name.trim(),
            registration.role,
            registration.contact_email.trim(),
            registration.contact_phone,
        );
        self.store.insert_actor(&actor)?;
        info!(actor = %actor.id, role = %actor.role, "actor registered");
        Ok(actor)
    }

    /// Authenticate by handle and secret.
    ///
    /// Unknown handle and wrong secret produce the same `AuthFailure`,
    /// so the response does not reveal which handles exist.
    pub fn authenticate(&self, handle: &str, secret: &str) -> Result<Actor, AccessError> {
        let actor = self
            .store
            .actor_by_handle(handle.trim())?
            .ok_or(AccessError::AuthFailure)?;
        if !self.vault.verify(secret, &actor.secret_hash) {
            debug!(handle = %actor.handle, "credential mismatch");
            return Err(AccessError::AuthFailure);
        }
        Ok(actor)
    }

    /// Replace an actor's secret.
    pub fn reset_secret(&self, actor_id: ActorId, new_secret: &str) -> Result<(), AccessError> {
        validation::validate_secret(new_secret)?;
        let mut actor = self.get(actor_id)?;
        actor.secret_hash = self
            .vault
            .hash(new_secret)
            .map_err(|e| AccessError::Crypto(e.to_string()))?;
        self.store.update_actor(&actor)?;
        info!(actor = %actor_id, "secret reset");
        Ok(())
    }

    /// Update the mutable profile fields: display name and contacts.
    ///
    /// Handle and role are immutable; the store discards any attempt to
    /// change them.
    pub fn update_profile(
        &self,
        actor_id: ActorId,
        display_name: &str,
        contact_email: &str,
        contact_phone: Option<String>,
    ) -> Result<Actor, AccessError> {
        validation::validate_display_name(display_name)?;
        validation::validate_email(contact_email)?;
        if let Some(phone) = &contact_phone {
            validation::validate_phone(phone)?;
        }

        let mut actor = self.get(actor_id)?;
        actor.display_name = display_name.trim().to_string();
        actor.contact_email = contact_email.trim().to_string();
        actor.contact_phone = contact_phone;
        self.store.update_actor(&actor)?;
        Ok(actor)
    }

    pub fn get(&self, actor_id: ActorId) -> Result<Actor, AccessError> {
        self.store
            .actor_by_id(actor_id)?
            .ok_or_else(|| AccessError::NotFound(actor_id.to_string()))
    }

    /// All actors holding a role, sorted by handle. Dispatchers use this
    /// to pick a collector.
    pub fn list_by_role(&self, role: Role) -> Result<Vec<Actor>, AccessError> {
        Ok(self.store.actors_by_role(role)?)
    }
}
