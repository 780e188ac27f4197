use std::fmt;

use serde::{Deserialize, Serialize};

use crate::id::ActorId;
use crate::role::Role;

/// Opaque, transport-safe encoding of a salted secret digest.
///
/// Produced and consumed only by the credential vault; everything else
/// treats it as an opaque token. `Debug` is redacted so an actor dumped
/// into a log line does not carry credential material.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HashedSecret(String);

impl HashedSecret {
    /// Wrap an already-encoded salt‖digest string.
    pub fn from_encoded(encoded: String) -> Self {
        Self(encoded)
    }

    /// The encoded form, for storage or verification.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for HashedSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("HashedSecret(..)")
    }
}

/// A registered participant: requester, dispatcher, or collector.
///
/// The role is fixed at registration. Handle and contact email are unique
/// across all actors; the store enforces both as invariants of last resort.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Actor {
    pub id: ActorId,
    pub handle: String,
    pub secret_hash: HashedSecret,
    pub display_name: String,
    pub role: Role,
    pub contact_email: String,
    pub contact_phone: Option<String>,
}

impl Actor {
    pub fn new(
        handle: impl Into<String>,
        secret_hash: HashedSecret,
        display_name: impl Into<String>,
        role: Role,
        contact_email: impl Into<String>,
        contact_phone: Option<String>,
    ) -> Self {
        Self {
            id: ActorId::new(),
            handle: handle.into(),
            secret_hash,
            display_name: display_name.into(),
            role,
            contact_email: contact_email.into(),
            contact_phone,
        }
    }
}
