//! Session collaborator capability.
//!
//! Authentication is external; the core only needs to know who the current
//! principal is and how to hand control back to the re-authentication flow
//! when credentials lapse. The capability is injected wherever remote
//! operations originate, never read from ambient global state.

use std::sync::Mutex;
use uuid::Uuid;

/// The authenticated identity owning a set of persisted elements.
pub type PrincipalId = Uuid;

/// Access to the embedding layer's session state.
pub trait SessionProvider: Send + Sync {
    /// The signed-in principal, or `None` when no session exists.
    fn current_principal(&self) -> Option<PrincipalId>;

    /// Hand off to the re-authentication flow (e.g. navigate to the auth
    /// page). Remote operations stay suspended until a principal returns.
    fn begin_reauth(&self);

    /// End the session.
    fn sign_out(&self);
}

/// A session provider backed by a plain value.
///
/// Useful in tests and in embeddings that resolve the session once up
/// front.
#[derive(Debug, Default)]
pub struct FixedSession {
    principal: Mutex<Option<PrincipalId>>,
}

impl FixedSession {
    /// Create a signed-in session for `principal`.
    pub fn signed_in(principal: PrincipalId) -> Self {
        Self {
            principal: Mutex::new(Some(principal)),
        }
    }

    /// Create a signed-out session.
    pub fn signed_out() -> Self {
        Self::default()
    }
}

impl SessionProvider for FixedSession {
    fn current_principal(&self) -> Option<PrincipalId> {
        *self.principal.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn begin_reauth(&self) {
        log::info!("re-authentication requested");
    }

    fn sign_out(&self) {
        *self.principal.lock().unwrap_or_else(|e| e.into_inner()) = None;
    }
}
