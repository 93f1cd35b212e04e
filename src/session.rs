//! Session context shared by the controller and the navigation surface.
//!
//! Replaces the ambient application context of older builds with an explicit,
//! narrowly-scoped object: the resolved bearer token plus the employee-id
//! handoff for the detail surface. Created at session start, torn down when
//! the operator navigates away.

use tracing::info;

use crate::error::Result;
use crate::storage::{NOT_AUTHORIZED_KEY, StorageScope, USER_KEY, resolve_token};

/// Per-session state: resolved token, selected employee, storage handles.
pub struct Session {
    persistent: Box<dyn StorageScope>,
    transient: Box<dyn StorageScope>,
    token: String,
    selected_employee: Option<i64>,
}

impl Session {
    /// Build a session by resolving the token from the two scopes.
    ///
    /// Resolution happens once, here; later storage changes are not observed.
    pub fn resolve(persistent: Box<dyn StorageScope>, transient: Box<dyn StorageScope>) -> Self {
        let token = resolve_token(persistent.as_ref(), transient.as_ref());
        Self {
            persistent,
            transient,
            token,
            selected_employee: None,
        }
    }

    /// The bearer token, empty when unauthenticated.
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Whether a token was resolved.
    pub fn is_authenticated(&self) -> bool {
        !self.token.is_empty()
    }

    /// Record that the service rejected the token.
    ///
    /// Writes the flag the login surface consumes, drops the cached credential
    /// records from both scopes, and forgets the token. The session is done
    /// after this; there is no automatic retry.
    pub fn mark_unauthorized(&mut self) -> Result<()> {
        info!("Session token rejected, flagging for the login surface");
        self.persistent.set(NOT_AUTHORIZED_KEY, "true")?;
        self.persistent.remove(USER_KEY)?;
        self.transient.remove(USER_KEY)?;
        self.token.clear();
        Ok(())
    }

    /// Hand off an employee id to the detail surface.
    pub fn select_employee(&mut self, id: i64) {
        self.selected_employee = Some(id);
    }

    /// The employee id handed off to the detail surface, if any.
    pub fn selected_employee(&self) -> Option<i64> {
        self.selected_employee
    }
}
