use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::wizard::ApplicationWizard;

/// Opaque handle for one applicant's wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(Uuid);

impl SessionId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for SessionId {
    type Err = uuid::Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(value.trim()).map(Self)
    }
}

/// Storage for live wizards so the service and router can be exercised in isolation.
pub trait SessionStore: Send + Sync {
    fn open(&self, id: SessionId, wizard: ApplicationWizard) -> Result<(), SessionError>;

    fn fetch(&self, id: &SessionId) -> Result<Option<ApplicationWizard>, SessionError>;

    /// Run `apply` against the stored wizard while holding exclusive access to it.
    fn with_session<T, F>(&self, id: &SessionId, apply: F) -> Result<T, SessionError>
    where
        F: FnOnce(&mut ApplicationWizard) -> T;
}

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("session {0} not found")]
    NotFound(SessionId),
    #[error("session {0} already exists")]
    Conflict(SessionId),
    #[error("session store unavailable: {0}")]
    Unavailable(String),
}
