use job_intake::workflows::application::{
    ApplicationWizard, SessionError, SessionId, SessionStore,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, Instant};
use tracing::debug;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Sessions untouched for this long are dropped along with their documents.
pub(crate) const SESSION_IDLE_TTL: Duration = Duration::from_secs(30 * 60);

struct StoredSession {
    wizard: ApplicationWizard,
    touched: Instant,
}

impl StoredSession {
    fn is_expired(&self, now: Instant, ttl: Duration) -> bool {
        now.saturating_duration_since(self.touched) >= ttl
    }
}

type SessionMap = HashMap<SessionId, StoredSession>;

/// Process-lifetime session storage. Sessions are lost on restart and evicted once idle.
#[derive(Clone)]
pub(crate) struct InMemorySessionStore {
    sessions: Arc<Mutex<SessionMap>>,
    idle_ttl: Duration,
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::with_idle_ttl(SESSION_IDLE_TTL)
    }
}

impl InMemorySessionStore {
    pub(crate) fn with_idle_ttl(idle_ttl: Duration) -> Self {
        Self {
            sessions: Arc::default(),
            idle_ttl,
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, SessionMap>, SessionError> {
        self.sessions
            .lock()
            .map_err(|_| SessionError::Unavailable("session mutex poisoned".to_string()))
    }

    /// Live session for `id`, dropping it first when it has gone idle.
    fn live<'a>(
        &self,
        guard: &'a mut SessionMap,
        id: &SessionId,
        now: Instant,
    ) -> Option<&'a mut StoredSession> {
        if guard
            .get(id)
            .is_some_and(|stored| stored.is_expired(now, self.idle_ttl))
        {
            guard.remove(id);
            debug!(session = %id, "idle session evicted");
        }
        guard.get_mut(id)
    }
}

impl SessionStore for InMemorySessionStore {
    fn open(&self, id: SessionId, wizard: ApplicationWizard) -> Result<(), SessionError> {
        let mut guard = self.lock()?;
        let now = Instant::now();
        let before = guard.len();
        guard.retain(|_, stored| !stored.is_expired(now, self.idle_ttl));
        if guard.len() < before {
            debug!(evicted = before - guard.len(), "idle sessions evicted");
        }
        if guard.contains_key(&id) {
            return Err(SessionError::Conflict(id));
        }
        guard.insert(
            id,
            StoredSession {
                wizard,
                touched: now,
            },
        );
        Ok(())
    }

    fn fetch(&self, id: &SessionId) -> Result<Option<ApplicationWizard>, SessionError> {
        let mut guard = self.lock()?;
        let now = Instant::now();
        Ok(self.live(&mut guard, id, now).map(|stored| {
            stored.touched = now;
            stored.wizard.clone()
        }))
    }

    fn with_session<T, F>(&self, id: &SessionId, apply: F) -> Result<T, SessionError>
    where
        F: FnOnce(&mut ApplicationWizard) -> T,
    {
        let mut guard = self.lock()?;
        let now = Instant::now();
        let stored = self
            .live(&mut guard, id, now)
            .ok_or(SessionError::NotFound(*id))?;
        stored.touched = now;
        Ok(apply(&mut stored.wizard))
    }
}
