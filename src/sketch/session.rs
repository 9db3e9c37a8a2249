use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, Instant};

use uuid::Uuid;

use crate::sketch::{
    invoker::{generate_sketch, GenerationOutcome},
    state::{dispatch, Effect, Event, SessionState},
    traits::ImageGenerator,
};

pub const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_secs(30 * 60);

struct SessionEntry {
    state: SessionState,
    last_seen: Instant,
}

impl SessionEntry {
    fn new() -> Self {
        Self {
            state: SessionState::new(),
            last_seen: Instant::now(),
        }
    }
}

/// In-memory sessions keyed by id. Sessions idle for longer than the
/// timeout are dropped the next time a session is created.
pub struct SessionStore {
    sessions: Mutex<HashMap<Uuid, SessionEntry>>,
    idle_timeout: Duration,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::with_idle_timeout(DEFAULT_IDLE_TIMEOUT)
    }
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_idle_timeout(idle_timeout: Duration) -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            idle_timeout,
        }
    }

    pub fn idle_timeout(&self) -> Duration {
        self.idle_timeout
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<Uuid, SessionEntry>> {
        self.sessions.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn create(&self) -> Uuid {
        self.prune_idle();
        let id = Uuid::new_v4();
        self.lock().insert(id, SessionEntry::new());
        log::debug!("Session started: {}", id);
        id
    }

    /// Drops sessions idle past the timeout. Sessions waiting on the image
    /// service are kept. Returns how many were dropped.
    pub fn prune_idle(&self) -> usize {
        let timeout = self.idle_timeout;
        let mut sessions = self.lock();
        let before = sessions.len();
        sessions.retain(|_, entry| entry.state.in_flight || entry.last_seen.elapsed() <= timeout);
        let pruned = before - sessions.len();
        if pruned > 0 {
            log::debug!("Dropped {} idle session(s)", pruned);
        }
        pruned
    }

    pub fn contains(&self, id: &Uuid) -> bool {
        self.lock().contains_key(id)
    }

    /// Marks the session as active. False if it does not exist.
    pub fn touch(&self, id: &Uuid) -> bool {
        match self.lock().get_mut(id) {
            Some(entry) => {
                entry.last_seen = Instant::now();
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn snapshot(&self, id: &Uuid) -> Option<SessionState> {
        self.lock().get(id).map(|entry| entry.state.clone())
    }

    /// Runs one transition under the lock and returns the effect it asks for.
    pub fn apply(&self, id: &Uuid, event: Event) -> Option<Effect> {
        let mut sessions = self.lock();
        let entry = sessions.get_mut(id)?;
        let transition = dispatch(std::mem::take(&mut entry.state), event);
        entry.state = transition.state;
        entry.last_seen = Instant::now();
        Some(transition.effect)
    }

    /// Applies `event` and carries out any generation it triggers.
    ///
    /// The generation runs on its own task and always reports back to the
    /// store, even if the caller stops waiting for it.
    pub async fn handle(
        self: &Arc<Self>,
        id: &Uuid,
        event: Event,
        generator: Arc<dyn ImageGenerator>,
    ) -> Option<SessionState> {
        if let Effect::Generate { prompt } = self.apply(id, event)? {
            let store = Arc::clone(self);
            let session = *id;
            let task = tokio::spawn(async move {
                let outcome = generate_sketch(generator.as_ref(), &prompt).await;
                store.finish(&session, outcome);
            });

            if let Err(e) = task.await {
                log::error!("Sketch generation task for {} failed: {}", id, e);
                self.finish(
                    id,
                    GenerationOutcome::Failed {
                        message: "sketch generation was interrupted".to_string(),
                    },
                );
            }
        }
        self.snapshot(id)
    }

    fn finish(&self, id: &Uuid, outcome: GenerationOutcome) {
        if self.apply(id, Event::GenerationFinished(outcome)).is_none() {
            log::warn!("Session {} ended before its sketch arrived", id);
        }
    }

    pub fn end(&self, id: &Uuid) -> bool {
        let removed = self.lock().remove(id).is_some();
        if removed {
            log::debug!("Session ended: {}", id);
        }
        removed
    }
}
