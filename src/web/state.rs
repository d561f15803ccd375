use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use uuid::Uuid;

use crate::error::{Result, RiddleError};
use crate::riddle_engine::{Backends, GameSession, SessionSettings};

pub type SharedSession = Arc<tokio::sync::Mutex<GameSession>>;

/// In-memory sessions keyed by ID, oldest evicted once `capacity` is reached.
#[derive(Default)]
pub struct SessionStore {
    sessions: HashMap<Uuid, SharedSession>,
    order: VecDeque<Uuid>,
}

impl SessionStore {
    pub fn insert(&mut self, id: Uuid, session: GameSession, capacity: usize) -> SharedSession {
        while self.sessions.len() >= capacity.max(1) {
            match self.order.pop_front() {
                Some(oldest) => {
                    self.sessions.remove(&oldest);
                    tracing::debug!(session_id = %oldest, "evicted session");
                }
                None => break,
            }
        }
        let shared = Arc::new(tokio::sync::Mutex::new(session));
        self.sessions.insert(id, Arc::clone(&shared));
        self.order.push_back(id);
        shared
    }

    pub fn get(&self, id: &Uuid) -> Option<SharedSession> {
        self.sessions.get(id).cloned()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

#[derive(Clone)]
pub struct AppState {
    store: Arc<Mutex<SessionStore>>,
    pub backends: Backends,
    pub settings: SessionSettings,
    pub max_sessions: usize,
}

impl AppState {
    pub fn new(backends: Backends, settings: SessionSettings, max_sessions: usize) -> Self {
        AppState {
            store: Arc::new(Mutex::new(SessionStore::default())),
            backends,
            settings,
            max_sessions,
        }
    }

    fn store(&self) -> std::sync::MutexGuard<'_, SessionStore> {
        // A panic while holding the lock cannot leave the map half-updated.
        self.store.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Start a session. A configured seed is offset per session so players
    /// don't all see the same riddle sequence. The handle stays valid even if
    /// the session is evicted right away.
    pub fn create_session(&self) -> (Uuid, SharedSession) {
        let id = Uuid::new_v4();
        let mut settings = self.settings.clone();
        settings.rng_seed = settings.rng_seed.map(|seed| seed ^ id.as_u128() as u64);
        let (shared, active) = {
            let mut store = self.store();
            let shared = store.insert(id, GameSession::new(settings), self.max_sessions);
            (shared, store.len())
        };
        tracing::info!(session_id = %id, active, "session created");
        (id, shared)
    }

    pub fn session(&self, id: &Uuid) -> Result<SharedSession> {
        self.store()
            .get(id)
            .ok_or_else(|| RiddleError::SessionNotFound(id.to_string()))
    }
}
