use std::collections::HashMap;
use std::sync::Arc;
use chrono::{DateTime, Duration, Utc};
use log::{debug, info};
use tokio::sync::Mutex;
use uuid::Uuid;
use crate::services::letter_game::LetterGame;
use crate::services::picture_game::PictureGame;

/// Everything one visitor has going on
#[derive(Debug)]
pub struct Session {
    /// Words handed from the home view to the letters view
    pub related_words: Vec<String>,
    pub letters: Option<LetterGame>,
    pub pictures: Option<PictureGame>,
    last_seen: DateTime<Utc>,
}

impl Session {
    fn new(now: DateTime<Utc>) -> Self {
        Self {
            related_words: Vec::new(),
            letters: None,
            pictures: None,
            last_seen: now,
        }
    }
}

pub type SessionHandle = Arc<Mutex<Session>>;

/// In-memory sessions keyed by the visitor's cookie id
pub struct SessionStore {
    sessions: Mutex<HashMap<Uuid, SessionHandle>>,
    ttl: Duration,
}

impl SessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            ttl,
        }
    }

    /// Session for `id`, or a fresh one. The bool is true when the session was created.
    pub async fn resolve(&self, id: Option<Uuid>) -> (Uuid, SessionHandle, bool) {
        self.resolve_at(id, Utc::now()).await
    }

    async fn resolve_at(&self, id: Option<Uuid>, now: DateTime<Utc>) -> (Uuid, SessionHandle, bool) {
        let mut sessions = self.sessions.lock().await;

        let existing = id.and_then(|id| sessions.get(&id).map(|handle| (id, Arc::clone(handle))));
        if let Some((id, handle)) = existing {
            drop(sessions);
            handle.lock().await.last_seen = now;
            return (id, handle, false);
        }

        self.prune(&mut sessions, now);

        let id = Uuid::new_v4();
        let handle = Arc::new(Mutex::new(Session::new(now)));
        sessions.insert(id, Arc::clone(&handle));
        debug!("Created session {} ({} active)", id, sessions.len());
        (id, handle, true)
    }

    fn prune(&self, sessions: &mut HashMap<Uuid, SessionHandle>, now: DateTime<Utc>) {
        let before = sessions.len();
        // Sessions busy with a request are in use, so keep them
        sessions.retain(|_, handle| match handle.try_lock() {
            Ok(session) => now - session.last_seen <= self.ttl,
            Err(_) => true,
        });
        let pruned = before - sessions.len();
        if pruned > 0 {
            info!("Pruned {} idle sessions", pruned);
        }
    }

    #[cfg(test)]
    pub async fn len(&self) -> usize {
        self.sessions.lock().await.len()
    }
}
