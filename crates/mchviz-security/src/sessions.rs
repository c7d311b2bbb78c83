//! Server-side login sessions.
//!
//! A session id is a random UUID handed to the browser in a cookie; the
//! store maps it back to the logged-in account.

use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use uuid::Uuid;

use crate::users::User;

/// How long a "remember me" login stays valid.
pub const REMEMBER_DURATION_DAYS: i64 = 365;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub id: String,
    pub email: String,
    pub remember: bool,
    pub created_at: DateTime<Utc>,
    /// `None` for sessions that last until the browser drops the cookie.
    pub expires_at: Option<DateTime<Utc>>,
}

impl Session {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|at| at <= now)
    }
}

#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: DashMap<String, Session>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a session for `user`.
    pub fn login(&self, user: &User, remember: bool) -> Session {
        let now = Utc::now();
        let session = Session {
            id: Uuid::new_v4().to_string(),
            email: user.email.clone(),
            remember,
            created_at: now,
            expires_at: remember.then(|| now + Duration::days(REMEMBER_DURATION_DAYS)),
        };
        self.sessions.insert(session.id.clone(), session.clone());
        tracing::info!(email = %session.email, remember, "session started");
        session
    }

    /// Active session for `id`. Expired sessions are dropped on lookup.
    pub fn get(&self, id: &str) -> Option<Session> {
        let session = self.sessions.get(id)?.clone();
        if session.is_expired(Utc::now()) {
            self.sessions.remove(id);
            return None;
        }
        Some(session)
    }

    /// End a session. Returns whether it existed.
    pub fn logout(&self, id: &str) -> bool {
        match self.sessions.remove(id) {
            Some((_, session)) => {
                tracing::info!(email = %session.email, "session ended");
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
