//! Login sessions.
//!
//! A session is an opaque bearer token mapped to a user identifier. Tokens
//! live in memory only and expire after the configured TTL.

use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use std::sync::Arc;
use uuid::Uuid;

use super::ServiceError;

#[derive(Debug, Clone)]
struct Session {
    user_id: String,
    expires_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct IssuedSession {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

#[derive(Clone)]
pub struct SessionStore {
    sessions: Arc<DashMap<String, Session>>,
    ttl: Duration,
}

impl SessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: Arc::new(DashMap::new()),
            ttl,
        }
    }

    /// Issue a fresh token for `user_id`, sweeping every expired session first.
    pub fn issue(&self, user_id: &str) -> Result<IssuedSession, ServiceError> {
        let now = Utc::now();
        let expires_at = now
            .checked_add_signed(self.ttl)
            .ok_or(ServiceError::SessionExpiryOutOfRange)?;

        self.sessions.retain(|_, s| s.expires_at > now);

        let token = Uuid::new_v4().to_string();
        self.sessions.insert(
            token.clone(),
            Session {
                user_id: user_id.to_string(),
                expires_at,
            },
        );

        Ok(IssuedSession { token, expires_at })
    }

    /// Return the user behind `token`, dropping it if it has expired.
    pub fn resolve(&self, token: &str) -> Option<String> {
        let now = Utc::now();

        if let Some(session) = self.sessions.get(token) {
            if session.expires_at > now {
                return Some(session.user_id.clone());
            }
        }

        self.sessions.remove_if(token, |_, s| s.expires_at <= now);
        None
    }

    pub fn revoke(&self, token: &str) -> bool {
        self.sessions.remove(token).is_some()
    }

    /// Number of live or not yet swept sessions.
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
