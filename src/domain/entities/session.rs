//! Login session entities.

use chrono::{DateTime, Utc};

use super::user::User;

/// An authenticated session snapshot.
///
/// `token` is the raw bearer value held by the client. The store only ever
/// sees its keyed hash (see [`SessionRecord`]).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub user: User,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    /// Returns true if the session has passed its expiry time.
    pub fn is_expired(&self) -> bool {
        Utc::now() >= self.expires_at
    }
}

/// A session as persisted: keyed by token hash, user eagerly joined.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionRecord {
    pub token_hash: String,
    pub user: User,
    pub expires_at: DateTime<Utc>,
}

impl SessionRecord {
    /// Returns true if the session has passed its expiry time.
    pub fn is_expired(&self) -> bool {
        Utc::now() >= self.expires_at
    }

    /// Attaches the raw token the record was looked up with.
    pub fn into_session(self, token: String) -> Session {
        Session {
            token,
            user: self.user,
            expires_at: self.expires_at,
        }
    }
}

/// Input data for persisting a new session.
#[derive(Debug, Clone)]
pub struct NewSession {
    pub token_hash: String,
    pub user_id: i64,
    pub expires_at: DateTime<Utc>,
}
