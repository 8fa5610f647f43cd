use std::collections::HashMap;

use tokio::sync::RwLock;

use crate::domain::{MailSession, UserId};

/// Process-local map of active inboxes, keyed by Telegram user.
///
/// Lives exactly as long as the process: there is no eviction and no removal,
/// and everything is gone after a restart (users come back with `/repair`).
/// One entry per user, last write wins.
#[derive(Debug, Default)]
pub struct SessionStore {
    inner: RwLock<HashMap<UserId, MailSession>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Unconditional overwrite.
    pub async fn put(&self, user_id: UserId, session: MailSession) {
        self.inner.write().await.insert(user_id, session);
    }

    /// `None` means "no active inbox", not an error.
    pub async fn get(&self, user_id: UserId) -> Option<MailSession> {
        self.inner.read().await.get(&user_id).cloned()
    }
}
