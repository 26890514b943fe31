use std::time::Duration;

use crate::{
    common::MemCache,
    runtime::{ConversationId, Session},
};

/// Tracks one execution cursor plus variable bag per conversation.
///
/// Backed by the concurrent cache, so whole-session inserts and removals
/// need no external locking. Capacity-bounded; optionally evicts sessions
/// that have sat idle longer than the configured timeout, so abandoned
/// conversations age out instead of accumulating.
pub struct SessionStore {
    sessions: MemCache<ConversationId, Session>,
}

impl SessionStore {
    pub fn new(capacity: usize) -> Self {
        Self {
            sessions: MemCache::new(capacity),
        }
    }

    pub fn with_idle_timeout(
        capacity: usize,
        idle_timeout: Duration,
    ) -> Self {
        Self {
            sessions: MemCache::with_idle_timeout(capacity, idle_timeout),
        }
    }

    /// The stored session for `conversation_id`, or a fresh default. The
    /// default is not persisted; callers decide whether the conversation
    /// continues.
    pub fn get(
        &self,
        conversation_id: &ConversationId,
    ) -> Session {
        self.sessions.get(conversation_id).unwrap_or_default()
    }

    /// The stored session for `conversation_id`, if one exists.
    pub fn find(
        &self,
        conversation_id: &ConversationId,
    ) -> Option<Session> {
        self.sessions.get(conversation_id)
    }

    /// Upserts the session for `conversation_id`.
    pub fn put(
        &self,
        conversation_id: ConversationId,
        session: Session,
    ) {
        self.sessions.set(conversation_id, session);
    }

    /// Removes the session; called on every terminal outcome.
    pub fn remove(
        &self,
        conversation_id: &ConversationId,
    ) {
        self.sessions.remove(conversation_id);
    }
}
