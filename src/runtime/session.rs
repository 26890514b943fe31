use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::model::NodeId;

/// Opaque conversation identifier, e.g. a phone-derived chat address.
pub type ConversationId = String;

/// Per-conversation execution state: the node the conversation is parked at
/// plus the variables captured from the user's replies.
///
/// A session is only persisted while a conversation is suspended at a
/// question node; every terminal outcome removes it, so the next inbound
/// message starts the flow from the beginning.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// Node the conversation resumes at; `None` means not yet started.
    pub current_node_id: Option<NodeId>,
    /// Captured variables, keyed by name.
    pub variables: HashMap<String, String>,
}
