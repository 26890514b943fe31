//! Flow execution engine - the main entry point for Chatflow.
//!
//! The engine advances one conversation per inbound message:
//! - Resolves (or creates) the conversation's session
//! - Interprets the active flow snapshot node by node
//! - Emits ordered outbound replies for the messaging transport
//! - Persists the session only while suspended at a question node

use std::sync::{Arc, Mutex};

use tracing::{debug, warn};

use crate::{
    Config,
    common::MemCache,
    flow::{EdgeBranch, FlowSnapshot, NodeKind, template},
    model::NodeId,
    runtime::{ConversationId, Reply, Session},
    store::{FlowRepository, FlowStore, SessionStore},
};

/// The conversational state machine.
///
/// `process_inbound_message` never fails: configuration absence, graph
/// inconsistencies and load failures all degrade to an empty reply list,
/// because the messaging transport has no sensible way to surface an error
/// to the end user. Messages for the same conversation are interpreted one
/// at a time; different conversations run fully in parallel.
///
/// # Example
///
/// ```rust,ignore
/// let engine = EngineBuilder::new().repository(repository).build()?;
/// engine.reload();
///
/// for reply in engine.process_inbound_message("5511999999999", "hi") {
///     transport.send_text(chat, reply.content());
/// }
/// ```
pub struct Engine {
    /// Active flow snapshot holder.
    flows: Arc<FlowStore>,
    /// Per-conversation execution state.
    sessions: Arc<SessionStore>,
    /// Persistence collaborator, exposed for the management layer.
    repository: Arc<dyn FlowRepository>,
    /// Per-conversation interpretation locks.
    locks: MemCache<ConversationId, Arc<Mutex<()>>>,
    /// Maximum node hops per inbound message.
    max_hops: usize,
}

impl Engine {
    /// Creates a new engine with the given configuration, reading flows
    /// through `repository`.
    pub fn new_with_config(
        config: Config,
        repository: Arc<dyn FlowRepository>,
    ) -> Self {
        let sessions = match config.session.idle_timeout_secs {
            Some(secs) => SessionStore::with_idle_timeout(config.session.capacity, std::time::Duration::from_secs(secs)),
            None => SessionStore::new(config.session.capacity),
        };

        Self {
            flows: Arc::new(FlowStore::new(repository.clone())),
            sessions: Arc::new(sessions),
            repository,
            locks: MemCache::new(config.session.capacity),
            max_hops: config.max_hops_per_message,
        }
    }

    /// Re-fetches the active flow snapshot. Invoked by the management layer
    /// after an editor save or an activation toggle; safe to call while
    /// messages are in flight.
    pub fn reload(&self) {
        self.flows.reload();
    }

    /// Returns the flow snapshot store.
    pub fn flows(&self) -> Arc<FlowStore> {
        self.flows.clone()
    }

    /// Returns the session store.
    pub fn sessions(&self) -> Arc<SessionStore> {
        self.sessions.clone()
    }

    /// Returns the persistence collaborator.
    pub fn repository(&self) -> Arc<dyn FlowRepository> {
        self.repository.clone()
    }

    /// Advances the conversation by one inbound message and returns the
    /// ordered replies to deliver.
    pub fn process_inbound_message(
        &self,
        conversation_id: &str,
        message_text: &str,
    ) -> Vec<Reply> {
        if conversation_id.is_empty() {
            return Vec::new();
        }
        let conversation_id: ConversationId = conversation_id.to_string();

        // Serialize interpretation per conversation: entry and loop both
        // read-then-write the session without compare-and-swap.
        let lock = self.locks.get_or_insert_with(conversation_id.clone(), || Arc::new(Mutex::new(())));
        let _guard = lock.lock().unwrap();

        let Some(flow) = self.flows.active() else {
            return Vec::new();
        };

        self.interpret(&flow, &conversation_id, message_text)
    }

    fn interpret(
        &self,
        flow: &FlowSnapshot,
        conversation_id: &ConversationId,
        message_text: &str,
    ) -> Vec<Reply> {
        let mut session = self.sessions.get(conversation_id);
        let mut replies = Vec::new();

        let Some(mut current) = self.entry_node(flow, conversation_id, &mut session, message_text) else {
            return replies;
        };

        let mut hops = 0;
        loop {
            hops += 1;
            if hops > self.max_hops {
                warn!(
                    "conversation {} exceeded {} hops in flow \"{}\", ending session",
                    conversation_id,
                    self.max_hops,
                    flow.name()
                );
                self.sessions.remove(conversation_id);
                break;
            }

            let Some(node) = flow.node(&current) else {
                // The flow was edited underneath us and the node vanished.
                warn!("node {} not found in flow \"{}\", ending session for {}", current, flow.name(), conversation_id);
                self.sessions.remove(conversation_id);
                break;
            };

            let next = match &node.kind {
                NodeKind::Start => flow.next_target(&node.id, EdgeBranch::Unconditional),
                NodeKind::SendMessage {
                    message,
                } => {
                    replies.push(Reply::text(template::render(message, &session.variables)));
                    flow.next_target(&node.id, EdgeBranch::Unconditional)
                }
                NodeKind::Question {
                    question, ..
                } => {
                    replies.push(Reply::text(template::render(question, &session.variables)));
                    session.current_node_id = Some(node.id.clone());
                    self.sessions.put(conversation_id.clone(), session);
                    debug!("conversation {} suspended at question {}", conversation_id, node.id);
                    return replies;
                }
                NodeKind::Condition(condition) => {
                    let branch = if condition.evaluate(&session.variables) {
                        EdgeBranch::OnTrue
                    } else {
                        EdgeBranch::OnFalse
                    };
                    flow.next_target(&node.id, branch)
                }
                NodeKind::Unknown => {
                    warn!("node {} has a type unknown to this engine, ending session for {}", node.id, conversation_id);
                    None
                }
            };

            match next {
                Some(target) => current = target.clone(),
                None => {
                    // Dead end: the conversation ends silently and the next
                    // message starts the flow from the beginning.
                    self.sessions.remove(conversation_id);
                    break;
                }
            }
        }

        replies
    }

    /// Entry step: determine the node to resume interpretation at, capturing
    /// the user's reply when the conversation was suspended at a question.
    /// `None` means the conversation cannot (or should not) proceed.
    fn entry_node(
        &self,
        flow: &FlowSnapshot,
        conversation_id: &ConversationId,
        session: &mut Session,
        message_text: &str,
    ) -> Option<NodeId> {
        let Some(previous_id) = session.current_node_id.clone() else {
            // New conversation: begin at the start node. Without one the
            // flow cannot be entered; nothing is persisted.
            return flow.start_node().map(|node| node.id.clone());
        };

        let Some(previous) = flow.node(&previous_id) else {
            // The parked node no longer exists in the (possibly reloaded)
            // active flow.
            warn!("stale cursor {} for conversation {}, ending session", previous_id, conversation_id);
            self.sessions.remove(conversation_id);
            return None;
        };

        if let NodeKind::Question {
            variable, ..
        } = &previous.kind
        {
            let name = variable.as_deref().filter(|v| !v.is_empty()).unwrap_or("last_reply");
            session.variables.insert(name.to_string(), message_text.trim().to_string());
        }

        let branch = match &previous.kind {
            NodeKind::Condition(condition) => {
                if condition.evaluate(&session.variables) {
                    EdgeBranch::OnTrue
                } else {
                    EdgeBranch::OnFalse
                }
            }
            _ => EdgeBranch::Unconditional,
        };

        match flow.next_target(&previous_id, branch) {
            Some(target) => Some(target.clone()),
            None => {
                self.sessions.remove(conversation_id);
                None
            }
        }
    }
}
