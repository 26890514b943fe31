//! # Chatflow
//!
//! Chatflow is a lightweight chatbot flow execution engine written in Rust.
//! It is designed to be embedded behind a messaging transport to drive
//! scripted conversations: each conversation walks a directed graph of
//! message, question and condition nodes, capturing the user's replies into
//! variables and substituting them into later messages.
//!
//! ## Core Features
//!
//! - **Message-Driven State Machine**: one call per inbound message, draining
//!   the graph until a question suspends the conversation or it ends
//! - **Immutable Flow Snapshots**: the active flow is swapped wholesale on
//!   reload, so interpretation never observes a half-edited graph
//! - **Per-Conversation Serialization**: messages for the same conversation
//!   are interpreted one at a time, different conversations run in parallel
//! - **Pluggable Persistence**: flows are read through the `FlowRepository`
//!   trait; an in-memory implementation is provided for tests and embedding
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use chatflow::{EngineBuilder, MemRepository};
//!
//! let repository = Arc::new(MemRepository::new());
//! let engine = EngineBuilder::new().repository(repository.clone()).build()?;
//!
//! // The editor layer saves a flow and activates it ...
//! engine.reload();
//!
//! // ... then the messaging transport feeds inbound messages.
//! let replies = engine.process_inbound_message("5511999999999", "hi");
//! ```

mod builder;
mod common;
mod config;
mod engine;
mod error;
mod flow;
mod model;
mod runtime;
mod store;
mod utils;

use std::sync::{Arc, RwLock};

pub use builder::EngineBuilder;
pub use config::{Config, SessionConfig};
pub use engine::Engine;
pub use error::ChatflowError;
pub use flow::{Condition, ConditionOperator, Edge, EdgeBranch, EdgeId, FlowSnapshot, Node, NodeKind};
pub use model::*;
pub use runtime::{ConversationId, Reply, Session};
pub use store::{FlowRepository, FlowStore, MemRepository, SessionStore};

/// Result type alias for Chatflow operations.
pub type Result<T> = std::result::Result<T, ChatflowError>;

/// Thread-safe shared lock wrapper using Arc<RwLock<T>>.
pub(crate) type ShareLock<T> = Arc<RwLock<T>>;
