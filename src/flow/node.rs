use serde::Deserialize;

use crate::{
    ChatflowError, Result,
    flow::condition::Condition,
    model::{NodeId, NodeModel},
};

/// Raw `data` payload of a `sendMessage` node.
#[derive(Deserialize)]
struct SendMessageData {
    #[serde(default)]
    message: String,
}

/// Raw `data` payload of a `question` node.
#[derive(Deserialize)]
struct QuestionData {
    #[serde(default)]
    question: String,
    #[serde(default)]
    variable: Option<String>,
}

/// Typed node payload, dispatched on exhaustively by the interpreter.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// Entry point of a flow; passes straight through to its successor.
    Start,
    /// Emits a rendered message and continues.
    SendMessage {
        message: String,
    },
    /// Emits a rendered question and suspends until the user's next message,
    /// which is captured under `variable` (`last_reply` when unset).
    Question {
        question: String,
        variable: Option<String>,
    },
    /// Branches on a variable test.
    Condition(Condition),
    /// Any node type this engine does not recognize. Kept so an edited flow
    /// still loads; treated as a dead end at runtime.
    Unknown,
}

/// Runtime node representation.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    /// node id
    pub id: NodeId,
    /// typed payload
    pub kind: NodeKind,
}

impl TryFrom<&NodeModel> for Node {
    type Error = ChatflowError;

    fn try_from(model: &NodeModel) -> Result<Self> {
        let kind = match model.kind.as_str() {
            "start" => NodeKind::Start,
            "sendMessage" => {
                let data: SendMessageData = parse_data(model)?;
                NodeKind::SendMessage {
                    message: data.message,
                }
            }
            "question" => {
                let data: QuestionData = parse_data(model)?;
                NodeKind::Question {
                    question: data.question,
                    variable: data.variable,
                }
            }
            "condition" => NodeKind::Condition(parse_data(model)?),
            _ => NodeKind::Unknown,
        };

        Ok(Self {
            id: model.id.clone(),
            kind,
        })
    }
}

fn parse_data<T: serde::de::DeserializeOwned>(model: &NodeModel) -> Result<T> {
    serde_json::from_value(model.data.clone()).map_err(|e| ChatflowError::Node(format!("node {} has invalid '{}' data: {}", model.id, model.kind, e)))
}
