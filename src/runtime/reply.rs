use serde::{Deserialize, Serialize};

/// Outbound message directive produced by interpretation.
///
/// The messaging transport delivers replies in order on the conversation they
/// were produced for. Only text replies exist today; the tagged encoding
/// (`{ "type": "text", "content": ... }`) leaves room for richer kinds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "content", rename_all = "camelCase")]
pub enum Reply {
    Text(String),
}

impl Reply {
    pub fn text(content: impl Into<String>) -> Self {
        Reply::Text(content.into())
    }

    /// The reply's message body.
    pub fn content(&self) -> &str {
        match self {
            Reply::Text(content) => content,
        }
    }
}
