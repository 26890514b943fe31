use serde::{Deserialize, Serialize};

/// Unique identifier for a node within a flow.
pub type NodeId = String;

/// Node placement on the editor canvas. Carried through verbatim for the
/// external editor; interpretation never reads it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// Wire-level node representation as produced by the external flow editor.
///
/// `kind` is the raw node type string and `data` its type-specific payload;
/// both are parsed into the typed [`Node`](crate::Node) representation when a
/// flow snapshot is built.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NodeModel {
    pub id: NodeId,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub position: Position,
    #[serde(default)]
    pub data: serde_json::Value,
}
