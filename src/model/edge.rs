use serde::{Deserialize, Serialize};

use crate::model::node::NodeId;

/// Wire-level edge representation as produced by the external flow editor.
///
/// `source_handle` distinguishes the `true`/`false` branches of a condition
/// node; it is absent on every other node type. `target_handle` is editor
/// metadata and is ignored by interpretation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EdgeModel {
    pub id: String,
    pub source: NodeId,
    pub target: NodeId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_handle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_handle: Option<String>,
}
