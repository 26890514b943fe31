use serde::{Deserialize, Serialize};

use crate::{
    ChatflowError, Result,
    model::{EdgeModel, NodeModel},
};

/// Unique identifier for a flow.
pub type FlowId = String;

/// A named conversation graph, together with its activation state.
///
/// At most one flow is active across the whole store at any time; activating
/// a flow atomically deactivates every other one. Flows are authored by the
/// external editor and only read by the execution engine.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FlowModel {
    pub id: FlowId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub is_active: bool,
    /// Creation timestamp in milliseconds.
    #[serde(default)]
    pub created_at: i64,
    /// Last update timestamp in milliseconds.
    #[serde(default)]
    pub updated_at: i64,
    #[serde(default)]
    pub nodes: Vec<NodeModel>,
    #[serde(default)]
    pub edges: Vec<EdgeModel>,
}

impl FlowModel {
    pub fn from_json(s: &str) -> Result<Self> {
        let flow = serde_json::from_str::<FlowModel>(s);
        match flow {
            Ok(v) => Ok(v),
            Err(e) => Err(ChatflowError::Flow(format!("{}", e))),
        }
    }
}
