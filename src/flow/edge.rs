//! Runtime edge definitions for connecting nodes.
//!
//! Edges define the transition between nodes, supporting conditional
//! branching through branch tags (true/false on condition nodes).

use crate::{
    ChatflowError, Result,
    model::{EdgeModel, NodeId},
};

/// Unique identifier for an edge within a flow.
pub type EdgeId = String;

/// Branch tag identifying which outgoing edge of a node to follow.
///
/// Condition nodes carry one `OnTrue` and one `OnFalse` edge; every other
/// node type carries at most a single `Unconditional` edge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, strum::AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum EdgeBranch {
    /// Default branch for sequential flow.
    #[default]
    Unconditional,
    /// True branch of a condition node.
    OnTrue,
    /// False branch of a condition node.
    OnFalse,
}

/// Runtime edge representation connecting two nodes.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    /// Unique edge identifier.
    pub id: EdgeId,
    /// ID of the source node.
    pub source: NodeId,
    /// ID of the target node.
    pub target: NodeId,
    /// Which branch this edge connects from.
    pub branch: EdgeBranch,
}

impl TryFrom<&EdgeModel> for Edge {
    type Error = ChatflowError;

    fn try_from(model: &EdgeModel) -> Result<Self> {
        let branch = match model.source_handle.as_deref() {
            None | Some("") => EdgeBranch::Unconditional,
            Some("true") => EdgeBranch::OnTrue,
            Some("false") => EdgeBranch::OnFalse,
            Some(other) => {
                return Err(ChatflowError::Edge(format!("edge {} has unknown source handle '{}'", model.id, other)));
            }
        };

        Ok(Self {
            id: model.id.clone(),
            source: model.source.clone(),
            target: model.target.clone(),
            branch,
        })
    }
}
