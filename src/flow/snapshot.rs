//! Immutable, indexed view of a flow graph.
//!
//! A snapshot is built once from the wire-level model, validated, and then
//! shared read-only between all conversations. Reloading the active flow
//! swaps the whole snapshot; it is never mutated in place.

use std::collections::HashMap;

use tracing::warn;

use crate::{
    ChatflowError, Result,
    flow::{
        edge::{Edge, EdgeBranch},
        node::{Node, NodeKind},
    },
    model::{FlowId, FlowModel, NodeId},
};

/// Validated, read-only flow graph with lookup indexes for interpretation.
///
/// Load-time validation enforces the branch invariant: a condition node has
/// at most one `true` and one `false` edge, every other node at most one
/// unconditional edge. Edges referencing nodes that do not exist are
/// rejected outright.
#[derive(Debug, Clone, PartialEq)]
pub struct FlowSnapshot {
    flow_id: FlowId,
    name: String,
    nodes: HashMap<NodeId, Node>,
    outgoing: HashMap<NodeId, Vec<Edge>>,
    start: Option<NodeId>,
}

impl FlowSnapshot {
    /// id of the flow this snapshot was built from
    pub fn flow_id(&self) -> &str {
        &self.flow_id
    }

    /// flow display name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// get node by id
    pub fn node(
        &self,
        id: &str,
    ) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// the flow's start node, if it has one
    pub fn start_node(&self) -> Option<&Node> {
        self.start.as_ref().and_then(|id| self.nodes.get(id))
    }

    /// Follow the outgoing edge of `source` tagged with `branch`, returning
    /// the target node id.
    pub fn next_target(
        &self,
        source: &str,
        branch: EdgeBranch,
    ) -> Option<&NodeId> {
        self.outgoing.get(source).and_then(|edges| edges.iter().find(|e| e.branch == branch)).map(|e| &e.target)
    }

    /// number of nodes in the graph
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }
}

impl TryFrom<&FlowModel> for FlowSnapshot {
    type Error = ChatflowError;

    fn try_from(model: &FlowModel) -> Result<Self> {
        let mut nodes: HashMap<NodeId, Node> = HashMap::new();
        let mut start: Option<NodeId> = None;

        for node_model in model.nodes.iter() {
            let node = Node::try_from(node_model)?;
            if node.kind == NodeKind::Start {
                if let Some(first) = &start {
                    warn!("flow \"{}\" has more than one start node, keeping {}", model.name, first);
                } else {
                    start = Some(node.id.clone());
                }
            }
            if nodes.insert(node.id.clone(), node).is_some() {
                return Err(ChatflowError::Node(format!("duplicate node id {}", node_model.id)));
            }
        }

        let mut outgoing: HashMap<NodeId, Vec<Edge>> = HashMap::new();
        for edge_model in model.edges.iter() {
            let edge = Edge::try_from(edge_model)?;
            if !nodes.contains_key(&edge.source) {
                return Err(ChatflowError::Edge(format!("source node {} not found", edge.source)));
            }
            if !nodes.contains_key(&edge.target) {
                return Err(ChatflowError::Edge(format!("target node {} not found", edge.target)));
            }

            let edges = outgoing.entry(edge.source.clone()).or_default();
            if edges.iter().any(|e| e.branch == edge.branch) {
                return Err(ChatflowError::Edge(format!(
                    "node {} has more than one '{}' edge",
                    edge.source,
                    edge.branch.as_ref()
                )));
            }
            edges.push(edge);
        }

        Ok(Self {
            flow_id: model.id.clone(),
            name: model.name.clone(),
            nodes,
            outgoing,
            start,
        })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::model::{EdgeModel, NodeModel};

    fn node(
        id: &str,
        kind: &str,
        data: serde_json::Value,
    ) -> NodeModel {
        NodeModel {
            id: id.to_string(),
            kind: kind.to_string(),
            position: Default::default(),
            data,
        }
    }

    fn edge(
        id: &str,
        source: &str,
        target: &str,
        handle: Option<&str>,
    ) -> EdgeModel {
        EdgeModel {
            id: id.to_string(),
            source: source.to_string(),
            target: target.to_string(),
            source_handle: handle.map(str::to_string),
            target_handle: None,
        }
    }

    fn two_step_model() -> FlowModel {
        FlowModel {
            id: "flow-1".to_string(),
            name: "Welcome".to_string(),
            nodes: vec![
                node("n1", "start", json!({})),
                node("n2", "sendMessage", json!({ "message": "hi" })),
            ],
            edges: vec![edge("e1", "n1", "n2", None)],
            ..Default::default()
        }
    }

    #[test]
    fn test_build_and_lookup() {
        let snapshot = FlowSnapshot::try_from(&two_step_model()).unwrap();
        assert_eq!(snapshot.node_count(), 2);
        assert_eq!(snapshot.start_node().unwrap().id, "n1");
        assert_eq!(snapshot.next_target("n1", EdgeBranch::Unconditional).unwrap().as_str(), "n2");
        assert!(snapshot.next_target("n2", EdgeBranch::Unconditional).is_none());
    }

    #[test]
    fn test_missing_start_tolerated() {
        let mut model = two_step_model();
        model.nodes.remove(0);
        model.edges.clear();
        let snapshot = FlowSnapshot::try_from(&model).unwrap();
        assert!(snapshot.start_node().is_none());
    }

    #[test]
    fn test_dangling_edge_rejected() {
        let mut model = two_step_model();
        model.edges.push(edge("e2", "n2", "ghost", None));
        assert!(FlowSnapshot::try_from(&model).is_err());
    }

    #[test]
    fn test_duplicate_unconditional_edge_rejected() {
        let mut model = two_step_model();
        model.edges.push(edge("e2", "n1", "n2", None));
        assert!(FlowSnapshot::try_from(&model).is_err());
    }

    #[test]
    fn test_condition_branches() {
        let model = FlowModel {
            id: "flow-2".to_string(),
            name: "Branching".to_string(),
            nodes: vec![
                node("c", "condition", json!({ "variable": "v", "operator": "equals", "value": "yes" })),
                node("t", "sendMessage", json!({ "message": "yes!" })),
                node("f", "sendMessage", json!({ "message": "no!" })),
            ],
            edges: vec![edge("e1", "c", "t", Some("true")), edge("e2", "c", "f", Some("false"))],
            ..Default::default()
        };

        let snapshot = FlowSnapshot::try_from(&model).unwrap();
        assert_eq!(snapshot.next_target("c", EdgeBranch::OnTrue).unwrap().as_str(), "t");
        assert_eq!(snapshot.next_target("c", EdgeBranch::OnFalse).unwrap().as_str(), "f");
        assert!(snapshot.next_target("c", EdgeBranch::Unconditional).is_none());
    }

    #[test]
    fn test_duplicate_condition_branch_rejected() {
        let model = FlowModel {
            id: "flow-3".to_string(),
            name: "Broken".to_string(),
            nodes: vec![
                node("c", "condition", json!({ "variable": "v", "operator": "equals", "value": "yes" })),
                node("t", "sendMessage", json!({ "message": "yes!" })),
            ],
            edges: vec![edge("e1", "c", "t", Some("true")), edge("e2", "c", "t", Some("true"))],
            ..Default::default()
        };
        assert!(FlowSnapshot::try_from(&model).is_err());
    }
}
