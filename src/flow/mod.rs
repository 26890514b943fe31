//! Runtime flow representation.
//!
//! Wire-level models from the editor are parsed into typed nodes and edges
//! and indexed into an immutable [`FlowSnapshot`] for interpretation.

mod condition;
mod edge;
mod node;
mod snapshot;
pub(crate) mod template;

pub use condition::{Condition, ConditionOperator};
pub use edge::{Edge, EdgeBranch, EdgeId};
pub use node::{Node, NodeKind};
pub use snapshot::FlowSnapshot;
