mod edge;
mod flow;
mod node;

pub use edge::EdgeModel;
pub use flow::{FlowId, FlowModel};
pub use node::{NodeId, NodeModel, Position};
