//! Storage layer for flow definitions and conversation sessions.
//!
//! Flow persistence is abstracted behind the [`FlowRepository`] trait; the
//! engine only ever reads the active flow through it, while the management
//! surface (list/create/update/delete/save/activate) exists for the external
//! editor layer. `MemRepository` provides an in-memory implementation for
//! tests and embedding.

mod flow;
mod mem;
mod session;

pub use flow::FlowStore;
pub use mem::MemRepository;
pub use session::SessionStore;

use crate::{
    Result,
    model::{EdgeModel, FlowModel, NodeModel},
};

/// Persistence collaborator contract for flow definitions.
///
/// Implementations must apply `set_active` atomically: activating one flow
/// deactivates every other, so at most one flow is active at any time.
pub trait FlowRepository: Send + Sync {
    /// All flows, ordered by creation time.
    fn list_flows(&self) -> Result<Vec<FlowModel>>;

    /// Finds a flow by id.
    fn find_flow(
        &self,
        id: &str,
    ) -> Result<FlowModel>;

    /// Creates a new, inactive flow with a generated id.
    fn create_flow(
        &self,
        name: &str,
        description: &str,
    ) -> Result<FlowModel>;

    /// Updates a flow's name and description.
    fn update_flow(
        &self,
        id: &str,
        name: &str,
        description: &str,
    ) -> Result<FlowModel>;

    /// Deletes a flow together with its structure.
    fn delete_flow(
        &self,
        id: &str,
    ) -> Result<bool>;

    /// Replaces a flow's nodes and edges wholesale (editor save).
    fn save_structure(
        &self,
        flow_id: &str,
        nodes: &[NodeModel],
        edges: &[EdgeModel],
    ) -> Result<()>;

    /// Marks `flow_id` active and deactivates all other flows.
    fn set_active(
        &self,
        flow_id: &str,
    ) -> Result<bool>;

    /// The single active flow with its nodes and edges, if any.
    fn active_flow(&self) -> Result<Option<FlowModel>>;
}
