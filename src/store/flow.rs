use std::sync::{Arc, RwLock};

use tracing::{info, warn};

use crate::{ShareLock, flow::FlowSnapshot, store::FlowRepository};

/// Holds the active flow snapshot used for interpretation.
///
/// The snapshot is immutable once published; `reload()` swaps the whole
/// `Arc` under a short write lock, so concurrent readers observe either the
/// old graph or the new one, never a mix. Load failures are logged and
/// degrade to "no active flow" until the next successful reload.
pub struct FlowStore {
    repository: Arc<dyn FlowRepository>,
    active: ShareLock<Option<Arc<FlowSnapshot>>>,
}

impl FlowStore {
    pub fn new(repository: Arc<dyn FlowRepository>) -> Self {
        Self {
            repository,
            active: Arc::new(RwLock::new(None)),
        }
    }

    /// Re-fetches the active flow from the repository and swaps the
    /// snapshot. Safe to call at any time, including while messages are
    /// being interpreted.
    pub fn reload(&self) {
        let snapshot = match self.repository.active_flow() {
            Ok(Some(model)) => match FlowSnapshot::try_from(&model) {
                Ok(snapshot) => {
                    info!("chatbot flow \"{}\" loaded", model.name);
                    Some(Arc::new(snapshot))
                }
                Err(err) => {
                    warn!("chatbot flow \"{}\" rejected: {}", model.name, err);
                    None
                }
            },
            Ok(None) => {
                info!("no active chatbot flow found");
                None
            }
            Err(err) => {
                warn!("failed to load active chatbot flow: {}", err);
                None
            }
        };

        *self.active.write().unwrap() = snapshot;
    }

    /// The current snapshot, or `None` when no flow is configured.
    pub fn active(&self) -> Option<Arc<FlowSnapshot>> {
        self.active.read().unwrap().clone()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::{
        ChatflowError, Result,
        model::{EdgeModel, FlowModel, NodeModel},
        store::MemRepository,
    };

    struct FailingRepository;

    impl FlowRepository for FailingRepository {
        fn list_flows(&self) -> Result<Vec<FlowModel>> {
            Err(ChatflowError::Store("down".to_string()))
        }

        fn find_flow(
            &self,
            _id: &str,
        ) -> Result<FlowModel> {
            Err(ChatflowError::Store("down".to_string()))
        }

        fn create_flow(
            &self,
            _name: &str,
            _description: &str,
        ) -> Result<FlowModel> {
            Err(ChatflowError::Store("down".to_string()))
        }

        fn update_flow(
            &self,
            _id: &str,
            _name: &str,
            _description: &str,
        ) -> Result<FlowModel> {
            Err(ChatflowError::Store("down".to_string()))
        }

        fn delete_flow(
            &self,
            _id: &str,
        ) -> Result<bool> {
            Err(ChatflowError::Store("down".to_string()))
        }

        fn save_structure(
            &self,
            _flow_id: &str,
            _nodes: &[NodeModel],
            _edges: &[EdgeModel],
        ) -> Result<()> {
            Err(ChatflowError::Store("down".to_string()))
        }

        fn set_active(
            &self,
            _flow_id: &str,
        ) -> Result<bool> {
            Err(ChatflowError::Store("down".to_string()))
        }

        fn active_flow(&self) -> Result<Option<FlowModel>> {
            Err(ChatflowError::Store("down".to_string()))
        }
    }

    fn seeded_repository() -> Arc<MemRepository> {
        let repository = Arc::new(MemRepository::new());
        let flow = repository.create_flow("Welcome", "").unwrap();
        let nodes = vec![
            NodeModel {
                id: "n1".to_string(),
                kind: "start".to_string(),
                ..Default::default()
            },
            NodeModel {
                id: "n2".to_string(),
                kind: "sendMessage".to_string(),
                data: json!({ "message": "hi" }),
                ..Default::default()
            },
        ];
        let edges = vec![EdgeModel {
            id: "e1".to_string(),
            source: "n1".to_string(),
            target: "n2".to_string(),
            ..Default::default()
        }];
        repository.save_structure(&flow.id, &nodes, &edges).unwrap();
        repository.set_active(&flow.id).unwrap();
        repository
    }

    #[test]
    fn test_reload_is_idempotent() {
        let store = FlowStore::new(seeded_repository());
        store.reload();
        let first = store.active().unwrap();
        store.reload();
        let second = store.active().unwrap();
        assert_eq!(*first, *second);
    }

    #[test]
    fn test_no_active_flow() {
        let repository = Arc::new(MemRepository::new());
        let store = FlowStore::new(repository);
        store.reload();
        assert!(store.active().is_none());
    }

    #[test]
    fn test_load_failure_degrades() {
        let store = FlowStore::new(Arc::new(FailingRepository));
        store.reload();
        assert!(store.active().is_none());
    }

    #[test]
    fn test_reload_clears_on_failure() {
        let repository = seeded_repository();
        let store = FlowStore::new(repository.clone());
        store.reload();
        assert!(store.active().is_some());

        // Deleting the flow and reloading must drop the snapshot.
        let flow = repository.list_flows().unwrap().remove(0);
        repository.delete_flow(&flow.id).unwrap();
        store.reload();
        assert!(store.active().is_none());
    }
}
