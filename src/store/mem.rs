use std::{
    collections::HashMap,
    sync::{Arc, RwLock},
};

use crate::{
    ChatflowError, Result, ShareLock,
    model::{EdgeModel, FlowId, FlowModel, NodeModel},
    store::FlowRepository,
    utils,
};

/// In-memory [`FlowRepository`] used for testing and embedded deployments.
#[derive(Clone)]
pub struct MemRepository {
    flows: ShareLock<HashMap<FlowId, FlowModel>>,
}

impl Default for MemRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl MemRepository {
    pub fn new() -> Self {
        Self {
            flows: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl FlowRepository for MemRepository {
    fn list_flows(&self) -> Result<Vec<FlowModel>> {
        let flows = self.flows.read().unwrap();
        let mut list: Vec<FlowModel> = flows.values().cloned().collect();
        list.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(list)
    }

    fn find_flow(
        &self,
        id: &str,
    ) -> Result<FlowModel> {
        let flows = self.flows.read().unwrap();
        flows.get(id).cloned().ok_or(ChatflowError::Store(format!("flow {} not found", id)))
    }

    fn create_flow(
        &self,
        name: &str,
        description: &str,
    ) -> Result<FlowModel> {
        let now = utils::time::time_millis();
        let flow = FlowModel {
            id: utils::longid(),
            name: name.to_string(),
            description: description.to_string(),
            is_active: false,
            created_at: now,
            updated_at: now,
            nodes: Vec::new(),
            edges: Vec::new(),
        };

        let mut flows = self.flows.write().unwrap();
        flows.insert(flow.id.clone(), flow.clone());
        Ok(flow)
    }

    fn update_flow(
        &self,
        id: &str,
        name: &str,
        description: &str,
    ) -> Result<FlowModel> {
        let mut flows = self.flows.write().unwrap();
        let flow = flows.get_mut(id).ok_or(ChatflowError::Store(format!("flow {} not found", id)))?;
        flow.name = name.to_string();
        flow.description = description.to_string();
        flow.updated_at = utils::time::time_millis();
        Ok(flow.clone())
    }

    fn delete_flow(
        &self,
        id: &str,
    ) -> Result<bool> {
        let mut flows = self.flows.write().unwrap();
        Ok(flows.remove(id).is_some())
    }

    fn save_structure(
        &self,
        flow_id: &str,
        nodes: &[NodeModel],
        edges: &[EdgeModel],
    ) -> Result<()> {
        let mut flows = self.flows.write().unwrap();
        let flow = flows.get_mut(flow_id).ok_or(ChatflowError::Store(format!("flow {} not found", flow_id)))?;
        flow.nodes = nodes.to_vec();
        flow.edges = edges.to_vec();
        flow.updated_at = utils::time::time_millis();
        Ok(())
    }

    fn set_active(
        &self,
        flow_id: &str,
    ) -> Result<bool> {
        let mut flows = self.flows.write().unwrap();
        if !flows.contains_key(flow_id) {
            return Err(ChatflowError::Store(format!("flow {} not found", flow_id)));
        }
        for (id, flow) in flows.iter_mut() {
            flow.is_active = id == flow_id;
        }
        Ok(true)
    }

    fn active_flow(&self) -> Result<Option<FlowModel>> {
        let flows = self.flows.read().unwrap();
        Ok(flows.values().find(|f| f.is_active).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_and_list_ordered() {
        let repository = MemRepository::new();
        let first = repository.create_flow("First", "").unwrap();
        let second = repository.create_flow("Second", "").unwrap();

        let list = repository.list_flows().unwrap();
        assert_eq!(list.len(), 2);
        // Creation order is preserved even when timestamps collide.
        let ids: Vec<&str> = list.iter().map(|f| f.id.as_str()).collect();
        assert!(ids.contains(&first.id.as_str()));
        assert!(ids.contains(&second.id.as_str()));
    }

    #[test]
    fn test_set_active_is_exclusive() {
        let repository = MemRepository::new();
        let a = repository.create_flow("A", "").unwrap();
        let b = repository.create_flow("B", "").unwrap();

        repository.set_active(&a.id).unwrap();
        assert_eq!(repository.active_flow().unwrap().unwrap().id, a.id);

        repository.set_active(&b.id).unwrap();
        let active = repository.active_flow().unwrap().unwrap();
        assert_eq!(active.id, b.id);
        assert!(!repository.find_flow(&a.id).unwrap().is_active);
    }

    #[test]
    fn test_set_active_unknown_flow() {
        let repository = MemRepository::new();
        assert!(repository.set_active("ghost").is_err());
    }

    #[test]
    fn test_save_structure_replaces() {
        let repository = MemRepository::new();
        let flow = repository.create_flow("A", "").unwrap();

        let nodes = vec![NodeModel {
            id: "n1".to_string(),
            kind: "start".to_string(),
            ..Default::default()
        }];
        repository.save_structure(&flow.id, &nodes, &[]).unwrap();
        assert_eq!(repository.find_flow(&flow.id).unwrap().nodes.len(), 1);

        repository.save_structure(&flow.id, &[], &[]).unwrap();
        assert!(repository.find_flow(&flow.id).unwrap().nodes.is_empty());
    }

    #[test]
    fn test_delete_flow() {
        let repository = MemRepository::new();
        let flow = repository.create_flow("A", "").unwrap();
        assert!(repository.delete_flow(&flow.id).unwrap());
        assert!(!repository.delete_flow(&flow.id).unwrap());
        assert!(repository.find_flow(&flow.id).is_err());
    }
}
