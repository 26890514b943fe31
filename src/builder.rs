use std::sync::Arc;

use crate::{Config, Engine, Result, store::FlowRepository};

/// Assembles an [`Engine`] from a flow repository plus optional
/// configuration overrides.
pub struct EngineBuilder {
    config: Config,
    repository: Option<Arc<dyn FlowRepository>>,
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self {
            config: Config::default(),
            repository: None,
        }
    }
}

impl EngineBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config(
        mut self,
        config: Config,
    ) -> Self {
        self.config = config;
        self
    }

    pub fn max_hops_per_message(
        mut self,
        n: usize,
    ) -> Self {
        self.config.max_hops_per_message = n;
        self
    }

    pub fn repository(
        mut self,
        repository: Arc<dyn FlowRepository>,
    ) -> Self {
        self.repository = Some(repository);
        self
    }

    pub fn build(&self) -> Result<Engine> {
        let repository: Arc<dyn FlowRepository> = match &self.repository {
            Some(repository) => repository.clone(),
            None => Arc::new(crate::store::MemRepository::new()),
        };
        let engine = Engine::new_with_config(self.config.clone(), repository);

        Ok(engine)
    }
}
