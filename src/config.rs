use std::{fs, path::Path};

use serde::Deserialize;

/// Default maximum number of node hops interpreted per inbound message.
const DEFAULT_MAX_HOPS: usize = 64;
/// Default maximum number of concurrently tracked conversations.
const DEFAULT_SESSION_CAPACITY: usize = 10_000;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Maximum node hops per inbound message. A flow whose sendMessage or
    /// condition nodes form a cycle with no question in between would
    /// otherwise loop forever within a single message; exceeding the limit
    /// terminates the session as a graph inconsistency.
    pub max_hops_per_message: usize,
    /// session store config
    pub session: SessionConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Maximum number of conversations tracked at once.
    pub capacity: usize,
    /// Evict sessions idle for this many seconds. `None` keeps sessions
    /// until their conversation terminates.
    pub idle_timeout_secs: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_hops_per_message: DEFAULT_MAX_HOPS,
            session: SessionConfig::default(),
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_SESSION_CAPACITY,
            idle_timeout_secs: None,
        }
    }
}

impl Config {
    pub fn create<T: AsRef<Path>>(path: T) -> Self {
        let data = fs::read_to_string(path.as_ref()).expect(&format!("failed to load config file {:?}", path.as_ref()));

        Self::load_from_str(data.as_str())
    }

    pub fn load_from_str(toml_str: &str) -> Self {
        let config = toml::from_str::<Config>(toml_str).expect("failed to parse the toml str");
        config
    }
}
