//! Global configuration model for berth.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Root configuration shared by the CLI and the server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BerthConfig {
    /// Path to the persisted registry file.
    pub registry_file: PathBuf,
    /// Address the web UI and API bind to.
    pub listen_addr: String,
}

impl Default for BerthConfig {
    fn default() -> Self {
        Self {
            registry_file: crate::constants::default_registry_file(),
            listen_addr: crate::constants::DEFAULT_LISTEN_ADDR.to_string(),
        }
    }
}
