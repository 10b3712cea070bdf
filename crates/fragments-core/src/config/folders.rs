//! Folder hierarchy configuration.

use serde::{Deserialize, Serialize};

/// Folder hierarchy limits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FolderConfig {
    /// Maximum number of parent hops walked before a chain is rejected.
    #[serde(default = "default_max_depth")]
    pub max_depth: u32,
}

impl Default for FolderConfig {
    fn default() -> Self {
        Self {
            max_depth: default_max_depth(),
        }
    }
}

fn default_max_depth() -> u32 {
    50
}
