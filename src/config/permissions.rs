//! Permission grants for the hub capability

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::permission::Tristate;

/// Static permission table consulted by [`ConfigPermissions`](crate::permission::ConfigPermissions)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PermissionsConfig {
    /// Value for clients without an explicit grant
    pub default: Tristate,
    /// Per-client overrides, keyed by username (case-insensitive)
    pub grants: HashMap<String, Tristate>,
}

impl Default for PermissionsConfig {
    fn default() -> Self {
        Self {
            default: Tristate::True,
            grants: HashMap::new(),
        }
    }
}
