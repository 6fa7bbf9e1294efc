//! Service configuration.

use serde::{Deserialize, Serialize};

/// Actor recorded on activity entries when none is configured.
pub const DEFAULT_ACTOR: &str = "SYSTEM";

/// Behaviour switches for [`CellService`](crate::CellService).
///
/// Every field has a default, so an empty TOML table is a valid config.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServiceConfig {
    /// Recorded as `updated_by` on every activity entry.
    pub actor: String,
    /// Drop a cell's previous precedent edges when its formula changes or is
    /// removed. Off by default, in which case old edges linger.
    pub retract_stale_edges: bool,
    /// Propagate from a deleted cell, which then reads as zero.
    pub recalc_on_delete: bool,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        ServiceConfig {
            actor: DEFAULT_ACTOR.to_string(),
            retract_stale_edges: false,
            recalc_on_delete: false,
        }
    }
}
