//! Import discovery settings.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct DiscoveryConfig {
    /// Scan imported packages under `GOPATH`/`HOME` for interface types.
    #[serde(default)]
    pub enabled: bool,
}
