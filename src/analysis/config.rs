use serde::{Deserialize, Serialize};

use super::{DistributionConfig, LoadChangeConfig};

/// Parameters for a full analysis of one or more traces
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Power-level histogram resolution
    pub distribution: DistributionConfig,
    /// Change-of-load detector settings
    pub load_change: LoadChangeConfig,
}
