use serde::{Deserialize, Serialize};

/// Column names and options for cleaning a raw export
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CleanerConfig {
    /// Timestamp column
    pub time_column: String,

    /// Raw power column (milliwatts)
    pub power_column: String,

    /// Device identifier column
    pub device_column: String,

    /// Keep only rows of this device; `None` keeps every device
    pub device_id: Option<String>,

    /// Divisor turning raw power values into watts
    pub power_scale: f64,

    /// Compute per-row energy from the time step to the previous row
    pub calc_energy: bool,
}

impl Default for CleanerConfig {
    fn default() -> Self {
        Self {
            time_column: "_time".to_string(),
            power_column: "analogInput_3".to_string(),
            device_column: "device_id".to_string(),
            device_id: None,
            power_scale: 1000.0,
            calc_energy: true,
        }
    }
}
