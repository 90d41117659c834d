// CPU, RAM and swap load models

use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadSnapshot {
    pub cpu_percent: f64,
    pub cpu_frequency_mhz: u64,
    pub ram_percent: f64,
    pub ram_used: u64,
    pub ram_total: u64,
    pub swap_percent: f64,
    pub swap_used: u64,
    pub swap_total: u64,
    pub uptime: Duration,
}

/// `used / total` as a percentage clamped to [0, 100]; 0 when `total` is 0.
pub fn percent_of(used: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    ((used as f64 / total as f64) * 100.0).clamp(0.0, 100.0)
}
