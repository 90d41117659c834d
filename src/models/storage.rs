// Partition usage models

use serde::{Deserialize, Serialize};

use super::load::percent_of;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartitionUsage {
    pub mountpoint: String,
    pub total: u64,
    pub used: u64,
    pub free: u64,
    pub percent_used: f64,
    pub percent_free: f64,
}

impl PartitionUsage {
    /// Builds usage from total and available space. `used` is what is not available, so reserved
    /// blocks count as used and the two percentages are computed independently.
    pub fn from_space(mountpoint: impl Into<String>, total: u64, available: u64) -> Self {
        let free = available.min(total);
        let used = total - free;
        PartitionUsage {
            mountpoint: mountpoint.into(),
            total,
            used,
            free,
            percent_used: percent_of(used, total),
            percent_free: percent_of(free, total),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartitionSnapshot {
    pub partitions: Vec<PartitionUsage>,
}
