// Network throughput models

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkSnapshot {
    pub interface: String,
    /// Bytes received during the sampling window (bytes/sec for a 1 s window).
    pub down_speed: u64,
    /// Bytes sent during the sampling window.
    pub up_speed: u64,
    pub bytes_sent: u64,
    pub bytes_recv: u64,
}
