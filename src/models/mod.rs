// Snapshot models: one immutable record per family per sampling cycle

mod clock;
mod gpu;
mod load;
mod network;
mod storage;
mod temperature;
mod weather;

use serde::{Deserialize, Serialize};

pub use clock::{ClockFormat, ClockSnapshot};
pub use gpu::{GpuReading, GpuSnapshot};
pub use load::{LoadSnapshot, percent_of};
pub use network::NetworkSnapshot;
pub use storage::{PartitionSnapshot, PartitionUsage};
pub use temperature::{DeviceHealthSnapshot, DeviceReading, TemperatureSnapshot};
pub use weather::WeatherSnapshot;

/// Metric family; each one is sampled by exactly one task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Family {
    Clock,
    Load,
    Temperature,
    Partitions,
    Network,
    DeviceHealth,
    Gpu,
    Weather,
}

impl Family {
    pub const ALL: [Family; 8] = [
        Family::Clock,
        Family::Load,
        Family::Temperature,
        Family::Partitions,
        Family::Network,
        Family::DeviceHealth,
        Family::Gpu,
        Family::Weather,
    ];

    pub(crate) fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Family::Clock => "clock",
            Family::Load => "load",
            Family::Temperature => "temperature",
            Family::Partitions => "partitions",
            Family::Network => "network",
            Family::DeviceHealth => "device_health",
            Family::Gpu => "gpu",
            Family::Weather => "weather",
        }
    }
}

impl std::fmt::Display for Family {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tagged snapshot; serializes as `{"family": "...", "data": {...}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "family", content = "data", rename_all = "camelCase")]
pub enum Snapshot {
    Clock(ClockSnapshot),
    Load(LoadSnapshot),
    Temperature(TemperatureSnapshot),
    Partitions(PartitionSnapshot),
    Network(NetworkSnapshot),
    DeviceHealth(DeviceHealthSnapshot),
    Gpu(GpuSnapshot),
    Weather(WeatherSnapshot),
}

impl Snapshot {
    pub fn family(&self) -> Family {
        match self {
            Snapshot::Clock(_) => Family::Clock,
            Snapshot::Load(_) => Family::Load,
            Snapshot::Temperature(_) => Family::Temperature,
            Snapshot::Partitions(_) => Family::Partitions,
            Snapshot::Network(_) => Family::Network,
            Snapshot::DeviceHealth(_) => Family::DeviceHealth,
            Snapshot::Gpu(_) => Family::Gpu,
            Snapshot::Weather(_) => Family::Weather,
        }
    }
}
