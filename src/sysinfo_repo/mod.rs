// OS counters via sysinfo. Each sampling task owns its own repo; nothing here is shared across tasks.

mod linux;

use crate::error::TelemetryError;
use crate::models::{LoadSnapshot, PartitionUsage};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use sysinfo::{Components, Disks, Networks, System};
use tracing::instrument;

pub use linux::{detect_virtualization, read_block_device_model};

/// Raw sensor reading in Celsius; high/critical are whatever the OS reports.
#[derive(Debug, Clone, PartialEq)]
pub struct SensorReading {
    pub label: String,
    pub current: Option<f64>,
    pub high: Option<f64>,
    pub critical: Option<f64>,
}

/// Cumulative byte counters for one interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InterfaceCounters {
    pub bytes_recv: u64,
    pub bytes_sent: u64,
}

/// Sensor selection: label wins, index is the fallback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SensorSelector {
    pub index: usize,
    pub label: String,
}

pub struct SysinfoRepo {
    sys: Arc<Mutex<System>>,
    disks: Arc<Mutex<Disks>>,
    networks: Arc<Mutex<Networks>>,
    components: Arc<Mutex<Components>>,
}

impl Default for SysinfoRepo {
    fn default() -> Self {
        Self::new()
    }
}

fn lock_err<T>(what: &str, e: std::sync::PoisonError<T>) -> TelemetryError {
    TelemetryError::sensor(format!("sysinfo {} lock poisoned: {}", what, e))
}

fn join_err(e: tokio::task::JoinError) -> TelemetryError {
    TelemetryError::sensor(format!("sysinfo task join: {}", e))
}

fn to_reading(c: &sysinfo::Component) -> SensorReading {
    SensorReading {
        label: c.label().to_string(),
        current: c.temperature().map(f64::from),
        // sysinfo's max() is the highest value seen, not a threshold
        high: None,
        critical: c.critical().map(f64::from),
    }
}

impl SysinfoRepo {
    pub fn new() -> Self {
        let mut sys = System::new();
        sys.refresh_cpu_all();
        sys.refresh_memory();
        Self {
            sys: Arc::new(Mutex::new(sys)),
            disks: Arc::new(Mutex::new(Disks::new_with_refreshed_list())),
            networks: Arc::new(Mutex::new(Networks::new_with_refreshed_list())),
            components: Arc::new(Mutex::new(Components::new_with_refreshed_list())),
        }
    }

    #[instrument(skip(self), fields(repo = "sysinfo", operation = "get_load"))]
    pub async fn get_load(&self) -> Result<LoadSnapshot, TelemetryError> {
        let sys = self.sys.clone();
        tokio::task::spawn_blocking(move || {
            let mut sys = sys.lock().map_err(|e| lock_err("system", e))?;
            sys.refresh_cpu_all();
            sys.refresh_memory();

            let ram_total = sys.total_memory();
            if ram_total == 0 {
                return Err(TelemetryError::sensor("memory counters report zero total"));
            }
            let ram_used = sys.used_memory().min(ram_total);
            let swap_total = sys.total_swap();
            let swap_used = sys.used_swap().min(swap_total);

            let cpus = sys.cpus();
            let cpu_frequency_mhz = if cpus.is_empty() {
                0
            } else {
                cpus.iter().map(|c| c.frequency()).sum::<u64>() / cpus.len() as u64
            };

            Ok(LoadSnapshot {
                cpu_percent: (sys.global_cpu_usage() as f64).clamp(0.0, 100.0),
                cpu_frequency_mhz,
                ram_percent: crate::models::percent_of(ram_used, ram_total),
                ram_used,
                ram_total,
                swap_percent: crate::models::percent_of(swap_used, swap_total),
                swap_used,
                swap_total,
                uptime: Duration::from_secs(System::uptime()),
            })
        })
        .await
        .map_err(join_err)?
    }

    /// Labels of all temperature components, in sysinfo order.
    pub async fn sensor_labels(&self) -> Result<Vec<String>, TelemetryError> {
        let components = self.components.clone();
        tokio::task::spawn_blocking(move || {
            let components = components.lock().map_err(|e| lock_err("components", e))?;
            Ok(components
                .list()
                .iter()
                .map(|c| c.label().to_string())
                .collect())
        })
        .await
        .map_err(join_err)?
    }

    #[instrument(skip(self), fields(repo = "sysinfo", operation = "get_sensor"))]
    pub async fn get_sensor(&self, selector: SensorSelector) -> Result<SensorReading, TelemetryError> {
        let components = self.components.clone();
        tokio::task::spawn_blocking(move || {
            let mut components = components.lock().map_err(|e| lock_err("components", e))?;
            components.refresh(false);
            let list = components.list();
            list.iter()
                .find(|c| !selector.label.is_empty() && c.label() == selector.label)
                .or_else(|| list.get(selector.index))
                .map(to_reading)
                .ok_or_else(|| {
                    TelemetryError::sensor(format!(
                        "sensor {:?} (index {}) not reported",
                        selector.label, selector.index
                    ))
                })
        })
        .await
        .map_err(join_err)?
    }

    /// NVMe temperature components, in sysinfo order.
    #[instrument(skip(self), fields(repo = "sysinfo", operation = "get_nvme_sensors"))]
    pub async fn get_nvme_sensors(&self) -> Result<Vec<SensorReading>, TelemetryError> {
        let components = self.components.clone();
        tokio::task::spawn_blocking(move || {
            let mut components = components.lock().map_err(|e| lock_err("components", e))?;
            components.refresh(false);
            Ok(components
                .list()
                .iter()
                .filter(|c| c.label().to_lowercase().contains("nvme"))
                .map(to_reading)
                .collect())
        })
        .await
        .map_err(join_err)?
    }

    /// Mountpoints from `wanted` that are not currently mounted.
    pub async fn missing_mountpoints(&self, wanted: Vec<String>) -> Result<Vec<String>, TelemetryError> {
        let disks = self.disks.clone();
        tokio::task::spawn_blocking(move || {
            let disks = disks.lock().map_err(|e| lock_err("disks", e))?;
            Ok(wanted
                .into_iter()
                .filter(|m| {
                    !disks
                        .list()
                        .iter()
                        .any(|d| d.mount_point().to_string_lossy() == m.as_str())
                })
                .collect())
        })
        .await
        .map_err(join_err)?
    }

    /// Usage for each requested mountpoint, in request order. Unmounted entries are left out.
    #[instrument(skip(self), fields(repo = "sysinfo", operation = "get_partitions"))]
    pub async fn get_partitions(
        &self,
        mountpoints: Vec<String>,
    ) -> Result<Vec<PartitionUsage>, TelemetryError> {
        let disks = self.disks.clone();
        tokio::task::spawn_blocking(move || {
            let mut disks = disks.lock().map_err(|e| lock_err("disks", e))?;
            disks.refresh(true);
            let mut out = Vec::with_capacity(mountpoints.len());
            for mount in mountpoints {
                match disks
                    .list()
                    .iter()
                    .find(|d| d.mount_point().to_string_lossy() == mount.as_str())
                {
                    Some(d) => out.push(PartitionUsage::from_space(
                        mount,
                        d.total_space(),
                        d.available_space(),
                    )),
                    None => tracing::debug!(mountpoint = %mount, "mountpoint not mounted; skipped"),
                }
            }
            Ok(out)
        })
        .await
        .map_err(join_err)?
    }

    /// Model strings from sysfs for each block device name, in order. `None` where unreadable.
    pub async fn block_device_models(
        &self,
        names: Vec<String>,
    ) -> Result<Vec<Option<String>>, TelemetryError> {
        tokio::task::spawn_blocking(move || {
            names
                .iter()
                .map(|n| read_block_device_model(n))
                .collect()
        })
        .await
        .map_err(join_err)
    }

    pub async fn has_interface(&self, name: String) -> Result<bool, TelemetryError> {
        let networks = self.networks.clone();
        tokio::task::spawn_blocking(move || {
            let networks = networks.lock().map_err(|e| lock_err("networks", e))?;
            Ok(networks.list().contains_key(&name))
        })
        .await
        .map_err(join_err)?
    }

    #[instrument(skip(self), fields(repo = "sysinfo", operation = "get_interface_counters"))]
    pub async fn get_interface_counters(
        &self,
        name: String,
    ) -> Result<InterfaceCounters, TelemetryError> {
        let networks = self.networks.clone();
        tokio::task::spawn_blocking(move || {
            let mut networks = networks.lock().map_err(|e| lock_err("networks", e))?;
            networks.refresh(true);
            networks
                .list()
                .get(&name)
                .map(|data| InterfaceCounters {
                    bytes_recv: data.total_received(),
                    bytes_sent: data.total_transmitted(),
                })
                .ok_or_else(|| TelemetryError::sensor(format!("interface {} not reported", name)))
        })
        .await
        .map_err(join_err)?
    }
}
