use crate::config::AppConfig;
use crate::error::TelemetryError;
use crate::models::{Family, NetworkSnapshot, Snapshot};
use crate::scheduler::SamplingTask;
use crate::sysinfo_repo::{InterfaceCounters, SysinfoRepo};
use std::time::Duration;

/// Byte deltas across the window. Counter resets (driver reload) saturate to zero.
pub fn throughput(
    interface: &str,
    first: InterfaceCounters,
    second: InterfaceCounters,
) -> NetworkSnapshot {
    NetworkSnapshot {
        interface: interface.to_string(),
        down_speed: second.bytes_recv.saturating_sub(first.bytes_recv),
        up_speed: second.bytes_sent.saturating_sub(first.bytes_sent),
        bytes_sent: second.bytes_sent,
        bytes_recv: second.bytes_recv,
    }
}

/// Reads counters, waits one window, reads again.
pub struct NetworkTask {
    repo: SysinfoRepo,
    interface: String,
    window: Duration,
    period: Duration,
}

impl NetworkTask {
    pub fn new(interface: String, window: Duration, period: Duration) -> Self {
        Self {
            repo: SysinfoRepo::new(),
            interface,
            window,
            period,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            config.sensors.interface.clone(),
            config.sampling.network_window(),
            config.sampling.network_period(),
        )
    }
}

impl SamplingTask for NetworkTask {
    fn family(&self) -> Family {
        Family::Network
    }

    fn period(&self) -> Duration {
        self.period
    }

    async fn prepare(&mut self) -> Result<(), TelemetryError> {
        if self.repo.has_interface(self.interface.clone()).await? {
            Ok(())
        } else {
            Err(TelemetryError::configuration(format!(
                "network interface {} does not exist",
                self.interface
            )))
        }
    }

    async fn sample(&mut self) -> Result<Snapshot, TelemetryError> {
        let first = self
            .repo
            .get_interface_counters(self.interface.clone())
            .await?;
        tokio::time::sleep(self.window).await;
        let second = self
            .repo
            .get_interface_counters(self.interface.clone())
            .await?;
        Ok(Snapshot::Network(throughput(&self.interface, first, second)))
    }
}
