use crate::config::AppConfig;
use crate::device_health::{DeviceHealthCollector, VirtualizationProbe};
use crate::error::TelemetryError;
use crate::models::{Family, Snapshot};
use crate::scheduler::SamplingTask;
use std::sync::Arc;
use std::time::Duration;

/// Storage device temperatures. The virtualization probe runs once, at task start.
pub struct DeviceHealthTask {
    config: AppConfig,
    probe: Arc<dyn VirtualizationProbe>,
    collector: Option<DeviceHealthCollector>,
    period: Duration,
}

impl DeviceHealthTask {
    pub fn from_config(config: &AppConfig, probe: Arc<dyn VirtualizationProbe>) -> Self {
        Self {
            config: config.clone(),
            probe,
            collector: None,
            period: config.sampling.slow_period(),
        }
    }
}

impl SamplingTask for DeviceHealthTask {
    fn family(&self) -> Family {
        Family::DeviceHealth
    }

    fn period(&self) -> Duration {
        self.period
    }

    async fn prepare(&mut self) -> Result<(), TelemetryError> {
        let probe = self.probe.clone();
        let in_vm = tokio::task::spawn_blocking(move || probe.is_virtual())
            .await
            .unwrap_or(false);
        if in_vm {
            tracing::info!("virtual machine detected; device health uses a placeholder drive");
        }
        self.collector = Some(DeviceHealthCollector::from_config(&self.config, in_vm));
        Ok(())
    }

    async fn sample(&mut self) -> Result<Snapshot, TelemetryError> {
        let collector = self
            .collector
            .as_ref()
            .ok_or_else(|| TelemetryError::sensor("device health collector not prepared"))?;
        Ok(Snapshot::DeviceHealth(collector.collect().await))
    }
}
