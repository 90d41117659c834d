use crate::config::AppConfig;
use crate::device_health::VirtualizationProbe;
use crate::error::TelemetryError;
use crate::models::{Family, Snapshot, TemperatureSnapshot};
use crate::scheduler::SamplingTask;
use crate::severity::SeverityBands;
use crate::sysinfo_repo::{SensorReading, SensorSelector, SysinfoRepo};
use crate::units::{Scale, normalize};
use std::sync::Arc;
use std::time::Duration;

pub const VM_SENSOR_LABEL: &str = "vmtemp";
const VM_SENSOR_CELSIUS: f64 = 38.0;

/// Selected CPU sensor with severity against `cpu_max_temp`.
pub struct TemperatureTask {
    repo: SysinfoRepo,
    probe: Arc<dyn VirtualizationProbe>,
    in_vm: bool,
    selector: SensorSelector,
    scale: Scale,
    bands: SeverityBands,
    max_temp: f64,
    high_temp: f64,
    period: Duration,
}

impl TemperatureTask {
    pub fn from_config(config: &AppConfig, probe: Arc<dyn VirtualizationProbe>) -> Self {
        let t = &config.thresholds;
        Self {
            repo: SysinfoRepo::new(),
            probe,
            in_vm: false,
            selector: SensorSelector {
                index: config.sensors.cpu_sensor.index,
                label: config.sensors.cpu_sensor.label.clone(),
            },
            scale: config.sensors.temperature_unit,
            bands: t.bands,
            max_temp: t.cpu_max_temp,
            high_temp: t.cpu_high_temp,
            period: config.sampling.fast_period(),
        }
    }

    /// Snapshot from a Celsius reading. Missing critical falls back to the configured max.
    pub fn snapshot_from(&self, reading: SensorReading) -> Result<TemperatureSnapshot, TelemetryError> {
        let current = reading.current.ok_or_else(|| {
            TelemetryError::sensor(format!("sensor {} has no current value", reading.label))
        })?;
        let critical = reading.critical.unwrap_or(self.max_temp);
        let high = reading.high.unwrap_or(self.high_temp);
        let severity = self.bands.classify(current, self.max_temp);
        let t = normalize(current, high, critical, self.scale);
        Ok(TemperatureSnapshot {
            label: reading.label,
            current: t.current,
            high: t.high,
            critical: t.critical,
            scale: t.scale,
            severity,
        })
    }
}

impl SamplingTask for TemperatureTask {
    fn family(&self) -> Family {
        Family::Temperature
    }

    fn period(&self) -> Duration {
        self.period
    }

    async fn prepare(&mut self) -> Result<(), TelemetryError> {
        let probe = self.probe.clone();
        self.in_vm = tokio::task::spawn_blocking(move || probe.is_virtual())
            .await
            .unwrap_or(false);
        if self.in_vm {
            tracing::info!("virtual machine detected; cpu sensor replaced by placeholder");
            return Ok(());
        }

        let labels = self.repo.sensor_labels().await?;
        let by_label = !self.selector.label.is_empty() && labels.contains(&self.selector.label);
        if !by_label && self.selector.index >= labels.len() {
            return Err(TelemetryError::configuration(format!(
                "cpu sensor {:?} (index {}) not found among {} sensors",
                self.selector.label,
                self.selector.index,
                labels.len()
            )));
        }
        Ok(())
    }

    async fn sample(&mut self) -> Result<Snapshot, TelemetryError> {
        let reading = if self.in_vm {
            SensorReading {
                label: VM_SENSOR_LABEL.into(),
                current: Some(VM_SENSOR_CELSIUS),
                high: None,
                critical: None,
            }
        } else {
            self.repo.get_sensor(self.selector.clone()).await?
        };
        self.snapshot_from(reading).map(Snapshot::Temperature)
    }
}
