// Storage device health: hddtemp drives plus NVMe sensors, normalized to one scale.

use crate::config::AppConfig;
use crate::hddtemp_repo::HddTempRepo;
use crate::hddtemp_repo::protocol::HddTempRecord;
use crate::models::{DeviceHealthSnapshot, DeviceReading};
use crate::severity::SeverityBands;
use crate::sysinfo_repo::{SensorReading, SysinfoRepo};
use crate::units::{Scale, normalize, to_celsius};
use std::time::Duration;

pub const VM_DEVICE: &str = "/dev/vmsda";
pub const VM_MODEL: &str = "VIRTUAL SSD";
const VM_TEMPS_CELSIUS: (f64, f64, f64) = (38.0, 70.0, 80.0);

/// Decides whether real sensors can be read at all.
pub trait VirtualizationProbe: Send + Sync {
    fn is_virtual(&self) -> bool;
}

/// Probe backed by `systemd-detect-virt`.
pub struct SystemdDetectVirt;

impl VirtualizationProbe for SystemdDetectVirt {
    fn is_virtual(&self) -> bool {
        crate::sysinfo_repo::detect_virtualization()
    }
}

/// Fixed answer, for tests and for forcing a mode from config.
pub struct FixedProbe(pub bool);

impl VirtualizationProbe for FixedProbe {
    fn is_virtual(&self) -> bool {
        self.0
    }
}

#[derive(Debug, Clone)]
pub struct DeviceHealthSettings {
    pub scale: Scale,
    pub bands: SeverityBands,
    pub device_max_temp: f64,
    pub legacy_high_factor: f64,
    pub legacy_critical_factor: f64,
    pub nvme_default_high: f64,
    pub nvme_default_critical: f64,
    pub nvme_devices: Vec<String>,
}

impl DeviceHealthSettings {
    pub fn from_config(config: &AppConfig) -> Self {
        let t = &config.thresholds;
        Self {
            scale: config.sensors.temperature_unit,
            bands: t.bands,
            device_max_temp: t.device_max_temp,
            legacy_high_factor: t.legacy_high_factor,
            legacy_critical_factor: t.legacy_critical_factor,
            nvme_default_high: t.nvme_default_high,
            nvme_default_critical: t.nvme_default_critical,
            nvme_devices: config.sensors.nvme.clone(),
        }
    }

    fn reading(
        &self,
        device: String,
        model: String,
        current: f64,
        high: f64,
        critical: f64,
    ) -> DeviceReading {
        // classify in Celsius; the bands are not scale-invariant
        let severity = self.bands.classify(current, self.device_max_temp);
        let t = normalize(current, high, critical, self.scale);
        DeviceReading {
            device,
            model,
            current: t.current,
            high: t.high,
            critical: t.critical,
            scale: t.scale,
            severity,
        }
    }

    /// Placeholder drive used when running inside a virtual machine.
    pub fn synthetic_reading(&self) -> DeviceReading {
        let (current, high, critical) = VM_TEMPS_CELSIUS;
        self.reading(VM_DEVICE.into(), VM_MODEL.into(), current, high, critical)
    }

    /// hddtemp drive; the daemon reports no thresholds so they are derived from the current value.
    pub fn legacy_reading(&self, record: HddTempRecord) -> DeviceReading {
        let current = to_celsius(record.temperature, record.scale);
        self.reading(
            record.device,
            record.model,
            current,
            current * self.legacy_high_factor,
            current * self.legacy_critical_factor,
        )
    }

    /// NVMe drive; `None` when the sensor has no current value this cycle.
    pub fn nvme_reading(&self, sample: NvmeSample) -> Option<DeviceReading> {
        let current = sample.sensor.current?;
        Some(self.reading(
            sample.device,
            sample.model,
            current,
            sample.sensor.high.unwrap_or(self.nvme_default_high),
            sample.sensor.critical.unwrap_or(self.nvme_default_critical),
        ))
    }

    /// Merge both sources, legacy drives first. A device that cannot be read is left out.
    pub fn merge(&self, legacy: Vec<HddTempRecord>, nvme: Vec<NvmeSample>) -> Vec<DeviceReading> {
        let mut devices: Vec<DeviceReading> = legacy
            .into_iter()
            .map(|r| self.legacy_reading(r))
            .collect();
        for sample in nvme {
            let device = sample.device.clone();
            match self.nvme_reading(sample) {
                Some(r) => devices.push(r),
                None => tracing::warn!(device = %device, "nvme sensor has no reading; skipped"),
            }
        }
        devices
    }
}

/// One configured NVMe device paired with its OS sensor.
#[derive(Debug, Clone)]
pub struct NvmeSample {
    pub device: String,
    pub model: String,
    pub sensor: SensorReading,
}

/// Pair configured NVMe devices with NVMe sensors in order. Devices without a sensor are dropped.
/// The model starts as the short device name; `collect` replaces it from sysfs.
pub fn pair_nvme(devices: &[String], sensors: Vec<SensorReading>) -> Vec<NvmeSample> {
    let mut sensors = sensors.into_iter();
    let mut out = Vec::with_capacity(devices.len());
    for name in devices {
        let Some(sensor) = sensors.next() else {
            tracing::debug!(device = %name, "no nvme sensor left for device; skipped");
            continue;
        };
        let short = name.trim_start_matches("/dev/");
        out.push(NvmeSample {
            device: format!("/dev/{}", short),
            model: short.to_string(),
            sensor,
        });
    }
    out
}

pub struct DeviceHealthCollector {
    settings: DeviceHealthSettings,
    in_vm: bool,
    hddtemp: HddTempRepo,
    sysinfo: SysinfoRepo,
}

impl DeviceHealthCollector {
    pub fn new(settings: DeviceHealthSettings, in_vm: bool, hddtemp: HddTempRepo) -> Self {
        Self {
            settings,
            in_vm,
            hddtemp,
            sysinfo: SysinfoRepo::new(),
        }
    }

    pub fn from_config(config: &AppConfig, in_vm: bool) -> Self {
        let legacy = &config.legacy_service;
        let hddtemp = HddTempRepo::new(
            &legacy.host,
            legacy.port,
            Duration::from_millis(legacy.connect_timeout_ms),
            Duration::from_millis(legacy.read_timeout_ms),
        );
        Self::new(DeviceHealthSettings::from_config(config), in_vm, hddtemp)
    }

    pub fn settings(&self) -> &DeviceHealthSettings {
        &self.settings
    }

    async fn resolve_models(&self, samples: &mut [NvmeSample]) {
        if samples.is_empty() {
            return;
        }
        let names = samples.iter().map(|s| s.model.clone()).collect();
        match self.sysinfo.block_device_models(names).await {
            Ok(models) => {
                for (sample, model) in samples.iter_mut().zip(models) {
                    if let Some(model) = model {
                        sample.model = model;
                    }
                }
            }
            Err(e) => {
                tracing::debug!(error = %e, operation = "block_device_models", "keeping device names as models")
            }
        }
    }

    /// Build one snapshot. Never fails: unreadable sources contribute no devices.
    pub async fn collect(&self) -> DeviceHealthSnapshot {
        if self.in_vm {
            return DeviceHealthSnapshot {
                devices: vec![self.settings.synthetic_reading()],
            };
        }

        let legacy = self.hddtemp.records().await;
        let nvme = if self.settings.nvme_devices.is_empty() {
            Vec::new()
        } else {
            match self.sysinfo.get_nvme_sensors().await {
                Ok(sensors) => {
                    let mut samples = pair_nvme(&self.settings.nvme_devices, sensors);
                    self.resolve_models(&mut samples).await;
                    samples
                }
                Err(e) => {
                    tracing::warn!(error = %e, operation = "get_nvme_sensors", "nvme sensors unavailable");
                    Vec::new()
                }
            }
        };

        DeviceHealthSnapshot {
            devices: self.settings.merge(legacy, nvme),
        }
    }
}
