use serde::Deserialize;
use std::time::Duration;

use crate::hddtemp_repo;
use crate::models::ClockFormat;
use crate::severity::SeverityBands;
use crate::units::Scale;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub sensors: SensorsConfig,
    #[serde(default)]
    pub sampling: SamplingConfig,
    #[serde(default)]
    pub thresholds: ThresholdsConfig,
    #[serde(default)]
    pub legacy_service: LegacyServiceConfig,
    #[serde(default)]
    pub weather: WeatherConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

/// What to monitor. Written by the first-run wizard; read once per task start.
#[derive(Debug, Clone, Deserialize)]
pub struct SensorsConfig {
    /// Network interface for throughput stats.
    pub interface: String,
    #[serde(default)]
    pub mountpoints: Vec<String>,
    #[serde(default)]
    pub cpu_sensor: CpuSensorConfig,
    /// NVMe block devices, e.g. "nvme0n1".
    #[serde(default)]
    pub nvme: Vec<String>,
    /// NVIDIA GPU indices as the driver numbers them.
    #[serde(default)]
    pub gpus: Vec<u32>,
    #[serde(default)]
    pub temperature_unit: Scale,
    #[serde(default)]
    pub clock_format: ClockFormat,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CpuSensorConfig {
    #[serde(default)]
    pub index: usize,
    #[serde(default)]
    pub label: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SamplingConfig {
    #[serde(default = "default_fast_period_ms")]
    pub fast_period_ms: u64,
    #[serde(default = "default_slow_period_ms")]
    pub slow_period_ms: u64,
    /// Window over which the network byte delta is measured.
    #[serde(default = "default_network_window_ms")]
    pub network_window_ms: u64,
    /// Extra pause after each network sample; the window already paces the task.
    #[serde(default)]
    pub network_period_ms: u64,
    #[serde(default = "default_weather_period_secs")]
    pub weather_period_secs: u64,
}

fn default_fast_period_ms() -> u64 {
    1000
}

fn default_slow_period_ms() -> u64 {
    10_000
}

fn default_network_window_ms() -> u64 {
    1000
}

fn default_weather_period_secs() -> u64 {
    1800
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            fast_period_ms: default_fast_period_ms(),
            slow_period_ms: default_slow_period_ms(),
            network_window_ms: default_network_window_ms(),
            network_period_ms: 0,
            weather_period_secs: default_weather_period_secs(),
        }
    }
}

impl SamplingConfig {
    pub fn fast_period(&self) -> Duration {
        Duration::from_millis(self.fast_period_ms)
    }

    pub fn slow_period(&self) -> Duration {
        Duration::from_millis(self.slow_period_ms)
    }

    pub fn network_window(&self) -> Duration {
        Duration::from_millis(self.network_window_ms)
    }

    pub fn network_period(&self) -> Duration {
        Duration::from_millis(self.network_period_ms)
    }

    pub fn weather_period(&self) -> Duration {
        Duration::from_secs(self.weather_period_secs)
    }
}

/// Severity bands and reference temperatures, all in Celsius.
#[derive(Debug, Clone, Deserialize)]
pub struct ThresholdsConfig {
    #[serde(default)]
    pub bands: SeverityBands,
    /// Severity reference for the CPU sensor; also its critical when the OS reports none.
    #[serde(default = "default_cpu_max_temp")]
    pub cpu_max_temp: f64,
    #[serde(default = "default_cpu_high_temp")]
    pub cpu_high_temp: f64,
    /// Severity reference for storage devices.
    #[serde(default = "default_device_max_temp")]
    pub device_max_temp: f64,
    /// hddtemp reports no thresholds; high and critical are derived from the current value.
    #[serde(default = "default_legacy_high_factor")]
    pub legacy_high_factor: f64,
    #[serde(default = "default_legacy_critical_factor")]
    pub legacy_critical_factor: f64,
    #[serde(default = "default_nvme_high")]
    pub nvme_default_high: f64,
    #[serde(default = "default_nvme_critical")]
    pub nvme_default_critical: f64,
    /// Severity reference for GPUs.
    #[serde(default = "default_gpu_max_temp")]
    pub gpu_max_temp: f64,
    /// GPU drivers report no thresholds either; same derivation as hddtemp.
    #[serde(default = "default_gpu_high_factor")]
    pub gpu_high_factor: f64,
    #[serde(default = "default_gpu_critical_factor")]
    pub gpu_critical_factor: f64,
}

fn default_cpu_max_temp() -> f64 {
    85.0
}

fn default_cpu_high_temp() -> f64 {
    70.0
}

fn default_device_max_temp() -> f64 {
    73.0
}

fn default_legacy_high_factor() -> f64 {
    1.3
}

fn default_legacy_critical_factor() -> f64 {
    1.4
}

fn default_nvme_high() -> f64 {
    70.0
}

fn default_nvme_critical() -> f64 {
    82.0
}

fn default_gpu_max_temp() -> f64 {
    90.0
}

fn default_gpu_high_factor() -> f64 {
    1.2
}

fn default_gpu_critical_factor() -> f64 {
    1.4
}

impl Default for ThresholdsConfig {
    fn default() -> Self {
        Self {
            bands: SeverityBands::default(),
            cpu_max_temp: default_cpu_max_temp(),
            cpu_high_temp: default_cpu_high_temp(),
            device_max_temp: default_device_max_temp(),
            legacy_high_factor: default_legacy_high_factor(),
            legacy_critical_factor: default_legacy_critical_factor(),
            nvme_default_high: default_nvme_high(),
            nvme_default_critical: default_nvme_critical(),
            gpu_max_temp: default_gpu_max_temp(),
            gpu_high_factor: default_gpu_high_factor(),
            gpu_critical_factor: default_gpu_critical_factor(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LegacyServiceConfig {
    #[serde(default = "default_legacy_host")]
    pub host: String,
    #[serde(default = "default_legacy_port")]
    pub port: u16,
    #[serde(default = "default_connect_timeout_ms")]
    pub connect_timeout_ms: u64,
    #[serde(default = "default_read_timeout_ms")]
    pub read_timeout_ms: u64,
}

fn default_legacy_host() -> String {
    hddtemp_repo::DEFAULT_HOST.into()
}

fn default_legacy_port() -> u16 {
    hddtemp_repo::DEFAULT_PORT
}

fn default_connect_timeout_ms() -> u64 {
    500
}

fn default_read_timeout_ms() -> u64 {
    2000
}

impl Default for LegacyServiceConfig {
    fn default() -> Self {
        Self {
            host: default_legacy_host(),
            port: default_legacy_port(),
            connect_timeout_ms: default_connect_timeout_ms(),
            read_timeout_ms: default_read_timeout_ms(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeatherConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_weather_url")]
    pub url: String,
    #[serde(default = "default_weather_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_weather_url() -> String {
    "http://api.openweathermap.org/data/2.5/weather".into()
}

fn default_weather_timeout_secs() -> u64 {
    10
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            city: String::new(),
            api_key: String::new(),
            url: default_weather_url(),
            timeout_secs: default_weather_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DisplayConfig {
    /// How often the console display reads the latest snapshots.
    #[serde(default = "default_render_interval_ms")]
    pub render_interval_ms: u64,
}

fn default_render_interval_ms() -> u64 {
    1000
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            render_interval_ms: default_render_interval_ms(),
        }
    }
}

impl AppConfig {
    pub fn load() -> anyhow::Result<Self> {
        let path = std::env::var("CONFIG_FILE").unwrap_or_else(|_| "config.toml".into());
        let s = std::fs::read_to_string(&path)
            .map_err(|e| anyhow::anyhow!("reading {}: {}", path, e))?;
        Self::load_from_str(&s)
    }

    /// Parse and validate config from a string (e.g. for tests).
    pub fn load_from_str(s: &str) -> anyhow::Result<Self> {
        let config: AppConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            !self.sensors.interface.is_empty(),
            "sensors.interface must be non-empty"
        );
        anyhow::ensure!(
            self.sampling.fast_period_ms > 0,
            "sampling.fast_period_ms must be > 0, got {}",
            self.sampling.fast_period_ms
        );
        anyhow::ensure!(
            self.sampling.slow_period_ms > 0,
            "sampling.slow_period_ms must be > 0, got {}",
            self.sampling.slow_period_ms
        );
        anyhow::ensure!(
            self.sampling.network_window_ms > 0,
            "sampling.network_window_ms must be > 0, got {}",
            self.sampling.network_window_ms
        );
        anyhow::ensure!(
            self.sampling.weather_period_secs > 0,
            "sampling.weather_period_secs must be > 0, got {}",
            self.sampling.weather_period_secs
        );
        let bands = &self.thresholds.bands;
        anyhow::ensure!(
            bands.critical_band > 0.0 && bands.critical_band < bands.warning_band,
            "thresholds.bands.critical_band must be > 0 and below warning_band, got {}",
            bands.critical_band
        );
        anyhow::ensure!(
            bands.warning_band < 1.0,
            "thresholds.bands.warning_band must be < 1, got {}",
            bands.warning_band
        );
        anyhow::ensure!(
            self.thresholds.cpu_max_temp > 0.0,
            "thresholds.cpu_max_temp must be > 0, got {}",
            self.thresholds.cpu_max_temp
        );
        anyhow::ensure!(
            self.thresholds.device_max_temp > 0.0,
            "thresholds.device_max_temp must be > 0, got {}",
            self.thresholds.device_max_temp
        );
        anyhow::ensure!(
            self.thresholds.gpu_max_temp > 0.0,
            "thresholds.gpu_max_temp must be > 0, got {}",
            self.thresholds.gpu_max_temp
        );
        anyhow::ensure!(
            self.legacy_service.port > 0,
            "legacy_service.port must be between 1 and 65535, got {}",
            self.legacy_service.port
        );
        anyhow::ensure!(
            self.legacy_service.connect_timeout_ms > 0,
            "legacy_service.connect_timeout_ms must be > 0, got {}",
            self.legacy_service.connect_timeout_ms
        );
        anyhow::ensure!(
            self.legacy_service.read_timeout_ms > 0,
            "legacy_service.read_timeout_ms must be > 0, got {}",
            self.legacy_service.read_timeout_ms
        );
        if self.weather.enabled {
            anyhow::ensure!(
                !self.weather.city.is_empty(),
                "weather.city must be set when weather.enabled"
            );
            anyhow::ensure!(
                !self.weather.api_key.is_empty(),
                "weather.api_key must be set when weather.enabled"
            );
        }
        anyhow::ensure!(
            self.display.render_interval_ms > 0,
            "display.render_interval_ms must be > 0, got {}",
            self.display.render_interval_ms
        );
        Ok(())
    }
}
