// Standard sampling tasks, one per family.

mod clock;
mod device_health;
mod gpu;
mod load;
mod network;
mod partitions;
mod temperature;
mod weather;

pub use clock::ClockTask;
pub use device_health::DeviceHealthTask;
pub use gpu::{GpuSettings, GpuTask};
pub use load::LoadTask;
pub use network::{NetworkTask, throughput};
pub use partitions::PartitionsTask;
pub use temperature::TemperatureTask;
pub use weather::WeatherTask;

use super::Scheduler;
use crate::config::AppConfig;
use crate::device_health::SystemdDetectVirt;
use crate::error::TelemetryError;
use crate::gpu_repo::NvmlGpuRepo;
use crate::weather_repo::OpenWeatherRepo;
use std::sync::Arc;

/// Start every family's task from `config`. The GPU task only runs when GPUs are configured,
/// the weather task only when enabled.
pub fn spawn_all(scheduler: &mut Scheduler, config: &AppConfig) -> Result<(), TelemetryError> {
    let probe = Arc::new(SystemdDetectVirt);
    scheduler.spawn(ClockTask::from_config(config))?;
    scheduler.spawn(LoadTask::from_config(config))?;
    scheduler.spawn(TemperatureTask::from_config(config, probe.clone()))?;
    scheduler.spawn(PartitionsTask::from_config(config))?;
    scheduler.spawn(NetworkTask::from_config(config))?;
    scheduler.spawn(DeviceHealthTask::from_config(config, probe))?;
    if !config.sensors.gpus.is_empty() {
        scheduler.spawn(GpuTask::from_config(NvmlGpuRepo::open, config))?;
    }
    if config.weather.enabled {
        let source = OpenWeatherRepo::new(&config.weather)?;
        scheduler.spawn(WeatherTask::new(
            source,
            config.sensors.temperature_unit,
            config.sampling.weather_period(),
        ))?;
    } else {
        tracing::info!("weather disabled; no weather task");
    }
    Ok(())
}
