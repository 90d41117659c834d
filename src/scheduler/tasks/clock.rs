use crate::config::AppConfig;
use crate::error::TelemetryError;
use crate::models::{ClockFormat, ClockSnapshot, Family, Snapshot};
use crate::scheduler::SamplingTask;
use std::time::Duration;

pub struct ClockTask {
    format: ClockFormat,
    period: Duration,
}

impl ClockTask {
    pub fn new(format: ClockFormat, period: Duration) -> Self {
        Self { format, period }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.sensors.clock_format, config.sampling.fast_period())
    }
}

impl SamplingTask for ClockTask {
    fn family(&self) -> Family {
        Family::Clock
    }

    fn period(&self) -> Duration {
        self.period
    }

    async fn sample(&mut self) -> Result<Snapshot, TelemetryError> {
        Ok(Snapshot::Clock(ClockSnapshot::at(
            &chrono::Local::now(),
            self.format,
        )))
    }
}
