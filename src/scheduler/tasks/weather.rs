use crate::error::TelemetryError;
use crate::models::{Family, Snapshot};
use crate::scheduler::SamplingTask;
use crate::units::Scale;
use crate::weather_repo::WeatherSource;
use std::time::Duration;

pub struct WeatherTask<S> {
    source: S,
    scale: Scale,
    period: Duration,
}

impl<S: WeatherSource + 'static> WeatherTask<S> {
    pub fn new(source: S, scale: Scale, period: Duration) -> Self {
        Self {
            source,
            scale,
            period,
        }
    }
}

impl<S: WeatherSource + 'static> SamplingTask for WeatherTask<S> {
    fn family(&self) -> Family {
        Family::Weather
    }

    fn period(&self) -> Duration {
        self.period
    }

    async fn sample(&mut self) -> Result<Snapshot, TelemetryError> {
        let report = self.source.fetch().await?;
        Ok(Snapshot::Weather(report.into_snapshot(self.scale)))
    }
}
