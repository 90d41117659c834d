use crate::config::AppConfig;
use crate::error::TelemetryError;
use crate::models::{Family, Snapshot};
use crate::scheduler::SamplingTask;
use crate::sysinfo_repo::SysinfoRepo;
use std::time::Duration;

/// CPU, RAM, swap, frequency and uptime.
pub struct LoadTask {
    repo: SysinfoRepo,
    period: Duration,
}

impl LoadTask {
    pub fn new(period: Duration) -> Self {
        Self {
            repo: SysinfoRepo::new(),
            period,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.sampling.fast_period())
    }
}

impl SamplingTask for LoadTask {
    fn family(&self) -> Family {
        Family::Load
    }

    fn period(&self) -> Duration {
        self.period
    }

    async fn sample(&mut self) -> Result<Snapshot, TelemetryError> {
        self.repo.get_load().await.map(Snapshot::Load)
    }
}
