use crate::config::AppConfig;
use crate::error::TelemetryError;
use crate::models::{Family, PartitionSnapshot, Snapshot};
use crate::scheduler::SamplingTask;
use crate::sysinfo_repo::SysinfoRepo;
use std::time::Duration;

pub struct PartitionsTask {
    repo: SysinfoRepo,
    mountpoints: Vec<String>,
    period: Duration,
}

impl PartitionsTask {
    pub fn new(mountpoints: Vec<String>, period: Duration) -> Self {
        Self {
            repo: SysinfoRepo::new(),
            mountpoints,
            period,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            config.sensors.mountpoints.clone(),
            config.sampling.slow_period(),
        )
    }
}

impl SamplingTask for PartitionsTask {
    fn family(&self) -> Family {
        Family::Partitions
    }

    fn period(&self) -> Duration {
        self.period
    }

    async fn prepare(&mut self) -> Result<(), TelemetryError> {
        if self.mountpoints.is_empty() {
            return Err(TelemetryError::configuration("no mountpoints configured"));
        }
        let missing = self
            .repo
            .missing_mountpoints(self.mountpoints.clone())
            .await?;
        if missing.len() == self.mountpoints.len() {
            return Err(TelemetryError::configuration(format!(
                "none of the configured mountpoints are mounted: {:?}",
                missing
            )));
        }
        if !missing.is_empty() {
            tracing::warn!(?missing, "some configured mountpoints are not mounted");
        }
        Ok(())
    }

    async fn sample(&mut self) -> Result<Snapshot, TelemetryError> {
        let partitions = self.repo.get_partitions(self.mountpoints.clone()).await?;
        Ok(Snapshot::Partitions(PartitionSnapshot { partitions }))
    }
}
