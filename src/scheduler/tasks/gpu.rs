use crate::config::AppConfig;
use crate::error::TelemetryError;
use crate::gpu_repo::{GpuSample, GpuSource};
use crate::models::{Family, GpuReading, GpuSnapshot, Snapshot};
use crate::scheduler::SamplingTask;
use crate::severity::SeverityBands;
use crate::units::{Scale, normalize};
use std::sync::Arc;
use std::time::Duration;

/// Thresholds and scale for GPU readings. Drivers report no thresholds, so high and
/// critical are derived from the current value.
#[derive(Debug, Clone)]
pub struct GpuSettings {
    pub scale: Scale,
    pub bands: SeverityBands,
    pub max_temp: f64,
    pub high_factor: f64,
    pub critical_factor: f64,
}

impl GpuSettings {
    pub fn from_config(config: &AppConfig) -> Self {
        let t = &config.thresholds;
        Self {
            scale: config.sensors.temperature_unit,
            bands: t.bands,
            max_temp: t.gpu_max_temp,
            high_factor: t.gpu_high_factor,
            critical_factor: t.gpu_critical_factor,
        }
    }

    /// `None` when the driver gave no temperature this cycle.
    pub fn reading(&self, sample: GpuSample) -> Option<GpuReading> {
        let current = sample.temperature?;
        let severity = self.bands.classify(current, self.max_temp);
        let t = normalize(
            current,
            current * self.high_factor,
            current * self.critical_factor,
            self.scale,
        );
        Some(GpuReading {
            index: sample.index,
            name: sample.name,
            load_percent: sample.load_percent,
            memory_used: sample.memory_used,
            memory_total: sample.memory_total,
            current: t.current,
            high: t.high,
            critical: t.critical,
            scale: t.scale,
            severity,
        })
    }
}

type Opener<S> = fn() -> Result<S, TelemetryError>;

/// Configured GPUs. The driver is opened once, at task start.
pub struct GpuTask<S> {
    open: Opener<S>,
    source: Option<Arc<S>>,
    indices: Vec<u32>,
    settings: GpuSettings,
    period: Duration,
}

impl<S: GpuSource> GpuTask<S> {
    pub fn new(open: Opener<S>, indices: Vec<u32>, settings: GpuSettings, period: Duration) -> Self {
        Self {
            open,
            source: None,
            indices,
            settings,
            period,
        }
    }

    pub fn from_config(open: Opener<S>, config: &AppConfig) -> Self {
        Self::new(
            open,
            config.sensors.gpus.clone(),
            GpuSettings::from_config(config),
            config.sampling.slow_period(),
        )
    }
}

fn join_err(e: tokio::task::JoinError) -> TelemetryError {
    TelemetryError::sensor(format!("gpu task join: {}", e))
}

impl<S: GpuSource> SamplingTask for GpuTask<S> {
    fn family(&self) -> Family {
        Family::Gpu
    }

    fn period(&self) -> Duration {
        self.period
    }

    async fn prepare(&mut self) -> Result<(), TelemetryError> {
        if self.indices.is_empty() {
            return Err(TelemetryError::configuration("no GPUs configured"));
        }
        let open = self.open;
        let indices = self.indices.clone();
        let source = tokio::task::spawn_blocking(move || {
            let source = open()?;
            let count = source.device_count()?;
            if let Some(missing) = indices.iter().find(|i| **i >= count) {
                return Err(TelemetryError::configuration(format!(
                    "GPU {} not found; driver reports {} devices",
                    missing, count
                )));
            }
            Ok(source)
        })
        .await
        .map_err(join_err)?;
        // a driver that will not load is a setup problem, not a transient one
        let source = source.map_err(|e| match e {
            TelemetryError::Configuration(_) => e,
            other => TelemetryError::configuration(other.to_string()),
        })?;
        self.source = Some(Arc::new(source));
        Ok(())
    }

    async fn sample(&mut self) -> Result<Snapshot, TelemetryError> {
        let source = self
            .source
            .clone()
            .ok_or_else(|| TelemetryError::sensor("GPU source not prepared"))?;
        let indices = self.indices.clone();
        let samples = tokio::task::spawn_blocking(move || {
            indices
                .into_iter()
                .map(|i| source.read(i))
                .collect::<Vec<_>>()
        })
        .await
        .map_err(join_err)?;

        let mut gpus = Vec::with_capacity(samples.len());
        for sample in samples {
            match sample {
                Ok(s) => {
                    let index = s.index;
                    match self.settings.reading(s) {
                        Some(r) => gpus.push(r),
                        None => tracing::warn!(gpu = index, "GPU reported no temperature; skipped"),
                    }
                }
                Err(e) => tracing::warn!(error = %e, operation = "gpu_read", "GPU skipped"),
            }
        }
        if gpus.is_empty() {
            return Err(TelemetryError::sensor("no configured GPU could be read"));
        }
        Ok(Snapshot::Gpu(GpuSnapshot { gpus }))
    }
}
