// Sampling scheduler: one task per family, each looping build -> publish -> sleep until cancelled.

pub mod tasks;

use crate::error::TelemetryError;
use crate::models::{Family, Snapshot};
use crate::publisher::SnapshotPublisher;
use std::collections::HashSet;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::Instrument;

/// Minimum pause after a failed cycle, whatever the task's period.
pub const DEFAULT_RETRY_AFTER: Duration = Duration::from_secs(1);

/// One metric family's sampler. Owns all of its state; nothing is shared with other tasks.
pub trait SamplingTask: Send + 'static {
    fn family(&self) -> Family;

    /// Pause between the end of one cycle and the start of the next.
    fn period(&self) -> Duration;

    /// Lower bound on the pause after a failed cycle. A task whose source has vanished
    /// must not spin even when its period is zero.
    fn retry_after(&self) -> Duration {
        DEFAULT_RETRY_AFTER
    }

    /// Runs once at task start. A `Configuration` error here parks the task as degraded.
    fn prepare(&mut self) -> impl Future<Output = Result<(), TelemetryError>> + Send {
        async { Ok(()) }
    }

    /// Build one snapshot of this task's family.
    fn sample(&mut self) -> impl Future<Output = Result<Snapshot, TelemetryError>> + Send;
}

/// Lifecycle of a sampling task. There is no paused state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskState {
    Idle,
    Running,
    Sleeping,
    /// Misconfigured at start; waits for cancellation without sampling.
    Degraded,
    Cancelled,
}

/// What a task did over its lifetime; returned when it exits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskReport {
    pub family: Family,
    pub published: u64,
    pub failed: u64,
    pub degraded: bool,
    pub final_state: TaskState,
}

/// Resolves once shutdown has been requested (or the scheduler is gone).
async fn cancelled(shutdown: &mut watch::Receiver<bool>) {
    let _ = shutdown.wait_for(|stop| *stop).await;
}

/// Drive `task` until `shutdown` flips to true. Shutdown interrupts both the sleep and an
/// in-flight sample, and nothing is published once it has been observed.
pub async fn run_task<T: SamplingTask>(
    mut task: T,
    publisher: Arc<SnapshotPublisher>,
    mut shutdown: watch::Receiver<bool>,
) -> TaskReport {
    let family = task.family();
    let period = task.period();
    let retry_after = task.retry_after();
    let mut report = TaskReport {
        family,
        published: 0,
        failed: 0,
        degraded: false,
        final_state: TaskState::Idle,
    };

    let prepared = tokio::select! {
        biased;
        _ = cancelled(&mut shutdown) => {
            report.final_state = TaskState::Cancelled;
            return report;
        }
        r = task.prepare() => r,
    };
    if let Err(e) = prepared {
        tracing::error!(error = %e, "task misconfigured; reporting unavailable until shutdown");
        publisher.mark_unavailable(family, e.to_string());
        report.degraded = true;
        report.final_state = TaskState::Degraded;
        cancelled(&mut shutdown).await;
        report.final_state = TaskState::Cancelled;
        return report;
    }
    tracing::debug!(period_ms = period.as_millis() as u64, "task running");

    loop {
        report.final_state = TaskState::Running;
        let outcome = tokio::select! {
            biased;
            _ = cancelled(&mut shutdown) => break,
            r = task.sample() => r,
        };
        let pause = match outcome {
            Ok(snapshot) if snapshot.family() == family => {
                publisher.publish(snapshot);
                report.published += 1;
                period
            }
            Ok(snapshot) => {
                report.failed += 1;
                tracing::warn!(
                    produced = %snapshot.family(),
                    "task produced a snapshot of another family; dropped"
                );
                period.max(retry_after)
            }
            Err(e) => {
                report.failed += 1;
                tracing::warn!(error = %e, "sample failed; skipping this cycle");
                period.max(retry_after)
            }
        };

        report.final_state = TaskState::Sleeping;
        tokio::select! {
            biased;
            _ = cancelled(&mut shutdown) => break,
            _ = tokio::time::sleep(pause) => {}
        }
    }

    report.final_state = TaskState::Cancelled;
    tracing::debug!(
        published = report.published,
        failed = report.failed,
        "task cancelled"
    );
    report
}

/// Owns the sampling tasks and the shutdown signal they share.
pub struct Scheduler {
    publisher: Arc<SnapshotPublisher>,
    shutdown_tx: watch::Sender<bool>,
    families: HashSet<Family>,
    handles: Vec<(Family, JoinHandle<TaskReport>)>,
}

impl Scheduler {
    pub fn new(publisher: Arc<SnapshotPublisher>) -> Self {
        Self {
            publisher,
            shutdown_tx: watch::Sender::new(false),
            families: HashSet::new(),
            handles: Vec::new(),
        }
    }

    pub fn publisher(&self) -> Arc<SnapshotPublisher> {
        self.publisher.clone()
    }

    pub fn families(&self) -> impl Iterator<Item = Family> + '_ {
        self.handles.iter().map(|(f, _)| *f)
    }

    /// Start `task`. A family may only have one writer, so a second task for it is rejected.
    pub fn spawn<T: SamplingTask>(&mut self, task: T) -> Result<(), TelemetryError> {
        let family = task.family();
        if !self.families.insert(family) {
            return Err(TelemetryError::configuration(format!(
                "family {} already has a sampling task",
                family
            )));
        }
        let span = tracing::info_span!("sampler", %family);
        let handle = tokio::spawn(
            run_task(task, self.publisher.clone(), self.shutdown_tx.subscribe()).instrument(span),
        );
        self.handles.push((family, handle));
        Ok(())
    }

    /// Signal every task to stop and wait for them to exit.
    pub async fn shutdown(self) -> Vec<TaskReport> {
        self.shutdown_tx.send_replace(true);
        let mut reports = Vec::with_capacity(self.handles.len());
        for (family, handle) in self.handles {
            match handle.await {
                Ok(report) => reports.push(report),
                Err(e) => tracing::warn!(%family, error = %e, "sampling task ended abnormally"),
            }
        }
        reports
    }
}
