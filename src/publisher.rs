// Latest-value hand-off from sampling tasks to the display layer.
// One watch cell per family: publishing swaps an Arc, reading clones it. No queue, no backpressure.

use crate::models::{Family, Snapshot};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::watch;

pub type SnapshotRef = Arc<Snapshot>;

/// Whether a family has anything to show, and if not, why.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum FamilyStatus {
    /// No snapshot yet; the task is starting or its first cycle failed.
    Pending,
    /// At least one snapshot has been published.
    Live,
    /// The task is misconfigured and will not publish until restarted.
    Unavailable { reason: String },
}

pub struct SnapshotPublisher {
    cells: Vec<watch::Sender<Option<SnapshotRef>>>,
    status: Vec<watch::Sender<FamilyStatus>>,
}

impl Default for SnapshotPublisher {
    fn default() -> Self {
        Self::new()
    }
}

impl SnapshotPublisher {
    pub fn new() -> Self {
        let cells = Family::ALL
            .iter()
            .map(|_| watch::Sender::new(None))
            .collect();
        let status = Family::ALL
            .iter()
            .map(|_| watch::Sender::new(FamilyStatus::Pending))
            .collect();
        Self { cells, status }
    }

    fn cell(&self, family: Family) -> &watch::Sender<Option<SnapshotRef>> {
        &self.cells[family.index()]
    }

    /// Replace the latest snapshot of the snapshot's family. Only that family's task calls this.
    pub fn publish(&self, snapshot: Snapshot) {
        let family = snapshot.family();
        // send_replace stores the value even when nobody is subscribed
        self.cell(family).send_replace(Some(Arc::new(snapshot)));
        self.status[family.index()].send_if_modified(|s| {
            if *s == FamilyStatus::Live {
                return false;
            }
            *s = FamilyStatus::Live;
            true
        });
        tracing::trace!(%family, "snapshot published");
    }

    /// Record that `family` will not publish, so the display can say so instead of waiting.
    pub fn mark_unavailable(&self, family: Family, reason: impl Into<String>) {
        self.status[family.index()].send_replace(FamilyStatus::Unavailable {
            reason: reason.into(),
        });
    }

    /// Most recent snapshot of `family`, or `None` before its first publication.
    pub fn latest(&self, family: Family) -> Option<SnapshotRef> {
        self.cell(family).borrow().clone()
    }

    pub fn status(&self, family: Family) -> FamilyStatus {
        self.status[family.index()].borrow().clone()
    }

    /// Receiver that is notified on every publication for `family`.
    pub fn subscribe(&self, family: Family) -> watch::Receiver<Option<SnapshotRef>> {
        self.cell(family).subscribe()
    }

    pub fn subscribe_status(&self, family: Family) -> watch::Receiver<FamilyStatus> {
        self.status[family.index()].subscribe()
    }
}
