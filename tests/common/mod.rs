// Shared test helpers

#![allow(dead_code)]

use deskstat::error::TelemetryError;
use deskstat::models::*;
use deskstat::scheduler::SamplingTask;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio::net::TcpListener;

pub const MINIMAL_CONFIG: &str = r#"
[sensors]
interface = "lo"
mountpoints = ["/"]
"#;

pub fn load_snapshot(n: u64) -> LoadSnapshot {
    LoadSnapshot {
        cpu_percent: n as f64,
        cpu_frequency_mhz: n,
        ram_percent: n as f64,
        ram_used: n,
        ram_total: n,
        swap_percent: n as f64,
        swap_used: n,
        swap_total: n,
        uptime: Duration::from_secs(n),
    }
}

/// Serve `response` once per connection on a loopback port, then close. Returns the port.
pub async fn spawn_legacy_daemon(response: &'static str) -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            let _ = socket.write_all(response.as_bytes()).await;
            let _ = socket.shutdown().await;
        }
    });
    port
}

/// Accept connections and hold them open without ever writing. Returns the port.
pub async fn spawn_silent_daemon() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });
    port
}

/// A port nothing listens on.
pub async fn closed_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap().port()
}

/// Publishes Load snapshots numbered 1, 2, 3...; every `fail_every`-th cycle fails.
pub struct CountingTask {
    pub period: Duration,
    pub retry_after: Duration,
    pub fail_every: Option<u64>,
    pub calls: Arc<AtomicU64>,
}

impl CountingTask {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            retry_after: period,
            fail_every: None,
            calls: Arc::new(AtomicU64::new(0)),
        }
    }
}

impl SamplingTask for CountingTask {
    fn family(&self) -> Family {
        Family::Load
    }

    fn period(&self) -> Duration {
        self.period
    }

    fn retry_after(&self) -> Duration {
        self.retry_after
    }

    async fn sample(&mut self) -> Result<Snapshot, TelemetryError> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        if let Some(every) = self.fail_every
            && n % every == 0
        {
            return Err(TelemetryError::sensor("transient"));
        }
        Ok(Snapshot::Load(load_snapshot(n)))
    }
}
