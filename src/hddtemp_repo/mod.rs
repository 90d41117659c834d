// Drive temperatures from the hddtemp daemon (connect-and-read over loopback TCP, no request sent).

pub mod protocol;

use crate::error::TelemetryError;
use protocol::{HddTempRecord, parse_response};
use std::time::Duration;
use tokio::io::AsyncReadExt;
use tokio::net::TcpStream;
use tokio::time::timeout;
use tracing::instrument;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 7634;

/// Upper bound on a response; the daemon sends a few hundred bytes per drive.
const MAX_RESPONSE_BYTES: u64 = 64 * 1024;

#[derive(Debug, Clone)]
pub struct HddTempRepo {
    addr: String,
    connect_timeout: Duration,
    read_timeout: Duration,
}

impl HddTempRepo {
    pub fn new(host: &str, port: u16, connect_timeout: Duration, read_timeout: Duration) -> Self {
        Self {
            addr: format!("{}:{}", host, port),
            connect_timeout,
            read_timeout,
        }
    }

    pub fn addr(&self) -> &str {
        &self.addr
    }

    /// Read the raw response. Refusal and timeouts are `ServiceUnreachable`.
    #[instrument(skip(self), fields(repo = "hddtemp", operation = "fetch", addr = %self.addr))]
    pub async fn fetch(&self) -> Result<String, TelemetryError> {
        let unreachable_err = |reason: String| TelemetryError::ServiceUnreachable {
            addr: self.addr.clone(),
            reason,
        };

        let stream = timeout(self.connect_timeout, TcpStream::connect(&self.addr))
            .await
            .map_err(|_| unreachable_err("connect timed out".into()))?
            .map_err(|e| unreachable_err(e.to_string()))?;

        let mut limited = stream.take(MAX_RESPONSE_BYTES);
        let mut buf = Vec::new();
        timeout(self.read_timeout, limited.read_to_end(&mut buf))
            .await
            .map_err(|_| unreachable_err("read timed out".into()))?
            .map_err(|e| unreachable_err(e.to_string()))?;

        String::from_utf8(buf).map_err(|e| TelemetryError::protocol(e.to_string()))
    }

    /// Drives reported by the daemon. An absent daemon or an unusable response yields no drives.
    pub async fn records(&self) -> Vec<HddTempRecord> {
        let raw = match self.fetch().await {
            Ok(raw) => raw,
            Err(e @ TelemetryError::ServiceUnreachable { .. }) => {
                tracing::debug!(error = %e, "hddtemp not available; no legacy drives");
                return Vec::new();
            }
            Err(e) => {
                tracing::warn!(error = %e, operation = "hddtemp_fetch", "hddtemp response dropped");
                return Vec::new();
            }
        };

        match parse_response(&raw) {
            Ok(parsed) => {
                for e in &parsed.skipped {
                    tracing::warn!(error = %e, operation = "hddtemp_parse", "hddtemp record skipped");
                }
                parsed.records
            }
            Err(e) => {
                tracing::warn!(error = %e, operation = "hddtemp_parse", "hddtemp response dropped");
                Vec::new()
            }
        }
    }
}
