// Error taxonomy for the sampling core. Every variant is recovered inside the task that raised it.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TelemetryError {
    /// An OS counter or sensor could not be read this cycle.
    #[error("sensor unavailable: {0}")]
    SensorUnavailable(String),

    /// The legacy temperature service is not listening (or timed out).
    #[error("service unreachable at {addr}: {reason}")]
    ServiceUnreachable { addr: String, reason: String },

    /// Malformed response from the legacy temperature service.
    #[error("protocol error: {0}")]
    Protocol(String),

    /// A configured mountpoint, interface or sensor does not exist.
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl TelemetryError {
    pub fn sensor(msg: impl Into<String>) -> Self {
        TelemetryError::SensorUnavailable(msg.into())
    }

    pub fn protocol(msg: impl Into<String>) -> Self {
        TelemetryError::Protocol(msg.into())
    }

    pub fn configuration(msg: impl Into<String>) -> Self {
        TelemetryError::Configuration(msg.into())
    }
}
