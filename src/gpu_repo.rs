// GPU readings through NVML. Calls block, so tasks run them inside spawn_blocking.

#[cfg(feature = "nvml")]
use nvml_wrapper::{Nvml, enum_wrappers::device::TemperatureSensor};

use crate::error::TelemetryError;

/// Raw GPU reading; temperature in Celsius.
#[derive(Debug, Clone, PartialEq)]
pub struct GpuSample {
    pub index: u32,
    pub name: String,
    pub temperature: Option<f64>,
    pub load_percent: f64,
    pub memory_used: u64,
    pub memory_total: u64,
}

/// Blocking GPU driver access.
pub trait GpuSource: Send + Sync + 'static {
    fn device_count(&self) -> Result<u32, TelemetryError>;

    fn read(&self, index: u32) -> Result<GpuSample, TelemetryError>;
}

/// NVIDIA GPUs via NVML.
pub struct NvmlGpuRepo {
    #[cfg(feature = "nvml")]
    nvml: Nvml,
}

impl NvmlGpuRepo {
    /// Load the NVML library. Fails when no NVIDIA driver is installed.
    pub fn open() -> Result<Self, TelemetryError> {
        #[cfg(feature = "nvml")]
        {
            let nvml = Nvml::init()
                .map_err(|e| TelemetryError::configuration(format!("NVML init failed: {}", e)))?;
            Ok(Self { nvml })
        }
        #[cfg(not(feature = "nvml"))]
        {
            Err(TelemetryError::configuration(
                "built without NVIDIA GPU support",
            ))
        }
    }
}

impl GpuSource for NvmlGpuRepo {
    fn device_count(&self) -> Result<u32, TelemetryError> {
        #[cfg(feature = "nvml")]
        {
            self.nvml
                .device_count()
                .map_err(|e| TelemetryError::sensor(format!("NVML device count: {}", e)))
        }
        #[cfg(not(feature = "nvml"))]
        {
            Ok(0)
        }
    }

    fn read(&self, index: u32) -> Result<GpuSample, TelemetryError> {
        #[cfg(feature = "nvml")]
        {
            let device = self
                .nvml
                .device_by_index(index)
                .map_err(|e| TelemetryError::sensor(format!("GPU {}: {}", index, e)))?;
            let memory = device
                .memory_info()
                .map_err(|e| TelemetryError::sensor(format!("GPU {} memory: {}", index, e)))?;
            Ok(GpuSample {
                index,
                name: device
                    .name()
                    .unwrap_or_else(|_| format!("NVIDIA GPU {}", index)),
                temperature: device
                    .temperature(TemperatureSensor::Gpu)
                    .ok()
                    .map(f64::from),
                load_percent: device
                    .utilization_rates()
                    .map(|u| f64::from(u.gpu).clamp(0.0, 100.0))
                    .unwrap_or(0.0),
                memory_used: memory.used,
                memory_total: memory.total,
            })
        }
        #[cfg(not(feature = "nvml"))]
        {
            Err(TelemetryError::sensor(format!(
                "GPU {}: built without NVIDIA GPU support",
                index
            )))
        }
    }
}
