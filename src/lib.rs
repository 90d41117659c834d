// Library for tests to access modules

pub mod config;
pub mod device_health;
pub mod display;
pub mod error;
pub mod gpu_repo;
pub mod hddtemp_repo;
pub mod models;
pub mod publisher;
pub mod scheduler;
pub mod severity;
pub mod sysinfo_repo;
pub mod units;
pub mod weather_repo;
