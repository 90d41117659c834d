// Per-family sampling logic tests

mod common;

use chrono::{FixedOffset, TimeZone};
use deskstat::config::AppConfig;
use deskstat::device_health::{FixedProbe, VM_DEVICE};
use deskstat::error::TelemetryError;
use deskstat::models::*;
use deskstat::scheduler::SamplingTask;
use deskstat::scheduler::tasks::*;
use deskstat::severity::Severity;
use deskstat::sysinfo_repo::{InterfaceCounters, SensorReading};
use deskstat::units::Scale;
use std::sync::Arc;
use std::time::Duration;

fn config_with(extra_sensors: &str) -> AppConfig {
    AppConfig::load_from_str(&format!("{}{}", common::MINIMAL_CONFIG, extra_sensors)).unwrap()
}

#[test]
fn test_throughput_is_delta_over_window() {
    let first = InterfaceCounters {
        bytes_recv: 1000,
        bytes_sent: 500,
    };
    let second = InterfaceCounters {
        bytes_recv: 1500,
        bytes_sent: 800,
    };
    let n = throughput("eth0", first, second);
    assert_eq!(n.interface, "eth0");
    assert_eq!(n.down_speed, 500);
    assert_eq!(n.up_speed, 300);
    assert_eq!(n.bytes_recv, 1500);
    assert_eq!(n.bytes_sent, 800);
}

#[test]
fn test_throughput_counter_reset_saturates() {
    let first = InterfaceCounters {
        bytes_recv: 10_000,
        bytes_sent: 10_000,
    };
    let second = InterfaceCounters {
        bytes_recv: 200,
        bytes_sent: 10_050,
    };
    let n = throughput("eth0", first, second);
    assert_eq!(n.down_speed, 0);
    assert_eq!(n.up_speed, 50);
}

#[test]
fn test_clock_24_hour() {
    let tz = FixedOffset::east_opt(0).unwrap();
    let now = tz.with_ymd_and_hms(2024, 3, 5, 14, 7, 9).unwrap();
    let c = ClockSnapshot::at(&now, ClockFormat::TwentyFourHour);
    assert_eq!(c.hour, "14");
    assert_eq!(c.minute, "07");
    assert_eq!(c.second, "09");
    assert_eq!(c.am_pm, None);
    assert_eq!(c.weekday, "Tuesday");
    assert_eq!(c.day, "05");
    assert_eq!(c.month, "March");
    assert_eq!(c.year, "2024");
}

#[test]
fn test_clock_12_hour() {
    let tz = FixedOffset::east_opt(3600).unwrap();
    let afternoon = tz.with_ymd_and_hms(2024, 3, 5, 14, 7, 9).unwrap();
    let c = ClockSnapshot::at(&afternoon, ClockFormat::TwelveHour);
    assert_eq!(c.hour, "02");
    assert_eq!(c.am_pm.as_deref(), Some("PM"));

    let midnight = tz.with_ymd_and_hms(2024, 3, 5, 0, 30, 0).unwrap();
    let c = ClockSnapshot::at(&midnight, ClockFormat::TwelveHour);
    assert_eq!(c.hour, "12");
    assert_eq!(c.am_pm.as_deref(), Some("AM"));
}

#[tokio::test]
async fn test_clock_task_produces_clock_snapshot() {
    let mut task = ClockTask::new(ClockFormat::TwelveHour, Duration::from_secs(1));
    assert_eq!(task.family(), Family::Clock);
    let Snapshot::Clock(c) = task.sample().await.unwrap() else {
        panic!("wrong family");
    };
    assert!(c.am_pm.is_some());
}

#[test]
fn test_partition_usage_from_space() {
    let u = PartitionUsage::from_space("/", 1000, 250);
    assert_eq!(u.mountpoint, "/");
    assert_eq!(u.used, 750);
    assert_eq!(u.free, 250);
    assert_eq!(u.percent_used, 75.0);
    assert_eq!(u.percent_free, 25.0);
    assert!(u.percent_used >= 0.0 && u.percent_used <= 100.0);
}

#[test]
fn test_partition_usage_zero_total() {
    let u = PartitionUsage::from_space("/mnt/empty", 0, 0);
    assert_eq!(u.percent_used, 0.0);
    assert_eq!(u.percent_free, 0.0);
}

#[test]
fn test_percent_of_clamps() {
    assert_eq!(percent_of(5, 0), 0.0);
    assert_eq!(percent_of(50, 200), 25.0);
    assert_eq!(percent_of(300, 200), 100.0);
}

#[test]
fn test_temperature_falls_back_to_configured_thresholds() {
    let config = config_with("");
    let task = TemperatureTask::from_config(&config, Arc::new(FixedProbe(false)));
    let t = task
        .snapshot_from(SensorReading {
            label: "Package id 0".into(),
            current: Some(80.0),
            high: None,
            critical: None,
        })
        .unwrap();
    assert_eq!(t.label, "Package id 0");
    assert_eq!(t.current, 80.0);
    assert_eq!(t.high, 70.0);
    assert_eq!(t.critical, 85.0);
    assert_eq!(t.scale, Scale::Celsius);
    assert_eq!(t.severity, Severity::Critical);
}

#[test]
fn test_temperature_uses_reported_critical_and_target_scale() {
    let config = config_with("temperature_unit = \"F\"\n");
    let task = TemperatureTask::from_config(&config, Arc::new(FixedProbe(false)));
    let t = task
        .snapshot_from(SensorReading {
            label: "Tctl".into(),
            current: Some(40.0),
            high: None,
            critical: Some(100.0),
        })
        .unwrap();
    assert_eq!(t.scale, Scale::Fahrenheit);
    assert!((t.current - 104.0).abs() < 1e-9);
    assert!((t.critical - 212.0).abs() < 1e-9);
    assert_eq!(t.severity, Severity::Normal);
}

#[test]
fn test_temperature_without_current_is_sensor_error() {
    let config = config_with("");
    let task = TemperatureTask::from_config(&config, Arc::new(FixedProbe(false)));
    let err = task
        .snapshot_from(SensorReading {
            label: "acpitz".into(),
            current: None,
            high: None,
            critical: None,
        })
        .unwrap_err();
    assert!(matches!(err, TelemetryError::SensorUnavailable(_)));
}

#[tokio::test]
async fn test_temperature_task_in_vm_reports_placeholder() {
    let config = config_with("");
    let mut task = TemperatureTask::from_config(&config, Arc::new(FixedProbe(true)));
    task.prepare().await.unwrap();
    let Snapshot::Temperature(t) = task.sample().await.unwrap() else {
        panic!("wrong family");
    };
    assert_eq!(t.label, "vmtemp");
    assert_eq!(t.current, 38.0);
    assert_eq!(t.severity, Severity::Normal);
}

#[tokio::test]
async fn test_device_health_task_in_vm() {
    let config = config_with("nvme = [\"nvme0n1\"]\n");
    let mut task = DeviceHealthTask::from_config(&config, Arc::new(FixedProbe(true)));
    task.prepare().await.unwrap();
    let Snapshot::DeviceHealth(d) = task.sample().await.unwrap() else {
        panic!("wrong family");
    };
    assert_eq!(d.devices.len(), 1);
    assert_eq!(d.devices[0].device, VM_DEVICE);
}

#[tokio::test]
async fn test_device_health_task_unprepared_fails_cycle() {
    let config = config_with("");
    let mut task = DeviceHealthTask::from_config(&config, Arc::new(FixedProbe(true)));
    assert!(task.sample().await.is_err());
}

#[tokio::test]
async fn test_partitions_task_without_mountpoints_is_misconfigured() {
    let mut task = PartitionsTask::new(Vec::new(), Duration::from_secs(10));
    let err = task.prepare().await.unwrap_err();
    assert!(matches!(err, TelemetryError::Configuration(_)));
}

#[tokio::test]
async fn test_network_task_with_unknown_interface_is_misconfigured() {
    let mut task = NetworkTask::new(
        "no-such-iface0".into(),
        Duration::from_millis(10),
        Duration::ZERO,
    );
    let err = task.prepare().await.unwrap_err();
    assert!(matches!(err, TelemetryError::Configuration(_)));
}
