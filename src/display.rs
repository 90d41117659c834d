// Console rendering of snapshots. Byte counts become human-readable only here.

use crate::models::Snapshot;
use crate::severity::Severity;
use humansize::{DECIMAL, format_size};
use std::time::Duration;

/// "3 days, 4 hrs 5 min and 6 sec"
pub fn format_uptime(uptime: Duration) -> String {
    let total = uptime.as_secs();
    let (minutes, seconds) = (total / 60, total % 60);
    let (hours, minutes) = (minutes / 60, minutes % 60);
    let (days, hours) = (hours / 24, hours % 24);
    format!(
        "{} days, {} hrs {} min and {} sec",
        days, hours, minutes, seconds
    )
}

fn tier(severity: Severity) -> &'static str {
    match severity {
        Severity::Normal => "ok",
        Severity::Warning => "WARN",
        Severity::Critical => "CRIT",
    }
}

/// One line per snapshot, as the console display prints it.
pub fn render(snapshot: &Snapshot) -> String {
    match snapshot {
        Snapshot::Clock(c) => {
            let ampm = c.am_pm.as_deref().map(|s| format!(" {}", s)).unwrap_or_default();
            format!(
                "{}:{}:{}{}  {}, {} {} {}",
                c.hour, c.minute, c.second, ampm, c.weekday, c.day, c.month, c.year
            )
        }
        Snapshot::Load(l) => format!(
            "cpu {:.0}% @ {} MHz | ram {} / {} ({:.0}%) | swap {} / {} ({:.0}%) | up {}",
            l.cpu_percent,
            l.cpu_frequency_mhz,
            format_size(l.ram_used, DECIMAL),
            format_size(l.ram_total, DECIMAL),
            l.ram_percent,
            format_size(l.swap_used, DECIMAL),
            format_size(l.swap_total, DECIMAL),
            l.swap_percent,
            format_uptime(l.uptime),
        ),
        Snapshot::Temperature(t) => format!(
            "{}: {:.0}°{} [{}] (high {:.0}, crit {:.0})",
            t.label,
            t.current,
            t.scale.symbol(),
            tier(t.severity),
            t.high,
            t.critical
        ),
        Snapshot::Partitions(p) => p
            .partitions
            .iter()
            .map(|u| {
                format!(
                    "{} used {} ({:.0}%) free {} ({:.0}%) of {}",
                    u.mountpoint,
                    format_size(u.used, DECIMAL),
                    u.percent_used,
                    format_size(u.free, DECIMAL),
                    u.percent_free,
                    format_size(u.total, DECIMAL)
                )
            })
            .collect::<Vec<_>>()
            .join(" | "),
        Snapshot::Network(n) => format!(
            "{}: down {}/s up {}/s | total rx {} tx {}",
            n.interface,
            format_size(n.down_speed, DECIMAL),
            format_size(n.up_speed, DECIMAL),
            format_size(n.bytes_recv, DECIMAL),
            format_size(n.bytes_sent, DECIMAL)
        ),
        Snapshot::DeviceHealth(d) if d.devices.is_empty() => "no storage devices".to_string(),
        Snapshot::DeviceHealth(d) => d
            .devices
            .iter()
            .map(|r| {
                format!(
                    "{} ({}) {:.0}°{} [{}]",
                    r.device,
                    r.model,
                    r.current,
                    r.scale.symbol(),
                    tier(r.severity)
                )
            })
            .collect::<Vec<_>>()
            .join(" | "),
        Snapshot::Gpu(g) => g
            .gpus
            .iter()
            .map(|r| {
                format!(
                    "{} {:.0}°{} [{}] load {:.0}% mem {} / {}",
                    r.name,
                    r.current,
                    r.scale.symbol(),
                    tier(r.severity),
                    r.load_percent,
                    format_size(r.memory_used, DECIMAL),
                    format_size(r.memory_total, DECIMAL)
                )
            })
            .collect::<Vec<_>>()
            .join(" | "),
        Snapshot::Weather(w) => format!(
            "{:.0}°{} humidity {:.0}% pressure {:.0}hPa visibility {:.1}Km wind {}m/s {}",
            w.temperature,
            w.scale.symbol(),
            w.humidity_percent,
            w.pressure_hpa,
            w.visibility_km,
            w.wind_speed_ms,
            w.wind_direction
        ),
    }
}
