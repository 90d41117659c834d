use anyhow::Result;
use deskstat::models::Family;
use deskstat::*;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::FormatTime;

struct LocalTimer;

impl FormatTime for LocalTimer {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> std::fmt::Result {
        write!(
            w,
            "{}",
            chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z")
        )
    }
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        let mut sigterm =
            match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
                Ok(s) => s,
                Err(_) => {
                    let _ = tokio::signal::ctrl_c().await;
                    return;
                }
            };
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {}
            _ = sigterm.recv() => {}
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_timer(LocalTimer)
        .with_env_filter(filter)
        .init();

    let app_config = config::AppConfig::load()?;
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        interface = %app_config.sensors.interface,
        unit = ?app_config.sensors.temperature_unit,
        "starting samplers"
    );

    let publisher = Arc::new(publisher::SnapshotPublisher::new());
    let mut sampler = scheduler::Scheduler::new(publisher.clone());
    scheduler::tasks::spawn_all(&mut sampler, &app_config)?;

    // Headless display: print each family whenever it has a newer snapshot.
    let mut receivers: Vec<_> = Family::ALL
        .iter()
        .map(|f| (*f, publisher.subscribe(*f)))
        .collect();
    let mut status_receivers: Vec<_> = Family::ALL
        .iter()
        .map(|f| (*f, publisher.subscribe_status(*f)))
        .collect();
    let mut render_tick =
        tokio::time::interval(Duration::from_millis(app_config.display.render_interval_ms));
    render_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    let shutdown = shutdown_signal();
    tokio::pin!(shutdown);
    loop {
        tokio::select! {
            _ = render_tick.tick() => {
                for (family, rx) in receivers.iter_mut() {
                    if !rx.has_changed().unwrap_or(false) {
                        continue;
                    }
                    let latest = rx.borrow_and_update().clone();
                    if let Some(snapshot) = latest {
                        tracing::info!(family = %family, "{}", display::render(&snapshot));
                    }
                }
                for (family, rx) in status_receivers.iter_mut() {
                    if !rx.has_changed().unwrap_or(false) {
                        continue;
                    }
                    if let publisher::FamilyStatus::Unavailable { reason } = &*rx.borrow_and_update() {
                        tracing::warn!(family = %family, reason = %reason, "unavailable");
                    }
                }
            }
            _ = &mut shutdown => {
                tracing::info!("Received shutdown signal");
                break;
            }
        }
    }

    for report in sampler.shutdown().await {
        tracing::debug!(
            family = %report.family,
            published = report.published,
            failed = report.failed,
            degraded = report.degraded,
            "sampler stopped"
        );
    }
    Ok(())
}
