use anyhow::Result;
use chrono::{Duration as ChronoDuration, Utc};
use log::info;
use std::path::PathBuf;
use tokio::time::{interval, Duration};

mod config;
mod error;
mod generator;
mod models;
mod services;
mod stats;
mod store;

pub use error::Error;

use services::OpsService;
use stats::AlertFilter;
use store::CatalogRepository;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();
    info!("Starting surveillance operations core");

    // Load configuration
    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let config = config::load_config(config_path.as_deref())?;
    info!("Configuration loaded");

    // Seed the catalog and create demo control entries for one person and
    // one vehicle so the generator has candidates from the start.
    let service = OpsService::new(CatalogRepository::with_fixtures());
    let now = Utc::now();
    for kind in [models::TargetKind::Person, models::TargetKind::Vehicle] {
        if let Some(target) = service.catalog().targets_by_kind(kind).first() {
            let target = (*target).clone();
            service.create_control_entry(
                &target,
                format!("Watch for {} near restricted areas", kind),
                now,
                now + ChronoDuration::days(30),
            )?;
        }
    }

    // Start the synthetic event generator
    let cancel = service.spawn_generator(&config.generator, None);

    // Periodically log a dashboard summary until shutdown
    let summary_service = service.clone();
    let summary_interval = config.summary_interval_secs;
    tokio::spawn(async move {
        let mut ticker = interval(Duration::from_secs(summary_interval));
        loop {
            ticker.tick().await;
            let summary = summary_service.dashboard(&AlertFilter::default());
            info!(
                "Dashboard: {} alerts, {}% resolved, by status {:?}",
                summary.total, summary.percent_resolved, summary.by_status
            );
        }
    });

    tokio::signal::ctrl_c().await?;
    info!("Shutdown requested, stopping generator");
    cancel.cancel();

    let summary = service.dashboard(&AlertFilter::default());
    info!(
        "Final state: {} control entries, {} alerts, {}% resolved",
        service.list_control_entries(None).len(),
        summary.total,
        summary.percent_resolved
    );

    Ok(())
}
