//! Synthetic event generator.
//!
//! Drives the demo dashboard: each tick it probabilistically synthesizes one
//! alert record against an active control entry. Planning (the random draws)
//! is separated from the store effect so tests can single-step ticks with a
//! seeded rng instead of waiting on wall-clock timers.

use chrono::{DateTime, Utc};
use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::time::{interval, Duration};
use tokio_util::sync::CancellationToken;

use crate::config::GeneratorConfig;
use crate::models::{AlertRecord, NewAlert, Severity, TargetKind};
use crate::store::{AlertsRepository, CatalogRepository, ControlsRepository};

/// The outcome of one tick's random draws, before touching the store.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedAlert {
    pub kind: TargetKind,
    pub location: String,
}

/// Decide whether this tick produces an alert and, if so, for which target
/// category and location. Pure over its inputs.
pub fn plan_tick(rng: &mut StdRng, probability: f64, locations: &[String]) -> Option<PlannedAlert> {
    if locations.is_empty() || rng.gen::<f64>() >= probability {
        return None;
    }
    let kind = if rng.gen_bool(0.5) {
        TargetKind::Person
    } else {
        TargetKind::Vehicle
    };
    let location = locations[rng.gen_range(0..locations.len())].clone();
    Some(PlannedAlert { kind, location })
}

fn severity_for(kind: TargetKind) -> Severity {
    match kind {
        TargetKind::Person => Severity::High,
        TargetKind::Vehicle => Severity::Medium,
    }
}

pub struct EventGenerator {
    controls: ControlsRepository,
    alerts: AlertsRepository,
    locations: Vec<String>,
    probability: f64,
    tick_interval: Duration,
    rng: StdRng,
}

impl EventGenerator {
    /// Create a generator with an entropy-seeded rng.
    pub fn new(
        controls: ControlsRepository,
        alerts: AlertsRepository,
        catalog: &CatalogRepository,
        config: &GeneratorConfig,
    ) -> Self {
        Self::with_rng(controls, alerts, catalog, config, StdRng::from_entropy())
    }

    /// Create a generator with a fixed seed, for deterministic tests.
    pub fn with_seed(
        controls: ControlsRepository,
        alerts: AlertsRepository,
        catalog: &CatalogRepository,
        config: &GeneratorConfig,
        seed: u64,
    ) -> Self {
        Self::with_rng(
            controls,
            alerts,
            catalog,
            config,
            StdRng::seed_from_u64(seed),
        )
    }

    fn with_rng(
        controls: ControlsRepository,
        alerts: AlertsRepository,
        catalog: &CatalogRepository,
        config: &GeneratorConfig,
        rng: StdRng,
    ) -> Self {
        Self {
            controls,
            alerts,
            locations: catalog.locations().to_vec(),
            probability: config.probability,
            tick_interval: Duration::from_secs(config.tick_secs),
            rng,
        }
    }

    /// Run one tick against the store. Returns the appended record, or None
    /// when the roll failed or no active control entry matched the planned
    /// category.
    pub fn tick(&mut self, now: DateTime<Utc>) -> Option<AlertRecord> {
        let plan = plan_tick(&mut self.rng, self.probability, &self.locations)?;

        let candidates = self.controls.active_candidates(plan.kind, now);
        if candidates.is_empty() {
            debug!("No active {} control entries, skipping tick", plan.kind);
            return None;
        }
        let chosen = candidates[self.rng.gen_range(0..candidates.len())];

        let alert = NewAlert {
            location: plan.location.clone(),
            timestamp: now,
            description: format!("Watched {} detected at {}", plan.kind, plan.location),
            severity: severity_for(plan.kind),
        };
        let record = self.alerts.append(&chosen, alert)?;
        self.controls.record_sighting(&chosen, &plan.location, now);
        Some(record)
    }

    /// Run the tick loop until the token is cancelled. Ticks run on one task,
    /// so they never overlap; cancellation leaves no dangling tick behind.
    pub async fn run(mut self, cancel: CancellationToken) {
        info!(
            "Starting event generator (tick every {:?}, probability {})",
            self.tick_interval, self.probability
        );
        let mut ticker = interval(self.tick_interval);
        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    info!("Event generator stopped");
                    break;
                }
                _ = ticker.tick() => {
                    if let Some(record) = self.tick(Utc::now()) {
                        info!(
                            "Alert {}: {} ({})",
                            record.id, record.description, record.severity
                        );
                    }
                }
            }
        }
    }
}
