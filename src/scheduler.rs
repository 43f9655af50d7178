//! Continuous sampling scheduler
//!
//! Drives the simulator on a fixed interval while the host app is
//! foregrounded: `start` generates one set of current readings immediately
//! and then again on every elapsed interval, applying a per-sample merge
//! policy against the store. `stop` cancels the pending timer without
//! interrupting an in-flight tick.
//!
//! One scheduler owns at most one active timer; `start` on a running
//! scheduler fully stops the previous timer first. Construct at most one
//! live scheduler per process per store: two instances can both conclude
//! "no sample today" and double-insert.

use chrono::{DateTime, Days, Utc};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{watch, Mutex, RwLock};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, warn};

use crate::archetype::Archetype;
use crate::config::SimulationConfig;
use crate::error::StoreError;
use crate::simulator::VitalsSimulator;
use crate::store::MetricStore;
use crate::types::{DataSource, MetricSample};

/// Default sampling interval when none is configured.
pub const DEFAULT_INTERVAL_MINUTES: u64 = 60;

/// Periodic sampling driver over a [`VitalsSimulator`] and a metric store.
pub struct SamplingScheduler {
    simulator: Arc<Mutex<VitalsSimulator>>,
    store: Arc<dyn MetricStore>,
    config: Arc<RwLock<SimulationConfig>>,
    stop_tx: Option<watch::Sender<bool>>,
    task: Option<JoinHandle<()>>,
}

impl SamplingScheduler {
    /// Create a stopped scheduler with an OS-seeded simulator.
    pub fn new(config: SimulationConfig, store: Arc<dyn MetricStore>) -> Self {
        Self::with_simulator(config, VitalsSimulator::new(config.archetype), store)
    }

    /// Create a stopped scheduler with a fixed simulator seed.
    pub fn with_seed(config: SimulationConfig, seed: u64, store: Arc<dyn MetricStore>) -> Self {
        Self::with_simulator(config, VitalsSimulator::with_seed(config.archetype, seed), store)
    }

    fn with_simulator(
        config: SimulationConfig,
        simulator: VitalsSimulator,
        store: Arc<dyn MetricStore>,
    ) -> Self {
        Self {
            simulator: Arc::new(Mutex::new(simulator)),
            store,
            config: Arc::new(RwLock::new(config)),
            stop_tx: None,
            task: None,
        }
    }

    /// Start periodic sampling. Stops an already-running timer first, so
    /// there is never more than one active timer per scheduler.
    pub async fn start(&mut self, interval_minutes: u64) {
        self.start_with_period(Duration::from_secs(interval_minutes * 60))
            .await;
    }

    /// [`Self::start`] with a sub-minute period, for tests and demos.
    pub async fn start_with_period(&mut self, period: Duration) {
        self.stop().await;

        let (stop_tx, stop_rx) = watch::channel(false);
        let task = tokio::spawn(run_loop(
            Arc::clone(&self.simulator),
            Arc::clone(&self.store),
            Arc::clone(&self.config),
            period,
            stop_rx,
        ));

        self.stop_tx = Some(stop_tx);
        self.task = Some(task);
        debug!(period_secs = period.as_secs(), "sampling started");
    }

    /// Cancel the pending timer and wait for the loop to wind down.
    /// Idempotent; an in-flight tick always runs to completion.
    pub async fn stop(&mut self) {
        if let Some(stop_tx) = self.stop_tx.take() {
            let _ = stop_tx.send(true);
        }
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
    }

    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }

    /// Swap the archetype; all generator state is rebuilt in one step, and
    /// the next tick uses the new parameters.
    pub async fn set_archetype(&self, archetype: Archetype) {
        self.config.write().await.archetype = archetype;
        self.simulator.lock().await.set_archetype(archetype);
    }

    /// Change the source label stamped onto generated samples.
    pub async fn set_data_source(&self, data_source: DataSource) {
        self.config.write().await.data_source = data_source;
    }

    /// Enable or disable generation without stopping the timer.
    pub async fn set_enabled(&self, enabled: bool) {
        self.config.write().await.enabled = enabled;
    }

    pub async fn config(&self) -> SimulationConfig {
        *self.config.read().await
    }

    /// Backfill `days + 1` days of full daily data (today included),
    /// timestamped at noon, written straight to the store without the merge
    /// policy.
    pub async fn seed_history(&self, days: u64) -> Result<(), StoreError> {
        let data_source = self.config.read().await.data_source;
        let today = Utc::now().date_naive();
        let mut simulator = self.simulator.lock().await;

        for back in (0..=days).rev() {
            let day = today.checked_sub_days(Days::new(back)).unwrap_or(today);
            let date = noon_utc(day);
            for sample in simulator.generate_daily(date, data_source) {
                self.store.insert(sample).await?;
            }
        }
        Ok(())
    }

    /// Generate and store one full daily set for today, timestamped at noon.
    pub async fn generate_today(&self) -> Result<(), StoreError> {
        let data_source = self.config.read().await.data_source;
        let date = noon_utc(Utc::now().date_naive());
        let samples = self
            .simulator
            .lock()
            .await
            .generate_daily(date, data_source);
        for sample in samples {
            self.store.insert(sample).await?;
        }
        Ok(())
    }
}

fn noon_utc(day: chrono::NaiveDate) -> DateTime<Utc> {
    day.and_hms_opt(12, 0, 0)
        .expect("noon is a valid wall-clock time")
        .and_utc()
}

async fn run_loop(
    simulator: Arc<Mutex<VitalsSimulator>>,
    store: Arc<dyn MetricStore>,
    config: Arc<RwLock<SimulationConfig>>,
    period: Duration,
    mut stop_rx: watch::Receiver<bool>,
) {
    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            biased;
            _ = stop_rx.changed() => break,
            _ = interval.tick() => {
                // A failed round must not kill the interval.
                if let Err(error) = run_tick(&simulator, &store, &config).await {
                    warn!(%error, "sampling tick failed; interval continues");
                }
            }
        }
    }
    debug!("sampling stopped");
}

/// One generation/store round: produce current readings and merge each one
/// against the latest stored sample of its type. The policy is evaluated
/// per sample, not as a transaction across the tick.
async fn run_tick(
    simulator: &Mutex<VitalsSimulator>,
    store: &Arc<dyn MetricStore>,
    config: &RwLock<SimulationConfig>,
) -> Result<(), StoreError> {
    let config = *config.read().await;
    if !config.enabled {
        debug!("simulation disabled; skipping tick");
        return Ok(());
    }

    let readings = simulator
        .lock()
        .await
        .generate_current_readings(config.data_source);

    for reading in readings {
        if should_insert(store.latest(reading.metric_type).await?.as_ref(), &reading) {
            store.insert(reading).await?;
        }
    }
    Ok(())
}

/// Merge policy: insert when nothing is stored yet or the calendar date
/// changed; volatile metrics (heart rate, steps) are re-inserted intra-day
/// as refreshes, everything else already has today's value.
fn should_insert(latest: Option<&crate::types::StoredSample>, reading: &MetricSample) -> bool {
    match latest {
        None => true,
        Some(existing) => {
            existing.timestamp().date_naive() != reading.timestamp.date_naive()
                || reading.metric_type.is_volatile()
        }
    }
}
