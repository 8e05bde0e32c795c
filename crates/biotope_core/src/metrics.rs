//! Performance metrics collection for the simulation.
//!
//! Counts ticks, births, deaths and lineage foundings, and emits a periodic
//! structured log line with the population size and tick duration.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Ticks between periodic summary log lines.
pub const LOG_INTERVAL: u64 = 1000;

pub struct Metrics {
    tick_count: AtomicU64,
    lifeform_count: AtomicU64,
    plant_count: AtomicU64,
    total_tick_nanos: AtomicU64,
    counters: Mutex<BTreeMap<String, u64>>,
    start_time: Instant,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Metrics {
    #[must_use]
    pub fn new() -> Self {
        Self {
            tick_count: AtomicU64::new(0),
            lifeform_count: AtomicU64::new(0),
            plant_count: AtomicU64::new(0),
            total_tick_nanos: AtomicU64::new(0),
            counters: Mutex::new(BTreeMap::new()),
            start_time: Instant::now(),
        }
    }

    /// Records a completed tick with its duration.
    pub fn record_tick(&self, duration: Duration, lifeforms: usize, plants: usize) {
        let tick = self.tick_count.fetch_add(1, Ordering::Relaxed) + 1;
        self.lifeform_count.store(lifeforms as u64, Ordering::Relaxed);
        self.plant_count.store(plants as u64, Ordering::Relaxed);
        self.total_tick_nanos
            .fetch_add(duration.as_nanos() as u64, Ordering::Relaxed);

        if tick % LOG_INTERVAL == 0 {
            tracing::info!(
                tick = tick,
                lifeforms = lifeforms,
                plants = plants,
                duration_ms = duration.as_millis() as u64,
                "Simulation tick"
            );
        }
    }

    /// Adds `amount` to a named counter.
    pub fn add(&self, name: &str, amount: u64) {
        if amount == 0 {
            return;
        }
        let mut counters = self.counters.lock().unwrap_or_else(|e| e.into_inner());
        *counters.entry(name.to_string()).or_insert(0) += amount;
    }

    pub fn increment_counter(&self, name: &str) {
        self.add(name, 1);
    }

    #[must_use]
    pub fn counter(&self, name: &str) -> u64 {
        let counters = self.counters.lock().unwrap_or_else(|e| e.into_inner());
        counters.get(name).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn tick_count(&self) -> u64 {
        self.tick_count.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn lifeform_count(&self) -> u64 {
        self.lifeform_count.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn plant_count(&self) -> u64 {
        self.plant_count.load(Ordering::Relaxed)
    }

    /// Mean recorded tick duration.
    #[must_use]
    pub fn average_tick(&self) -> Duration {
        let ticks = self.tick_count();
        if ticks == 0 {
            return Duration::ZERO;
        }
        Duration::from_nanos(self.total_tick_nanos.load(Ordering::Relaxed) / ticks)
    }

    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    pub fn reset(&self) {
        self.tick_count.store(0, Ordering::Relaxed);
        self.lifeform_count.store(0, Ordering::Relaxed);
        self.plant_count.store(0, Ordering::Relaxed);
        self.total_tick_nanos.store(0, Ordering::Relaxed);
        self.counters
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clear();
    }
}

/// Installs a global fmt subscriber filtered by `RUST_LOG` (default `info`).
/// Later calls are no-ops.
pub fn init_logging() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing::subscriber::set_global_default(
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .finish(),
    )
    .ok();
}
