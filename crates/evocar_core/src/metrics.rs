//! Run statistics and structured logging for the simulation.

use std::time::{Duration, Instant};

/// Counters for one [`Simulation`](crate::Simulation).
#[derive(Debug, Clone)]
pub struct Metrics {
    tick_count: u64,
    vehicles_built: u64,
    vehicles_destroyed: u64,
    rejected_builds: u64,
    log_interval: u64,
    busy: Duration,
    start_time: Instant,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new(0)
    }
}

impl Metrics {
    /// Creates a collector that logs a summary every `log_interval` ticks
    /// (never when 0).
    #[must_use]
    pub fn new(log_interval: u64) -> Self {
        Self {
            tick_count: 0,
            vehicles_built: 0,
            vehicles_destroyed: 0,
            rejected_builds: 0,
            log_interval,
            busy: Duration::ZERO,
            start_time: Instant::now(),
        }
    }

    /// Records a completed tick with its wall-clock duration.
    pub fn record_tick(&mut self, duration: Duration, bodies: usize, contacts: usize) {
        self.tick_count += 1;
        self.busy += duration;

        if self.log_interval > 0 && self.tick_count % self.log_interval == 0 {
            tracing::info!(
                tick = self.tick_count,
                bodies = bodies,
                contacts = contacts,
                step_us = duration.as_micros() as u64,
                "Simulation tick"
            );
        }
    }

    pub fn record_build(&mut self) {
        self.vehicles_built += 1;
    }

    pub fn record_destroy(&mut self) {
        self.vehicles_destroyed += 1;
    }

    pub fn record_rejection(&mut self) {
        self.rejected_builds += 1;
    }

    #[must_use]
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    #[must_use]
    pub fn vehicles_built(&self) -> u64 {
        self.vehicles_built
    }

    #[must_use]
    pub fn vehicles_destroyed(&self) -> u64 {
        self.vehicles_destroyed
    }

    #[must_use]
    pub fn rejected_builds(&self) -> u64 {
        self.rejected_builds
    }

    /// Wall-clock time spent inside recorded ticks.
    #[must_use]
    pub fn busy(&self) -> Duration {
        self.busy
    }

    /// Gets elapsed time since metrics creation.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }
}

/// Initialize tracing subscriber for logging.
///
/// Honours `RUST_LOG`, defaulting to `info`.
pub fn init_logging() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing::subscriber::set_global_default(
        tracing_subscriber::FmtSubscriber::builder()
            .with_env_filter(filter)
            .finish(),
    )
    .ok();
}
