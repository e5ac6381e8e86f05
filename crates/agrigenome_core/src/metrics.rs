//! Simulation metrics and structured logging setup.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Ticks between periodic progress lines.
pub const LOG_INTERVAL: u64 = 100;

/// Counters collected by the field driver.
pub struct Metrics {
    tick_count: AtomicU64,
    crop_count: AtomicU64,
    spawn_count: AtomicU64,
    idle_count: AtomicU64,
    pub counters: Mutex<HashMap<String, AtomicU64>>,
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
            crop_count: AtomicU64::new(0),
            spawn_count: AtomicU64::new(0),
            idle_count: AtomicU64::new(0),
            counters: Mutex::new(HashMap::new()),
            start_time: Instant::now(),
        }
    }

    /// Records a completed tick.
    ///
    /// `idle` counts cross-crop slots whose tick ended without a descendant.
    pub fn record_tick(&self, duration: Duration, crops: usize, spawned: usize, idle: usize) {
        let tick = self.tick_count.fetch_add(1, Ordering::Relaxed) + 1;
        self.crop_count.store(crops as u64, Ordering::Relaxed);
        let total = self.spawn_count.fetch_add(spawned as u64, Ordering::Relaxed) + spawned as u64;
        let idle_total = self.idle_count.fetch_add(idle as u64, Ordering::Relaxed) + idle as u64;

        if tick.is_multiple_of(LOG_INTERVAL) {
            tracing::info!(
                tick = tick,
                crops = crops,
                spawned_total = total,
                idle_total = idle_total,
                duration_us = u64::try_from(duration.as_micros()).unwrap_or(u64::MAX),
                "Field tick"
            );
        }
    }

    /// Increments a named counter.
    pub fn increment_counter(&self, name: &str) {
        let mut counters = self.counters.lock().unwrap_or_else(|e| e.into_inner());
        counters
            .entry(name.to_string())
            .or_insert_with(|| AtomicU64::new(0))
            .fetch_add(1, Ordering::Relaxed);
    }

    #[must_use]
    pub fn counter(&self, name: &str) -> u64 {
        let counters = self.counters.lock().unwrap_or_else(|e| e.into_inner());
        counters
            .get(name)
            .map_or(0, |value| value.load(Ordering::Relaxed))
    }

    #[must_use]
    pub fn tick_count(&self) -> u64 {
        self.tick_count.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn crop_count(&self) -> u64 {
        self.crop_count.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn spawn_count(&self) -> u64 {
        self.spawn_count.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn idle_count(&self) -> u64 {
        self.idle_count.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }
}

/// Installs the global tracing subscriber.
///
/// Honours `RUST_LOG` and falls back to `info`. Calling it twice is harmless.
pub fn init_logging() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with(tracing_subscriber::fmt::layer())
        .try_init()
        .ok();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_new() {
        let metrics = Metrics::new();
        assert_eq!(metrics.tick_count(), 0);
        assert_eq!(metrics.spawn_count(), 0);
        assert_eq!(metrics.idle_count(), 0);
    }

    #[test]
    fn test_record_tick_accumulates_spawns_and_idles() {
        let metrics = Metrics::new();
        metrics.record_tick(Duration::from_millis(1), 12, 2, 5);
        metrics.record_tick(Duration::from_millis(1), 13, 1, 0);
        metrics.record_tick(Duration::from_millis(1), 13, 0, 4);
        assert_eq!(metrics.tick_count(), 3);
        assert_eq!(metrics.crop_count(), 13);
        assert_eq!(metrics.spawn_count(), 3);
        assert_eq!(metrics.idle_count(), 9);
    }

    #[test]
    fn test_increment_counter() {
        let metrics = Metrics::new();
        metrics.increment_counter("clones");
        metrics.increment_counter("clones");
        metrics.increment_counter("crosses");
        assert_eq!(metrics.counter("clones"), 2);
        assert_eq!(metrics.counter("crosses"), 1);
        assert_eq!(metrics.counter("missing"), 0);
    }

    #[test]
    fn test_init_logging_twice() {
        init_logging();
        init_logging();
    }
}
