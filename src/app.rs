use anyhow::Result;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::time::Instant;

use crate::model::config::AppConfig;
use crate::model::field::{Census, Field, TickReport};
use crate::model::metrics::Metrics;
use crate::model::{Genetics, MutationEngine};

/// A configured field plus everything needed to drive it.
pub struct App {
    pub config: AppConfig,
    pub genetics: Genetics,
    pub field: Field,
    pub engine: MutationEngine,
    pub metrics: Metrics,
    rng: ChaCha8Rng,
}

impl App {
    pub fn new(config: AppConfig) -> Result<Self> {
        config.validate()?;
        let genetics = Genetics::from_config(&config)?;
        let field = Field::from_config(&config, &genetics)?;
        let rng = match config.field.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        tracing::info!(
            width = config.field.width,
            height = config.field.height,
            seed = ?config.field.seed,
            fingerprint = %config.fingerprint(),
            "Field created"
        );
        Ok(Self {
            config,
            genetics,
            field,
            engine: MutationEngine::new(),
            metrics: Metrics::new(),
            rng,
        })
    }

    /// Advances the field by one tick and records metrics.
    pub fn tick(&mut self) -> Result<TickReport> {
        let start = Instant::now();
        let report = self
            .field
            .update(&self.engine, &self.genetics.context(), &mut self.rng)?;
        for spawn in &report.spawned {
            self.metrics
                .increment_counter(&format!("spawn.{}", spawn.plant));
        }
        let planted = self.field.census().species.values().sum();
        let idle = report.cross_slots.saturating_sub(report.spawned.len());
        self.metrics
            .record_tick(start.elapsed(), planted, report.spawned.len(), idle);
        Ok(report)
    }

    /// Runs `ticks` ticks and returns how many descendants appeared.
    pub fn run(&mut self, ticks: u64) -> Result<usize> {
        let mut spawned = 0;
        for _ in 0..ticks {
            spawned += self.tick()?.spawned.len();
        }
        tracing::info!(
            ticks = ticks,
            spawned = spawned,
            elapsed_ms = u64::try_from(self.metrics.elapsed().as_millis()).unwrap_or(u64::MAX),
            "Run finished"
        );
        Ok(spawned)
    }

    #[must_use]
    pub fn census(&self) -> Census {
        self.field.census()
    }
}
