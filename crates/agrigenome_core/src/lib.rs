//! # Agrigenome Core
//!
//! Crop genetics for grid-based farming simulations.
//!
//! This crate contains the breeding logic, including:
//! - Type-erased gene registries and per-crop genomes
//! - Per-gene mutation policies (stat drift, species recipes)
//! - The per-tick mutation engine with swappable strategies
//! - A field driver, configuration and structured logging
//!
//! ## Example
//!
//! ```
//! use agrigenome_core::config::AppConfig;
//! use agrigenome_core::engine::MutationEngine;
//! use agrigenome_core::field::Field;
//! use agrigenome_core::setup::Genetics;
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//!
//! let config = AppConfig::default();
//! let genetics = Genetics::from_config(&config).unwrap();
//! let mut field = Field::from_config(&config, &genetics).unwrap();
//! let engine = MutationEngine::new();
//! let mut rng = ChaCha8Rng::seed_from_u64(42);
//!
//! let report = field.update(&engine, &genetics.context(), &mut rng).unwrap();
//! assert_eq!(report.tick, 1);
//! ```

/// Configuration management for simulation parameters
pub mod config;
/// The crop capability consumed by the engine
pub mod crop;
/// Parent selection, cloning, crossing and the tick orchestrator
pub mod engine;
pub mod error;
/// Grid of crop slots and per-tick driver
pub mod field;
/// Genes, genomes and mutation policies
pub mod genetics;
/// Performance metrics collection and logging
pub mod metrics;
/// Plant species definitions
pub mod plant;
/// Gene, stat, plant and mutation registries
pub mod registry;
pub mod setup;

pub use crop::{Crop, CropState};
pub use engine::MutationEngine;
pub use error::{GeneticsError, RegistryError};
pub use field::{Census, Field, TickReport};
pub use metrics::{init_logging, Metrics};
pub use plant::{Plant, PlantDefinition, PlantRef};
pub use registry::MutationContext;
pub use setup::Genetics;
