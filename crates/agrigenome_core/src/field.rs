//! A rectangular field of crop slots driven one tick at a time.
//!
//! Every slot not planted from the configuration starts as an empty
//! cross-crop slot. Each tick first rolls growth for planted crops, then asks
//! the engine to resolve every cross-crop slot against its four neighbours.

use crate::config::AppConfig;
use crate::crop::{Crop, CropState};
use crate::engine::MutationEngine;
use crate::error::Result;
use crate::registry::MutationContext;
use crate::setup::Genetics;
use agrigenome_data::{GrowthStage, PlantId};
use anyhow::Context;
use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A descendant that appeared during a tick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Spawn {
    pub x: u16,
    pub y: u16,
    pub plant: PlantId,
}

/// What happened during one [`Field::update`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TickReport {
    pub tick: u64,
    pub grown: usize,
    pub cross_slots: usize,
    pub spawned: Vec<Spawn>,
}

/// Crop counts per species plus remaining cross-crop slots.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Census {
    pub tick: u64,
    pub species: BTreeMap<PlantId, usize>,
    pub mature: usize,
    pub cross_slots: usize,
}

pub struct Field {
    width: u16,
    height: u16,
    growth_chance: f64,
    tick: u64,
    cells: Vec<CropState>,
}

impl Field {
    /// An unplanted field where every slot is a cross-crop slot.
    #[must_use]
    pub fn new(width: u16, height: u16, growth_chance: f64) -> Self {
        let cells = vec![CropState::cross(); usize::from(width) * usize::from(height)];
        Self {
            width,
            height,
            growth_chance: growth_chance.clamp(0.0, 1.0),
            tick: 0,
            cells,
        }
    }

    /// Plants every configured crop on a fresh field.
    pub fn from_config(config: &AppConfig, genetics: &Genetics) -> anyhow::Result<Self> {
        let mut field = Self::new(
            config.field.width,
            config.field.height,
            config.field.growth_chance,
        );
        for crop in &config.crops {
            let plant = genetics
                .plants
                .get(&crop.plant)
                .with_context(|| format!("Unknown plant `{}`", crop.plant))?
                .clone();
            let genome = genetics.default_genome(plant.clone())?;
            let total = u8::try_from(plant.growth_stages().len()).unwrap_or(u8::MAX);
            let growth = crop
                .stage
                .map_or_else(|| GrowthStage::last(total), |stage| GrowthStage::new(stage, total));
            let state = CropState::planted(plant, genome, growth).with_fertile(crop.fertile);
            anyhow::ensure!(
                field.place(crop.x, crop.y, state),
                "Crop at ({}, {}) lies outside the field",
                crop.x,
                crop.y
            );
        }
        Ok(field)
    }

    #[must_use]
    pub fn width(&self) -> u16 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> u16 {
        self.height
    }

    /// Ticks completed so far.
    #[must_use]
    pub fn tick(&self) -> u64 {
        self.tick
    }

    fn index(&self, x: u16, y: u16) -> Option<usize> {
        (x < self.width && y < self.height)
            .then(|| usize::from(y) * usize::from(self.width) + usize::from(x))
    }

    /// The slot at `(x, y)`, if inside the field.
    #[must_use]
    pub fn get(&self, x: u16, y: u16) -> Option<&CropState> {
        self.index(x, y).map(|i| &self.cells[i])
    }

    /// Puts `crop` on a slot. Returns false when the slot is outside the field.
    pub fn place(&mut self, x: u16, y: u16, crop: CropState) -> bool {
        match self.index(x, y) {
            Some(i) => {
                self.cells[i] = crop;
                true
            }
            None => false,
        }
    }

    /// Slots adjacent to `(x, y)` in north, east, south, west order.
    fn neighbour_indices(&self, x: u16, y: u16) -> impl Iterator<Item = usize> + '_ {
        let (x, y) = (i32::from(x), i32::from(y));
        [(0, -1), (1, 0), (0, 1), (-1, 0)]
            .into_iter()
            .filter_map(move |(dx, dy)| {
                let nx = u16::try_from(x + dx).ok()?;
                let ny = u16::try_from(y + dy).ok()?;
                self.index(nx, ny)
            })
    }

    /// Advances the field by one tick.
    pub fn update(
        &mut self,
        engine: &MutationEngine,
        ctx: &MutationContext<'_>,
        rng: &mut dyn RngCore,
    ) -> Result<TickReport> {
        self.tick += 1;
        let mut report = TickReport {
            tick: self.tick,
            ..TickReport::default()
        };

        for cell in self.cells.iter_mut().filter(|cell| cell.is_planted()) {
            if !cell.is_mature() && rng.gen_bool(self.growth_chance) && cell.grow() {
                report.grown += 1;
            }
        }

        for i in 0..self.cells.len() {
            if !self.cells[i].cross_crop {
                continue;
            }
            report.cross_slots += 1;
            let (x, y) = self.coords(i);
            let mut target = std::mem::take(&mut self.cells[i]);
            let neighbours = self
                .neighbour_indices(x, y)
                .map(|n| &self.cells[n] as &dyn Crop);
            let outcome = engine.handle_tick(ctx, &mut target, neighbours, &mut *rng);
            self.cells[i] = target;
            if let Some(plant) = outcome? {
                report.spawned.push(Spawn {
                    x,
                    y,
                    plant: plant.id().clone(),
                });
            }
        }

        Ok(report)
    }

    fn coords(&self, index: usize) -> (u16, u16) {
        let width = usize::from(self.width);
        // Indices come from `cells`, whose length is width * height.
        let x = u16::try_from(index % width).unwrap_or(u16::MAX);
        let y = u16::try_from(index / width).unwrap_or(u16::MAX);
        (x, y)
    }

    /// Counts planted crops per species.
    #[must_use]
    pub fn census(&self) -> Census {
        let mut census = Census {
            tick: self.tick,
            ..Census::default()
        };
        for cell in &self.cells {
            if cell.cross_crop {
                census.cross_slots += 1;
            }
            if cell.is_planted() {
                *census.species.entry(cell.plant.id().clone()).or_default() += 1;
                if cell.is_mature() {
                    census.mature += 1;
                }
            }
        }
        census
    }

    /// Every slot with its coordinates, row by row.
    pub fn crops(&self) -> impl Iterator<Item = (u16, u16, &CropState)> {
        self.cells.iter().enumerate().map(|(i, cell)| {
            let (x, y) = self.coords(i);
            (x, y, cell)
        })
    }
}
