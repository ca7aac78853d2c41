//! Session construction options.
//!
//! Every field has a default, so a JSON config only needs to name what it
//! changes:
//!
//! ```json
//! { "grid_size": 8, "obstacle_count": 4, "random_seed": 42 }
//! ```

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cell::Species;
use crate::coords::GridPos;
use crate::orientation::Facing;

pub const DEFAULT_GRID_SIZE: u32 = 12;
pub const DEFAULT_OBSTACLE_COUNT: u32 = 15;
pub const DEFAULT_PICTURES_TOTAL: u32 = 5;
pub const MAX_GRID_SIZE: u32 = 1024;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("malformed config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("grid_size must be at least 1")]
    EmptyGrid,
    #[error("grid_size {0} exceeds the maximum of {MAX_GRID_SIZE}")]
    GridTooLarge(u32),
    #[error("pictures_total must be at least 1")]
    NoPictures,
    #[error("species_list must not be empty")]
    NoSpecies,
    #[error("species `{0}` listed more than once")]
    DuplicateSpecies(Species),
    #[error("drone start ({}, {}) is outside the grid", .0.x, .0.y)]
    StartOutsideGrid(GridPos),
}

/// How a shot is judged against the animals on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhotoRule {
    /// Any animal at Chebyshev distance exactly 2, regardless of facing.
    #[default]
    Distance,
    /// The animal must sit exactly 2 cells straight ahead, and an obstacle in
    /// the cell between blocks the view.
    FacingLine,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacedAnimal {
    pub species: Species,
    pub pos: GridPos,
}

/// Explicit occupant placement. Replaces random placement entirely; the
/// configured `obstacle_count` is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FixedLayout {
    #[serde(default)]
    pub obstacles: Vec<GridPos>,
    pub animals: Vec<PlacedAnimal>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub grid_size: u32,
    pub obstacle_count: u32,
    pub species_list: Vec<Species>,
    pub pictures_total: u32,
    pub random_seed: Option<u64>,
    pub drone_start: GridPos,
    pub drone_facing: Facing,
    pub photo_rule: PhotoRule,
    pub layout: Option<FixedLayout>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            grid_size: DEFAULT_GRID_SIZE,
            obstacle_count: DEFAULT_OBSTACLE_COUNT,
            species_list: Species::DEFAULT_SET.to_vec(),
            pictures_total: DEFAULT_PICTURES_TOTAL,
            random_seed: None,
            drone_start: GridPos::new(6, 6),
            drone_facing: Facing::North,
            photo_rule: PhotoRule::Distance,
            layout: None,
        }
    }
}

impl SessionConfig {
    /// The hand-placed 12x12 safari map: trees scattered over the grid, the
    /// zebra, elephant and oryx in fixed spots, drone in the middle facing North.
    pub fn classic() -> Self {
        let trees = [
            (3, 2),
            (8, 4),
            (5, 9),
            (10, 1),
            (2, 11),
            (1, 5),
            (9, 8),
            (6, 3),
            (11, 7),
            (4, 10),
            (3, 5),
            (8, 9),
            (4, 3),
            (6, 11),
        ];
        let animals = [
            (Species::Zebra, (3, 3)),
            (Species::Elephant, (9, 9)),
            (Species::Oryx, (9, 2)),
        ];
        Self {
            obstacle_count: trees.len() as u32,
            layout: Some(FixedLayout {
                obstacles: trees.iter().map(|&t| GridPos::from(t)).collect(),
                animals: animals
                    .iter()
                    .map(|&(species, pos)| PlacedAnimal {
                        species,
                        pos: GridPos::from(pos),
                    })
                    .collect(),
            }),
            ..Self::default()
        }
    }

    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let config: SessionConfig = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_size == 0 {
            return Err(ConfigError::EmptyGrid);
        }
        if self.grid_size > MAX_GRID_SIZE {
            return Err(ConfigError::GridTooLarge(self.grid_size));
        }
        if self.pictures_total == 0 {
            return Err(ConfigError::NoPictures);
        }
        if self.species_list.is_empty() {
            return Err(ConfigError::NoSpecies);
        }
        let mut seen = HashSet::new();
        for s in &self.species_list {
            if !seen.insert(*s) {
                return Err(ConfigError::DuplicateSpecies(*s));
            }
        }
        let n = self.grid_size as i32;
        let start = self.drone_start;
        if start.x < 0 || start.y < 0 || start.x >= n || start.y >= n {
            return Err(ConfigError::StartOutsideGrid(start));
        }
        Ok(())
    }
}
