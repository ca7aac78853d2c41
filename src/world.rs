use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::{SeedableRng, rngs::StdRng};
use thiserror::Error;
use tracing::debug;

use crate::cell::{CellKind, Species};
use crate::config::{FixedLayout, SessionConfig};
use crate::coords::GridPos;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("cell ({}, {}) is outside the {size}x{size} grid", .pos.x, .pos.y)]
pub struct OutOfBoundsError {
    pub pos: GridPos,
    pub size: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    #[error("grid of side {size} has {available} free cells, {required} occupants requested")]
    GridTooSmall {
        size: u32,
        required: usize,
        available: usize,
    },
    #[error("occupant placed outside the grid: {0}")]
    OutOfBounds(OutOfBoundsError),
    #[error("two occupants share cell ({}, {})", .0.x, .0.y)]
    Overlap(GridPos),
    #[error("occupant placed on the drone start cell ({}, {})", .0.x, .0.y)]
    OnDroneStart(GridPos),
    #[error("fixed layout species do not match the configured species list")]
    SpeciesMismatch,
}

#[derive(Debug, Clone)]
pub struct GridWorld {
    size: u32,
    cells: Vec<CellKind>,
}

impl GridWorld {
    pub fn empty(size: u32) -> Self {
        let len = (size as usize) * (size as usize);
        Self {
            size,
            cells: vec![CellKind::Empty; len],
        }
    }

    /// Builds the session grid: either the explicit layout from `config`, or a
    /// random one (seeded when `random_seed` is set). Animals are never placed
    /// next to the drone start so the first move cannot be forced into a flee.
    pub fn place(config: &SessionConfig) -> Result<Self, LayoutError> {
        let world = match &config.layout {
            Some(fixed) => Self::from_fixed(config, fixed)?,
            None => Self::random(config)?,
        };
        debug!(
            size = world.size,
            obstacles = world.obstacle_count(),
            animals = world.animals().count(),
            "grid placed"
        );
        Ok(world)
    }

    fn from_fixed(config: &SessionConfig, fixed: &FixedLayout) -> Result<Self, LayoutError> {
        let mut listed: Vec<Species> = fixed.animals.iter().map(|a| a.species).collect();
        let mut expected = config.species_list.clone();
        listed.sort();
        expected.sort();
        if listed != expected {
            return Err(LayoutError::SpeciesMismatch);
        }

        let mut world = Self::empty(config.grid_size);
        let start = config.drone_start;
        let occupants = fixed
            .obstacles
            .iter()
            .map(|&pos| (pos, CellKind::Obstacle))
            .chain(fixed.animals.iter().map(|a| (a.pos, CellKind::Animal(a.species))));
        for (pos, kind) in occupants {
            let i = world.index(pos).ok_or(LayoutError::OutOfBounds(OutOfBoundsError {
                pos,
                size: world.size,
            }))?;
            if pos == start {
                return Err(LayoutError::OnDroneStart(pos));
            }
            if !world.cells[i].is_empty() {
                return Err(LayoutError::Overlap(pos));
            }
            world.cells[i] = kind;
        }
        Ok(world)
    }

    fn random(config: &SessionConfig) -> Result<Self, LayoutError> {
        let size = config.grid_size;
        let start = config.drone_start;
        let required = config.obstacle_count as usize + config.species_list.len();
        let available = (size as usize * size as usize).saturating_sub(1);
        if required > available {
            return Err(LayoutError::GridTooSmall {
                size,
                required,
                available,
            });
        }

        let mut rng = match config.random_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let mut world = Self::empty(size);
        let mut animal_cells: Vec<GridPos> = world
            .positions()
            .filter(|p| p.chebyshev(start) > 1)
            .collect();
        if animal_cells.len() < config.species_list.len() {
            return Err(LayoutError::GridTooSmall {
                size,
                required,
                available: animal_cells.len(),
            });
        }
        animal_cells.shuffle(&mut rng);
        let mut taken: HashSet<GridPos> = HashSet::new();
        for (&species, pos) in config.species_list.iter().zip(animal_cells) {
            world.put(pos, CellKind::Animal(species));
            taken.insert(pos);
        }

        let mut obstacle_cells: Vec<GridPos> = world
            .positions()
            .filter(|p| *p != start && !taken.contains(p))
            .collect();
        obstacle_cells.shuffle(&mut rng);
        for pos in obstacle_cells.into_iter().take(config.obstacle_count as usize) {
            world.put(pos, CellKind::Obstacle);
        }
        Ok(world)
    }

    pub fn grid_size(&self) -> u32 {
        self.size
    }

    pub fn contains(&self, pos: GridPos) -> bool {
        self.index(pos).is_some()
    }

    fn index(&self, pos: GridPos) -> Option<usize> {
        let n = self.size as i32;
        if pos.x < 0 || pos.y < 0 || pos.x >= n || pos.y >= n {
            return None;
        }
        Some((pos.y * n + pos.x) as usize)
    }

    fn put(&mut self, pos: GridPos, kind: CellKind) {
        if let Some(i) = self.index(pos) {
            self.cells[i] = kind;
        }
    }

    pub fn get(&self, pos: GridPos) -> Option<CellKind> {
        self.index(pos).map(|i| self.cells[i])
    }

    pub fn cell_at(&self, x: i32, y: i32) -> Result<CellKind, OutOfBoundsError> {
        let pos = GridPos::new(x, y);
        self.get(pos).ok_or(OutOfBoundsError {
            pos,
            size: self.size,
        })
    }

    /// Every cell of the grid, row-major.
    pub fn positions(&self) -> impl Iterator<Item = GridPos> {
        let n = self.size as i32;
        (0..n).flat_map(move |y| (0..n).map(move |x| GridPos { x, y }))
    }

    /// Animal cells in row-major order.
    pub fn animals(&self) -> impl Iterator<Item = (GridPos, Species)> + '_ {
        self.positions()
            .filter_map(|p| self.get(p).and_then(|k| k.species()).map(|s| (p, s)))
    }

    pub fn obstacle_count(&self) -> usize {
        self.cells.iter().filter(|k| **k == CellKind::Obstacle).count()
    }
}
