use serde::{Deserialize, Serialize};

use crate::cell::{CellKind, Species};
use crate::coords::GridPos;
use crate::world::GridWorld;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Collision {
	Clear,
	BoundaryCrash,
	ObstacleCrash,
	DirectAnimalCrash(Species),
}

impl Collision {
	pub fn is_clear(self) -> bool {
		matches!(self, Collision::Clear)
	}
}

// Precedence: bounds first, then obstacle, then animal. An out-of-grid
// target is never looked up.
pub fn classify(world: &GridWorld, target: GridPos) -> Collision {
	match world.get(target) {
		None => Collision::BoundaryCrash,
		Some(CellKind::Obstacle) => Collision::ObstacleCrash,
		Some(CellKind::Animal(s)) => Collision::DirectAnimalCrash(s),
		Some(CellKind::Empty) => Collision::Clear,
	}
}
