use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::cell::{CellKind, Species};
use crate::config::PhotoRule;
use crate::coords::GridPos;
use crate::orientation::Facing;
use crate::world::GridWorld;

/// Distance at which an animal can be photographed.
pub const PHOTO_DISTANCE: u32 = 2;
/// Distance at which an animal is scared off.
pub const FLEE_DISTANCE: u32 = 1;

pub fn distance(a: GridPos, b: GridPos) -> u32 {
    a.chebyshev(b)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProximityOutcome {
    Safe,
    /// Every animal adjacent to the drone, row-major.
    AnimalFled(Vec<(GridPos, Species)>),
}

/// Only meaningful after a clear move: a drone standing on an animal's cell
/// is a crash, not a flee.
pub fn evaluate_after_move(drone: GridPos, world: &GridWorld) -> ProximityOutcome {
    let scared: Vec<_> = world
        .animals()
        .filter(|(pos, _)| distance(drone, *pos) == FLEE_DISTANCE)
        .collect();
    if scared.is_empty() {
        ProximityOutcome::Safe
    } else {
        ProximityOutcome::AnimalFled(scared)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WasteReason {
    NothingInRange,
    ViewBlocked,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PhotoOutcome {
    Captured(Species),
    AlreadyCaptured(Species),
    Wasted(WasteReason),
}

impl PhotoOutcome {
    pub fn is_capture(self) -> bool {
        matches!(self, PhotoOutcome::Captured(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotoShot {
    pub outcome: PhotoOutcome,
    /// Cell the shot is credited to, when it landed inside the grid.
    pub target: Option<GridPos>,
}

/// Judges a shot without touching any state. With several animals in range a
/// species not yet in `photographed` wins; ties go to row-major order.
pub fn evaluate_photo(
    drone: GridPos,
    facing: Facing,
    world: &GridWorld,
    photographed: &BTreeSet<Species>,
    rule: PhotoRule,
) -> PhotoShot {
    match rule {
        PhotoRule::Distance => {
            let in_range: Vec<_> = world
                .animals()
                .filter(|(pos, _)| distance(drone, *pos) == PHOTO_DISTANCE)
                .collect();
            let fresh = in_range.iter().find(|(_, s)| !photographed.contains(s));
            match (fresh, in_range.first()) {
                (Some(&(pos, s)), _) => PhotoShot {
                    outcome: PhotoOutcome::Captured(s),
                    target: Some(pos),
                },
                (None, Some(&(pos, s))) => PhotoShot {
                    outcome: PhotoOutcome::AlreadyCaptured(s),
                    target: Some(pos),
                },
                (None, None) => PhotoShot {
                    outcome: PhotoOutcome::Wasted(WasteReason::NothingInRange),
                    target: None,
                },
            }
        }
        PhotoRule::FacingLine => {
            let (dx, dy) = facing.delta();
            let between = drone.offset(dx, dy);
            let target = drone.offset(2 * dx, 2 * dy);
            if !world.contains(target) {
                return PhotoShot {
                    outcome: PhotoOutcome::Wasted(WasteReason::NothingInRange),
                    target: None,
                };
            }
            if world.get(between) == Some(CellKind::Obstacle) {
                return PhotoShot {
                    outcome: PhotoOutcome::Wasted(WasteReason::ViewBlocked),
                    target: Some(between),
                };
            }
            let outcome = match world.get(target).and_then(|k| k.species()) {
                Some(s) if photographed.contains(&s) => PhotoOutcome::AlreadyCaptured(s),
                Some(s) => PhotoOutcome::Captured(s),
                None => PhotoOutcome::Wasted(WasteReason::NothingInRange),
            };
            PhotoShot {
                outcome,
                target: Some(target),
            }
        }
    }
}
