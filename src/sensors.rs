//! Read-only look around the drone.
//!
//! The scan walks square rings of growing Chebyshev radius and reports what
//! sits in each cell. Grid edges are reported once per heading, at the
//! distance where the drone would leave the grid.

use serde::{Deserialize, Serialize};

use crate::cell::{CellKind, Species};
use crate::coords::{GridPos, GridRect};
use crate::engine::GameSession;
use crate::orientation::Facing;
use crate::world::GridWorld;

pub const DEFAULT_SCAN_RADIUS: u32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DetectedKind {
    Obstacle,
    Animal(Species),
    FledAnimal,
    Boundary(Facing),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Detection {
    pub kind: DetectedKind,
    pub dx: i32,
    pub dy: i32,
}

impl Detection {
    pub fn distance(&self) -> u32 {
        self.dx.unsigned_abs().max(self.dy.unsigned_abs())
    }

    pub fn describe(&self) -> String {
        let what = match self.kind {
            DetectedKind::Obstacle => "obstacle".to_string(),
            DetectedKind::Animal(s) => s.name().to_string(),
            DetectedKind::FledAnimal => "scared animal location".to_string(),
            DetectedKind::Boundary(f) => format!("{} boundary", f.name().to_ascii_lowercase()),
        };
        format!("{} at {}", what, format_offset(self.dx, self.dy))
    }
}

fn format_offset(dx: i32, dy: i32) -> String {
    let mut parts = Vec::new();
    if dy > 0 {
        parts.push(format!("{} North", dy));
    } else if dy < 0 {
        parts.push(format!("{} South", -dy));
    }
    if dx > 0 {
        parts.push(format!("{} East", dx));
    } else if dx < 0 {
        parts.push(format!("{} West", -dx));
    }
    if parts.is_empty() {
        "current position".to_string()
    } else {
        parts.join(" ")
    }
}

pub fn scan(
    world: &GridWorld,
    drone: GridPos,
    fled_from: &[GridPos],
    radius: u32,
) -> Vec<Detection> {
    let mut out = Vec::new();
    for ring in 1..=radius {
        for cell in GridRect::around(drone, ring).border_cells() {
            let (dx, dy) = (cell.x - drone.x, cell.y - drone.y);
            // A fled animal stays in the grid; report the marker instead.
            let kind = if fled_from.contains(&cell) {
                Some(DetectedKind::FledAnimal)
            } else {
                match world.get(cell) {
                    Some(CellKind::Obstacle) => Some(DetectedKind::Obstacle),
                    Some(CellKind::Animal(s)) => Some(DetectedKind::Animal(s)),
                    _ => None,
                }
            };
            if let Some(kind) = kind {
                out.push(Detection { kind, dx, dy });
            }
        }
        for facing in Facing::ALL {
            let (fx, fy) = facing.delta();
            let step = ring as i32;
            let here_in = world.contains(drone.offset(fx * (step - 1), fy * (step - 1)));
            let next_out = !world.contains(drone.offset(fx * step, fy * step));
            if here_in && next_out {
                out.push(Detection {
                    kind: DetectedKind::Boundary(facing),
                    dx: fx * step,
                    dy: fy * step,
                });
            }
        }
    }
    out
}

pub fn summarize(detections: &[Detection]) -> String {
    if detections.is_empty() {
        return "Sensors summary: nothing of interest detected.".to_string();
    }
    let items: Vec<String> = detections.iter().map(Detection::describe).collect();
    format!("Sensors summary: {}.", items.join("; "))
}

impl GameSession {
    pub fn scan(&self, radius: u32) -> Vec<Detection> {
        scan(self.world(), self.drone().position, self.fled_from(), radius)
    }

    pub fn sensor_summary(&self) -> String {
        summarize(&self.scan(DEFAULT_SCAN_RADIUS))
    }
}
