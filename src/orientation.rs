use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid direction `{token}`, expected one of: {expected}")]
pub struct InvalidDirectionError {
    pub token: String,
    pub expected: &'static str,
}

/// Absolute heading of the drone. `y` grows to the North, `x` to the East.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Facing {
    #[default]
    North,
    East,
    South,
    West,
}

impl Facing {
    /// Clockwise order, starting North.
    pub const ALL: [Facing; 4] = [Facing::North, Facing::East, Facing::South, Facing::West];

    pub fn delta(self) -> (i32, i32) {
        match self {
            Facing::North => (0, 1),
            Facing::East => (1, 0),
            Facing::South => (0, -1),
            Facing::West => (-1, 0),
        }
    }

    fn index(self) -> usize {
        match self {
            Facing::North => 0,
            Facing::East => 1,
            Facing::South => 2,
            Facing::West => 3,
        }
    }

    fn rotated(self, quarter_turns: usize) -> Facing {
        Facing::ALL[(self.index() + quarter_turns) % 4]
    }

    pub fn right(self) -> Facing {
        self.rotated(1)
    }

    pub fn opposite(self) -> Facing {
        self.rotated(2)
    }

    pub fn left(self) -> Facing {
        self.rotated(3)
    }

    pub fn name(self) -> &'static str {
        match self {
            Facing::North => "North",
            Facing::East => "East",
            Facing::South => "South",
            Facing::West => "West",
        }
    }

    pub fn arrow(self) -> char {
        match self {
            Facing::North => '^',
            Facing::East => '>',
            Facing::South => 'v',
            Facing::West => '<',
        }
    }
}

impl std::fmt::Display for Facing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Movement relative to the current facing. `Left`/`Right` strafe; they do
/// not change the facing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveDirection {
    Forward,
    Backward,
    Left,
    Right,
}

impl MoveDirection {
    pub fn as_str(self) -> &'static str {
        match self {
            MoveDirection::Forward => "forward",
            MoveDirection::Backward => "backward",
            MoveDirection::Left => "left",
            MoveDirection::Right => "right",
        }
    }
}

impl FromStr for MoveDirection {
    type Err = InvalidDirectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "forward" => Ok(MoveDirection::Forward),
            "backward" => Ok(MoveDirection::Backward),
            "left" => Ok(MoveDirection::Left),
            "right" => Ok(MoveDirection::Right),
            _ => Err(InvalidDirectionError {
                token: s.to_string(),
                expected: "forward, backward, left, right",
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnDirection {
    Left,
    Right,
}

impl TurnDirection {
    pub fn as_str(self) -> &'static str {
        match self {
            TurnDirection::Left => "left",
            TurnDirection::Right => "right",
        }
    }
}

impl FromStr for TurnDirection {
    type Err = InvalidDirectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "left" => Ok(TurnDirection::Left),
            "right" => Ok(TurnDirection::Right),
            _ => Err(InvalidDirectionError {
                token: s.to_string(),
                expected: "left, right",
            }),
        }
    }
}

pub fn resolve_move(facing: Facing, direction: MoveDirection) -> (i32, i32) {
    let heading = match direction {
        MoveDirection::Forward => facing,
        MoveDirection::Backward => facing.opposite(),
        MoveDirection::Left => facing.left(),
        MoveDirection::Right => facing.right(),
    };
    heading.delta()
}

pub fn resolve_turn(facing: Facing, direction: TurnDirection) -> Facing {
    match direction {
        TurnDirection::Left => facing.left(),
        TurnDirection::Right => facing.right(),
    }
}
