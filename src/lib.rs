pub mod cell;
pub mod collision;
pub mod command;
pub mod config;
pub mod coords;
pub mod engine;
pub mod hud;
pub mod orientation;
pub mod proximity;
pub mod sensors;
pub mod stats;
pub mod world;

// Re-exports for convenience in tests and integration users.
pub use cell::{CellKind, Species};
pub use collision::{Collision, classify};
pub use command::{Command, CommandParseError};
pub use config::{ConfigError, FixedLayout, PhotoRule, PlacedAnimal, SessionConfig};
pub use coords::{GridPos, GridRect};
pub use engine::{
    DroneState, EngineError, GameEvent, GameSession, GameStatus, HistoryEntry, NoPicturesLeftError,
    PhotoRecord, StatusSnapshot,
};
pub use hud::{format_grid, format_hud, format_side_panel};
pub use orientation::{
    Facing, InvalidDirectionError, MoveDirection, TurnDirection, resolve_move, resolve_turn,
};
pub use proximity::{PhotoOutcome, PhotoShot, ProximityOutcome, WasteReason, distance};
pub use sensors::{DetectedKind, Detection};
pub use stats::Statistics;
pub use world::{GridWorld, LayoutError, OutOfBoundsError};
