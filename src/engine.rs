use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::cell::{CellKind, Species};
use crate::collision::{Collision, classify};
use crate::command::Command;
use crate::config::{ConfigError, SessionConfig};
use crate::coords::GridPos;
use crate::orientation::{Facing, MoveDirection, TurnDirection, resolve_move, resolve_turn};
use crate::proximity::{
	PhotoOutcome, PhotoShot, ProximityOutcome, WasteReason, evaluate_after_move, evaluate_photo,
};
use crate::stats::Statistics;
use crate::world::{GridWorld, LayoutError, OutOfBoundsError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("no pictures left")]
pub struct NoPicturesLeftError;

#[derive(Debug, Error)]
pub enum EngineError {
	#[error(transparent)]
	Config(#[from] ConfigError),
	#[error(transparent)]
	Layout(#[from] LayoutError),
	#[error(transparent)]
	NoPicturesLeft(#[from] NoPicturesLeftError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
	Playing,
	CrashedObstacle,
	CrashedBoundary,
	CrashedAnimal,
	AnimalFled,
	Completed,
	OutOfPictures,
}

impl GameStatus {
	pub fn is_terminal(self) -> bool {
		self != GameStatus::Playing
	}

	pub fn is_won(self) -> bool {
		self == GameStatus::Completed
	}

	pub fn label(self) -> &'static str {
		match self {
			GameStatus::Playing => "Playing",
			GameStatus::CrashedObstacle => "Crashed into an obstacle",
			GameStatus::CrashedBoundary => "Crashed into the boundary",
			GameStatus::CrashedAnimal => "Crashed into an animal",
			GameStatus::AnimalFled => "Animal scared away",
			GameStatus::Completed => "Mission complete",
			GameStatus::OutOfPictures => "Out of pictures",
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DroneState {
	pub position: GridPos,
	pub facing: Facing,
	pub pictures_remaining: u32,
	pub photographed_species: BTreeSet<Species>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotoRecord {
	/// 1-based picture number.
	pub number: u32,
	pub target: Option<GridPos>,
	pub outcome: PhotoOutcome,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
	Moved { direction: MoveDirection, to: GridPos },
	Crashed { direction: MoveDirection, target: GridPos, collision: Collision },
	Fled { direction: MoveDirection, to: GridPos, animals: Vec<(GridPos, Species)> },
	Turned { direction: TurnDirection, facing: Facing },
	Photo(PhotoRecord),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
	pub command: Command,
	pub event: GameEvent,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusSnapshot {
	pub position: GridPos,
	pub facing: Facing,
	pub pictures_remaining: u32,
	pub pictures_taken: u32,
	pub photographed_species: BTreeSet<Species>,
	pub moves: u32,
	pub turns: u32,
	pub status: GameStatus,
	pub message: String,
	pub fled_from: Vec<GridPos>,
	pub photo_log: Vec<PhotoRecord>,
}

#[derive(Debug, Clone)]
pub struct GameSession {
	config: SessionConfig,
	world: GridWorld,
	drone: DroneState,
	status: GameStatus,
	moves: u32,
	turns: u32,
	message: String,
	fled_from: Vec<GridPos>,
	photo_log: Vec<PhotoRecord>,
	history: Vec<HistoryEntry>,
}

impl GameSession {
	pub fn new(config: SessionConfig) -> Result<Self, EngineError> {
		config.validate()?;
		let world = GridWorld::place(&config)?;
		let drone = DroneState {
			position: config.drone_start,
			facing: config.drone_facing,
			pictures_remaining: config.pictures_total,
			photographed_species: BTreeSet::new(),
		};
		let message = format!(
			"Game started! Navigate carefully. You can take up to {} pictures.",
			config.pictures_total
		);
		info!(grid_size = config.grid_size, seed = ?config.random_seed, "session started");
		Ok(Self {
			config,
			world,
			drone,
			status: GameStatus::Playing,
			moves: 0,
			turns: 0,
			message,
			fled_from: Vec::new(),
			photo_log: Vec::new(),
			history: Vec::new(),
		})
	}

	/// Starts over from the stored config. A seeded config reproduces the
	/// same layout; an unseeded one rolls a new grid.
	pub fn reset(&mut self) -> Result<StatusSnapshot, EngineError> {
		*self = Self::new(self.config.clone())?;
		Ok(self.get_status())
	}

	pub fn apply(&mut self, command: Command) -> Result<StatusSnapshot, EngineError> {
		match command {
			Command::Move { direction } => Ok(self.move_drone(direction)),
			Command::Turn { direction } => Ok(self.turn(direction)),
			Command::TakePicture => Ok(self.take_picture()?),
			Command::GetStatus => Ok(self.get_status()),
		}
	}

	fn rejected_as_terminal(&self, command: Command) -> bool {
		if self.status.is_terminal() {
			warn!(?command, status = ?self.status, "command ignored, session is over");
			return true;
		}
		false
	}

	fn record(&mut self, command: Command, event: GameEvent) {
		debug!(?command, ?event, "command applied");
		self.history.push(HistoryEntry { command, event });
	}

	fn finish(&mut self, status: GameStatus) {
		self.status = status;
		info!(?status, moves = self.moves, turns = self.turns, "session over");
	}

	pub fn move_drone(&mut self, direction: MoveDirection) -> StatusSnapshot {
		let command = Command::Move { direction };
		if self.rejected_as_terminal(command) {
			return self.get_status();
		}

		let (dx, dy) = resolve_move(self.drone.facing, direction);
		let target = self.drone.position.offset(dx, dy);
		// Attempts count, including the one that crashes.
		self.moves = self.moves.saturating_add(1);

		let collision = classify(&self.world, target);
		let crash = match collision {
			Collision::Clear => None,
			Collision::BoundaryCrash => Some((
				GameStatus::CrashedBoundary,
				"Drone crashed! Flew outside the grid boundaries.".to_string(),
			)),
			Collision::ObstacleCrash => Some((
				GameStatus::CrashedObstacle,
				"Drone crashed into an obstacle!".to_string(),
			)),
			Collision::DirectAnimalCrash(s) => Some((
				GameStatus::CrashedAnimal,
				format!("Drone crashed into the {}!", s),
			)),
		};
		if let Some((status, message)) = crash {
			self.message = message;
			self.record(command, GameEvent::Crashed { direction, target, collision });
			self.finish(status);
			return self.get_status();
		}

		self.drone.position = target;
		match evaluate_after_move(target, &self.world) {
			ProximityOutcome::Safe => {
				self.message = format!(
					"Moved {} to ({}, {}), facing {}",
					direction.as_str(),
					target.x,
					target.y,
					self.drone.facing
				);
				self.record(command, GameEvent::Moved { direction, to: target });
			}
			ProximityOutcome::AnimalFled(animals) => {
				let names: Vec<&str> = animals.iter().map(|(_, s)| s.name()).collect();
				self.message = format!(
					"Drone got too close and scared away the {}!",
					names.join(" and ")
				);
				self.fled_from = animals.iter().map(|(p, _)| *p).collect();
				self.record(command, GameEvent::Fled { direction, to: target, animals });
				self.finish(GameStatus::AnimalFled);
			}
		}
		self.get_status()
	}

	pub fn turn(&mut self, direction: TurnDirection) -> StatusSnapshot {
		let command = Command::Turn { direction };
		if self.rejected_as_terminal(command) {
			return self.get_status();
		}
		let facing = resolve_turn(self.drone.facing, direction);
		self.drone.facing = facing;
		self.turns = self.turns.saturating_add(1);
		self.message = format!("Turned {}, now facing {}", direction.as_str(), facing);
		self.record(command, GameEvent::Turned { direction, facing });
		self.get_status()
	}

	pub fn take_picture(&mut self) -> Result<StatusSnapshot, NoPicturesLeftError> {
		let command = Command::TakePicture;
		if self.rejected_as_terminal(command) {
			return Ok(self.get_status());
		}
		if self.drone.pictures_remaining == 0 {
			return Err(NoPicturesLeftError);
		}

		self.drone.pictures_remaining -= 1;
		let PhotoShot { outcome, target } = evaluate_photo(
			self.drone.position,
			self.drone.facing,
			&self.world,
			&self.drone.photographed_species,
			self.config.photo_rule,
		);
		if let PhotoOutcome::Captured(s) = outcome {
			self.drone.photographed_species.insert(s);
		}

		let number = self.pictures_taken() + 1;
		let remaining = self.drone.pictures_remaining;
		let mut message = match outcome {
			PhotoOutcome::Captured(s) => {
				format!("Picture #{}: Successfully photographed the {}!", number, s)
			}
			PhotoOutcome::AlreadyCaptured(s) => {
				format!("Picture #{} wasted! The {} was already photographed.", number, s)
			}
			PhotoOutcome::Wasted(WasteReason::ViewBlocked) => {
				format!("Picture #{} wasted! An obstacle is blocking the view.", number)
			}
			PhotoOutcome::Wasted(WasteReason::NothingInRange) => {
				format!("Picture #{} wasted! No animal in range.", number)
			}
		};
		message.push_str(&format!(" {} pictures remaining.", remaining));

		let record = PhotoRecord { number, target, outcome };
		self.photo_log.push(record);
		self.record(command, GameEvent::Photo(record));

		if self.all_species_photographed() {
			message.push_str(" All animals photographed, mission complete!");
			self.message = message;
			self.finish(GameStatus::Completed);
		} else if remaining == 0 {
			message.push_str(" No pictures left and the mission is incomplete.");
			self.message = message;
			self.finish(GameStatus::OutOfPictures);
		} else {
			self.message = message;
		}
		Ok(self.get_status())
	}

	fn all_species_photographed(&self) -> bool {
		self.config
			.species_list
			.iter()
			.all(|s| self.drone.photographed_species.contains(s))
	}

	fn pictures_taken(&self) -> u32 {
		self.photo_log.len() as u32
	}

	pub fn get_status(&self) -> StatusSnapshot {
		StatusSnapshot {
			position: self.drone.position,
			facing: self.drone.facing,
			pictures_remaining: self.drone.pictures_remaining,
			pictures_taken: self.pictures_taken(),
			photographed_species: self.drone.photographed_species.clone(),
			moves: self.moves,
			turns: self.turns,
			status: self.status,
			message: self.message.clone(),
			fled_from: self.fled_from.clone(),
			photo_log: self.photo_log.clone(),
		}
	}

	pub fn status(&self) -> GameStatus {
		self.status
	}

	pub fn drone(&self) -> &DroneState {
		&self.drone
	}

	pub fn world(&self) -> &GridWorld {
		&self.world
	}

	pub fn config(&self) -> &SessionConfig {
		&self.config
	}

	pub fn history(&self) -> &[HistoryEntry] {
		&self.history
	}

	pub fn statistics(&self) -> Statistics {
		Statistics::from_history(&self.history)
	}

	pub fn cell_at(&self, x: i32, y: i32) -> Result<CellKind, OutOfBoundsError> {
		self.world.cell_at(x, y)
	}

	pub fn grid_size(&self) -> u32 {
		self.world.grid_size()
	}

	pub fn fled_from(&self) -> &[GridPos] {
		&self.fled_from
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::config::{FixedLayout, PhotoRule, PlacedAnimal};
	use crate::sensors::{DetectedKind, Detection};

	fn session(
		start: GridPos,
		facing: Facing,
		animals: Vec<(Species, GridPos)>,
		obstacles: Vec<GridPos>,
	) -> GameSession {
		let config = SessionConfig {
			grid_size: 12,
			species_list: animals.iter().map(|a| a.0).collect(),
			drone_start: start,
			drone_facing: facing,
			layout: Some(FixedLayout {
				obstacles,
				animals: animals.into_iter().map(|(species, pos)| PlacedAnimal { species, pos }).collect(),
			}),
			..SessionConfig::default()
		};
		GameSession::new(config).unwrap()
	}

	#[test]
	fn boundary_crash_keeps_position_and_counts_the_attempt() {
		let mut s = session(
			GridPos::new(0, 0),
			Facing::West,
			vec![(Species::Zebra, GridPos::new(8, 8))],
			vec![],
		);
		let snap = s.move_drone(MoveDirection::Forward);
		assert_eq!(snap.status, GameStatus::CrashedBoundary);
		assert_eq!(snap.position, GridPos::new(0, 0));
		assert_eq!(snap.moves, 1);
	}

	#[test]
	fn obstacle_and_animal_crashes() {
		let mut s = session(
			GridPos::new(5, 5),
			Facing::North,
			vec![(Species::Zebra, GridPos::new(9, 9))],
			vec![GridPos::new(5, 6)],
		);
		assert_eq!(s.move_drone(MoveDirection::Forward).status, GameStatus::CrashedObstacle);

		// Direct hit wins over the adjacency check for the same animal.
		let mut s = session(
			GridPos::new(5, 5),
			Facing::North,
			vec![(Species::Zebra, GridPos::new(6, 5))],
			vec![],
		);
		let snap = s.move_drone(MoveDirection::Right);
		assert_eq!(snap.status, GameStatus::CrashedAnimal);
		assert_eq!(snap.position, GridPos::new(5, 5));
		assert!(snap.fled_from.is_empty());
	}

	#[test]
	fn moving_next_to_an_animal_scares_it_away() {
		let mut s = session(
			GridPos::new(5, 5),
			Facing::North,
			vec![(Species::Oryx, GridPos::new(6, 8))],
			vec![],
		);
		assert_eq!(s.move_drone(MoveDirection::Forward).status, GameStatus::Playing);
		let snap = s.move_drone(MoveDirection::Forward);
		assert_eq!(snap.status, GameStatus::AnimalFled);
		assert_eq!(snap.position, GridPos::new(5, 7));
		assert_eq!(snap.moves, 2);
		assert_eq!(snap.fled_from, vec![GridPos::new(6, 8)]);
	}

	#[test]
	fn scan_after_a_flee_shows_the_marker() {
		let mut s = session(
			GridPos::new(5, 5),
			Facing::North,
			vec![(Species::Oryx, GridPos::new(6, 8))],
			vec![],
		);
		s.move_drone(MoveDirection::Forward);
		assert_eq!(s.move_drone(MoveDirection::Forward).status, GameStatus::AnimalFled);
		let found = s.scan(2);
		assert!(found.contains(&Detection { kind: DetectedKind::FledAnimal, dx: 1, dy: 1 }));
		assert!(!found.iter().any(|d| matches!(d.kind, DetectedKind::Animal(_))));
		assert!(s.sensor_summary().contains("scared animal location at 1 North 1 East"));
	}

	#[test]
	fn turning_changes_only_facing_and_turns() {
		let mut s = session(
			GridPos::new(5, 5),
			Facing::North,
			vec![(Species::Zebra, GridPos::new(9, 9))],
			vec![],
		);
		let snap = s.turn(TurnDirection::Right);
		assert_eq!(snap.facing, Facing::East);
		assert_eq!(snap.turns, 1);
		assert_eq!(snap.moves, 0);
		assert_eq!(snap.position, GridPos::new(5, 5));
		assert_eq!(snap.status, GameStatus::Playing);
	}

	#[test]
	fn photo_at_distance_two_is_captured() {
		let mut s = session(
			GridPos::new(0, 0),
			Facing::East,
			vec![(Species::Zebra, GridPos::new(2, 0)), (Species::Oryx, GridPos::new(9, 9))],
			vec![],
		);
		let snap = s.take_picture().unwrap();
		assert!(snap.photographed_species.contains(&Species::Zebra));
		assert_eq!(snap.pictures_remaining, 4);
		assert_eq!(snap.pictures_taken, 1);
		assert_eq!(snap.status, GameStatus::Playing);

		let again = s.take_picture().unwrap();
		assert_eq!(again.photographed_species.len(), 1);
		assert_eq!(again.pictures_remaining, 3);
		assert_eq!(again.photo_log[1].outcome, PhotoOutcome::AlreadyCaptured(Species::Zebra));
	}

	#[test]
	fn last_species_completes_the_mission() {
		let mut s = session(
			GridPos::new(0, 0),
			Facing::East,
			vec![(Species::Zebra, GridPos::new(2, 0))],
			vec![],
		);
		let snap = s.take_picture().unwrap();
		assert_eq!(snap.status, GameStatus::Completed);
		assert!(snap.status.is_won());
	}

	#[test]
	fn exhausting_pictures_ends_the_game() {
		let mut s = session(
			GridPos::new(0, 0),
			Facing::East,
			vec![(Species::Zebra, GridPos::new(8, 8))],
			vec![],
		);
		for _ in 0..4 {
			assert_eq!(s.take_picture().unwrap().status, GameStatus::Playing);
		}
		let snap = s.take_picture().unwrap();
		assert_eq!(snap.status, GameStatus::OutOfPictures);
		assert_eq!(snap.pictures_remaining, 0);
		// Terminal check comes before the picture pre-check.
		assert_eq!(s.take_picture().unwrap(), snap);
	}

	#[test]
	fn empty_camera_is_an_error_not_a_transition() {
		let mut s = session(
			GridPos::new(0, 0),
			Facing::East,
			vec![(Species::Zebra, GridPos::new(8, 8))],
			vec![],
		);
		s.drone.pictures_remaining = 0;
		assert_eq!(s.take_picture(), Err(NoPicturesLeftError));
		assert_eq!(s.status(), GameStatus::Playing);
	}

	#[test]
	fn terminal_sessions_ignore_commands() {
		let mut s = session(
			GridPos::new(0, 0),
			Facing::South,
			vec![(Species::Zebra, GridPos::new(8, 8))],
			vec![],
		);
		let crashed = s.move_drone(MoveDirection::Forward);
		assert_eq!(crashed.status, GameStatus::CrashedBoundary);
		assert_eq!(s.move_drone(MoveDirection::Backward), crashed);
		assert_eq!(s.turn(TurnDirection::Left), crashed);
		assert_eq!(s.take_picture().unwrap(), crashed);
		assert_eq!(s.history().len(), 1);
	}

	#[test]
	fn get_status_is_side_effect_free() {
		let mut s = session(
			GridPos::new(5, 5),
			Facing::North,
			vec![(Species::Zebra, GridPos::new(9, 9))],
			vec![],
		);
		s.turn(TurnDirection::Left);
		let a = s.get_status();
		let b = s.apply(Command::GetStatus).unwrap();
		assert_eq!(a, b);
		assert_eq!(s.history().len(), 1);
	}

	#[test]
	fn facing_line_rule_is_honoured() {
		let mut s = session(
			GridPos::new(0, 0),
			Facing::North,
			vec![(Species::Zebra, GridPos::new(2, 0))],
			vec![],
		);
		s.config.photo_rule = PhotoRule::FacingLine;
		assert!(s.take_picture().unwrap().photographed_species.is_empty());
		s.turn(TurnDirection::Right);
		assert_eq!(s.take_picture().unwrap().status, GameStatus::Completed);
	}

	#[test]
	fn reset_restores_a_fresh_session() {
		let mut s = session(
			GridPos::new(0, 0),
			Facing::West,
			vec![(Species::Zebra, GridPos::new(8, 8))],
			vec![],
		);
		s.move_drone(MoveDirection::Forward);
		let snap = s.reset().unwrap();
		assert_eq!(snap.status, GameStatus::Playing);
		assert_eq!(snap.moves, 0);
		assert_eq!(snap.pictures_remaining, 5);
		assert!(s.history().is_empty());
	}
}
