use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Species {
	Zebra,
	Elephant,
	Oryx,
	Giraffe,
	Rhino,
}

impl Species {
	pub const DEFAULT_SET: [Species; 3] = [Species::Zebra, Species::Elephant, Species::Oryx];

	pub fn name(self) -> &'static str {
		match self {
			Species::Zebra => "zebra",
			Species::Elephant => "elephant",
			Species::Oryx => "oryx",
			Species::Giraffe => "giraffe",
			Species::Rhino => "rhino",
		}
	}

	pub fn symbol(self) -> char {
		match self {
			Species::Zebra => 'Z',
			Species::Elephant => 'E',
			Species::Oryx => 'O',
			Species::Giraffe => 'G',
			Species::Rhino => 'R',
		}
	}
}

impl std::fmt::Display for Species {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.name())
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CellKind {
	#[default]
	Empty,
	Obstacle,
	Animal(Species),
}

impl CellKind {
	pub fn is_empty(self) -> bool {
		matches!(self, CellKind::Empty)
	}

	pub fn species(self) -> Option<Species> {
		match self {
			CellKind::Animal(s) => Some(s),
			_ => None,
		}
	}

	pub fn symbol(self) -> char {
		match self {
			CellKind::Empty => '.',
			CellKind::Obstacle => 'T',
			CellKind::Animal(s) => s.symbol(),
		}
	}
}
