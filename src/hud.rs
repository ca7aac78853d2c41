use crate::cell::Species;
use crate::coords::GridPos;
use crate::engine::{GameSession, StatusSnapshot};
use crate::stats::Statistics;

pub fn format_hud(snapshot: &StatusSnapshot, pictures_total: u32) -> String {
	format!(
		"Pictures: {}/{} | Moves: {} | Turns: {} | Facing: {} | {}",
		snapshot.pictures_remaining,
		pictures_total,
		snapshot.moves,
		snapshot.turns,
		snapshot.facing,
		snapshot.status.label()
	)
}

pub fn format_side_panel(snapshot: &StatusSnapshot, species: &[Species], stats: &Statistics) -> Vec<String> {
	let mut out = Vec::new();
	out.push("[Photo collection]".to_string());
	for s in species {
		let state = if snapshot.photographed_species.contains(s) { "CAPTURED" } else { "MISSING" };
		out.push(format!("[{}] {} – {}", s.symbol(), s.name(), state));
	}
	out.push(format!("Progress: {}/{}", snapshot.photographed_species.len(), species.len()));
	out.push("[Statistics]".to_string());
	out.push(format!(
		"Pictures used: {} ({} wasted)",
		stats.pictures_used, stats.wasted_photos
	));
	out.push(format!("Actions: {} | Efficiency: {:.2}", stats.actions(), stats.efficiency));
	out.push(format!("> {}", snapshot.message));
	out
}

/// Text map, North up. Drone shown as its heading arrow, fled animals as `!`,
/// photographed cells as `*`.
pub fn format_grid(session: &GameSession) -> String {
	let snapshot = session.get_status();
	let n = session.grid_size() as i32;
	let shot_at: Vec<GridPos> = snapshot.photo_log.iter().filter_map(|r| r.target).collect();
	let mut lines = Vec::new();
	for y in (0..n).rev() {
		let mut line = format!("{:2} ", y);
		for x in 0..n {
			let pos = GridPos::new(x, y);
			let c = if pos == snapshot.position {
				snapshot.facing.arrow()
			} else if snapshot.fled_from.contains(&pos) {
				'!'
			} else if shot_at.contains(&pos) {
				'*'
			} else {
				session.world().get(pos).map(|k| k.symbol()).unwrap_or('?')
			};
			line.push(c);
			line.push(' ');
		}
		lines.push(line.trim_end().to_string());
	}
	let footer: String = (0..n).map(|x| format!("{}", x % 10)).collect::<Vec<_>>().join(" ");
	lines.push(format!("   {}", footer));
	lines.join("\n")
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::config::{FixedLayout, PlacedAnimal, SessionConfig};
	use crate::orientation::Facing;

	fn session() -> GameSession {
		GameSession::new(SessionConfig {
			grid_size: 4,
			species_list: vec![Species::Zebra, Species::Oryx],
			drone_start: GridPos::new(0, 0),
			drone_facing: Facing::East,
			layout: Some(FixedLayout {
				obstacles: vec![GridPos::new(3, 0)],
				animals: vec![
					PlacedAnimal { species: Species::Zebra, pos: GridPos::new(2, 0) },
					PlacedAnimal { species: Species::Oryx, pos: GridPos::new(3, 3) },
				],
			}),
			..SessionConfig::default()
		})
		.unwrap()
	}

	#[test]
	fn hud_format() {
		let s = session();
		let line = format_hud(&s.get_status(), 5);
		assert!(line.contains("Pictures: 5/5"));
		assert!(line.contains("Facing: East"));
		assert!(line.contains("Playing"));
	}

	#[test]
	fn side_panel_lists_species_and_stats() {
		let mut s = session();
		let snap = s.take_picture().unwrap();
		let lines = format_side_panel(&snap, &s.config().species_list, &s.statistics());
		assert!(lines.iter().any(|l| l.contains("zebra – CAPTURED")));
		assert!(lines.iter().any(|l| l.contains("oryx – MISSING")));
		assert!(lines.iter().any(|l| l.contains("Progress: 1/2")));
		assert!(lines.iter().any(|l| l.contains("Pictures used: 1 (0 wasted)")));
	}

	#[test]
	fn grid_puts_north_on_top() {
		let s = session();
		let text = format_grid(&s);
		let rows: Vec<&str> = text.lines().collect();
		assert_eq!(rows.len(), 5);
		assert_eq!(rows[0], " 3 . . . O");
		assert_eq!(rows[3], " 0 > . Z T");
		assert_eq!(rows[4], "   0 1 2 3");
	}
}
