use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::engine::{GameEvent, HistoryEntry};
use crate::proximity::PhotoOutcome;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Statistics {
    pub moves: u32,
    pub turns: u32,
    pub pictures_used: u32,
    pub successful_photos: u32,
    pub wasted_photos: u32,
    pub species_photographed: u32,
    /// Species photographed per action taken; 0.0 before the first action.
    pub efficiency: f64,
}

impl Statistics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_history(history: &[HistoryEntry]) -> Self {
        let mut stats = Self::new();
        let mut species = BTreeSet::new();
        for entry in history {
            match &entry.event {
                GameEvent::Moved { .. } | GameEvent::Crashed { .. } | GameEvent::Fled { .. } => {
                    stats.moves = stats.moves.saturating_add(1);
                }
                GameEvent::Turned { .. } => {
                    stats.turns = stats.turns.saturating_add(1);
                }
                GameEvent::Photo(record) => {
                    stats.pictures_used = stats.pictures_used.saturating_add(1);
                    match record.outcome {
                        PhotoOutcome::Captured(s) => {
                            stats.successful_photos = stats.successful_photos.saturating_add(1);
                            species.insert(s);
                        }
                        PhotoOutcome::AlreadyCaptured(_) | PhotoOutcome::Wasted(_) => {
                            stats.wasted_photos = stats.wasted_photos.saturating_add(1);
                        }
                    }
                }
            }
        }
        stats.species_photographed = species.len() as u32;
        let actions = stats.actions();
        if actions > 0 {
            stats.efficiency = f64::from(stats.species_photographed) / f64::from(actions);
        }
        stats
    }

    pub fn actions(&self) -> u32 {
        self.moves
            .saturating_add(self.turns)
            .saturating_add(self.pictures_used)
    }
}
