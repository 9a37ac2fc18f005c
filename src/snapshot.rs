use serde::Serialize;

use crate::id::PlayerId;
use crate::model::{Player, World, WorldMap, Year};
use crate::sim::{ScoreEntry, victory};

/// Read-only view of the game for front ends, serializable as JSON.
#[derive(Debug, Serialize)]
pub struct GameSnapshot<'a> {
    pub year: Year,
    pub active_player: PlayerId,
    pub running: bool,
    pub winner: Option<PlayerId>,
    pub map: &'a WorldMap,
    pub players: &'a [Player],
    pub scoreboard: Vec<ScoreEntry>,
}

impl<'a> GameSnapshot<'a> {
    pub fn capture(world: &'a World) -> Self {
        Self {
            year: world.year,
            active_player: world.active_player,
            running: world.running,
            winner: world.winner,
            map: &world.map,
            players: &world.players,
            scoreboard: victory::scoreboard(world),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
