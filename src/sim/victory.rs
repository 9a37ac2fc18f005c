use serde::Serialize;

use crate::id::PlayerId;
use crate::model::{Civilization, World};
use crate::worldgen::GameConfig;

const POINTS_PER_CITY: u32 = 100;
const POINTS_PER_TECH: u32 = 50;
const POINTS_PER_UNIT: u32 = 10;
const POINTS_PER_TILE: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Victory {
    /// The end year arrived; highest score wins.
    Time { winner: PlayerId },
    /// Only one player still holds cities.
    Conquest { winner: PlayerId },
}

impl Victory {
    pub fn winner(self) -> PlayerId {
        match self {
            Victory::Time { winner } | Victory::Conquest { winner } => winner,
        }
    }
}

/// `100 × cities + 50 × techs + 10 × units + 5 × owned tiles`.
pub fn score(world: &World, player: PlayerId) -> u32 {
    let Some(p) = world.players.get(player) else {
        return 0;
    };
    let owned = world.map.owned_tile_count(player) as u32;
    POINTS_PER_CITY * p.city_count() as u32
        + POINTS_PER_TECH * p.techs.len() as u32
        + POINTS_PER_UNIT * p.unit_count() as u32
        + POINTS_PER_TILE * owned
}

pub fn refresh_scores(world: &mut World) {
    for id in 0..world.players.len() {
        let s = score(world, id);
        world.players[id].score = s;
    }
}

/// Decide whether the game is over. The time limit is checked first; ties
/// on score go to the earlier player.
pub fn check(world: &mut World, config: &GameConfig) -> Option<Victory> {
    if world.year.value() >= config.end_year {
        refresh_scores(world);
        let mut best: Option<(PlayerId, u32)> = None;
        for p in &world.players {
            if best.is_none_or(|(_, s)| p.score > s) {
                best = Some((p.id, p.score));
            }
        }
        return best.map(|(winner, _)| Victory::Time { winner });
    }

    let mut holders = world.players_with_cities();
    match (holders.next(), holders.next()) {
        (Some(only), None) => Some(Victory::Conquest { winner: only.id }),
        _ => None,
    }
}

/// One row of the final standings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreEntry {
    pub player: PlayerId,
    pub name: String,
    pub civilization: Civilization,
    pub cities: usize,
    pub units: usize,
    pub techs: usize,
    pub score: u32,
}

/// Standings in turn order with freshly computed scores.
pub fn scoreboard(world: &World) -> Vec<ScoreEntry> {
    world
        .players
        .iter()
        .map(|p| ScoreEntry {
            player: p.id,
            name: p.name.clone(),
            civilization: p.civilization,
            cities: p.city_count(),
            units: p.unit_count(),
            techs: p.techs.len(),
            score: score(world, p.id),
        })
        .collect()
}
