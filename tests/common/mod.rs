#![allow(dead_code)]

use std::collections::VecDeque;

use civ_sim::id::PlayerId;
use civ_sim::{Command, GameConfig, GameEvent, PlayerInput, Result, World};

/// Default-sized game where every seat is an AI.
pub fn ai_config(seed: u64) -> GameConfig {
    GameConfig::with_seed(seed)
}

/// Plays back a fixed list of commands, then ends every turn.
#[derive(Default)]
pub struct ScriptedInput {
    script: VecDeque<Command>,
    pub results: Vec<(PlayerId, Result<Vec<GameEvent>>)>,
}

impl ScriptedInput {
    pub fn new(script: impl IntoIterator<Item = Command>) -> Self {
        Self {
            script: script.into_iter().collect(),
            results: Vec::new(),
        }
    }
}

impl PlayerInput for ScriptedInput {
    fn next_command(&mut self, _world: &World, _player: PlayerId) -> Result<Command> {
        Ok(self.script.pop_front().unwrap_or(Command::EndTurn))
    }

    fn command_result(&mut self, player: PlayerId, result: &Result<Vec<GameEvent>>) {
        self.results.push((player, result.clone()));
    }
}

/// Every entity and tile reference agrees with the other side, and no tile
/// holds a unit or city on ocean or mountains.
pub fn assert_consistent(world: &World) {
    let mut units = 0;
    for player in &world.players {
        for unit in player.units.values() {
            units += 1;
            assert_eq!(unit.owner, player.id);
            assert!(world.map.is_buildable(unit.x, unit.y), "unit {} on bad terrain", unit.id);
            assert_eq!(world.map.tile(unit.x, unit.y).unwrap().unit, Some(unit.id));
        }
        for city in player.cities.values() {
            assert_eq!(city.owner, player.id);
            assert!(world.map.is_buildable(city.x, city.y), "city {} on bad terrain", city.id);
            let tile = world.map.tile(city.x, city.y).unwrap();
            assert_eq!(tile.city, Some(city.id));
            assert!(city.queue.len() <= 5);
        }
    }

    let mut occupied = 0;
    for ((x, y), tile) in world.map.tiles() {
        if let Some(id) = tile.unit {
            occupied += 1;
            let unit = world.unit(id).expect("tile points at a missing unit");
            assert_eq!(unit.position(), (x, y));
        }
        if let Some(id) = tile.city {
            assert_eq!(world.city(id).expect("tile points at a missing city").position(), (x, y));
        }
    }
    assert_eq!(units, occupied, "unit registry and tiles disagree");
}
