use serde::{Deserialize, Serialize};

use crate::error::{GameError, Result};
use crate::model::Civilization;

/// Map generation parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    pub width: usize,
    pub height: usize,
    /// Each tile carries a resource with probability 1 in `resource_chance`.
    pub resource_chance: u32,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            width: 20,
            height: 15,
            resource_chance: 10,
        }
    }
}

/// Everything needed to set up and run one game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// RNG seed for deterministic play.
    pub seed: u64,
    pub map: MapConfig,
    pub num_players: usize,
    /// Players `0..human_players` take input from the front end; the rest are AI.
    pub human_players: usize,
    pub start_year: i32,
    pub end_year: i32,
    /// Years added once per full round of player turns.
    pub year_step: i32,
    /// Minimum squared distance between a new capital and any existing city.
    pub min_city_distance: usize,
    pub max_start_attempts: u32,
    pub max_queue_len: usize,
    /// Percent chance per year that a player's current research completes.
    pub research_chance: u32,
    /// Percent chance per AI turn that the AI retargets research.
    pub ai_research_chance: u32,
    /// Percent chance that an attacker wins.
    pub combat_win_chance: u32,
    pub starting_gold: i32,
    pub starting_happiness: i32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            map: MapConfig::default(),
            num_players: 2,
            human_players: 0,
            start_year: -4000,
            end_year: 2050,
            year_step: 10,
            min_city_distance: 25,
            max_start_attempts: 100,
            max_queue_len: 5,
            research_chance: 30,
            ai_research_chance: 50,
            combat_win_chance: 70,
            starting_gold: 100,
            starting_happiness: 100,
        }
    }
}

impl GameConfig {
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }

    /// Reject configurations the engine cannot run.
    pub fn validate(&self) -> Result<()> {
        let max_players = Civilization::ALL.len();
        if !(2..=max_players).contains(&self.num_players) {
            return Err(GameError::InvalidInput(format!(
                "number of players must be between 2 and {max_players}, got {}",
                self.num_players
            )));
        }
        if self.human_players > self.num_players {
            return Err(GameError::InvalidInput(format!(
                "{} human players exceed {} total players",
                self.human_players, self.num_players
            )));
        }
        if self.map.width == 0 || self.map.height == 0 {
            return Err(GameError::InvalidInput(format!(
                "map must not be empty, got {}x{}",
                self.map.width, self.map.height
            )));
        }
        if self.map.resource_chance == 0 {
            return Err(GameError::InvalidInput(
                "resource chance must be at least 1".to_string(),
            ));
        }
        if self.year_step <= 0 {
            return Err(GameError::InvalidInput(format!(
                "year step must be positive, got {}",
                self.year_step
            )));
        }
        if self.max_queue_len == 0 {
            return Err(GameError::InvalidInput(
                "production queue must hold at least one item".to_string(),
            ));
        }
        for (name, pct) in [
            ("research chance", self.research_chance),
            ("AI research chance", self.ai_research_chance),
            ("combat win chance", self.combat_win_chance),
        ] {
            if pct > 100 {
                return Err(GameError::InvalidInput(format!(
                    "{name} is a percentage, got {pct}"
                )));
            }
        }
        Ok(())
    }

    pub fn is_human(&self, player: usize) -> bool {
        player < self.human_players
    }
}
