use rand::RngCore;

use crate::model::{GameEvent, World};
use crate::worldgen::GameConfig;

/// Context passed to every system tick and every command.
///
/// Bundled so rules can reach the world, the shared RNG and the tuning
/// knobs without threading them through each call separately.
pub struct TickContext<'a> {
    pub world: &'a mut World,
    pub rng: &'a mut dyn RngCore,
    pub config: &'a GameConfig,
    /// Systems and commands push what happened here.
    pub events: &'a mut Vec<GameEvent>,
}

impl TickContext<'_> {
    /// Roll a percentage check: true with probability `chance`%.
    pub fn roll_percent(&mut self, chance: u32) -> bool {
        use rand::Rng;
        self.rng.random_range(0..100) < chance
    }
}
