pub mod config;
pub mod map;
pub mod players;

use rand::RngCore;

use crate::error::Result;
use crate::model::{World, Year};

pub use config::{GameConfig, MapConfig};

/// Generate the map and place every player. Fails if the configuration is
/// invalid or the map cannot fit the requested players.
pub fn generate_world(config: &GameConfig, rng: &mut dyn RngCore) -> Result<World> {
    config.validate()?;
    let map = map::generate_map(&config.map, rng);
    let mut world = World::new(map, Year::new(config.start_year));
    players::create_players(&mut world, config, rng)?;
    Ok(world)
}
