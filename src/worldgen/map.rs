use rand::{Rng, RngCore};

use super::config::MapConfig;
use crate::model::{RESOURCES, Terrain, Tile, WorldMap};

/// Fill a fresh grid. Terrain is uniform over all categories and each tile
/// independently rolls for a resource.
pub fn generate_map(config: &MapConfig, rng: &mut dyn RngCore) -> WorldMap {
    let mut tiles = Vec::with_capacity(config.width * config.height);
    for _ in 0..config.width * config.height {
        let terrain = Terrain::ALL[rng.random_range(0..Terrain::ALL.len())];
        let mut tile = Tile::new(terrain);
        if rng.random_range(0..config.resource_chance) == 0 {
            let resource = RESOURCES[rng.random_range(0..RESOURCES.len())];
            tile.resource = Some(resource.to_string());
        }
        tiles.push(tile);
    }
    WorldMap::new(config.width, config.height, tiles)
}
