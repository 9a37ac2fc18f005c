use rand::seq::SliceRandom;
use rand::{Rng, RngCore};

use super::config::GameConfig;
use crate::error::{GameError, Result};
use crate::id::PlayerId;
use crate::model::{Civilization, DIRECTIONS, UnitKind, World};

/// Create every player with a capital, a settler on the capital tile and a
/// warrior next to it. Any failure aborts setup.
pub fn create_players(world: &mut World, config: &GameConfig, rng: &mut dyn RngCore) -> Result<()> {
    for (index, civilization) in Civilization::ALL
        .into_iter()
        .take(config.num_players)
        .enumerate()
    {
        let id = world.add_player(civilization, !config.is_human(index));
        {
            let player = world.player_mut(id)?;
            player.gold = config.starting_gold;
            player.happiness = config.starting_happiness;
        }

        let (x, y) = find_starting_position(world, config, id, rng)?;
        let capital_name = format!("{} Capital", civilization.display_name());
        let capital = world.spawn_city(id, capital_name, x, y)?;
        world.spawn_unit(id, UnitKind::Settler, x, y)?;

        let (wx, wy) = find_adjacent_free(world, x, y, rng).ok_or_else(|| {
            GameError::NoValidPlacement {
                what: format!("starting warrior of player {id}"),
            }
        })?;
        world.spawn_unit(id, UnitKind::Warrior, wx, wy)?;

        tracing::info!(
            player = id,
            civilization = %civilization,
            capital,
            x,
            y,
            "player placed"
        );
    }
    Ok(())
}

/// Sample random buildable tiles until one is far enough from every existing
/// city. Running out of attempts is fatal for setup.
pub fn find_starting_position(
    world: &World,
    config: &GameConfig,
    player: PlayerId,
    rng: &mut dyn RngCore,
) -> Result<(usize, usize)> {
    let width = world.map.width();
    let height = world.map.height();

    for _ in 0..config.max_start_attempts {
        let x = rng.random_range(0..width);
        let y = rng.random_range(0..height);

        if !world.map.is_buildable(x, y) || world.map.tile(x, y).is_some_and(|t| t.unit.is_some()) {
            continue;
        }
        let crowded = world
            .players
            .iter()
            .flat_map(|p| p.cities.values())
            .any(|c| squared_distance(c.position(), (x, y)) < config.min_city_distance);
        if !crowded {
            return Ok((x, y));
        }
    }

    Err(GameError::StartingPositionExhausted {
        player,
        attempts: config.max_start_attempts,
    })
}

/// First unoccupied buildable orthogonal neighbor, trying directions in random order.
pub fn find_adjacent_free(
    world: &World,
    x: usize,
    y: usize,
    rng: &mut dyn RngCore,
) -> Option<(usize, usize)> {
    let mut directions = DIRECTIONS;
    directions.shuffle(rng);
    directions
        .into_iter()
        .map(|dir| world.map.step(x, y, dir))
        .find(|&(nx, ny)| {
            world.map.is_buildable(nx, ny) && world.map.tile(nx, ny).is_some_and(|t| t.unit.is_none())
        })
}

/// Plain Euclidean distance squared on the grid (no wraparound).
pub fn squared_distance(a: (usize, usize), b: (usize, usize)) -> usize {
    let dx = a.0.abs_diff(b.0);
    let dy = a.1.abs_diff(b.1);
    dx * dx + dy * dy
}
