//! Hand-built worlds for tests.
//!
//! `Scenario` starts from an all-plains map with no players and lets a test
//! place exactly the players, cities, units and terrain it needs, then
//! either tick single systems against it or turn it into a [`Game`].
//! Placement helpers panic on invalid setups so a broken fixture fails
//! loudly at the line that built it.

use rand::SeedableRng;
use rand::rngs::SmallRng;

use crate::id::{CityId, PlayerId, UnitId};
use crate::model::{Civilization, GameEvent, Terrain, UnitKind, World, WorldMap, Year};
use crate::sim::{Game, SimSystem, TickContext};
use crate::worldgen::{GameConfig, MapConfig};

pub struct Scenario {
    world: World,
    config: GameConfig,
}

impl Scenario {
    /// An empty `width` × `height` plains map at the default start year.
    pub fn new(width: usize, height: usize) -> Self {
        let config = GameConfig {
            map: MapConfig {
                width,
                height,
                ..MapConfig::default()
            },
            num_players: 0,
            ..GameConfig::default()
        };
        let map = WorldMap::filled(width, height, Terrain::Plains);
        let world = World::new(map, Year::new(config.start_year));
        Self { world, config }
    }

    // -- Setup --

    /// Add the next player in turn order. Player `i` plays civilization `i`.
    pub fn add_player(&mut self, is_ai: bool) -> PlayerId {
        let index = self.world.players.len() % Civilization::ALL.len();
        let id = self.world.add_player(Civilization::ALL[index], is_ai);
        let player = &mut self.world.players[id];
        player.gold = self.config.starting_gold;
        player.happiness = self.config.starting_happiness;
        self.config.num_players = self.world.players.len();
        self.config.human_players = self.world.players.iter().filter(|p| !p.is_ai).count();
        id
    }

    pub fn add_city(&mut self, owner: PlayerId, name: &str, x: usize, y: usize) -> CityId {
        self.world
            .spawn_city(owner, name.to_string(), x, y)
            .unwrap_or_else(|err| panic!("cannot place city {name} at ({x}, {y}): {err}"))
    }

    pub fn add_unit(&mut self, owner: PlayerId, kind: UnitKind, x: usize, y: usize) -> UnitId {
        self.world
            .spawn_unit(owner, kind, x, y)
            .unwrap_or_else(|err| panic!("cannot place {kind} at ({x}, {y}): {err}"))
    }

    pub fn set_terrain(&mut self, x: usize, y: usize, terrain: Terrain) {
        match self.world.map.tile_mut(x, y) {
            Some(tile) => tile.terrain = terrain,
            None => panic!("({x}, {y}) is off the map"),
        }
    }

    // -- Access --

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut GameConfig {
        &mut self.config
    }

    // -- Running --

    /// Run one system tick with a fresh RNG seeded from `seed`. Returns the
    /// events it emitted.
    pub fn tick(&mut self, system: &mut dyn SimSystem, seed: u64) -> Vec<GameEvent> {
        self.with_events(seed, |ctx| system.tick(ctx)).1
    }

    /// Run `f` against a context over this scenario and return its result,
    /// discarding emitted events.
    pub fn with_context<T>(&mut self, seed: u64, f: impl FnOnce(&mut TickContext) -> T) -> T {
        self.with_events(seed, f).0
    }

    /// Like [`with_context`](Self::with_context), also returning the events.
    pub fn with_events<T>(&mut self, seed: u64, f: impl FnOnce(&mut TickContext) -> T) -> (T, Vec<GameEvent>) {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut events = Vec::new();
        let mut ctx = TickContext {
            world: &mut self.world,
            rng: &mut rng,
            config: &self.config,
            events: &mut events,
        };
        let result = f(&mut ctx);
        (result, events)
    }

    /// Hand the world to a [`Game`] with an RNG seeded from `seed`.
    pub fn into_game(self, seed: u64) -> Game {
        Game::from_world(self.world, self.config, SmallRng::seed_from_u64(seed))
    }

    pub fn build(self) -> World {
        self.world
    }
}
