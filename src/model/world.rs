use serde::Serialize;

use super::calendar::Year;
use super::city::City;
use super::civilization::Civilization;
use super::map::{Tile, WorldMap};
use super::player::Player;
use super::unit::{Unit, UnitKind};
use crate::error::{GameError, Result};
use crate::id::{CityId, IdGenerator, PlayerId, UnitId};

/// The whole game state: map, players and the entities they own, plus the
/// turn bookkeeping the scheduler advances.
///
/// Cities and units live inside their owning [`Player`]; every mutation
/// that touches both an entity and its tile goes through the methods here
/// so the two never disagree.
#[derive(Debug, Clone, Serialize)]
pub struct World {
    pub map: WorldMap,
    pub players: Vec<Player>,
    pub year: Year,
    pub active_player: PlayerId,
    pub running: bool,
    pub winner: Option<PlayerId>,
    pub city_ids: IdGenerator,
    pub unit_ids: IdGenerator,
}

impl World {
    pub fn new(map: WorldMap, year: Year) -> Self {
        Self {
            map,
            players: Vec::new(),
            year,
            active_player: 0,
            running: true,
            winner: None,
            city_ids: IdGenerator::new(),
            unit_ids: IdGenerator::new(),
        }
    }

    // -- Players --

    /// Append a player in turn order, wiring neutral relations both ways
    /// with everyone already present.
    pub fn add_player(&mut self, civilization: Civilization, is_ai: bool) -> PlayerId {
        let id = self.players.len();
        let mut player = Player::new(id, civilization, is_ai);
        for other in &mut self.players {
            other.relations.insert(id, 0);
            player.relations.insert(other.id, 0);
        }
        self.players.push(player);
        id
    }

    pub fn player(&self, id: PlayerId) -> Result<&Player> {
        self.players.get(id).ok_or(GameError::PlayerNotFound(id))
    }

    pub fn player_mut(&mut self, id: PlayerId) -> Result<&mut Player> {
        self.players.get_mut(id).ok_or(GameError::PlayerNotFound(id))
    }

    pub fn players_with_cities(&self) -> impl Iterator<Item = &Player> {
        self.players.iter().filter(|p| p.has_cities())
    }

    // -- Lookups --

    pub fn city(&self, id: CityId) -> Option<&City> {
        self.players.iter().find_map(|p| p.cities.get(&id))
    }

    pub fn city_mut(&mut self, id: CityId) -> Option<&mut City> {
        self.players.iter_mut().find_map(|p| p.cities.get_mut(&id))
    }

    pub fn unit(&self, id: UnitId) -> Option<&Unit> {
        self.players.iter().find_map(|p| p.units.get(&id))
    }

    pub fn unit_mut(&mut self, id: UnitId) -> Option<&mut Unit> {
        self.players.iter_mut().find_map(|p| p.units.get_mut(&id))
    }

    pub fn unit_at(&self, x: usize, y: usize) -> Option<&Unit> {
        self.map
            .tile(x, y)
            .and_then(|t| t.unit)
            .and_then(|id| self.unit(id))
    }

    pub fn city_at(&self, x: usize, y: usize) -> Option<&City> {
        self.map
            .tile(x, y)
            .and_then(|t| t.city)
            .and_then(|id| self.city(id))
    }

    // -- Placement --

    /// Found a city on a buildable, city-free tile. The tile becomes owned by `owner`.
    pub fn spawn_city(&mut self, owner: PlayerId, name: String, x: usize, y: usize) -> Result<CityId> {
        self.player(owner)?;
        if !self.map.is_buildable(x, y) {
            return Err(GameError::InvalidMove {
                x,
                y,
                reason: "terrain cannot hold a city",
            });
        }
        let tile = self.tile_mut_checked(x, y)?;
        if tile.city.is_some() {
            return Err(GameError::InvalidMove {
                x,
                y,
                reason: "tile already has a city",
            });
        }
        let id = self.city_ids.next_id();
        let tile = self.tile_mut_checked(x, y)?;
        tile.city = Some(id);
        tile.owner = Some(owner);
        self.player_mut(owner)?
            .cities
            .insert(id, City::new(id, name, owner, x, y));
        Ok(id)
    }

    /// Create a unit on a buildable, unit-free tile. Tile ownership is untouched.
    pub fn spawn_unit(&mut self, owner: PlayerId, kind: UnitKind, x: usize, y: usize) -> Result<UnitId> {
        self.player(owner)?;
        self.check_unit_destination(x, y)?;
        let id = self.unit_ids.next_id();
        self.tile_mut_checked(x, y)?.unit = Some(id);
        self.player_mut(owner)?
            .units
            .insert(id, Unit::new(id, kind, owner, x, y));
        Ok(id)
    }

    /// Move a unit between tiles: clears the source reference and sets the
    /// destination's unit and owner. Movement points are the caller's concern.
    pub fn relocate_unit(&mut self, unit_id: UnitId, x: usize, y: usize) -> Result<()> {
        let (owner, from) = {
            let unit = self.unit(unit_id).ok_or(GameError::UnitNotFound(unit_id))?;
            (unit.owner, unit.position())
        };
        self.check_unit_destination(x, y)?;

        if let Some(tile) = self.map.tile_mut(from.0, from.1) {
            tile.unit = None;
        }
        let dest = self.tile_mut_checked(x, y)?;
        dest.unit = Some(unit_id);
        dest.owner = Some(owner);
        if let Some(unit) = self.unit_mut(unit_id) {
            unit.x = x;
            unit.y = y;
        }
        Ok(())
    }

    /// Remove a unit from its owner and its tile in one step.
    pub fn remove_unit(&mut self, unit_id: UnitId) -> Result<Unit> {
        let owner = self
            .unit(unit_id)
            .map(|u| u.owner)
            .ok_or(GameError::UnitNotFound(unit_id))?;
        let unit = self
            .player_mut(owner)?
            .units
            .remove(&unit_id)
            .ok_or(GameError::UnitNotFound(unit_id))?;
        if let Some(tile) = self.map.tile_mut(unit.x, unit.y) {
            if tile.unit == Some(unit_id) {
                tile.unit = None;
            }
        }
        Ok(unit)
    }

    /// Remove a city from its owner and its tile. Tile ownership stays.
    pub fn remove_city(&mut self, city_id: CityId) -> Result<City> {
        let owner = self
            .city(city_id)
            .map(|c| c.owner)
            .ok_or(GameError::CityNotFound(city_id))?;
        let city = self
            .player_mut(owner)?
            .cities
            .remove(&city_id)
            .ok_or(GameError::CityNotFound(city_id))?;
        if let Some(tile) = self.map.tile_mut(city.x, city.y) {
            if tile.city == Some(city_id) {
                tile.city = None;
            }
        }
        Ok(city)
    }

    /// Hand a city to another player, keeping its id, queue and buildings.
    pub fn transfer_city(&mut self, city_id: CityId, new_owner: PlayerId) -> Result<()> {
        self.player(new_owner)?;
        let mut city = self.remove_city(city_id)?;
        city.owner = new_owner;
        let (x, y) = city.position();
        let tile = self.tile_mut_checked(x, y)?;
        tile.city = Some(city_id);
        tile.owner = Some(new_owner);
        self.player_mut(new_owner)?.cities.insert(city_id, city);
        Ok(())
    }

    fn check_unit_destination(&self, x: usize, y: usize) -> Result<()> {
        if !self.map.is_buildable(x, y) {
            return Err(GameError::InvalidMove {
                x,
                y,
                reason: "impassable terrain",
            });
        }
        if self.map.tile(x, y).is_some_and(|t| t.unit.is_some()) {
            return Err(GameError::InvalidMove {
                x,
                y,
                reason: "tile already occupied by a unit",
            });
        }
        Ok(())
    }

    fn tile_mut_checked(&mut self, x: usize, y: usize) -> Result<&mut Tile> {
        self.map
            .tile_mut(x, y)
            .ok_or_else(|| GameError::InvalidInput(format!("({x}, {y}) is off the map")))
    }
}
