use serde::{Deserialize, Serialize};

use super::terrain::Terrain;
use crate::id::{CityId, PlayerId, UnitId};

/// Orthogonal step offsets: east, west, south, north.
pub const DIRECTIONS: [(isize, isize); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    pub terrain: Terrain,
    pub resource: Option<String>,
    pub improved: bool,
    pub city: Option<CityId>,
    pub unit: Option<UnitId>,
    pub owner: Option<PlayerId>,
}

impl Tile {
    pub fn new(terrain: Terrain) -> Self {
        Self {
            terrain,
            resource: None,
            improved: false,
            city: None,
            unit: None,
            owner: None,
        }
    }
}

/// Rectangular tile grid, stored row-major. Movement treats it as a torus:
/// stepping off one edge re-enters on the opposite one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorldMap {
    width: usize,
    height: usize,
    tiles: Vec<Tile>,
}

impl WorldMap {
    /// # Panics
    /// Panics if `tiles.len() != width * height`.
    pub fn new(width: usize, height: usize, tiles: Vec<Tile>) -> Self {
        assert_eq!(
            tiles.len(),
            width * height,
            "WorldMap::new: expected {width}x{height} tiles"
        );
        Self {
            width,
            height,
            tiles,
        }
    }

    /// A map where every tile has the same terrain.
    pub fn filled(width: usize, height: usize, terrain: Terrain) -> Self {
        Self::new(width, height, vec![Tile::new(terrain); width * height])
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn in_bounds(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height
    }

    pub fn tile(&self, x: usize, y: usize) -> Option<&Tile> {
        if self.in_bounds(x, y) {
            self.tiles.get(y * self.width + x)
        } else {
            None
        }
    }

    pub fn tile_mut(&mut self, x: usize, y: usize) -> Option<&mut Tile> {
        if self.in_bounds(x, y) {
            self.tiles.get_mut(y * self.width + x)
        } else {
            None
        }
    }

    /// In bounds and neither ocean nor mountains.
    pub fn is_buildable(&self, x: usize, y: usize) -> bool {
        self.tile(x, y).is_some_and(|t| t.terrain.is_buildable())
    }

    /// The tile one step away in `dir`, wrapping around the edges.
    pub fn step(&self, x: usize, y: usize, dir: (isize, isize)) -> (usize, usize) {
        let w = self.width as isize;
        let h = self.height as isize;
        let nx = (x as isize + dir.0).rem_euclid(w);
        let ny = (y as isize + dir.1).rem_euclid(h);
        (nx as usize, ny as usize)
    }

    /// The four orthogonal neighbors with toroidal wraparound, in `DIRECTIONS` order.
    pub fn adjacent(&self, x: usize, y: usize) -> [(usize, usize); 4] {
        DIRECTIONS.map(|dir| self.step(x, y, dir))
    }

    /// All coordinates in row-major order.
    pub fn coords(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.height).flat_map(move |y| (0..self.width).map(move |x| (x, y)))
    }

    pub fn tiles(&self) -> impl Iterator<Item = ((usize, usize), &Tile)> {
        self.coords().zip(self.tiles.iter())
    }

    pub fn owned_tile_count(&self, player: PlayerId) -> usize {
        self.tiles.iter().filter(|t| t.owner == Some(player)).count()
    }
}
