use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use super::building::BuildingKind;
use super::unit::UnitKind;
use crate::id::{CityId, PlayerId};

/// Production points every city gets per year on top of its population.
pub const BASE_PRODUCTION: u32 = 10;

/// What a queue entry will turn into when it completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "kind", rename_all = "snake_case")]
pub enum ProductionKind {
    Unit(UnitKind),
    Building(BuildingKind),
}

impl ProductionKind {
    pub fn cost(self) -> u32 {
        match self {
            ProductionKind::Unit(kind) => kind.cost(),
            ProductionKind::Building(kind) => kind.cost(),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ProductionKind::Unit(kind) => kind.as_str(),
            ProductionKind::Building(kind) => kind.as_str(),
        }
    }
}

impl std::fmt::Display for ProductionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductionItem {
    pub kind: ProductionKind,
    pub progress: u32,
    pub total_cost: u32,
}

impl ProductionItem {
    pub fn new(kind: ProductionKind) -> Self {
        Self {
            kind,
            progress: 0,
            total_cost: kind.cost(),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.progress >= self.total_cost
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct City {
    pub id: CityId,
    pub name: String,
    pub owner: PlayerId,
    pub x: usize,
    pub y: usize,
    pub population: u32,
    pub food: u32,
    /// Head is the only entry that advances.
    pub queue: VecDeque<ProductionItem>,
    pub buildings: Vec<BuildingKind>,
}

impl City {
    pub fn new(id: CityId, name: String, owner: PlayerId, x: usize, y: usize) -> Self {
        Self {
            id,
            name,
            owner,
            x,
            y,
            population: 1,
            food: 0,
            queue: VecDeque::new(),
            buildings: Vec::new(),
        }
    }

    pub fn position(&self) -> (usize, usize) {
        (self.x, self.y)
    }

    pub fn production_per_year(&self) -> u32 {
        BASE_PRODUCTION + self.population
    }

    pub fn has_building(&self, kind: BuildingKind) -> bool {
        self.buildings.contains(&kind)
    }
}
