use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use super::city::City;
use super::civilization::Civilization;
use super::tech::Tech;
use super::unit::Unit;
use crate::id::{CityId, PlayerId, UnitId};

pub const RELATION_MIN: i32 = -100;
pub const RELATION_MAX: i32 = 100;

/// Diplomatic stance change toward another player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum DiplomaticAction {
    DeclareWar,
    MakePeace,
    TradeAgreement,
}

string_enum!(DiplomaticAction {
    DeclareWar => "war",
    MakePeace => "peace",
    TradeAgreement => "trade",
});

impl DiplomaticAction {
    /// The relation score after taking this action, clamped to [-100, 100].
    pub fn apply(self, current: i32) -> i32 {
        let next = match self {
            DiplomaticAction::DeclareWar => RELATION_MIN,
            DiplomaticAction::MakePeace => 50,
            DiplomaticAction::TradeAgreement => current + 20,
        };
        next.clamp(RELATION_MIN, RELATION_MAX)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub civilization: Civilization,
    pub cities: BTreeMap<CityId, City>,
    pub units: BTreeMap<UnitId, Unit>,
    pub techs: BTreeSet<Tech>,
    /// `None` only once every technology is known.
    pub researching: Option<Tech>,
    pub gold: i32,
    pub happiness: i32,
    pub is_ai: bool,
    pub relations: BTreeMap<PlayerId, i32>,
    /// Refreshed every year end and by the victory check.
    pub score: u32,
}

impl Player {
    pub fn new(id: PlayerId, civilization: Civilization, is_ai: bool) -> Self {
        let mut player = Self {
            id,
            name: civilization.display_name().to_string(),
            civilization,
            cities: BTreeMap::new(),
            units: BTreeMap::new(),
            techs: BTreeSet::from([Tech::STARTING]),
            researching: None,
            gold: 0,
            happiness: 0,
            is_ai,
            relations: BTreeMap::new(),
            score: 0,
        };
        player.researching = player.next_unknown_tech();
        player
    }

    pub fn knows(&self, tech: Tech) -> bool {
        self.techs.contains(&tech)
    }

    /// The earliest technology in research order that is not yet known.
    pub fn next_unknown_tech(&self) -> Option<Tech> {
        Tech::ALL.into_iter().find(|t| !self.knows(*t))
    }

    pub fn city_count(&self) -> usize {
        self.cities.len()
    }

    pub fn unit_count(&self) -> usize {
        self.units.len()
    }

    pub fn has_cities(&self) -> bool {
        !self.cities.is_empty()
    }

    pub fn relation(&self, other: PlayerId) -> i32 {
        self.relations.get(&other).copied().unwrap_or(0)
    }
}
