use serde::{Deserialize, Serialize};

use super::building::BuildingKind;
use super::calendar::Year;
use super::city::ProductionKind;
use super::player::DiplomaticAction;
use super::tech::Tech;
use super::unit::UnitKind;
use crate::id::{CityId, PlayerId, UnitId};

/// Something that happened in the world. Commands return the events they
/// caused and the game keeps them all in its log for front ends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    UnitMoved {
        unit_id: UnitId,
        player: PlayerId,
        from: (usize, usize),
        to: (usize, usize),
    },

    /// A unit tried to enter a tile held by another player's unit.
    Combat {
        attacker_id: UnitId,
        attacker_owner: PlayerId,
        defender_id: UnitId,
        defender_owner: PlayerId,
        at: (usize, usize),
        attacker_won: bool,
    },

    CityFounded {
        city_id: CityId,
        player: PlayerId,
        name: String,
        at: (usize, usize),
    },

    CityCaptured {
        city_id: CityId,
        old_owner: PlayerId,
        new_owner: PlayerId,
    },

    ProductionQueued {
        city_id: CityId,
        item: ProductionKind,
        cost: u32,
    },

    UnitProduced {
        city_id: CityId,
        unit_id: UnitId,
        kind: UnitKind,
        at: (usize, usize),
    },

    BuildingCompleted {
        city_id: CityId,
        kind: BuildingKind,
    },

    /// A finished unit had nowhere to stand. The queue item is consumed anyway.
    ProductionFailed {
        city_id: CityId,
        item: ProductionKind,
    },

    ResearchChanged {
        player: PlayerId,
        tech: Tech,
    },

    TechDiscovered {
        player: PlayerId,
        tech: Tech,
    },

    RelationChanged {
        player: PlayerId,
        target: PlayerId,
        action: DiplomaticAction,
        value: i32,
    },

    TurnEnded {
        player: PlayerId,
    },

    YearAdvanced {
        year: Year,
    },

    GameOver {
        winner: Option<PlayerId>,
        year: Year,
    },
}
