use serde::{Deserialize, Serialize};

use crate::id::{PlayerId, UnitId};

pub const UNIT_MAX_HEALTH: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum UnitKind {
    Settler,
    Warrior,
    Archer,
    Swordsman,
    Knight,
    Musketeer,
    Cannon,
    Tank,
}

string_enum!(UnitKind {
    Settler => "settler",
    Warrior => "warrior",
    Archer => "archer",
    Swordsman => "swordsman",
    Knight => "knight",
    Musketeer => "musketeer",
    Cannon => "cannon",
    Tank => "tank",
});

// (kind, production cost, movement, strength)
const UNIT_STATS: &[(UnitKind, u32, u32, u32)] = &[
    (UnitKind::Settler, 100, 2, 5),
    (UnitKind::Warrior, 50, 2, 10),
    (UnitKind::Archer, 60, 2, 8),
    (UnitKind::Swordsman, 80, 2, 12),
    (UnitKind::Knight, 120, 3, 15),
    (UnitKind::Musketeer, 150, 2, 18),
    (UnitKind::Cannon, 200, 1, 25),
    (UnitKind::Tank, 300, 3, 30),
];

impl UnitKind {
    pub const ALL: [UnitKind; 8] = [
        UnitKind::Settler,
        UnitKind::Warrior,
        UnitKind::Archer,
        UnitKind::Swordsman,
        UnitKind::Knight,
        UnitKind::Musketeer,
        UnitKind::Cannon,
        UnitKind::Tank,
    ];

    fn stats(self) -> (u32, u32, u32) {
        UNIT_STATS
            .iter()
            .find(|(kind, ..)| *kind == self)
            .map(|&(_, cost, movement, strength)| (cost, movement, strength))
            .unwrap_or((0, 0, 0))
    }

    /// Production points needed to complete this unit.
    pub fn cost(self) -> u32 {
        self.stats().0
    }

    /// Movement points restored at the start of each of the owner's turns.
    pub fn movement(self) -> u32 {
        self.stats().1
    }

    pub fn strength(self) -> u32 {
        self.stats().2
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unit {
    pub id: UnitId,
    pub kind: UnitKind,
    pub health: u32,
    pub movement: u32,
    pub strength: u32,
    pub owner: PlayerId,
    pub x: usize,
    pub y: usize,
}

impl Unit {
    /// A fresh unit at full health with the kind's stats.
    pub fn new(id: UnitId, kind: UnitKind, owner: PlayerId, x: usize, y: usize) -> Self {
        Self {
            id,
            kind,
            health: UNIT_MAX_HEALTH,
            movement: kind.movement(),
            strength: kind.strength(),
            owner,
            x,
            y,
        }
    }

    pub fn position(&self) -> (usize, usize) {
        (self.x, self.y)
    }

    pub fn can_move(&self) -> bool {
        self.movement > 0
    }

    pub fn restore_movement(&mut self) {
        self.movement = self.kind.movement();
    }
}
