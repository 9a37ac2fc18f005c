use thiserror::Error;

use crate::id::{CityId, PlayerId, UnitId};
use crate::model::Tech;

pub type Result<T> = std::result::Result<T, GameError>;

/// Every failure the engine reports. All variants are recoverable at the
/// scheduler level except `StartingPositionExhausted` and setup-time
/// `NoValidPlacement`, which abort game construction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("city {0} not found")]
    CityNotFound(CityId),

    #[error("unit {0} not found")]
    UnitNotFound(UnitId),

    #[error("player {0} not found")]
    PlayerNotFound(PlayerId),

    #[error("cannot move to ({x}, {y}): {reason}")]
    InvalidMove {
        x: usize,
        y: usize,
        reason: &'static str,
    },

    #[error("production queue of city {city_id} is full")]
    ProductionQueueFull { city_id: CityId },

    #[error("no valid placement for {what}")]
    NoValidPlacement { what: String },

    #[error("no starting position for player {player} after {attempts} attempts")]
    StartingPositionExhausted { player: PlayerId, attempts: u32 },

    #[error("player {0} has no settler to found a city")]
    NoSettler(PlayerId),

    #[error("{0} is already known")]
    TechAlreadyKnown(Tech),

    #[error("the game is over")]
    GameOver,
}
