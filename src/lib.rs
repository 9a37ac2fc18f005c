pub mod error;
pub mod id;
pub mod model;
pub mod scenario;
pub mod sim;
pub mod snapshot;
pub mod worldgen;

pub use error::{GameError, Result};
pub use id::IdGenerator;
pub use model::{
    BuildingKind, City, Civilization, GameEvent, Player, ProductionKind, Tech, Terrain, Unit,
    UnitKind, World, WorldMap, Year,
};
pub use sim::{Command, Game, PassiveInput, PlayerInput, ScoreEntry, Victory};
pub use snapshot::GameSnapshot;
pub use worldgen::{GameConfig, MapConfig};
