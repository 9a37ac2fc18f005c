#[macro_use]
mod macros;

pub mod building;
pub mod calendar;
pub mod city;
pub mod civilization;
pub mod event;
pub mod map;
pub mod player;
pub mod tech;
pub mod terrain;
pub mod unit;
pub mod world;

pub use building::BuildingKind;
pub use calendar::Year;
pub use city::{City, ProductionItem, ProductionKind};
pub use civilization::Civilization;
pub use event::GameEvent;
pub use map::{DIRECTIONS, Tile, WorldMap};
pub use player::{DiplomaticAction, Player};
pub use tech::Tech;
pub use terrain::{RESOURCES, Terrain};
pub use unit::{Unit, UnitKind};
pub use world::World;
