pub mod ai;
pub mod combat;
pub mod commands;
mod context;
pub mod growth;
pub mod production;
pub mod research;
mod runner;
mod system;
pub mod victory;

pub use combat::{CombatOutcome, resolve_attack};
pub use commands::Command;
pub use context::TickContext;
pub use growth::GrowthSystem;
pub use production::ProductionSystem;
pub use research::ResearchSystem;
pub use runner::{Game, PassiveInput, Phase, PlayerInput};
pub use system::SimSystem;
pub use victory::{ScoreEntry, Victory};
