use rand::rngs::SmallRng;
use rand::{RngCore, SeedableRng};

use super::ai;
use super::commands::{self, Command};
use super::context::TickContext;
use super::growth::GrowthSystem;
use super::production::ProductionSystem;
use super::research::ResearchSystem;
use super::system::SimSystem;
use super::victory::{self, ScoreEntry, Victory};
use crate::error::{GameError, Result};
use crate::id::{CityId, PlayerId, UnitId};
use crate::model::{DiplomaticAction, GameEvent, ProductionKind, Tech, World};
use crate::worldgen::{GameConfig, generate_world};

/// Where the scheduler stands between calls.
///
/// Advancing past a turn and the year-end update happen synchronously
/// inside [`Game::end_turn`], so only the resting states are visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    AwaitingVictoryCheck,
    ActivePlayerTurn,
    GameOver,
}

/// Source of commands for human players. The engine asks for one command
/// at a time and keeps asking until it gets [`Command::EndTurn`].
pub trait PlayerInput {
    fn next_command(&mut self, world: &World, player: PlayerId) -> Result<Command>;

    /// Called with the outcome of every command other than `EndTurn`.
    fn command_result(&mut self, _player: PlayerId, _result: &Result<Vec<GameEvent>>) {}
}

/// Ends every human turn immediately.
pub struct PassiveInput;

impl PlayerInput for PassiveInput {
    fn next_command(&mut self, _world: &World, _player: PlayerId) -> Result<Command> {
        Ok(Command::EndTurn)
    }
}

/// A running game: world state, the seeded RNG, and the year-end systems
/// in the order they run.
pub struct Game<R: RngCore = SmallRng> {
    world: World,
    config: GameConfig,
    rng: R,
    systems: Vec<Box<dyn SimSystem>>,
    phase: Phase,
    events: Vec<GameEvent>,
    victory: Option<Victory>,
}

impl Game<SmallRng> {
    /// Generate a fresh world from `config`, seeding the RNG from `config.seed`.
    pub fn new(config: GameConfig) -> Result<Self> {
        let rng = SmallRng::seed_from_u64(config.seed);
        Self::with_rng(config, rng)
    }
}

impl<R: RngCore> Game<R> {
    pub fn with_rng(config: GameConfig, mut rng: R) -> Result<Self> {
        let world = generate_world(&config, &mut rng)?;
        Ok(Self::from_world(world, config, rng))
    }

    /// Resume from an existing world, e.g. one built by hand in tests.
    pub fn from_world(world: World, config: GameConfig, rng: R) -> Self {
        let mut game = Self {
            world,
            config,
            rng,
            systems: vec![
                Box::new(GrowthSystem),
                Box::new(ProductionSystem),
                Box::new(ResearchSystem),
            ],
            phase: Phase::AwaitingVictoryCheck,
            events: Vec::new(),
            victory: None,
        };
        victory::refresh_scores(&mut game.world);
        let mut events = Vec::new();
        game.begin_turn(&mut events);
        game.events.extend(events);
        game
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    pub fn victory(&self) -> Option<Victory> {
        self.victory
    }

    pub fn active_player(&self) -> PlayerId {
        self.world.active_player
    }

    /// Everything that has happened so far, oldest first.
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn scoreboard(&self) -> Vec<ScoreEntry> {
        victory::scoreboard(&self.world)
    }

    // -- Commands for the active player --

    pub fn execute(&mut self, command: Command) -> Result<Vec<GameEvent>> {
        match command {
            Command::MoveUnit { unit_id, x, y } => self.move_unit(unit_id, x, y),
            Command::FoundCity { name } => self.found_city(&name),
            Command::EnqueueProduction { city_id, item } => self.enqueue_production(city_id, item),
            Command::SetResearch { tech } => self.set_research(tech),
            Command::SetRelation { target, action } => self.set_relation(target, action),
            Command::EndTurn => self.end_turn(),
        }
    }

    pub fn move_unit(&mut self, unit_id: UnitId, x: usize, y: usize) -> Result<Vec<GameEvent>> {
        let player = self.acting_player()?;
        self.in_context(|ctx| commands::move_unit(ctx, player, unit_id, x, y))
    }

    pub fn found_city(&mut self, name: &str) -> Result<Vec<GameEvent>> {
        let player = self.acting_player()?;
        let event = commands::found_city(&mut self.world, player, name)?;
        Ok(self.record(vec![event]))
    }

    pub fn enqueue_production(&mut self, city_id: CityId, item: ProductionKind) -> Result<Vec<GameEvent>> {
        let player = self.acting_player()?;
        let event =
            commands::enqueue_production(&mut self.world, player, city_id, item, self.config.max_queue_len)?;
        Ok(self.record(vec![event]))
    }

    pub fn set_research(&mut self, tech: Tech) -> Result<Vec<GameEvent>> {
        let player = self.acting_player()?;
        let event = commands::set_research(&mut self.world, player, tech)?;
        Ok(self.record(vec![event]))
    }

    pub fn set_relation(&mut self, target: PlayerId, action: DiplomaticAction) -> Result<Vec<GameEvent>> {
        let player = self.acting_player()?;
        let event = commands::set_relation(&mut self.world, player, target, action)?;
        Ok(self.record(vec![event]))
    }

    /// Finish the active player's turn. Passing the last player ends the
    /// year; the next player to act is then found and the victory check
    /// runs before they get control.
    pub fn end_turn(&mut self) -> Result<Vec<GameEvent>> {
        let player = self.acting_player()?;
        let mut events = vec![GameEvent::TurnEnded { player }];
        self.advance(&mut events);
        self.begin_turn(&mut events);
        Ok(self.record(events))
    }

    // -- Driving the loop --

    /// Play out the active player's whole turn: one AI pass, or human
    /// commands from `input` until it ends the turn.
    ///
    /// An input failure halts the game without a winner and is returned.
    pub fn step(&mut self, input: &mut dyn PlayerInput) -> Result<()> {
        let player = self.acting_player()?;
        if self.world.players[player].is_ai {
            self.in_context(|ctx| {
                ai::take_turn(ctx, player);
                Ok(())
            })?;
            self.end_turn()?;
            return Ok(());
        }

        loop {
            let command = match input.next_command(&self.world, player) {
                Ok(command) => command,
                Err(err) => {
                    self.halt();
                    return Err(err);
                }
            };
            if command == Command::EndTurn {
                self.end_turn()?;
                return Ok(());
            }
            let result = self.execute(command);
            input.command_result(player, &result);
        }
    }

    /// Run until the game ends and return the final standings.
    pub fn run(&mut self, input: &mut dyn PlayerInput) -> Vec<ScoreEntry> {
        while !self.is_over() {
            if let Err(err) = self.step(input) {
                tracing::warn!(%err, "stopping game");
                break;
            }
        }
        self.scoreboard()
    }

    // -- Internals --

    fn acting_player(&self) -> Result<PlayerId> {
        if self.phase != Phase::ActivePlayerTurn {
            return Err(GameError::GameOver);
        }
        Ok(self.world.active_player)
    }

    fn record(&mut self, events: Vec<GameEvent>) -> Vec<GameEvent> {
        self.events.extend(events.iter().cloned());
        events
    }

    /// Run `f` with a context over this game's state and log what it emitted.
    fn in_context(&mut self, f: impl FnOnce(&mut TickContext) -> Result<()>) -> Result<Vec<GameEvent>> {
        let mut events = Vec::new();
        let mut ctx = TickContext {
            world: &mut self.world,
            rng: &mut self.rng,
            config: &self.config,
            events: &mut events,
        };
        f(&mut ctx)?;
        Ok(self.record(events))
    }

    /// Pass control to the next player in turn order, ending the year on wrap.
    fn advance(&mut self, events: &mut Vec<GameEvent>) {
        let count = self.world.players.len().max(1);
        self.world.active_player = (self.world.active_player + 1) % count;
        if self.world.active_player == 0 {
            self.year_end(events);
        }
        self.phase = Phase::AwaitingVictoryCheck;
    }

    fn year_end(&mut self, events: &mut Vec<GameEvent>) {
        self.world.year.advance(self.config.year_step);
        tracing::info!(year = %self.world.year, "year advanced");
        events.push(GameEvent::YearAdvanced { year: self.world.year });

        let mut ctx = TickContext {
            world: &mut self.world,
            rng: &mut self.rng,
            config: &self.config,
            events,
        };
        for system in &mut self.systems {
            tracing::trace!(system = system.name(), "year-end tick");
            system.tick(&mut ctx);
        }
        victory::refresh_scores(&mut self.world);
    }

    /// Check for victory, skip players without cities, and hand the turn
    /// to the first one still in the game with their units refreshed.
    fn begin_turn(&mut self, events: &mut Vec<GameEvent>) {
        loop {
            if let Some(victory) = victory::check(&mut self.world, &self.config) {
                self.finish(victory, events);
                return;
            }
            let active = self.world.active_player;
            let Some(player) = self.world.players.get_mut(active) else {
                self.halt();
                return;
            };
            if player.has_cities() {
                for unit in player.units.values_mut() {
                    unit.restore_movement();
                }
                tracing::debug!(player = %player.name, year = %self.world.year, "turn started");
                self.phase = Phase::ActivePlayerTurn;
                return;
            }
            self.advance(events);
        }
    }

    fn finish(&mut self, victory: Victory, events: &mut Vec<GameEvent>) {
        let winner = victory.winner();
        self.victory = Some(victory);
        self.world.winner = Some(winner);
        self.world.running = false;
        self.phase = Phase::GameOver;
        tracing::info!(winner, ?victory, year = %self.world.year, "game over");
        events.push(GameEvent::GameOver {
            winner: Some(winner),
            year: self.world.year,
        });
    }

    /// Stop without a winner.
    fn halt(&mut self) {
        if self.phase == Phase::GameOver {
            return;
        }
        self.world.running = false;
        self.phase = Phase::GameOver;
        tracing::info!(year = %self.world.year, "game halted");
        self.events.push(GameEvent::GameOver {
            winner: None,
            year: self.world.year,
        });
    }
}
