//! `civ-sim`: run a seeded game headless, or play human seats from stdin.

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt};

use civ_sim::id::PlayerId;
use civ_sim::{
    BuildingKind, Command, Game, GameConfig, GameError, GameEvent, GameSnapshot, PlayerInput,
    ProductionKind, ScoreEntry, UnitKind, World,
};

#[derive(Parser)]
#[command(name = "civ-sim")]
#[command(about = "Turn-based civilization strategy engine", version)]
struct Cli {
    /// RNG seed; the same seed replays the same game
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Number of players (2-8)
    #[arg(long, default_value_t = 2)]
    players: usize,

    /// How many of the players take commands from stdin
    #[arg(long, default_value_t = 0)]
    humans: usize,

    #[arg(long, default_value_t = 20)]
    width: usize,

    #[arg(long, default_value_t = 15)]
    height: usize,

    /// Last year of play (negative for BC)
    #[arg(long, default_value_t = 2050, allow_negative_numbers = true)]
    end_year: i32,

    /// Print the final state as JSON instead of a table
    #[arg(long)]
    json: bool,

    /// Load the game configuration from a JSON file; flags are ignored
    #[arg(long)]
    config: Option<std::path::PathBuf>,
}

impl Cli {
    fn game_config(&self) -> Result<GameConfig> {
        if let Some(path) = &self.config {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            return serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()));
        }
        let mut config = GameConfig::with_seed(self.seed);
        config.num_players = self.players;
        config.human_players = self.humans;
        config.map.width = self.width;
        config.map.height = self.height;
        config.end_year = self.end_year;
        Ok(config)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    let config = cli.game_config()?;
    let mut game = Game::new(config).context("setting up the game")?;
    let mut input = TerminalInput::new();
    let board = game.run(&mut input);

    if cli.json {
        let snapshot = GameSnapshot::capture(game.world());
        println!("{}", snapshot.to_json_pretty()?);
    } else {
        print_scoreboard(&game, &board);
    }
    Ok(())
}

fn print_scoreboard(game: &Game, board: &[ScoreEntry]) {
    let world = game.world();
    match world.winner {
        Some(winner) => println!("Game over in {}: {} wins", world.year, world.players[winner].name),
        None => println!("Game stopped in {} without a winner", world.year),
    }
    println!("{:<10} {:>6} {:>6} {:>6} {:>7}", "player", "cities", "units", "techs", "score");
    for row in board {
        println!(
            "{:<10} {:>6} {:>6} {:>6} {:>7}",
            row.name, row.cities, row.units, row.techs, row.score
        );
    }
}

/// Human seats read one command per line from stdin.
struct TerminalInput {
    lines: io::Lines<io::StdinLock<'static>>,
}

impl TerminalInput {
    fn new() -> Self {
        Self {
            lines: io::stdin().lock().lines(),
        }
    }

    fn read_line(&mut self) -> civ_sim::Result<String> {
        match self.lines.next() {
            Some(Ok(line)) => Ok(line),
            Some(Err(err)) => Err(GameError::InvalidInput(format!("reading stdin: {err}"))),
            None => Err(GameError::InvalidInput("stdin closed".to_string())),
        }
    }
}

impl PlayerInput for TerminalInput {
    fn next_command(&mut self, world: &World, player: PlayerId) -> civ_sim::Result<Command> {
        loop {
            print!("{} [{}]> ", world.players[player].name, world.year);
            let _ = io::stdout().flush();
            let line = self.read_line()?;
            let words: Vec<&str> = line.split_whitespace().collect();
            match words.as_slice() {
                [] => {}
                ["map"] => print_map(world),
                ["status"] => print_status(world, player),
                ["quit"] => return Err(GameError::InvalidInput("player quit".to_string())),
                _ => match parse_command(&words) {
                    Ok(command) => return Ok(command),
                    Err(msg) => println!("{msg}"),
                },
            }
        }
    }

    fn command_result(&mut self, _player: PlayerId, result: &civ_sim::Result<Vec<GameEvent>>) {
        match result {
            Ok(events) => {
                for event in events {
                    println!("  {}", serde_json::to_string(event).unwrap_or_default());
                }
            }
            Err(err) => println!("  error: {err}"),
        }
    }
}

const HELP: &str = "commands: map | status | move <unit> <x> <y> | found <name> | \
build <city> <unit-or-building> | research <tech> | relation <player> <war|peace|trade> | end | quit";

fn number(s: &str) -> Result<u64, String> {
    s.parse().map_err(|_| format!("not a number: {s}"))
}

fn parse_command(words: &[&str]) -> Result<Command, String> {
    match words {
        ["move", unit, x, y] => Ok(Command::MoveUnit {
            unit_id: number(unit)?,
            x: number(x)? as usize,
            y: number(y)? as usize,
        }),
        ["found", name @ ..] if !name.is_empty() => Ok(Command::FoundCity { name: name.join(" ") }),
        ["build", city, item] => {
            let item = item
                .parse::<UnitKind>()
                .map(ProductionKind::Unit)
                .or_else(|_| item.parse::<BuildingKind>().map(ProductionKind::Building))
                .map_err(|_| format!("unknown unit or building: {item}"))?;
            Ok(Command::EnqueueProduction {
                city_id: number(city)?,
                item,
            })
        }
        ["research", tech] => Ok(Command::SetResearch { tech: tech.parse()? }),
        ["relation", target, action] => Ok(Command::SetRelation {
            target: number(target)? as usize,
            action: action.parse()?,
        }),
        ["end"] => Ok(Command::EndTurn),
        _ => Err(HELP.to_string()),
    }
}

fn print_map(world: &World) {
    for y in 0..world.map.height() {
        let row: String = (0..world.map.width())
            .map(|x| match world.map.tile(x, y) {
                Some(tile) if tile.city.is_some() => '#',
                Some(tile) if tile.unit.is_some() => '@',
                Some(tile) => tile.terrain.symbol(),
                None => ' ',
            })
            .collect();
        println!("{row}");
    }
}

fn print_status(world: &World, player: PlayerId) {
    let p = &world.players[player];
    let researching = p.researching.map_or("nothing".to_string(), |t| t.to_string());
    println!(
        "{}: gold {} happiness {} score {} researching {}",
        p.name, p.gold, p.happiness, p.score, researching
    );
    for city in p.cities.values() {
        let queue: Vec<String> = city
            .queue
            .iter()
            .map(|item| format!("{} {}/{}", item.kind, item.progress, item.total_cost))
            .collect();
        println!(
            "  city {} {} at ({}, {}) pop {} food {} queue [{}]",
            city.id,
            city.name,
            city.x,
            city.y,
            city.population,
            city.food,
            queue.join(", ")
        );
    }
    for unit in p.units.values() {
        println!(
            "  unit {} {} at ({}, {}) moves {}",
            unit.id, unit.kind, unit.x, unit.y, unit.movement
        );
    }
}
