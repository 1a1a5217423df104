//! Headless autoplay.
//!
//! Plays random legal moves through the same `on_direction()` / `tick()`
//! cycle the terminal game uses, until no direction moves any tile.
//!
//! Usage:
//!   cargo run --bin twenty48-sim -- [OPTIONS]
//!
//! Options:
//!   --games N       Games to play with incrementing seeds (default: 10)
//!   --seed N        RNG seed of the first game (default: 42)
//!   --size N        Board side length (default: 4)
//!   --max-moves N   Stop a game after N moves (default: 100000)
//!   --quiet         Only the final summary line

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::BTreeMap;
use tracing::{debug, warn};
use twenty48::core::{Board, BoardError, Direction};
use twenty48::logging::init_stderr_logging;
use twenty48::DEFAULT_BOARD_SIZE;

// ── CLI Configuration ────────────────────────────────────────────────

struct SimConfig {
    games: u32,
    seed: u64,
    size: usize,
    max_moves: u64,
    quiet: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            games: 10,
            seed: 42,
            size: DEFAULT_BOARD_SIZE,
            max_moves: 100_000,
            quiet: false,
        }
    }
}

fn parse_value<T: std::str::FromStr>(flag: &str, value: Option<&String>) -> Result<T, String> {
    let value = value.ok_or_else(|| format!("{flag} requires a value"))?;
    value
        .parse()
        .map_err(|_| format!("{flag} expects a number, got '{value}'"))
}

fn parse_args() -> Result<Option<SimConfig>, String> {
    let args: Vec<String> = std::env::args().collect();
    let mut config = SimConfig::default();
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--games" => {
                i += 1;
                config.games = parse_value("--games", args.get(i))?;
            }
            "--seed" => {
                i += 1;
                config.seed = parse_value("--seed", args.get(i))?;
            }
            "--size" => {
                i += 1;
                config.size = parse_value("--size", args.get(i))?;
            }
            "--max-moves" => {
                i += 1;
                config.max_moves = parse_value("--max-moves", args.get(i))?;
            }
            "--quiet" => config.quiet = true,
            "--help" | "-h" => return Ok(None),
            other => return Err(format!("Unknown argument: {other}")),
        }
        i += 1;
    }
    Ok(Some(config))
}

fn print_usage() {
    eprintln!(
        "twenty48 headless autoplay\n\
         \n\
         Usage: twenty48-sim [OPTIONS]\n\
         \n\
         Options:\n\
         \x20 --games N       Games to play with incrementing seeds (default: 10)\n\
         \x20 --seed N        RNG seed of the first game (default: 42)\n\
         \x20 --size N        Board side length (default: 4)\n\
         \x20 --max-moves N   Stop a game after N moves (default: 100000)\n\
         \x20 --quiet         Only the final summary line\n\
         \x20 --help, -h      Show this help"
    );
}

// ── Game loop ────────────────────────────────────────────────────────

struct GameSummary {
    seed: u64,
    moves: u64,
    ticks: u64,
    max_value: u32,
    /// False when the move cap ended the game before the board locked up.
    stuck: bool,
}

fn play_game(seed: u64, size: usize, max_moves: u64) -> Result<GameSummary, BoardError> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut board = Board::new(size, &mut rng)?;

    let stuck = loop {
        if board.moves() >= max_moves {
            break false;
        }
        let options: Vec<Direction> = Direction::ALL
            .into_iter()
            .filter(|&direction| board.can_move(direction))
            .collect();
        if options.is_empty() {
            break true;
        }

        let direction = options[rng.gen_range(0..options.len())];
        board.on_direction(direction);
        while board.is_resolving() {
            let result = board.tick(&mut rng)?;
            for event in result.events {
                debug!(seed, ?event, "tick");
            }
        }
    };

    Ok(GameSummary {
        seed,
        moves: board.moves(),
        ticks: board.ticks(),
        max_value: board.max_value(),
        stuck,
    })
}

fn main() {
    let config = match parse_args() {
        Ok(Some(config)) => config,
        Ok(None) => {
            print_usage();
            return;
        }
        Err(message) => {
            eprintln!("{message}");
            print_usage();
            std::process::exit(1);
        }
    };
    if let Err(e) = init_stderr_logging("twenty48=warn") {
        eprintln!("Warning: logging disabled: {e}");
    }

    let mut summaries = Vec::new();
    for game in 0..config.games {
        let seed = config.seed + u64::from(game);
        match play_game(seed, config.size, config.max_moves) {
            Ok(summary) => {
                if !config.quiet {
                    println!(
                        "seed={:<6} moves={:<6} ticks={:<8} largest={:<6}{}",
                        summary.seed,
                        summary.moves,
                        summary.ticks,
                        summary.max_value,
                        if summary.stuck { "" } else { " (move cap)" }
                    );
                }
                summaries.push(summary);
            }
            Err(e) => {
                warn!(seed, error = %e, "game aborted");
                eprintln!("seed={seed}: {e}");
                std::process::exit(1);
            }
        }
    }

    if summaries.is_empty() {
        return;
    }
    let total_moves: u64 = summaries.iter().map(|s| s.moves).sum();
    let mut largest: BTreeMap<u32, u32> = BTreeMap::new();
    for summary in &summaries {
        *largest.entry(summary.max_value).or_default() += 1;
    }
    let distribution: Vec<String> = largest
        .iter()
        .rev()
        .map(|(value, count)| format!("{value}:{count}"))
        .collect();
    println!(
        "games={} avg_moves={:.1} largest_tiles=[{}]",
        summaries.len(),
        total_moves as f64 / summaries.len() as f64,
        distribution.join(" ")
    );
}
