/*
cli_options.rs

Copyright 2025 Hervé Quatremain

This file is part of Recallgrid.

Recallgrid is free software: you can redistribute it and/or modify it under the
terms of the GNU General Public License as published by the Free Software
Foundation, either version 3 of the License, or (at your option) any later
version.

Recallgrid is distributed in the hope that it will be useful, but WITHOUT ANY
WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR
A PARTICULAR PURPOSE. See the GNU General Public License for more details.

You should have received a copy of the GNU General Public License along with
Recallgrid. If not, see <https://www.gnu.org/licenses/>.

SPDX-License-Identifier: GPL-3.0-or-later
*/

//! Process command-line options.
//!
//! In command-line mode, Recallgrid can simulate a game to inspect the generated patterns, and
//! list the scores saved in the score file.
//!
//! # Examples
//!
//! Simulate five rounds with a fixed seed, answering every third round wrongly:
//!
//! ```text
//! $ recallgrid -c 5 -m 3 --seed 42 --summary
//! ```
//!
//! Each round prints the board size and the cells of the pattern, followed by the result of the
//! answer and the new score.
//!
//! List the saved scores:
//!
//! ```text
//! $ recallgrid --ls --score-file ~/.local/share/recallgrid/score.txt
//! ```

use clap::{CommandFactory, Parser};
use log::debug;
use std::env;
use std::path::PathBuf;

use recallgrid::config::{COPYRIGHT_NOTICE, EngineConfig};
use recallgrid::engine::{EndOutcome, GameEngine};
use recallgrid::error::{GameError, Result};
use recallgrid::generator::cell::{Cell, Coord};
use recallgrid::level::GameLevel;
use recallgrid::saver::scores::{ScoreStore, TextScoreStore};
use recallgrid::score::{ScoreRecord, best_record};

/// Simulate Recallgrid games and list the saved scores.
#[derive(Parser)]
#[command(about, long_about = None, version, long_version = COPYRIGHT_NOTICE)]
struct Args {
    /// List the saved scores
    #[arg(short, long, default_value_t = false)]
    ls: bool,

    /// Print the scores in JSON
    #[arg(long, default_value_t = false, requires = "ls")]
    json: bool,

    /// Number of rounds to simulate
    #[arg(short, long, group = "simulate")]
    count: Option<u32>,

    /// Answer wrongly every given number of rounds
    #[arg(short, long, requires = "simulate", value_parser = clap::value_parser!(u32).range(1..))]
    miss_every: Option<u32>,

    /// Rule set for the game
    #[arg(value_enum, short = 'f', long, requires = "simulate")]
    level: Option<GameLevel>,

    /// Initial board size
    #[arg(short, long, requires = "simulate")]
    board_size: Option<Coord>,

    /// Seed for the random generator
    #[arg(long, requires = "simulate")]
    seed: Option<u64>,

    /// JSON file with the engine parameters
    #[arg(long, requires = "simulate")]
    config: Option<PathBuf>,

    /// Path to the score file
    #[arg(long)]
    score_file: Option<PathBuf>,

    /// Save the score of the simulated game
    #[arg(long, default_value_t = false, requires = "simulate")]
    save: bool,

    /// Print some statistics after the simulation
    #[arg(short, long, default_value_t = false, requires = "simulate")]
    summary: bool,

    /// Enable debug messages
    #[arg(short, long, default_value_t = false)]
    debug: bool,
}

/// Parse and process command-line options. Return the exit code.
pub fn parse() -> u8 {
    let args: Args = Args::parse();

    if args.debug {
        unsafe {
            env::set_var("RUST_LOG", "debug");
        }
    }
    env_logger::init();

    let ret: Result<()> = if args.ls {
        list_scores(&args)
    } else if let Some(count) = args.count {
        simulate(&args, count)
    } else {
        let _ = Args::command().print_help();
        return 2;
    };

    match ret {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("Error: {e}");
            1
        }
    }
}

/// Return the score store for the file given on the command line, or for the default file in
/// the current directory.
fn score_store(args: &Args) -> TextScoreStore {
    match &args.score_file {
        Some(path) => TextScoreStore::with_file(path.clone()),
        None => TextScoreStore::new(PathBuf::from(".")),
    }
}

/// Print the saved scores followed by the best one.
fn list_scores(args: &Args) -> Result<()> {
    let store: TextScoreStore = score_store(args);
    let records: Vec<ScoreRecord> = store.read_all()?;

    if args.json {
        let json: String =
            serde_json::to_string_pretty(&records).map_err(|e| GameError::Io(e.into()))?;
        println!("{json}");
        return Ok(());
    }

    for record in &records {
        println!("{record}");
    }
    match best_record(&records) {
        Some(best) => println!(
            "Best score: {} on {} ({} records)",
            best.score,
            best.when,
            records.len()
        ),
        None => println!("No score saved in {}", store.path().display()),
    }
    Ok(())
}

/// Build the engine parameters from the configuration file and the command-line options.
fn engine_config(args: &Args) -> Result<EngineConfig> {
    let mut config: EngineConfig = match &args.config {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };
    if let Some(level) = args.level {
        config.level = level;
    }
    if args.board_size.is_some() {
        config.board_size = args.board_size;
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    Ok(config)
}

/// Play the given number of rounds and print the patterns.
fn simulate(args: &Args, count: u32) -> Result<()> {
    let mut engine: GameEngine = GameEngine::new(engine_config(args)?)?;
    if args.save {
        engine.set_score_store(Box::new(score_store(args)));
    }
    engine.set_win_streak_listener(|streak| println!("  win streak of {streak}!"));

    let mut total: f32 = 0.0;
    let mut max: f32 = 0.0;
    let mut local: usize = 0;
    let mut pattern_wide: usize = 0;
    let mut nearest: usize = 0;
    let mut played: u32 = 0;

    for i in 1..=count {
        debug!("Iteration {i}");
        let round: u32 = engine.round();
        match engine.next_round() {
            Ok(()) => (),
            Err(GameError::BoardExhausted) => {
                println!("No free cell left on the board at round {round}");
                break;
            }
            Err(e) => return Err(e),
        }

        let cells: Vec<Cell> = engine.pattern().cells().to_vec();
        let text: Vec<String> = cells.iter().map(|c| c.to_string()).collect();
        println!("Round {round} (board {}): {}", engine.board_size(), text.join(" "));

        total += engine.last_duration();
        max = max.max(engine.last_duration());
        local += engine.last_steps().local;
        pattern_wide += engine.last_steps().pattern_wide;
        nearest += engine.last_steps().nearest;
        played += 1;

        // A cell outside the board makes the answer wrong
        let mut answer: Vec<Cell> = cells;
        if args.miss_every.is_some_and(|k| i % k == 0) {
            let size: Coord = engine.board_size();
            answer.push(Cell::new(size, size));
        }
        let correct: bool = engine.verify_selection(&answer)?;
        println!(
            "  {:<8} score = {}",
            if correct { "correct" } else { "wrong" },
            engine.score()
        );
    }

    if args.summary {
        println!(
            "
            rounds = {}
             score = {}
        win streak = {}
        milestones = {}
        board size = {}
        difficulty = {}
       local steps = {}
pattern-wide steps = {}
     nearest jumps = {}
        total time = {}s
      average time = {}s
          max time = {}s",
            played,
            engine.score(),
            engine.current_win_streak(),
            engine.total_win_streaks(),
            engine.board_size(),
            engine.difficulty(),
            local,
            pattern_wide,
            nearest,
            total,
            total / played.max(1) as f32,
            max
        );
    }

    if args.save
        && let EndOutcome::Ended(record) = engine.end_game()
    {
        println!("\nGame saved:\n{record}");
    }
    Ok(())
}
