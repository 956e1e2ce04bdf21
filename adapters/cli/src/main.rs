#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that plays Maze Escape in the terminal.

mod config;
mod input;
mod logging;
mod render;
mod scores;
mod share_code;

use std::{
    io::{self, BufRead, Write},
    path::{Path, PathBuf},
};

use anyhow::{bail, Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use maze_escape_core::{Difficulty, Outcome, RoundState};
use maze_escape_session::Session;
use maze_escape_system_generation::Generation;
use maze_escape_world::query;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::info;

use crate::{config::RoundArgs, input::Input};

#[derive(Parser)]
#[command(
    name = "maze-escape",
    version,
    about = "Escape the maze before the adversaries catch you"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Play rounds interactively, reading keys from stdin.
    Play {
        #[command(flatten)]
        round: RoundArgs,
        /// Play the board encoded in a share code instead of generating one.
        #[arg(long, value_name = "CODE")]
        layout: Option<String>,
        /// Name recorded with winning scores.
        #[arg(long, default_value = "")]
        name: String,
        /// Scoreboard file.
        #[arg(long, value_name = "PATH")]
        scores: Option<PathBuf>,
    },
    /// Print the ranked scores.
    Scores {
        /// Only print this tier.
        #[arg(short, long)]
        difficulty: Option<Difficulty>,
        /// Scoreboard file.
        #[arg(long, value_name = "PATH")]
        scores: Option<PathBuf>,
    },
    /// Generate a board and print its share code.
    Share {
        #[command(flatten)]
        round: RoundArgs,
    },
}

/// Entry point for the Maze Escape command-line interface.
fn main() {
    logging::init();
    if let Err(err) = run() {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Command::Play {
            round,
            layout,
            name,
            scores,
        } => cmd_play(&round, layout.as_deref(), &name, &scores_path(scores)),
        Command::Scores { difficulty, scores } => cmd_scores(difficulty, &scores_path(scores)),
        Command::Share { round } => cmd_share(&round),
    }
}

fn scores_path(path: Option<PathBuf>) -> PathBuf {
    path.unwrap_or_else(|| PathBuf::from(scores::DEFAULT_SCORES_PATH))
}

fn seeded_rng(round: &RoundArgs) -> ChaCha8Rng {
    let seed = round.seed.unwrap_or_else(rand::random);
    info!(seed, "random stream seeded");
    ChaCha8Rng::seed_from_u64(seed)
}

fn cmd_play(round: &RoundArgs, layout: Option<&str>, name: &str, scores_path: &Path) -> Result<()> {
    let rng = seeded_rng(round);
    let mut session = match layout {
        Some(code) => {
            let layout = share_code::decode(code).context("import share code")?;
            let difficulty = round
                .difficulty
                .as_deref()
                .map(str::parse::<Difficulty>)
                .transpose()?
                .unwrap_or_default();
            let level = round.level.unwrap_or(1);
            if level == 0 {
                bail!("level must be at least 1");
            }
            Session::from_layout(layout, difficulty, level, rng)
        }
        None => Session::new(round.round_config()?, rng)?,
    };
    let mut scoreboard = scores::load(scores_path)?;

    let mut out = io::stdout().lock();
    writeln!(out, "{}", query::welcome_banner(session.world()))?;
    draw(&mut out, &session, render::outcome_message(Outcome::Moved))?;

    for line in io::stdin().lock().lines() {
        let line = line.context("read input")?;
        for input in line.chars().filter_map(Input::from_key) {
            let message = match input {
                Input::Quit => return Ok(()),
                Input::Move(direction) => {
                    let report = session.submit_move(direction);
                    let rank = scoreboard.handle(&report.events, name, Utc::now());
                    match report.outcome {
                        Some(Outcome::Victory) => {
                            scores::save(scores_path, &scoreboard)?;
                            match rank {
                                Some(rank) => format!(
                                    "{} Score saved at rank {}.",
                                    render::outcome_message(Outcome::Victory),
                                    rank + 1
                                ),
                                None => render::outcome_message(Outcome::Victory).to_owned(),
                            }
                        }
                        Some(outcome) => render::outcome_message(outcome).to_owned(),
                        None => "The round is over. Press n or r.".to_owned(),
                    }
                }
                Input::NextLevel if session.round_state() != RoundState::Won => {
                    "Reach the exit before moving on.".to_owned()
                }
                Input::NextLevel => match session.next_level() {
                    Ok(_) => format!("Level {}. Navigate to the exit!", session.level()),
                    Err(error) => format!("Cannot start the next level: {error}"),
                },
                Input::Restart => match session.restart() {
                    Ok(_) => render::outcome_message(Outcome::Moved).to_owned(),
                    Err(error) => format!("Cannot restart: {error}"),
                },
            };
            draw(&mut out, &session, &message)?;
        }
    }

    Ok(())
}

fn draw<R>(out: &mut impl Write, session: &Session<R>, message: &str) -> Result<()> {
    writeln!(
        out,
        "{}",
        render::status(session.difficulty(), session.level(), session.move_count())
    )?;
    writeln!(out, "{}", render::board(session.board()))?;
    writeln!(out, "{message}")?;
    writeln!(out, "{}", input::KEY_HELP)?;
    out.flush().context("flush stdout")?;
    Ok(())
}

fn cmd_scores(difficulty: Option<Difficulty>, scores_path: &Path) -> Result<()> {
    let scoreboard = scores::load(scores_path)?;
    let tiers = match difficulty {
        Some(difficulty) => vec![difficulty],
        None => Difficulty::ALL.to_vec(),
    };
    let mut out = io::stdout().lock();
    for tier in tiers {
        writeln!(out, "{}", render::scores(&scoreboard, tier))?;
    }
    Ok(())
}

fn cmd_share(round: &RoundArgs) -> Result<()> {
    let config = round.round_config()?;
    let mut rng = seeded_rng(round);
    let layout = Generation::new().generate(&config, &mut rng)?;
    println!("{}", share_code::encode(&layout));
    Ok(())
}
