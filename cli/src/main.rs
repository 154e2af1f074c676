use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use clap::{Args, Parser, Subcommand};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use serde::Serialize;
use sweeper_core::*;

mod settings;

/// Headless runner for the sweeper engine: plays scripted reveals and prints the results.
#[derive(Parser, Debug)]
#[command(name = "sweeper", version, about)]
struct Cli {
    #[command(flatten)]
    verbose: Verbosity<WarnLevel>,

    /// TOML settings file
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create a session, apply the given reveals and print the board
    Play(PlayArgs),
    /// Print the leaderboard ranking
    Leaderboard {
        #[arg(long)]
        json: bool,
    },
    /// List the difficulty presets
    Presets,
}

#[derive(Args, Debug)]
struct PlayArgs {
    /// Preset board: easy, medium or hard
    #[arg(short, long, conflicts_with = "rows")]
    difficulty: Option<Difficulty>,

    #[arg(long, requires = "cols")]
    rows: Option<Coord>,

    #[arg(long, requires = "mines")]
    cols: Option<Coord>,

    #[arg(long, requires = "rows")]
    mines: Option<CellCount>,

    /// Mine placement seed, random when omitted
    #[arg(long)]
    seed: Option<u64>,

    /// Name recorded on the leaderboard when the game ends
    #[arg(long)]
    name: Option<String>,

    /// Cell to reveal, repeatable; applied in order
    #[arg(
        short,
        long = "reveal",
        value_name = "ROW,COL",
        value_parser = parse_coords,
        allow_hyphen_values = true
    )]
    reveals: Vec<Coord2>,

    #[arg(long)]
    json: bool,
}

fn parse_coords(s: &str) -> Result<Coord2> {
    let (row, col) = s
        .split_once(',')
        .ok_or_else(|| anyhow!("expected ROW,COL, got {s:?}"))?;
    let row = row.trim().parse().context("invalid row")?;
    let col = col.trim().parse().context("invalid col")?;
    Ok((row, col))
}

#[derive(Serialize, Debug)]
struct Step {
    coords: Coord2,
    outcome: RevealOutcome,
}

#[derive(Serialize, Debug)]
struct PlayReport {
    config: BoardConfig,
    steps: Vec<Step>,
    board: BoardView,
    leaderboard: Vec<LeaderboardEntry>,
}

fn play(mut settings: Settings, args: PlayArgs) -> Result<PlayReport> {
    if let Some(difficulty) = args.difficulty {
        settings.difficulty = difficulty;
        settings.custom = None;
    }
    if let (Some(rows), Some(cols), Some(mines)) = (args.rows, args.cols, args.mines) {
        settings.custom = Some(BoardConfig::new_unchecked(rows, cols, mines));
    }
    if let Some(name) = args.name {
        settings.player_name = name;
    }

    let config = settings
        .board_config()
        .with_context(|| format!("cannot play on {:?}", settings.custom))?;
    let mut manager = SessionManager::from_settings(&settings).context("invalid settings")?;
    let handle = manager.create_session(config, args.seed)?;

    let mut steps = Vec::with_capacity(args.reveals.len());
    for coords in args.reveals {
        match manager.reveal(handle, coords) {
            Ok(outcome) => steps.push(Step { coords, outcome }),
            Err(GameError::OutOfBounds) => {
                log::warn!("({}, {}) is outside the board, skipped", coords.0, coords.1);
            }
            Err(err) => return Err(err.into()),
        }
    }

    let board = manager.session(handle)?.view();
    Ok(PlayReport {
        config,
        steps,
        board,
        leaderboard: manager.leaderboard_ranked().cloned().collect(),
    })
}

fn print_play(report: &PlayReport) {
    let BoardConfig { rows, cols, mines } = report.config;
    println!("Board {rows}x{cols}, {mines} mines");
    print!("{}", report.board);
    println!(
        "Status: {:?}  Score: {}/{}",
        report.board.status,
        report.board.score,
        report.config.safe_cells()
    );
    if report.board.status.is_terminal() {
        println!();
        println!("Leaderboard:");
        for (rank, entry) in report.leaderboard.iter().enumerate() {
            println!("{}. {}: {}", rank + 1, entry.name, entry.score);
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    env_logger::Builder::new()
        .filter_level(cli.verbose.log_level_filter())
        .init();

    let settings = settings::load(cli.config.as_deref())?;

    match cli.command {
        Command::Play(args) => {
            let json = args.json;
            let report = play(settings, args)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_play(&report);
            }
        }
        Command::Leaderboard { json } => {
            let leaderboard = settings.leaderboard();
            if json {
                let ranked: Vec<_> = leaderboard.ranked().collect();
                println!("{}", serde_json::to_string_pretty(&ranked)?);
            } else {
                println!("Leaderboard:");
                print!("{}", leaderboard.render());
            }
        }
        Command::Presets => {
            for difficulty in Difficulty::ALL {
                let BoardConfig { rows, cols, mines } = difficulty.config();
                println!("{difficulty}: {rows}x{cols}, {mines} mines");
            }
        }
    }

    Ok(())
}
