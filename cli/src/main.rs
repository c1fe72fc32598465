use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use clap_verbosity_flag::Verbosity;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use sapper_core::{CellCount, Coord, Difficulty, GameConfig};

use command::{Command, HELP};
use session::{Flow, Session};

mod command;
mod session;

#[derive(Copy, Clone, Debug, Default, ValueEnum)]
enum Preset {
    #[default]
    Beginner,
    Intermediate,
    Expert,
}

impl From<Preset> for Difficulty {
    fn from(preset: Preset) -> Self {
        match preset {
            Preset::Beginner => Difficulty::Beginner,
            Preset::Intermediate => Difficulty::Intermediate,
            Preset::Expert => Difficulty::Expert,
        }
    }
}

/// Clear the board without touching a mine.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Board preset, individual dimensions below override it
    #[arg(short, long, value_enum, default_value_t)]
    difficulty: Preset,

    #[arg(long)]
    rows: Option<Coord>,

    #[arg(long)]
    cols: Option<Coord>,

    #[arg(short, long)]
    mines: Option<CellCount>,

    /// Seed for mine placement, random when omitted
    #[arg(short, long)]
    seed: Option<u64>,

    #[command(flatten)]
    verbosity: Verbosity,
}

impl Args {
    fn game_config(&self) -> Result<GameConfig> {
        let preset = Difficulty::from(self.difficulty).config();
        let rows = self.rows.unwrap_or(preset.rows());
        let cols = self.cols.unwrap_or(preset.cols());
        let mines = self.mines.unwrap_or(preset.mines);
        GameConfig::new((rows, cols), mines).with_context(|| {
            format!("cannot play {rows}x{cols} with {mines} mines, need at least one free cell")
        })
    }

    fn rng(&self) -> SmallRng {
        match self.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_rng(&mut rand::rng()),
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(args.verbosity.tracing_level_filter())
        .with_writer(io::stderr)
        .init();

    let config = args.game_config()?;
    log::info!("Starting {:?} with seed {:?}", config, args.seed);
    let mut session = Session::new(config, args.rng())?;

    println!("{HELP}");
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("{}{}\n> ", session.board(), session.status_line());
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            break;
        };
        let command = match Command::parse(&line.context("cannot read input")?) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(err) => {
                eprintln!("error: {err:#}");
                continue;
            }
        };

        match session.apply(command) {
            Ok(Flow::Continue) => {}
            Ok(Flow::Print(text)) => println!("{text}"),
            Ok(Flow::Quit) => break,
            Err(err) => eprintln!("error: {err:#}"),
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn args_are_well_formed() {
        use clap::CommandFactory;
        Args::command().debug_assert();
    }

    #[test]
    fn dimensions_override_preset() {
        let args = Args::parse_from(["sapper", "-d", "expert", "--rows", "5", "--mines", "7"]);
        let config = args.game_config().unwrap();

        assert_eq!(config, GameConfig::new((5, 30), 7).unwrap());
    }

    #[test]
    fn overfull_board_is_rejected() {
        let args = Args::parse_from(["sapper", "--rows", "2", "--cols", "2", "--mines", "4"]);

        assert!(args.game_config().is_err());
    }

    #[test]
    fn seed_makes_boards_repeatable() {
        let args = Args::parse_from(["sapper", "--seed", "12"]);
        let config = args.game_config().unwrap();

        let first = Session::new(config, args.rng()).unwrap();
        let second = Session::new(config, args.rng()).unwrap();
        assert_eq!(first.board(), second.board());
    }
}
