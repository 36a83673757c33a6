//! Command-line arguments and the validated run configuration.

use std::path::PathBuf;

use clap::Parser;
use thiserror::Error;

#[derive(Parser, Debug)]
#[command(name = "callbreak-sim")]
#[command(about = "Plays Call Break matches between random bots, in memory")]
pub struct Args {
    /// Number of matches to play
    #[arg(short, long, env = "CALLBREAK_SIM_GAMES", default_value_t = 1)]
    pub games: u32,

    /// Rounds per match
    #[arg(short, long, env = "CALLBREAK_SIM_ROUNDS", default_value_t = 5)]
    pub rounds: u32,

    /// Base seed; match N uses seed + N. Random when omitted.
    #[arg(long, env = "CALLBREAK_SIM_SEED")]
    pub seed: Option<u64>,

    /// Output directory for results
    #[arg(long, env = "CALLBREAK_SIM_OUTPUT_DIR", default_value = "./simulation-results")]
    pub output_dir: PathBuf,

    /// Gzip the JSONL output
    #[arg(long)]
    pub compress: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Log as JSON lines
    #[arg(long)]
    pub json_logs: bool,

    /// Print the per-seat summary when done
    #[arg(long)]
    pub show_output: bool,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("--games must be at least 1")]
    NoGames,
    #[error("--rounds must be between 1 and {max}, got {got}")]
    RoundsOutOfRange { got: u32, max: u32 },
}

const MAX_ROUNDS: u32 = 100;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimConfig {
    pub games: u32,
    pub rounds: u32,
    pub seed: Option<u64>,
    pub output_dir: PathBuf,
    pub compress: bool,
}

impl SimConfig {
    /// Seed for the `match_no`-th match (1-based).
    pub fn match_seed(&self, match_no: u32) -> u64 {
        match self.seed {
            Some(base) => base.wrapping_add(match_no as u64),
            None => rand::random(),
        }
    }
}

impl TryFrom<&Args> for SimConfig {
    type Error = ConfigError;

    fn try_from(args: &Args) -> Result<Self, Self::Error> {
        if args.games == 0 {
            return Err(ConfigError::NoGames);
        }
        if args.rounds == 0 || args.rounds > MAX_ROUNDS {
            return Err(ConfigError::RoundsOutOfRange {
                got: args.rounds,
                max: MAX_ROUNDS,
            });
        }
        Ok(Self {
            games: args.games,
            rounds: args.rounds,
            seed: args.seed,
            output_dir: args.output_dir.clone(),
            compress: args.compress,
        })
    }
}
