//! Call Break simulator: plays seeded matches between random bots through the
//! room service and writes one JSONL record per match.

mod bots;
mod config;
mod output;
mod simulator;

use std::time::{Duration, Instant};

use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use config::{Args, SimConfig};
use output::OutputWriter;
use simulator::{MatchResult, Simulator};

fn init_tracing(args: &Args) {
    let default = if args.verbose {
        "debug"
    } else if args.show_output {
        "info"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if args.json_logs {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    init_tracing(&args);
    let config = SimConfig::try_from(&args)?;
    info!(games = config.games, rounds = config.rounds, "starting simulation");

    let simulator = Simulator::new(config.rounds);
    let mut output = OutputWriter::new(&config.output_dir, config.compress)?;

    let start = Instant::now();
    let mut results = Vec::new();
    let mut errors = 0u32;
    for match_no in 1..=config.games {
        let seed = config.match_seed(match_no);
        match simulator.simulate_match(match_no, seed) {
            Ok(result) => {
                if let Err(e) = output.write_match(&result) {
                    warn!(match_no, error = %e, "failed to write match result");
                }
                results.push(result);
            }
            Err(e) => {
                errors += 1;
                warn!(match_no, seed, error = %e, "match failed");
            }
        }
    }
    let path = output.finish()?;

    if args.show_output {
        info!(path = %path.display(), "results written");
        print_summary(&results, errors, start.elapsed(), config.games);
    }
    Ok(())
}

fn print_summary(results: &[MatchResult], errors: u32, elapsed: Duration, total: u32) {
    println!("\n=== Simulation Summary ===");
    println!("Matches completed: {}/{}", results.len(), total);
    if errors > 0 {
        println!("Errors: {errors}");
    }
    println!("Total time: {elapsed:?}");
    if results.is_empty() {
        return;
    }
    let resets: u32 = results.iter().map(|r| r.bid_resets).sum();
    println!("Bid resets: {resets}");

    let mut wins = [0u32; 4];
    let mut totals = [0i64; 4];
    let mut max_scores = [i32::MIN; 4];
    let mut min_scores = [i32::MAX; 4];
    for result in results {
        let best = result.final_scores.iter().max().copied().unwrap_or(0);
        for (seat, &score) in result.final_scores.iter().enumerate() {
            totals[seat] += score as i64;
            max_scores[seat] = max_scores[seat].max(score);
            min_scores[seat] = min_scores[seat].min(score);
            if score == best {
                wins[seat] += 1;
            }
        }
    }

    println!("\n=== Results by Seat ===");
    let n = results.len() as f64;
    for seat in 0..4 {
        println!(
            "Seat {}: avg={:.1}, min={}, max={}, wins={} ({:.1}%)",
            seat,
            totals[seat] as f64 / n,
            min_scores[seat],
            max_scores[seat],
            wins[seat],
            wins[seat] as f64 / n * 100.0
        );
    }
}
