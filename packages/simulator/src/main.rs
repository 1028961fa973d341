//! Scapegoat simulator CLI - plays whole games in memory with AI bots.

mod simulator;

use std::time::{Duration, Instant};

use clap::Parser;
use rand::Rng;
use scapegoat_backend::domain::rules::PLAYER_COUNT_RANGE;
use scapegoat_backend::telemetry;
use simulator::{GameResult, Outcome, Simulator};
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "scapegoat-sim")]
#[command(about = "Fast in-memory Scapegoat simulator with AI bots")]
struct Args {
    /// Number of games to simulate
    #[arg(short, long, default_value = "1")]
    games: u32,

    /// Players per game (3-6)
    #[arg(short, long, default_value = "4")]
    players: usize,

    /// Bot type for every seat
    #[arg(short, long, default_value = "random")]
    bot: String,

    /// Base seed; game N uses seed + N
    #[arg(long)]
    seed: Option<u64>,

    /// Print one JSON object per game on stdout
    #[arg(long)]
    jsonl: bool,

    /// Log per-game progress; RUST_LOG=debug adds every action
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    if args.verbose {
        telemetry::init_tracing(false);
    } else {
        tracing_subscriber::fmt()
            .with_env_filter("warn")
            .with_writer(std::io::stderr)
            .init();
    }

    if !PLAYER_COUNT_RANGE.contains(&args.players) {
        return Err(format!(
            "--players must be between {} and {}",
            PLAYER_COUNT_RANGE.start(),
            PLAYER_COUNT_RANGE.end()
        )
        .into());
    }

    let base_seed = args.seed.unwrap_or_else(|| rand::rng().random());
    info!(
        games = args.games,
        players = args.players,
        bot = %args.bot,
        base_seed,
        "Starting simulation"
    );

    let start = Instant::now();
    let mut results = Vec::new();
    let mut errors = 0u32;

    for game_num in 1..=args.games {
        let seed = base_seed.wrapping_add(u64::from(game_num));
        match Simulator::new(game_num, seed, args.players, args.bot.as_str()).simulate() {
            Ok(result) => {
                if args.jsonl {
                    println!("{}", serde_json::to_string(&result)?);
                }
                info!(game = game_num, outcome = ?result.outcome, "Game completed");
                results.push(result);
            }
            Err(e) => {
                errors += 1;
                warn!("Game {} failed: {}", game_num, e);
            }
        }
    }

    print_summary(&results, errors, start.elapsed(), args.games);
    Ok(())
}

fn print_summary(results: &[GameResult], errors: u32, elapsed: Duration, total: u32) {
    // Keep stdout clean for --jsonl consumers.
    eprintln!("\n=== Simulation Summary ===");
    eprintln!("Games completed: {}/{}", results.len(), total);
    if errors > 0 {
        eprintln!("Errors: {}", errors);
    }
    eprintln!("Total time: {:?}", elapsed);

    if results.is_empty() {
        return;
    }

    let count = |outcome: Outcome| results.iter().filter(|r| r.outcome == outcome).count();
    let frame_failures: u32 = results.iter().map(|r| r.frame_failures).sum();
    let actions: u64 = results.iter().map(|r| u64::from(r.accepted_actions)).sum();

    eprintln!("Cops endings: {}", count(Outcome::CopsCalled));
    eprintln!("Successful frames: {}", count(Outcome::FrameSuccess));
    eprintln!("Failed frames: {}", frame_failures);
    eprintln!(
        "Average accepted actions: {:.1}",
        actions as f64 / results.len() as f64
    );
    eprintln!("Step-cap aborts: {}", count(Outcome::StepCap));
}
