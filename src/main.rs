use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDateTime};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bracket_gen::config::ScheduleConfig;
use bracket_gen::models::Player;
use bracket_gen::parse_minutes;
use bracket_gen::schedule::Scheduler;
use bracket_gen::storage::{load_roster, write_brackets};

#[derive(Parser)]
#[command(name = "bracket-gen")]
#[command(about = "Matchup-aware tournament bracket generator with betting odds")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "./bracket-gen.toml")]
    config: PathBuf,

    /// Maximum number of players per match
    #[arg(long)]
    players_per_match: Option<usize>,

    /// Number of rounds each player will play
    #[arg(long)]
    rounds: Option<u32>,

    /// Estimated match length (e.g. "15m", "1h")
    #[arg(long)]
    match_length: Option<String>,

    /// Estimated break between rounds (e.g. "5m")
    #[arg(long)]
    break_length: Option<String>,

    /// Start date and time of the first match (YYYY-MM-DD HH:MM)
    #[arg(long)]
    start: Option<String>,

    /// Player names; defaults to the roster file when omitted
    #[arg(long, num_args = 1..)]
    players: Vec<String>,

    /// Path to the roster file
    #[arg(long, default_value = "players.json")]
    roster: PathBuf,

    /// Path for the generated bracket file
    #[arg(long, default_value = "brackets.json")]
    out: PathBuf,

    /// RNG seed for a reproducible schedule
    #[arg(long)]
    seed: Option<u64>,

    /// Disable betting odds
    #[arg(long)]
    no_odds: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting bracket-gen v{}", env!("CARGO_PKG_VERSION"));

    let mut config = if cli.config.exists() {
        ScheduleConfig::from_file(&cli.config)
            .with_context(|| format!("Failed to load config from {:?}", cli.config))?
    } else {
        ScheduleConfig::default()
    };

    // CLI flags override the config file
    if let Some(players_per_match) = cli.players_per_match {
        config.players_per_match = players_per_match;
    }
    if let Some(rounds) = cli.rounds {
        config.rounds = rounds;
    }
    if let Some(ref raw) = cli.match_length {
        config.match_length_minutes =
            parse_minutes(raw).with_context(|| format!("Invalid --match-length: {}", raw))?;
    }
    if let Some(ref raw) = cli.break_length {
        config.break_length_minutes =
            parse_minutes(raw).with_context(|| format!("Invalid --break-length: {}", raw))?;
    }
    if let Some(seed) = cli.seed {
        config.seed = Some(seed);
    }
    if cli.no_odds {
        config.odds = false;
    }

    if let Some(ref raw) = cli.start {
        match parse_start_time(raw) {
            Some(start) => config.start_time = Some(start),
            None => {
                tracing::warn!("Unable to parse start time {:?}, defaulting to now", raw);
            }
        }
    }
    if config.start_time.is_none() {
        config.start_time = Some(Local::now().naive_local());
    }

    config.validate()?;

    let roster: Vec<Player> = if !cli.players.is_empty() {
        cli.players
            .iter()
            .enumerate()
            .map(|(index, name)| Player::new(index as u32, name.clone()))
            .collect()
    } else {
        tracing::info!("No players provided, reading from {:?}", cli.roster);
        load_roster(&cli.roster)
            .with_context(|| format!("Failed to load roster from {:?}", cli.roster))?
    };
    tracing::info!("Found {} players", roster.len());

    let scheduler = Scheduler::new(config, roster)?;
    let rounds = scheduler.run();

    for round in &rounds {
        println!("{}", round);
    }

    write_brackets(&cli.out, &rounds)?;

    println!("\n=== Schedule Results ===");
    println!("Rounds:   {}", rounds.len());
    println!(
        "Matches:  {}",
        rounds.iter().map(|r| r.matches.len()).sum::<usize>()
    );
    println!("Saved to: {:?}", cli.out);

    Ok(())
}

/// Parse a start time in `YYYY-MM-DD HH:MM[:SS]` form.
fn parse_start_time(raw: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S"))
        .ok()
}
