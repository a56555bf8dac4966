//! Portfolio Widgets CLI
//!
//! Thin display layer over portfolio-core for command-line usage.
//!
//! ## Usage
//!
//! ```bash
//! # Show both in-game clocks and the terminal window
//! portfolio tarkov status
//!
//! # Preview the schedule for another instant
//! portfolio tarkov status --zone right --at 2026-01-01T20:00:00+03:00
//!
//! # Live refresh every second
//! portfolio tarkov watch
//!
//! # Crafting timer
//! portfolio craft set-duration 39 0 0
//! portfolio craft start
//! portfolio craft show
//! portfolio craft reset
//!
//! # Card gallery
//! portfolio cards list cards.json
//! portfolio cards show cards.json "Tarkov Clock"
//! ```

use std::fmt::Display;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Result;
use chrono::{DateTime, Local, TimeZone, Utc};
use clap::{Parser, Subcommand};
use portfolio_core::tarkov::{SystemNow, ZoneTicker};
use portfolio_core::{
    CardCatalog, CraftDuration, EvaluationMode, Labels, Storage, TarkovClock, TarkovStatus, Zone,
};

/// Portfolio Widgets - in-game clock, crafting timer and card gallery
#[derive(Parser)]
#[command(name = "portfolio")]
#[command(version)]
#[command(about = "Portfolio Widgets - in-game clock, crafting timer and card gallery")]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Data directory (default: ~/.portfolio/data)
    #[arg(short, long, global = true)]
    data_dir: Option<PathBuf>,

    /// Show real-world times in UTC instead of local time
    #[arg(long, global = true)]
    utc: bool,

    /// Label language: ru or en
    #[arg(long, global = true, default_value = "ru")]
    lang: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show version, data directory and current zone times
    Info,

    /// In-game clock
    Tarkov {
        #[command(subcommand)]
        action: TarkovAction,
    },

    /// Crafting timer
    Craft {
        #[command(subcommand)]
        action: CraftAction,
    },

    /// Card gallery
    Cards {
        #[command(subcommand)]
        action: CardsAction,
    },
}

#[derive(Subcommand)]
enum TarkovAction {
    /// Show clock and terminal status
    Status {
        /// Zone to show: left, right or both
        #[arg(short, long, default_value = "both")]
        zone: String,

        /// Evaluate at this instant (RFC 3339) instead of now
        #[arg(long)]
        at: Option<String>,
    },
    /// Refresh both zones periodically until interrupted
    Watch {
        /// Refresh period in milliseconds
        #[arg(short, long, default_value = "1000")]
        interval_ms: u64,

        /// Stop after this many refreshes
        #[arg(short, long)]
        ticks: Option<u64>,
    },
}

#[derive(Subcommand)]
enum CraftAction {
    /// Show the craft's progress
    Show,
    /// Start a craft now
    Start,
    /// Cancel the running craft
    Reset,
    /// Set the craft duration
    SetDuration {
        hours: u32,
        minutes: u32,
        seconds: u32,
    },
}

#[derive(Subcommand)]
enum CardsAction {
    /// List all cards by category
    List {
        /// Path to the cards JSON file
        path: PathBuf,
    },
    /// Show one card in full
    Show {
        /// Path to the cards JSON file
        path: PathBuf,
        /// Card title (case-insensitive)
        title: String,
    },
}

fn setup_logging(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .init();
}

/// Get the default data directory (~/.portfolio/data)
fn default_data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".portfolio")
        .join("data")
}

fn open_storage(data_dir: &Path) -> Result<Storage> {
    Ok(Storage::new(data_dir.join("portfolio.redb"))?)
}

fn parse_labels(s: &str) -> Result<Labels> {
    match s.to_lowercase().as_str() {
        "ru" => Ok(Labels::russian()),
        "en" => Ok(Labels::english()),
        _ => anyhow::bail!("Invalid language '{}'. Must be one of: ru, en", s),
    }
}

/// Parse a zone selector; "both" yields every zone
fn parse_zones(s: &str) -> Result<Vec<Zone>> {
    if s.eq_ignore_ascii_case("both") {
        return Ok(Zone::ALL.to_vec());
    }
    let zone: Zone = s.parse()?;
    Ok(vec![zone])
}

/// Parse an RFC 3339 instant into ms since epoch
fn parse_instant(s: &str) -> Result<i64> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.timestamp_millis())
        .map_err(|e| anyhow::anyhow!("Invalid time '{}': {}", s, e))
}

fn now_ms() -> i64 {
    Utc::now().timestamp_millis()
}

fn format_instant(ms: i64, utc: bool) -> String {
    match DateTime::from_timestamp_millis(ms) {
        Some(dt) if utc => dt.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
        Some(dt) => dt
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M:%S")
            .to_string(),
        None => "(out of range)".to_string(),
    }
}

fn zone_title(zone: Zone) -> &'static str {
    match zone {
        Zone::Left => "Left zone",
        Zone::Right => "Right zone",
    }
}

fn print_status(status: &TarkovStatus) {
    let schedule = &status.schedule;
    println!("{}", zone_title(status.zone));
    println!("  Time: {}", status.clock);
    println!("  Terminal: {}", schedule.status_text);
    println!(
        "  {} {} (at {})",
        schedule.next_event_text, schedule.formatted_countdown, schedule.real_event_time
    );
    println!("  Window: {}", schedule.window_range);
}

fn print_tick(left: &TarkovStatus, right: &TarkovStatus) {
    println!(
        "L {} {} {} | R {} {} {}",
        left.clock.time_text(),
        left.schedule.status_text,
        left.schedule.formatted_countdown,
        right.clock.time_text(),
        right.schedule.status_text,
        right.schedule.formatted_countdown,
    );
}

async fn run_tarkov<Tz>(clock: TarkovClock<Tz>, action: TarkovAction) -> Result<()>
where
    Tz: TimeZone + Send + Sync + 'static,
    Tz::Offset: Display,
{
    match action {
        TarkovAction::Status { zone, at } => {
            let zones = parse_zones(&zone)?;
            let now = now_ms();
            let (base, mode) = match at {
                Some(at) => {
                    let base = parse_instant(&at)?;
                    (base, EvaluationMode::infer(base, now))
                }
                None => (now, EvaluationMode::Live { now_ms: now }),
            };

            if mode.is_planning() {
                println!("Planning for {}", at_label(base));
                println!();
            }
            for (i, zone) in zones.into_iter().enumerate() {
                if i > 0 {
                    println!();
                }
                print_status(&clock.status(zone, base, mode));
            }
        }

        TarkovAction::Watch { interval_ms, ticks } => {
            let ticker = ZoneTicker::spawn(clock, Duration::from_millis(interval_ms), SystemNow);
            let mut rx = ticker.subscribe();
            let mut seen = 0u64;

            loop {
                tokio::select! {
                    changed = rx.changed() => {
                        if changed.is_err() {
                            break;
                        }
                        let pair = rx.borrow_and_update().clone();
                        print_tick(&pair.left, &pair.right);
                        seen += 1;
                        if ticks.is_some_and(|limit| seen >= limit) {
                            break;
                        }
                    }
                    _ = tokio::signal::ctrl_c() => {
                        tracing::info!("Interrupted");
                        break;
                    }
                }
            }

            ticker.stop();
        }
    }

    Ok(())
}

fn at_label(base: i64) -> String {
    DateTime::from_timestamp_millis(base)
        .map(|dt| dt.to_rfc3339())
        .unwrap_or_else(|| base.to_string())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose);

    let data_dir = cli.data_dir.unwrap_or_else(default_data_dir);
    let labels = parse_labels(&cli.lang)?;

    match cli.command {
        Commands::Info => {
            let now = now_ms();
            let clock = TarkovClock::new().with_labels(labels);
            let pair = clock.zones(now, EvaluationMode::Live { now_ms: now });

            println!("Portfolio Widgets v{}", env!("CARGO_PKG_VERSION"));
            println!();
            println!("Data directory: {}", data_dir.display());
            println!("Now: {}", format_instant(now, cli.utc));
            println!();
            println!("Left zone: {}", pair.left.clock);
            println!("Right zone: {}", pair.right.clock);
        }

        Commands::Tarkov { action } => {
            if cli.utc {
                run_tarkov(TarkovClock::with_timezone(Utc).with_labels(labels), action).await?;
            } else {
                run_tarkov(TarkovClock::with_timezone(Local).with_labels(labels), action).await?;
            }
        }

        Commands::Craft { action } => {
            let storage = open_storage(&data_dir)?;

            match action {
                CraftAction::Show => {
                    let timer = storage.load_craft_timer()?;
                    let progress = timer.snapshot(now_ms());

                    println!("Craft");
                    println!("  Duration: {}", timer.duration);
                    let state = if progress.is_ready {
                        "ready"
                    } else if progress.is_crafting {
                        "crafting"
                    } else {
                        "idle"
                    };
                    println!("  Status: {}", state);
                    if progress.is_crafting {
                        println!("  Remaining: {}", progress.formatted_remaining);
                        println!("  Progress: {:.1}%", progress.progress);
                    }
                    if let Some(done) = progress.completion_at_ms {
                        println!("  Completes: {}", format_instant(done, cli.utc));
                    }
                }

                CraftAction::Start => {
                    let mut timer = storage.load_craft_timer()?;
                    timer.start(now_ms());
                    storage.save_craft_timer(&timer)?;

                    println!("Craft started ({})", timer.duration);
                    if let Some(done) = timer.completion_at_ms() {
                        println!("  Completes: {}", format_instant(done, cli.utc));
                    }
                }

                CraftAction::Reset => {
                    storage.clear_craft_start()?;
                    println!("Craft reset.");
                }

                CraftAction::SetDuration {
                    hours,
                    minutes,
                    seconds,
                } => {
                    let duration = CraftDuration::checked(hours, minutes, seconds)?;
                    storage.save_craft_duration(&duration)?;
                    println!("Craft duration set to {}", duration);
                }
            }
        }

        Commands::Cards { action } => match action {
            CardsAction::List { path } => {
                let catalog = CardCatalog::load(&path)?;
                if catalog.is_empty() {
                    println!("No cards found.");
                } else {
                    println!("Cards ({}):", catalog.len());
                    for category in catalog.categories() {
                        let cards = catalog.cards(category);
                        println!();
                        println!("{} ({}):", category, cards.len());
                        for card in cards {
                            println!(
                                "  {} - {} [{}]",
                                card.title, card.short_description, card.link
                            );
                        }
                    }
                }
            }

            CardsAction::Show { path, title } => {
                let catalog = CardCatalog::load(&path)?;
                let card = catalog
                    .find(&title)
                    .ok_or_else(|| anyhow::anyhow!("Card not found: {}", title))?;

                println!("{}", card.title);
                println!("  Icon: {}", card.icon);
                println!("  Link: {}", card.link);
                println!("  {}", card.short_description);
                for paragraph in &card.description {
                    println!();
                    println!("  {}", paragraph);
                }
            }
        },
    }

    Ok(())
}
