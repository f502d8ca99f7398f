//! `checkin` CLI — preview and resolve overlapping check-ins from the command line.
//!
//! Existing check-ins are read as a JSON array of stored rows
//! (`{id, venue, start_time, end_time, created_at, owner_id?}`).
//!
//! ## Usage
//!
//! ```sh
//! # Start times offered right now (or at a given time)
//! checkin slots --now 18:10
//!
//! # Duration choices, with end times for a 23:30 start
//! checkin durations --start 23:30
//!
//! # Which of my check-ins overlap 19:00-20:30?
//! checkin conflicts -i checkins.json --owner u1 --start 19:00 --end 20:30
//!
//! # Before/after preview of submitting a 90-minute check-in
//! checkin resolve -i checkins.json --venue "Midway" --start 19:00 --duration 90
//!
//! # The merged timeline as JSON
//! cat checkins.json | checkin resolve --venue "Midway" --start 19:00 --duration 90 --json
//!
//! # Report check-ins that overlap each other
//! checkin check -i checkins.json
//! ```

use anyhow::{Context, Result};
use chrono::{Local, Timelike};
use clap::{Args, Parser, Subcommand};
use std::io::{self, Read};
use tracing_subscriber::EnvFilter;

use checkin_engine::record::parse_records;
use checkin_engine::{
    candidate_durations, decode_records, find_conflicts, find_overlapping_pairs, owned_by,
    resolve, Interval, OwnerId, Resolution, SessionWindow, TimeOfDay,
};

#[derive(Parser)]
#[command(
    name = "checkin",
    version,
    about = "Preview and resolve overlapping venue check-ins"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log adjustment decisions to stderr (overrides RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List the start times offered for the session
    Slots {
        /// Reference time (defaults to the local clock)
        #[arg(long)]
        now: Option<TimeOfDay>,
        /// First start time of the session
        #[arg(long)]
        opens: Option<TimeOfDay>,
        /// Last start time of the session; hours past midnight count on (26:00 = 2 AM)
        #[arg(long)]
        closes: Option<TimeOfDay>,
        /// Minutes between start times
        #[arg(long)]
        step: Option<u32>,
    },
    /// List the duration choices
    Durations {
        /// Start time used to show the resulting end times
        #[arg(long)]
        start: Option<TimeOfDay>,
    },
    /// Print the existing check-ins that overlap a new one
    Conflicts {
        #[command(flatten)]
        existing: ExistingArgs,
        #[command(flatten)]
        candidate: CandidateArgs,
    },
    /// Preview the adjustments needed to submit a new check-in
    Resolve {
        #[command(flatten)]
        existing: ExistingArgs,
        #[command(flatten)]
        candidate: CandidateArgs,
        /// Venue of the new check-in
        #[arg(long)]
        venue: String,
        /// Print the whole resolution (merged timeline included) as JSON
        #[arg(long)]
        json: bool,
    },
    /// Report existing check-ins that overlap each other
    Check {
        #[command(flatten)]
        existing: ExistingArgs,
    },
}

#[derive(Args)]
struct ExistingArgs {
    /// JSON file of stored check-ins (reads from stdin if omitted)
    #[arg(short, long)]
    input: Option<String>,
    /// Only consider check-ins belonging to this owner
    #[arg(long)]
    owner: Option<String>,
}

#[derive(Args)]
struct CandidateArgs {
    /// Start of the new check-in (HH:MM)
    #[arg(long)]
    start: TimeOfDay,
    /// End of the new check-in (HH:MM)
    #[arg(long, conflicts_with = "duration", required_unless_present = "duration")]
    end: Option<TimeOfDay>,
    /// Length of the new check-in in minutes
    #[arg(long)]
    duration: Option<u32>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Slots {
            now,
            opens,
            closes,
            step,
        } => {
            let defaults = SessionWindow::default();
            let window = SessionWindow {
                opens: opens.unwrap_or(defaults.opens),
                closes: closes.unwrap_or(defaults.closes),
                step_minutes: step.unwrap_or(defaults.step_minutes),
            };
            let now = now.unwrap_or_else(local_time_of_day);

            for start in window.start_times(now) {
                println!("{}", start.to_session_string());
            }
        }
        Commands::Durations { start } => {
            for option in candidate_durations(start) {
                match option.end_time {
                    Some(end) => println!("{:>4}  {:<10}  ends {}", option.minutes, option.label, end),
                    None => println!("{:>4}  {}", option.minutes, option.label),
                }
            }
        }
        Commands::Conflicts {
            existing,
            candidate,
        } => {
            let (intervals, owner) = load_existing(&existing)?;
            let candidate = build_candidate(&candidate, owner)?;
            let conflicts = find_conflicts(&candidate, &intervals);
            println!("{}", serde_json::to_string_pretty(&conflicts)?);
        }
        Commands::Resolve {
            existing,
            candidate,
            venue,
            json,
        } => {
            let (intervals, owner) = load_existing(&existing)?;
            let candidate = build_candidate(&candidate, owner)?.with_venue(venue);
            let resolution =
                resolve(&candidate, &intervals).context("Failed to resolve conflicts")?;

            if json {
                println!("{}", serde_json::to_string_pretty(&resolution)?);
            } else {
                print_preview(&resolution);
            }
        }
        Commands::Check { existing } => {
            let (intervals, _) = load_existing(&existing)?;
            let overlaps = find_overlapping_pairs(&intervals);
            if overlaps.is_empty() {
                println!("No overlapping check-ins.");
                return Ok(());
            }
            for overlap in &overlaps {
                println!(
                    "{} ({}) overlaps {} ({}) by {} min",
                    overlap.first.display_id(),
                    span(&overlap.first),
                    overlap.second.display_id(),
                    span(&overlap.second),
                    overlap.overlap_minutes
                );
            }
            anyhow::bail!("{} overlapping pair(s) found", overlaps.len());
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .without_time()
        .compact()
        .init();
}

fn local_time_of_day() -> TimeOfDay {
    let now = Local::now();
    TimeOfDay::from_hm(now.hour(), now.minute())
}

/// Decode the stored check-ins, narrowed to `--owner` when given.
fn load_existing(args: &ExistingArgs) -> Result<(Vec<Interval>, Option<OwnerId>)> {
    let json = read_input(args.input.as_deref())?;
    let records = parse_records(&json).context("Failed to parse check-in records")?;
    let intervals = decode_records(&records).context("Failed to decode check-in records")?;

    let owner = args.owner.as_deref().map(OwnerId::new);
    let intervals = match &owner {
        Some(owner) => owned_by(&intervals, owner),
        None => intervals,
    };
    tracing::debug!(count = intervals.len(), "loaded existing check-ins");

    Ok((intervals, owner))
}

/// The new check-in, anchored to the default session the same way stored rows
/// are decoded.
fn build_candidate(args: &CandidateArgs, owner: Option<OwnerId>) -> Result<Interval> {
    let start = SessionWindow::default().anchor(args.start);
    let end = match (args.end, args.duration) {
        (Some(end), _) => end,
        (None, duration) => start.add_minutes(duration.unwrap_or_default()),
    };
    let candidate = Interval::try_new(start, end).context("Invalid check-in")?;
    Ok(match owner {
        Some(owner) => candidate.with_owner(owner),
        None => candidate,
    })
}

fn print_preview(resolution: &Resolution) {
    let candidate = &resolution.candidate;
    println!(
        "New check-in: {} {} ({} min)",
        candidate.venue,
        span(candidate),
        candidate.duration_minutes
    );

    if !resolution.has_conflicts() {
        println!("No conflicts.");
        return;
    }

    println!("Adjustments:");
    for adjustment in &resolution.adjustments {
        println!(
            "  {}: {} -> {} ({} min)",
            adjustment.original.venue,
            span(&adjustment.original),
            span(&adjustment.adjusted),
            adjustment.adjusted.duration_minutes
        );
    }

    for superseded in &resolution.superseded {
        println!(
            "  {}: {} is superseded by the new check-in",
            superseded.venue,
            span(superseded)
        );
    }
}

fn span(interval: &Interval) -> String {
    format!("{} - {}", interval.start.to_12_hour(), interval.end.to_12_hour())
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}
