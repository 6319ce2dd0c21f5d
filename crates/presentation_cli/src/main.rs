//! Wayfinder CLI
//!
//! Resolves free-text destinations into drawable routes from the command line.

#![allow(clippy::print_stdout, clippy::print_stderr)]

mod console;

use std::path::PathBuf;

use anyhow::{Context, bail};
use application::{RouteEvent, RouteEvents, RouteRequestHandle, notify_listener};
use clap::{Parser, Subcommand};
use domain::{GeoPoint, ResolutionOutcome, polyline};
use infrastructure::{AppConfig, build_orchestrator, init_logging};
use tracing::{info, warn};

use crate::console::ConsoleListener;

/// Wayfinder CLI
#[derive(Debug, Parser)]
#[command(name = "wayfinder-cli")]
#[command(author, version, about = "Route resolution for free-text destinations", long_about = None)]
struct Cli {
    /// Verbosity level (overrides the configured log filter)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Configuration file base name (default: ./wayfinder.*)
    #[arg(short, long, env = "WAYFINDER_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Resolve a destination into a route
    ///
    /// Example: wayfinder-cli resolve --origin 20.17,-98.05 "Plaza Principal"
    Resolve {
        /// Free-text destination
        destination: String,

        /// Starting point as `lat,lng`
        #[arg(short, long, allow_hyphen_values = true)]
        origin: GeoPoint,

        /// 1-based candidate to route to if the destination is ambiguous
        #[arg(short, long)]
        pick: Option<usize>,
    },

    /// Decode an encoded polyline into coordinates
    DecodePolyline {
        /// Encoded polyline string
        encoded: String,
    },

    /// Validate the configuration and print it with secrets omitted
    CheckConfig,
}

/// Determine log filter level from verbosity count
const fn log_filter_from_verbosity(verbose: u8) -> Option<&'static str> {
    match verbose {
        0 => None,
        1 => Some("info"),
        2 => Some("debug"),
        _ => Some("trace"),
    }
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<AppConfig> {
    let config = match path {
        Some(path) => {
            let base = path.to_str().context("config path is not valid UTF-8")?;
            AppConfig::load_from(base)
        },
        None => AppConfig::load(),
    };
    config.context("failed to load configuration")
}

/// Pick a 1-based candidate
fn select_candidate<T>(candidates: &[T], pick: usize) -> anyhow::Result<&T> {
    pick.checked_sub(1)
        .and_then(|index| candidates.get(index))
        .with_context(|| {
            format!(
                "--pick {pick} is out of range, expected 1 to {}",
                candidates.len()
            )
        })
}

/// Wait for the next outcome, cancelling the request on Ctrl-C
async fn await_event(
    events: &mut RouteEvents,
    handle: &RouteRequestHandle,
) -> anyhow::Result<RouteEvent> {
    await_event_or_interrupt(events, handle, tokio::signal::ctrl_c()).await
}

/// Wait for the next outcome, cancelling the request once `interrupt`
/// resolves with `Ok`
async fn await_event_or_interrupt<F>(
    events: &mut RouteEvents,
    handle: &RouteRequestHandle,
    interrupt: F,
) -> anyhow::Result<RouteEvent>
where
    F: Future<Output = std::io::Result<()>>,
{
    tokio::select! {
        event = events.recv() => event.context("route event channel closed"),
        signal = interrupt => {
            match signal {
                Ok(()) => {
                    warn!(request_id = %handle.id(), "Interrupted, cancelling request");
                    handle.cancel();
                },
                Err(e) => warn!(error = %e, "Ctrl-C handler unavailable, waiting for the outcome"),
            }
            events.recv().await.context("route event channel closed")
        },
    }
}

async fn resolve(
    config: &AppConfig,
    origin: GeoPoint,
    destination: String,
    pick: Option<usize>,
) -> anyhow::Result<ResolutionOutcome> {
    let (orchestrator, mut events) = build_orchestrator(config)?;
    let listener = ConsoleListener;

    if !orchestrator.region().contains(&origin) {
        warn!(%origin, "Origin lies outside the service area");
    }

    let handle = orchestrator.submit(origin, destination);
    let mut event = await_event(&mut events, &handle).await?;
    info!(request_id = %event.request_id, state = %event.final_state, "Request finished");

    let picked = match (&event.outcome, pick) {
        (ResolutionOutcome::Ambiguous(candidates), Some(pick)) => {
            Some(select_candidate(candidates, pick)?.clone())
        },
        _ => None,
    };
    if let Some(candidate) = picked {
        eprintln!("➡️  Routing to {}", candidate.display_name);
        let handle = orchestrator.submit_candidate(origin, &candidate);
        event = await_event(&mut events, &handle).await?;
    }

    notify_listener(&listener, &event.outcome);
    Ok(event.outcome)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = load_config(cli.config.as_ref())?;
    if let Some(filter) = log_filter_from_verbosity(cli.verbose) {
        config.logging.filter = filter.to_string();
    }
    init_logging(&config.logging)?;

    match cli.command {
        Commands::Resolve {
            destination,
            origin,
            pick,
        } => {
            let outcome = resolve(&config, origin, destination, pick).await?;
            println!("{}", serde_json::to_string_pretty(&outcome)?);
            if matches!(outcome, ResolutionOutcome::Failure(_)) {
                std::process::exit(1);
            }
        },

        Commands::DecodePolyline { encoded } => {
            let points = polyline::decode(&encoded)?;
            println!("{}", serde_json::to_string_pretty(&points)?);
        },

        Commands::CheckConfig => {
            if let Err(e) = config.validate() {
                bail!("invalid configuration: {e}");
            }
            eprintln!("✅ Configuration is valid");
            println!("{}", serde_json::to_string_pretty(&config)?);
        },
    }

    Ok(())
}
