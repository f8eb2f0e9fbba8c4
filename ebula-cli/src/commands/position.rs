//! Position command - locate the train once for a given clock time.

use std::path::PathBuf;

use clap::Args;
use ebula::live::LiveTrackingController;

use super::common::{format_stop, open_bundle, validate_time};
use crate::error::CliError;
use crate::runner::CliRunner;

/// Arguments for the position command.
#[derive(Debug, Args)]
pub struct PositionArgs {
    /// Route bundle (JSON); bare names are looked up in the bundle directory
    #[arg(long)]
    pub bundle: PathBuf,

    /// Trip by number (1-based) or name; defaults to the first trip
    #[arg(long)]
    pub trip: Option<String>,

    /// In-world clock time (HH:MM or HH:MM:SS)
    #[arg(long)]
    pub time: String,

    /// Manual km correction added on top of the computed position
    #[arg(long, allow_hyphen_values = true)]
    pub offset: Option<f64>,
}

/// Run the position command.
pub async fn run(runner: &CliRunner, args: PositionArgs) -> Result<(), CliError> {
    runner.log_startup("position");
    validate_time(&args.time)?;

    let opened = open_bundle(runner, &args.bundle, args.trip.as_deref())?;
    let controller = LiveTrackingController::with_config(opened.store, runner.controller_config());
    controller.load(opened.route_id, opened.trip_id).await?;
    if let Some(offset) = args.offset {
        controller.adjust_km_offset(offset)?;
    }
    controller.set_time(&args.time)?;

    let state = controller.state();
    let route = state
        .route
        .as_ref()
        .map(|r| r.name.as_str())
        .unwrap_or("(unknown route)");

    println!("Route:    {}", route);
    println!(
        "Trip:     {} ({})",
        opened.trip.name, opened.trip.calculation_mode
    );
    println!("Time:     {}", state.current_time_str);
    println!("Km:       {:.3}", state.current_km);
    println!("Progress: {:.1}%", state.progress * 100.0);
    println!("Previous: {}", format_stop(state.prev_stop.as_ref()));
    println!("Next:     {}", format_stop(state.next_stop.as_ref()));

    controller.dispose()?;
    Ok(())
}
