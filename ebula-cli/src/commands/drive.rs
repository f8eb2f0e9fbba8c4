//! Drive command - run a live session with the auto tick.
//!
//! Prints one line per published snapshot until the requested duration has
//! passed or Ctrl-C is pressed.

use std::path::PathBuf;
use std::time::Duration;

use clap::Args;
use ebula::live::LiveTrackingController;
use tracing::info;

use super::common::{format_state_line, open_bundle, validate_time};
use crate::error::CliError;
use crate::runner::CliRunner;

/// Arguments for the drive command.
#[derive(Debug, Args)]
pub struct DriveArgs {
    /// Route bundle (JSON); bare names are looked up in the bundle directory
    #[arg(long)]
    pub bundle: PathBuf,

    /// Trip by number (1-based) or name; defaults to the first trip
    #[arg(long)]
    pub trip: Option<String>,

    /// In-world clock time to start from (HH:MM or HH:MM:SS)
    #[arg(long)]
    pub time: String,

    /// Stop after this many real seconds (runs until Ctrl-C if omitted)
    #[arg(long)]
    pub seconds: Option<u64>,

    /// Manual km correction added on top of the computed position
    #[arg(long, allow_hyphen_values = true)]
    pub offset: Option<f64>,
}

/// Run the drive command.
pub async fn run(runner: &CliRunner, args: DriveArgs) -> Result<(), CliError> {
    runner.log_startup("drive");
    validate_time(&args.time)?;

    let opened = open_bundle(runner, &args.bundle, args.trip.as_deref())?;
    let controller = LiveTrackingController::with_config(opened.store, runner.controller_config());
    controller.load(opened.route_id, opened.trip_id).await?;
    if let Some(offset) = args.offset {
        controller.adjust_km_offset(offset)?;
    }
    controller.set_time(&args.time)?;

    let mut rx = controller.subscribe();
    let first = rx.borrow_and_update().clone();
    println!(
        "Driving {} on {}",
        opened.trip.name,
        first
            .route
            .as_ref()
            .map(|r| r.name.as_str())
            .unwrap_or("(unknown route)")
    );
    println!("{}", format_state_line(&first));

    controller.start_auto_tick()?;

    let deadline = async {
        match args.seconds {
            Some(secs) => tokio::time::sleep(Duration::from_secs(secs)).await,
            None => std::future::pending().await,
        }
    };
    tokio::pin!(deadline);

    loop {
        tokio::select! {
            changed = rx.changed() => {
                if changed.is_err() {
                    break;
                }
                let state = rx.borrow_and_update().clone();
                println!("{}", format_state_line(&state));
            }
            _ = &mut deadline => {
                info!("Drive duration elapsed");
                break;
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Interrupted");
                println!();
                break;
            }
        }
    }

    controller.stop_auto_tick()?;
    let last = controller.state();
    println!(
        "Stopped at {} km {:.3} ({:.1}%)",
        last.current_time_str,
        last.current_km,
        last.progress * 100.0
    );
    controller.dispose()?;
    Ok(())
}
