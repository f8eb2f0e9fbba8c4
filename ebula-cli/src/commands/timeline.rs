//! Timeline command - print the merged strip of a route bundle.

use std::path::PathBuf;

use clap::Args;
use ebula::timeline::{current_index, merge, TimelineItem};

use crate::error::CliError;
use crate::runner::CliRunner;

/// Arguments for the timeline command.
#[derive(Debug, Args)]
pub struct TimelineArgs {
    /// Route bundle (JSON); bare names are looked up in the bundle directory
    #[arg(long)]
    pub bundle: PathBuf,

    /// Mark the row the train is at or last passed, and the rows behind it
    #[arg(long)]
    pub at_km: Option<f64>,
}

/// Run the timeline command.
pub fn run(runner: &CliRunner, args: TimelineArgs) -> Result<(), CliError> {
    runner.log_startup("timeline");
    let bundle = runner.load_bundle(&args.bundle)?;
    let items = merge(&bundle.track_objects, &bundle.timetable_entries);
    let current = args.at_km.and_then(|km| current_index(&items, km));

    println!(
        "{} (km {:.3} - {:.3})",
        bundle.route.name, bundle.route.start_km, bundle.route.end_km
    );
    println!();
    for (i, item) in items.iter().enumerate() {
        let marker = row_marker(item, current == Some(i), args.at_km);
        println!("{}", format_row(item, marker));
    }
    if items.is_empty() {
        println!("(no track objects or stops)");
        return Ok(());
    }

    let stations = items.iter().filter(|i| i.category.is_station()).count();
    println!();
    println!("{} items, {} stations", items.len(), stations);
    Ok(())
}

/// `▶` at the current row, `·` for rows already passed.
fn row_marker(item: &TimelineItem, current: bool, at_km: Option<f64>) -> char {
    match at_km {
        _ if current => '▶',
        Some(km) if item.is_passed(km) => '·',
        _ => ' ',
    }
}

fn format_row(item: &TimelineItem, marker: char) -> String {
    let symbol = item.symbol.as_deref().unwrap_or("");
    let mut row = format!(
        "{} {:>9.3}  {:<4} {}",
        marker, item.km, symbol, item.primary_label
    );
    if let Some(secondary) = &item.secondary_label {
        row.push_str("  ");
        row.push_str(secondary);
    }
    row
}
