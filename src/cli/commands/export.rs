//! `export` command: convert a saved session to CSV

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use crate::{
    adapters::MsgPackRepository,
    analysis::TrackingAnalysis,
    cli::output,
    export::TraceCsvExporter,
    ports::SessionRepository,
};

/// Arguments for the export command
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Saved session file (MessagePack, from `track --session`)
    #[arg(long)]
    pub session: PathBuf,

    /// Output CSV path
    #[arg(long)]
    pub csv: PathBuf,
}

/// Execute the export command
pub fn execute(args: ExportArgs) -> Result<()> {
    let session = MsgPackRepository::new().load(&args.session)?;
    TraceCsvExporter::write(&args.csv, &session.trace)?;

    let analysis = TrackingAnalysis::from_trace(&session.trace)?;
    output::print_section("Exported session");
    output::print_kv("tracker", &session.tracker);
    output::print_kv("rows", &analysis.rows.to_string());
    output::print_kv("mean error", &format!("{:.2} cells", analysis.mean_error));
    output::print_kv("csv", &args.csv.display().to_string());

    Ok(())
}
