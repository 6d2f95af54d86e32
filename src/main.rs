use std::cell::RefCell;
use std::path::PathBuf;
use std::process::ExitCode;
use std::rc::Rc;

use anyhow::{anyhow, Result};
use clap::Parser;
use eframe::egui;
use tablescope::app::{FailureSlot, TableScopeApp};
use tablescope::config::{AppContext, ViewerConfig};

/// View CSV files, spreadsheets and SQL query results as a sortable table.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// JSON configuration file
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> ExitCode {
    env_logger::init();

    match run() {
        Ok(true) => ExitCode::SUCCESS,
        // The failure was already shown in a blocking dialog.
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            log::error!("{e:#}");
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

/// Returns `false` when the run ended on a reported load failure.
fn run() -> Result<bool> {
    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => ViewerConfig::from_file(path)?,
        None => ViewerConfig::default(),
    };

    let window = &config.window;
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([window.width, window.height])
            .with_min_inner_size([window.min_width, window.min_height]),
        ..Default::default()
    };

    let failure: FailureSlot = Rc::new(RefCell::new(None));
    let ctx = AppContext::new(config);
    let slot = Rc::clone(&failure);

    eframe::run_native(
        "Tablescope",
        options,
        Box::new(move |_cc| Ok(Box::new(TableScopeApp::new(ctx, slot)))),
    )
    .map_err(|e| anyhow!("running the viewer: {e}"))?;

    let failed = failure.borrow().is_some();
    if let Some(err) = failure.borrow().as_ref() {
        log::info!("Exiting after load failure: {err}");
    }
    Ok(!failed)
}
