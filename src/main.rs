//! pieview - renders a 3D pie chart from a key/value data file.
//!
//! Reads a line-oriented `name=value` file (with an optional `Title=` line)
//! and displays the result as a pie chart in a desktop window.

mod charts;
mod data;
mod gui;

use clap::Parser;
use eframe::egui;
use gui::PieChartApp;
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(version, about)]
struct Args {
    /// Chart data file
    #[arg(default_value = "data.txt")]
    data_file: PathBuf,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([640.0, 520.0])
            .with_min_inner_size([420.0, 360.0])
            .with_title("Pie chart"),
        centered: true,
        ..Default::default()
    };

    // Closing the window exits the process (eframe default).
    eframe::run_native(
        "Pie chart",
        options,
        Box::new(|cc| Ok(Box::new(PieChartApp::new(cc, args.data_file)))),
    )
    .map_err(|e| anyhow::anyhow!(e.to_string()))?;

    Ok(())
}
