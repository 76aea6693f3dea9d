use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use eframe::egui;

use threadscope::app::ThreadscopeApp;
use threadscope::config::PresentationConfig;
use threadscope::state::AppState;

#[derive(Parser)]
#[command(name = "threadscope")]
#[command(about = "Compare thread count vs. execution time across two machines")]
#[command(version)]
struct Cli {
    /// Benchmark source (.xlsx/.xls/.ods, .json, .csv or .parquet)
    #[arg(default_value = "execution_time.xlsx")]
    source: PathBuf,

    /// Presentation preset (`light`, `dark`) or path to a JSON theme file
    #[arg(short, long, default_value = "light")]
    theme: String,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let presentation = PresentationConfig::resolve(&cli.theme)?;
    let state = AppState::new(cli.source, presentation);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 900.0])
            .with_min_inner_size([640.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Threadscope – Threads vs Execution Time",
        options,
        Box::new(|cc| Ok(Box::new(ThreadscopeApp::new(cc, state)))),
    )
    .map_err(|e| anyhow::anyhow!("failed to start the UI: {e}"))
}
