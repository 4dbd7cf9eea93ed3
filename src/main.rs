mod app;
mod cli;
mod color;
mod config;
mod data;
mod pipeline;
mod state;
mod ui;

use anyhow::Result;
use app::ListingLensApp;
use clap::Parser;
use cli::Cli;
use config::DashboardConfig;
use eframe::egui;
use state::AppState;

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let mut config = match &cli.config {
        Some(path) => DashboardConfig::load(path)?,
        None => DashboardConfig::default(),
    };
    if let Some(data) = cli.data {
        config.data_path = data;
    }

    let mut state = AppState::new(config);
    let data_path = state.config.data_path.clone();
    state.open(&data_path);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 820.0])
            .with_min_inner_size([640.0, 420.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Listing Lens – Used Vehicle Explorer",
        options,
        Box::new(|_cc| Ok(Box::new(ListingLensApp::new(state)))),
    )
    .map_err(|e| anyhow::anyhow!("running the UI: {e}"))
}
