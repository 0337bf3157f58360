mod app;
mod data;
mod processing;
mod render;
mod state;
mod ui;

use std::path::Path;

use app::CensusPlotApp;
use eframe::egui;
use state::app_state::{AppConfig, CONFIG_FILE, VERSION};

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt::init();
    tracing::info!("censusplot v{VERSION}");

    let config = AppConfig::load(Path::new(CONFIG_FILE));
    let size = [config.layout.surface_width, config.layout.surface_height];

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Census Scatter")
            .with_inner_size(size)
            .with_min_inner_size(size)
            .with_drag_and_drop(true),
        ..Default::default()
    };

    eframe::run_native(
        "censusplot",
        options,
        Box::new(|cc| Ok(Box::new(CensusPlotApp::new(cc, config)))),
    )
}
