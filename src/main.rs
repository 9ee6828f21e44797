mod analysis;
mod app;
mod color;
mod config;
mod data;
mod state;
mod ui;

use app::PowerLogApp;
use config::AnalysisConfig;
use eframe::egui;
use state::AppState;

fn main() -> eframe::Result {
    env_logger::init();

    let config_path = AnalysisConfig::default_path();
    let config = AnalysisConfig::load_or_default();
    log::info!("analysis settings: {config:?}");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "powerlog – Measurement Viewer",
        options,
        Box::new(move |_cc| {
            Ok(Box::new(PowerLogApp::new(AppState::with_config(
                config,
                config_path,
            ))))
        }),
    )
}
