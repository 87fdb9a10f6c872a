mod app;
mod chart;
mod color;
mod config;
mod data;
mod state;
mod ui;

use std::process::ExitCode;

use app::DashboardApp;
use config::DashboardConfig;
use data::Dataset;
use eframe::egui;
use state::AppState;

fn main() -> ExitCode {
    env_logger::init();

    let config = DashboardConfig::from_env();

    // There is no fallback data source: a bad file ends the process.
    let dataset = match Dataset::load(&config.data_path) {
        Ok(ds) => ds,
        Err(e) => {
            log::error!("Failed to load {}: {e:#}", config.data_path.display());
            return ExitCode::FAILURE;
        }
    };
    if dataset.table.is_empty() {
        log::warn!("{} has a header but no passengers", config.data_path.display());
    }
    log::info!(
        "Loaded {} passengers ({} complete numeric records) from {}",
        dataset.table.len(),
        dataset.numeric.len(),
        config.data_path.display()
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(config.title.clone())
            .with_inner_size(config.window_size)
            .with_min_inner_size([800.0, 500.0]),
        ..Default::default()
    };

    let title = config.title.clone();
    let state = AppState::new(config, dataset);
    let result = eframe::run_native(
        &title,
        options,
        Box::new(|cc| {
            // Install image loaders so egui can render the background image.
            egui_extras::install_image_loaders(&cc.egui_ctx);
            Ok(Box::new(DashboardApp::new(state)))
        }),
    );

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("UI terminated: {e}");
            ExitCode::FAILURE
        }
    }
}
