mod app;
mod color;
mod config;
mod data;
mod state;
mod ui;

use std::path::PathBuf;

use app::CrimeDashboardApp;
use color::Theme;
use config::DashboardConfig;
use eframe::egui;
use state::AppState;

fn main() -> eframe::Result {
    env_logger::init();

    let mut config = DashboardConfig::discover();
    if let Some(path) = std::env::args_os().nth(1) {
        config.data_path = PathBuf::from(path);
    }

    let theme = Theme::from_config(&config.theme).unwrap_or_else(|e| {
        log::warn!("{e}; using the default chart colours");
        Theme::default()
    });
    let load_options = config.load_options().unwrap_or_else(|e| {
        log::warn!("{e}; using default loader settings");
        Default::default()
    });

    // Load before the window opens; a failure leaves only the error on screen.
    let mut state = AppState::new(load_options, config.top_n);
    state.open(&config.data_path);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 820.0])
            .with_min_inner_size([720.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Delitos estatales en México",
        options,
        Box::new(move |_cc| Ok(Box::new(CrimeDashboardApp::new(state, theme)))),
    )
}
