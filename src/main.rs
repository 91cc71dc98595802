mod app;
mod color;
mod config;
mod data;
mod state;
mod ui;

use app::GpaDashboardApp;
use config::DashboardConfig;
use eframe::egui;
use state::AppState;

fn main() -> eframe::Result {
    env_logger::init();

    let config = DashboardConfig::discover();
    let source = config.source.clone();
    let mut state = AppState::new(config);
    state.load_source(&source);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([700.0, 450.0]),
        ..Default::default()
    };

    eframe::run_native(
        "GPA Dashboard",
        options,
        Box::new(|cc| {
            cc.egui_ctx.set_visuals(egui::Visuals::dark());
            Ok(Box::new(GpaDashboardApp::new(state)))
        }),
    )
}
