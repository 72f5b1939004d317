use eframe::egui;
use log::info;

mod api;
mod app;
mod drilldown;
mod loader;
mod logging;
mod models;
mod ui;
mod utils;

fn main() -> Result<(), eframe::Error> {
    logging::init_logging();
    info!("Starting Salesdash application");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1280.0, 860.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Salesdash",
        options,
        Box::new(|cc| Box::new(app::DashboardApp::new(cc))),
    )
}
