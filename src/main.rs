#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app;
mod io;
mod model;
mod ui;

fn main() -> eframe::Result<()> {
    env_logger::init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 720.0])
            .with_min_inner_size([800.0, 400.0])
            .with_title("WRM Timeline"),
        ..Default::default()
    };

    eframe::run_native(
        "WRM Timeline",
        options,
        Box::new(|cc| Ok(Box::new(app::WrmApp::new(cc)))),
    )
}
