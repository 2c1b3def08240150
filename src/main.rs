mod app;
mod charts;
mod color;
mod data;
mod pipeline;
mod state;
mod ui;

use app::TrashdayApp;
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 900.0])
            .with_min_inner_size([640.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Trashday – Boston Trash Schedule",
        options,
        Box::new(|cc| {
            app::apply_theme(&cc.egui_ctx);
            Ok(Box::new(TrashdayApp::new()))
        }),
    )
}
