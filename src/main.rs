mod app;
mod data;
mod error;
mod state;
mod ui;

use std::path::PathBuf;

use app::KonverterApp;
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();

    // Optional cue log to open on start-up.
    let initial = std::env::args_os().nth(1).map(PathBuf::from);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(state::APP_TITLE)
            .with_inner_size([600.0, 400.0])
            .with_min_inner_size([400.0, 300.0])
            .with_drag_and_drop(true),
        ..Default::default()
    };

    eframe::run_native(
        state::APP_TITLE,
        options,
        Box::new(move |_cc| Ok(Box::new(KonverterApp::new(initial)))),
    )
}
