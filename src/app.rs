use std::path::PathBuf;

use eframe::egui;

use crate::state::AppState;
use crate::ui::{panels, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct KonverterApp {
    pub state: AppState,
    /// Store revision the window title was last set for.
    seen_revision: Option<u64>,
}

impl KonverterApp {
    /// Create the app, optionally importing `initial` right away.
    pub fn new(initial: Option<PathBuf>) -> Self {
        let mut state = AppState::default();
        if let Some(path) = initial {
            state.open(&path);
        }
        Self {
            state,
            seen_revision: None,
        }
    }

    /// First dropped file replaces the current table.
    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        let dropped: Vec<PathBuf> = ctx.input(|i| {
            i.raw
                .dropped_files
                .iter()
                .filter_map(|f| f.path.clone())
                .collect()
        });
        if let Some(path) = dropped.into_iter().next() {
            self.state.open(&path);
        }
    }

    /// Del/Backspace delete the selection, Enter exports.
    fn handle_shortcuts(&mut self, ctx: &egui::Context) {
        let (delete, export) = ctx.input(|i| {
            (
                i.key_pressed(egui::Key::Delete) || i.key_pressed(egui::Key::Backspace),
                i.key_pressed(egui::Key::Enter),
            )
        });
        if delete {
            self.state.delete_selected();
        }
        if export && self.state.has_data() {
            self.state.export();
        }
    }

    fn sync_title(&mut self, ctx: &egui::Context) {
        let revision = self.state.store.revision();
        if self.seen_revision != Some(revision) {
            self.seen_revision = Some(revision);
            ctx.send_viewport_cmd(egui::ViewportCommand::Title(self.state.window_title()));
        }
    }
}

impl eframe::App for KonverterApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_dropped_files(ctx);
        self.handle_shortcuts(ctx);

        // ---- Top panel: menu bar + status ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Bottom panel: row / export actions ----
        egui::TopBottomPanel::bottom("action_bar").show(ctx, |ui| {
            panels::action_bar(ui, &mut self.state);
        });

        // ---- Central panel: table preview ----
        egui::CentralPanel::default().show(ctx, |ui| {
            table::cue_table(ui, &mut self.state);
        });

        self.sync_title(ctx);
    }
}
