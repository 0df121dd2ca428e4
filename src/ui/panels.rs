use eframe::egui::{self, Color32, RichText, Ui};

use crate::state::{AppState, StatusMessage};

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if state.has_data() {
            ui.label(format!(
                "{} rows, {} selected",
                state.store.row_count(),
                state.selection.len()
            ));
            ui.separator();
        }

        match &state.status_message {
            Some(StatusMessage::Info(msg)) => {
                ui.label(RichText::new(msg).color(Color32::LIGHT_GREEN));
            }
            Some(StatusMessage::Error(msg)) => {
                ui.label(RichText::new(msg).color(Color32::RED));
            }
            None => {}
        }
    });
}

// ---------------------------------------------------------------------------
// Bottom bar – row and export actions
// ---------------------------------------------------------------------------

/// Delete / export / reset buttons. All of them need a loaded table.
pub fn action_bar(ui: &mut Ui, state: &mut AppState) {
    let has_data = state.has_data();

    ui.vertical_centered_justified(|ui: &mut Ui| {
        if ui
            .add_enabled(has_data, egui::Button::new("Delete selected rows (Del)"))
            .clicked()
        {
            state.delete_selected();
        }
        if ui
            .add_enabled(has_data, egui::Button::new("Export to Excel (Enter)"))
            .clicked()
        {
            state.export();
        }
        if ui
            .add_enabled(has_data, egui::Button::new("Clear data / load new file"))
            .clicked()
        {
            state.reset();
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open Assemble List export")
        .add_filter("Text files", &["txt"])
        .add_filter("All files", &["*"])
        .pick_file();

    if let Some(path) = file {
        state.open(&path);
    }
}
