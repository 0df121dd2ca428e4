use eframe::egui::{self, Align, Layout, Ui};
use egui_extras::{Column, TableBuilder};

use crate::state::{AppState, SelectMode};

const ROW_HEIGHT: f32 = 20.0;
const HEADER_HEIGHT: f32 = 22.0;

// ---------------------------------------------------------------------------
// Cue table (central panel)
// ---------------------------------------------------------------------------

/// Render the table preview with row selection.
pub fn cue_table(ui: &mut Ui, state: &mut AppState) {
    if !state.has_data() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Drop an Assemble List file here  (or File → Open…)");
        });
        return;
    }

    let modifiers = ui.input(|i| i.modifiers);
    let mode = if modifiers.shift {
        SelectMode::Extend
    } else if modifiers.command {
        SelectMode::Toggle
    } else {
        SelectMode::Replace
    };

    let store = &state.store;
    let selection = &state.selection;
    let mut clicked = None;

    let mut table = TableBuilder::new(ui)
        .striped(true)
        .sense(egui::Sense::click())
        .cell_layout(Layout::left_to_right(Align::Center))
        .column(Column::exact(48.0));
    for _ in 0..store.column_count() - 1 {
        table = table.column(Column::initial(160.0).resizable(true));
    }
    table = table.column(Column::remainder());

    table
        .header(HEADER_HEIGHT, |mut header| {
            header.col(|ui| {
                ui.strong("#");
            });
            for col in 0..store.column_count() {
                header.col(|ui| {
                    ui.strong(store.column_name(col).unwrap_or_default());
                });
            }
        })
        .body(|body| {
            body.rows(ROW_HEIGHT, store.row_count(), |mut row| {
                let idx = row.index();
                row.set_selected(selection.contains(&idx));

                row.col(|ui| {
                    ui.label(idx.to_string());
                });
                for col in 0..store.column_count() {
                    row.col(|ui| {
                        ui.label(store.cell(idx, col).unwrap_or_default());
                    });
                }

                if row.response().clicked() {
                    clicked = Some(idx);
                }
            });
        });

    if let Some(idx) = clicked {
        state.click_row(idx, mode);
    }
}
