use eframe::egui::{self, Ui};
use egui_extras::{Column, TableBuilder};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Passenger table (central panel)
// ---------------------------------------------------------------------------

/// Render the rows passing the current filters.
pub fn passenger_table(ui: &mut Ui, state: &AppState) {
    if state.table.is_none() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a file to explore passengers  (File → Open…)");
        });
        return;
    }

    let table = &state.filtered;
    ui.label(format!("Records found: {}", table.len()));
    ui.separator();

    let columns = &table.column_names;
    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
        .columns(Column::auto().at_least(40.0), columns.len())
        .header(20.0, |mut header| {
            for col in columns {
                header.col(|ui: &mut Ui| {
                    ui.strong(col);
                });
            }
        })
        .body(|body| {
            body.rows(18.0, table.len(), |mut row| {
                let record = &table.rows[row.index()];
                for col in columns {
                    row.col(|ui: &mut Ui| {
                        ui.label(record.get(col).to_string());
                    });
                }
            });
        });
}
