use eframe::egui::{self, Color32, Ui};
use egui_plot::{Bar, BarChart, Legend, Plot};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Survival rate chart (bottom panel)
// ---------------------------------------------------------------------------

/// Render the grouping selector and one bar per group.
pub fn survival_chart(ui: &mut Ui, state: &mut AppState) {
    if state.table.is_none() {
        return;
    }

    ui.horizontal(|ui: &mut Ui| {
        ui.strong("Survival rate by");
        let current = state.group_column.clone();
        let mut chosen = None;
        egui::ComboBox::from_id_salt("group_by")
            .selected_text(&current)
            .show_ui(ui, |ui: &mut Ui| {
                for col in state.group_options() {
                    if ui.selectable_label(current == col, &col).clicked() {
                        chosen = Some(col);
                    }
                }
            });
        if let Some(col) = chosen {
            state.set_group_column(col);
        }
    });

    Plot::new("survival_plot")
        .legend(Legend::default())
        .y_axis_label("Survival rate")
        .include_y(0.0)
        .include_y(1.0)
        .allow_drag(false)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            for (i, group) in state.groups.iter().enumerate() {
                let color = state
                    .color_map
                    .as_ref()
                    .map(|cm| cm.color_for(&group.group))
                    .unwrap_or(Color32::LIGHT_BLUE);
                let label = format!("{} ({}/{})", group.group, group.survived, group.total);

                let bar = Bar::new(i as f64, group.survival_rate)
                    .name(&label)
                    .fill(color)
                    .width(0.6);
                plot_ui.bar_chart(BarChart::new(vec![bar]).name(&label).color(color));
            }
        });
}
