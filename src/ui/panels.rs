use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::state::AppState;
use crate::ui::format;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets and statistics
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    if let Some(path) = &state.banner {
        let uri = format!("file://{}", path.display());
        ui.vertical_centered(|ui: &mut Ui| {
            ui.add(
                egui::Image::new(uri)
                    .max_width(ui.available_width() * 0.9)
                    .max_height(140.0)
                    .rounding(4.0),
            );
        });
        ui.add_space(4.0);
    }

    ui.heading("Filters");
    ui.separator();

    if state.table.is_none() {
        ui.label("No dataset loaded.");
        return;
    }

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            sex_filter(ui, state);
            survived_filter(ui, state);
            ui.separator();
            class_filter(ui, state);
            ui.separator();
            fare_filter(ui, state);
            ui.separator();

            if ui.button("Reset filters").clicked() {
                state.reset_filters();
            }

            ui.add_space(8.0);
            ui.heading("Statistics");
            ui.separator();
            statistics(ui, state);
        });
}

fn sex_filter(ui: &mut Ui, state: &mut AppState) {
    ui.strong("Sex");
    let mut sex = state.criteria.sex.clone();
    egui::ComboBox::from_id_salt("sex_filter")
        .selected_text(sex.as_deref().unwrap_or("All"))
        .show_ui(ui, |ui: &mut Ui| {
            ui.selectable_value(&mut sex, None, "All");
            for option in state.sex_options() {
                ui.selectable_value(&mut sex, Some(option.clone()), option);
            }
        });
    if sex != state.criteria.sex {
        state.set_sex(sex);
    }
}

fn survived_filter(ui: &mut Ui, state: &mut AppState) {
    ui.strong("Survived");
    let mut survived = state.criteria.survived;
    egui::ComboBox::from_id_salt("survived_filter")
        .selected_text(format::survived_label(survived))
        .show_ui(ui, |ui: &mut Ui| {
            for option in [None, Some(1), Some(0)] {
                ui.selectable_value(&mut survived, option, format::survived_label(option));
            }
        });
    if survived != state.criteria.survived {
        state.set_survived(survived);
    }
}

fn class_filter(ui: &mut Ui, state: &mut AppState) {
    let options = state.class_options();
    let n_selected = state.criteria.pclass.len();
    ui.strong(format!("Class  ({n_selected}/{})", options.len()));
    ui.horizontal_wrapped(|ui: &mut Ui| {
        for class in options {
            let mut checked = state.criteria.pclass.contains(&class);
            if ui.checkbox(&mut checked, class.to_string()).changed() {
                state.toggle_class(class);
            }
        }
    });
    if n_selected == 0 {
        ui.label(RichText::new("No class checked: all classes shown").weak());
    }
}

fn fare_filter(ui: &mut Ui, state: &mut AppState) {
    ui.strong("Fare");
    let (Some((lo, hi)), Some(range)) = (state.fare_bounds(), state.criteria.fare_range) else {
        ui.label("No fare data.");
        return;
    };

    let (mut min, mut max) = (range.min, range.max);
    let min_changed = ui
        .add(egui::Slider::new(&mut min, lo..=hi).text("from"))
        .changed();
    let max_changed = ui
        .add(egui::Slider::new(&mut max, lo..=hi).text("to"))
        .changed();
    if min_changed || max_changed {
        state.set_fare_range(min.min(max), max.max(min));
    }
}

fn statistics(ui: &mut Ui, state: &AppState) {
    let summary = &state.summary;
    ui.label(format::total_count(summary));
    if let Some(text) = format::average_fare(summary) {
        ui.label(text);
    }
    if let Some(text) = format::average_age(summary) {
        ui.label(text);
    }
}

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

        if let (Some(table), Some(source)) = (&state.table, &state.source) {
            ui.label(format!(
                "{}: {} passengers, {} shown",
                source.display(),
                table.len(),
                state.filtered.len()
            ));
        }

        for msg in [&state.status_message, &state.group_error].into_iter().flatten() {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open passenger data")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.load_path(&path);
    }
}
