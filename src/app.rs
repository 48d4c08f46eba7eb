use eframe::egui;

use crate::state::AppState;
use crate::ui::{panels, plot, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct ExplorerApp {
    pub state: AppState,
}

impl ExplorerApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl Default for ExplorerApp {
    fn default() -> Self {
        Self::new(AppState::default())
    }
}

impl eframe::App for ExplorerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters + statistics ----
        egui::SidePanel::left("filter_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Bottom panel: survival chart ----
        egui::TopBottomPanel::bottom("survival_panel")
            .resizable(true)
            .default_height(240.0)
            .show(ctx, |ui| {
                plot::survival_chart(ui, &mut self.state);
            });

        // ---- Central panel: filtered rows ----
        egui::CentralPanel::default().show(ctx, |ui| {
            table::passenger_table(ui, &self.state);
        });
    }
}
