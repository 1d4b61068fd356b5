use eframe::egui::{self, Ui};

use crate::state::AppState;
use crate::ui::{charts, panels};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct DashboardApp {
    pub state: AppState,
}

impl DashboardApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: controls ----
        egui::SidePanel::left("control_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Bottom panel: scatter rows ----
        if self.state.show_table {
            egui::TopBottomPanel::bottom("rows_panel")
                .resizable(true)
                .show(ctx, |ui| {
                    charts::records_table(ui, &self.state);
                });
        }

        // ---- Central panel: pie above scatter ----
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui: &mut Ui| {
                ui.heading(
                    egui::RichText::new("SpaceX Launch Records Dashboard")
                        .size(28.0)
                        .color(egui::Color32::from_rgb(0x50, 0x3d, 0x36)),
                );
            });
            ui.separator();

            let chart_height = ((ui.available_height() - 80.0) / 2.0).max(160.0);
            charts::success_pie(ui, &self.state, chart_height);
            ui.separator();
            charts::payload_scatter(ui, &self.state, chart_height);
        });
    }
}
