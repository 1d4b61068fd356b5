use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::model::SiteSelection;
use crate::state::{AppState, SLIDER_STEP_KG};

// ---------------------------------------------------------------------------
// Left side panel – controls
// ---------------------------------------------------------------------------

/// Render the left control panel: site dropdown and payload range.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Controls");
    ui.separator();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- Launch site dropdown ----
            ui.strong("Launch Site");
            let mut selection = state.inputs.selection.clone();
            egui::ComboBox::from_id_salt("site_dropdown")
                .selected_text(selection.label())
                .width(ui.available_width())
                .show_ui(ui, |ui: &mut Ui| {
                    ui.selectable_value(&mut selection, SiteSelection::All, "All Sites");
                    for site in state.dataset.sites() {
                        ui.selectable_value(
                            &mut selection,
                            SiteSelection::Site(site.clone()),
                            site,
                        );
                    }
                });
            state.set_selection(selection);
            ui.separator();

            // ---- Payload range ----
            ui.strong("Payload range (Kg):");
            let max = state.slider_max();
            let mut low = state.inputs.payload_low;
            let mut high = state.inputs.payload_high;
            ui.add(
                egui::Slider::new(&mut low, 0.0..=max)
                    .step_by(SLIDER_STEP_KG)
                    .text("min"),
            );
            ui.add(
                egui::Slider::new(&mut high, 0.0..=max)
                    .step_by(SLIDER_STEP_KG)
                    .text("max"),
            );
            state.set_payload_range(low, high);

            if ui.small_button("Reset range").clicked() {
                state.reset_payload_range();
            }
            ui.separator();

            // ---- Summary ----
            let view = &state.view;
            ui.label(format!("{} launches in scatter", view.scatter.points.len()));
            let successes = view
                .scatter
                .points
                .iter()
                .filter(|p| p.outcome.is_success())
                .count();
            ui.label(format!("{successes} successful"));
            if let Some((lo, hi)) = state.dataset.payload_bounds() {
                ui.label(
                    RichText::new(format!("Observed payloads: {lo:.0} – {hi:.0} kg")).weak(),
                );
            }
        });
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
            if ui.button("Export view…").clicked() {
                export_view_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        ui.label(format!(
            "{} launches loaded from {}",
            state.dataset.len(),
            state.source.display()
        ));

        ui.separator();

        if ui
            .selectable_label(state.show_table, "Show rows")
            .clicked()
        {
            state.show_table = !state.show_table;
        }

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open launch records")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        match crate::data::loader::load_file(&path) {
            Ok(dataset) => {
                log::info!(
                    "Loaded {} launches across sites {:?}",
                    dataset.len(),
                    dataset.sites()
                );
                state.set_dataset(dataset, &path);
            }
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}

pub fn export_view_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Export chart data")
        .add_filter("JSON", &["json"])
        .set_file_name("dashboard_view.json")
        .save_file();

    if let Some(path) = file {
        match crate::export::write_view(&path, &state.view) {
            Ok(()) => log::info!("Exported view to {}", path.display()),
            Err(e) => {
                log::error!("Failed to export view: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}
