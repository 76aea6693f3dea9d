use eframe::egui::{self, Color32, RichText, Ui};

use crate::data::ConfigLabel;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – label / comparison controls
// ---------------------------------------------------------------------------

/// Render the left options panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Options");
    ui.separator();

    ui.strong("Select OS-CPU:");
    let mut selected = state.context.selected_label;
    for label in ConfigLabel::ALL {
        let text = RichText::new(label.table_name()).color(state.colors.color_for(label));
        ui.radio_value(&mut selected, label, text);
    }
    state.select_label(selected);

    ui.add_space(8.0);
    let mut comparison = state.context.comparison_enabled;
    ui.checkbox(&mut comparison, "Compare both OS-CPU");
    state.set_comparison(comparison);

    ui.add_space(12.0);
    ui.separator();
    ui.label(RichText::new(&state.presentation.tip).italics());
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
            if ui.button("Reload").clicked() {
                state.force_reload();
                ui.close_menu();
            }
        });

        ui.separator();
        ui.label(state.source.display().to_string());

        if let Some(session) = &state.session {
            ui.separator();
            let counts: Vec<String> = session
                .both_datasets()
                .iter()
                .map(|(label, table)| format!("{label}: {} rows", table.len()))
                .collect();
            ui.label(counts.join(", "));
        }
    });
}

/// Page header: title and description.
pub fn header(ui: &mut Ui, state: &AppState) {
    ui.heading(state.presentation.title.as_str());
    ui.label(state.presentation.description.as_str());
    ui.separator();
}

/// Shown instead of the charts when the last pass failed.
pub fn error_notice(ui: &mut Ui, message: &str) {
    ui.add_space(24.0);
    ui.vertical_centered(|ui: &mut Ui| {
        ui.label(RichText::new(message).color(Color32::RED).strong());
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open benchmark data")
        .add_filter(
            "Supported files",
            &["xlsx", "xlsm", "xlsb", "xls", "ods", "json", "csv", "parquet", "pq"],
        )
        .add_filter("Workbooks", &["xlsx", "xlsm", "xlsb", "xls", "ods"])
        .add_filter("JSON", &["json"])
        .add_filter("CSV", &["csv"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        log::info!("Opening {}", path.display());
        state.open_source(path);
    }
}
