use eframe::egui::{self, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::MeasurementTable;

/// Collapsible raw-data table for the active dataset.
pub fn data_table(ui: &mut Ui, table: &MeasurementTable) {
    egui::CollapsingHeader::new(format!("Show data for: {}", table.name()))
        .id_salt("data_table")
        .default_open(false)
        .show(ui, |ui: &mut Ui| {
            TableBuilder::new(ui)
                .striped(true)
                .max_scroll_height(240.0)
                .column(Column::auto().at_least(60.0))
                .column(Column::auto().at_least(140.0))
                .column(Column::remainder())
                .header(20.0, |mut header| {
                    header.col(|ui| {
                        ui.strong("#");
                    });
                    header.col(|ui| {
                        ui.strong(crate::data::schema::THREADS_COLUMN);
                    });
                    header.col(|ui| {
                        ui.strong(crate::data::schema::TIME_COLUMN);
                    });
                })
                .body(|body| {
                    body.rows(18.0, table.len(), |mut row| {
                        let i = row.index();
                        let timing = table.rows()[i];
                        row.col(|ui| {
                            ui.label((i + 1).to_string());
                        });
                        row.col(|ui| {
                            ui.label(timing.thread_count.to_string());
                        });
                        row.col(|ui| {
                            ui.label(timing.real_time_used.to_string());
                        });
                    });
                });
        });
}
