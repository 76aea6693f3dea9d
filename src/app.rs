use eframe::egui::{self, ScrollArea, Ui};

use crate::state::AppState;
use crate::ui::{panels, plot, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct ThreadscopeApp {
    pub state: AppState,
}

impl ThreadscopeApp {
    pub fn new(cc: &eframe::CreationContext<'_>, state: AppState) -> Self {
        let visuals = if state.presentation.dark_mode {
            egui::Visuals::dark()
        } else {
            egui::Visuals::light()
        };
        cc.egui_ctx.set_visuals(visuals);
        Self { state }
    }
}

impl eframe::App for ThreadscopeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: options ----
        egui::SidePanel::left("options_panel")
            .default_width(220.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: data + charts ----
        egui::CentralPanel::default().show(ctx, |ui| {
            ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui: &mut Ui| central(ui, &self.state));
        });
    }
}

fn central(ui: &mut Ui, state: &AppState) {
    panels::header(ui, state);

    let Some(view) = &state.view else {
        let msg = state.error_message.as_deref().unwrap_or("No data loaded.");
        panels::error_notice(ui, msg);
        return;
    };

    table::data_table(ui, view.active());
    ui.add_space(8.0);

    let single = plot::single_chart(view, &state.presentation, &state.colors);
    plot::show_chart(ui, &single, &state.presentation);

    if let Some(comparison) = plot::comparison_chart(view, &state.presentation, &state.colors) {
        ui.add_space(16.0);
        ui.heading("Comparison between both OS-CPU");
        plot::show_chart(ui, &comparison, &state.presentation);
    }
}
