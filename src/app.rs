use eframe::egui::{self, Ui};

use crate::state::{AppState, Page};
use crate::ui::{panels, plot, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct GpaDashboardApp {
    pub state: AppState,
}

impl GpaDashboardApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for GpaDashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: page inputs ----
        egui::SidePanel::left("input_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| match self.state.page {
                Page::Dashboard => panels::filter_panel(ui, &mut self.state),
                Page::BulkSearch => panels::bulk_panel(ui, &mut self.state),
            });

        // ---- Central panel: statistics + results ----
        egui::CentralPanel::default().show(ctx, |ui| {
            results(ui, &self.state);
        });
    }
}

fn results(ui: &mut Ui, state: &AppState) {
    let Some(dataset) = &state.dataset else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a roster to get started  (File → Open roster…)");
        });
        return;
    };

    let colors = &state.branch_colors;
    match state.page {
        Page::Dashboard => {
            let view = &state.dashboard_view;
            plot::statistics_card(ui, "dashboard_chart", &view.statistics, colors);
            ui.add_space(8.0);
            table::student_table(ui, dataset, &view.indices, true);
        }
        Page::BulkSearch => {
            if let Some(message) = state.bulk_placeholder() {
                ui.label(message);
                return;
            }
            let view = &state.bulk_view;
            ui.heading("Results");
            plot::statistics_card(ui, "bulk_chart", &view.statistics, colors);
            ui.add_space(8.0);
            table::student_table(ui, dataset, &view.indices, false);
        }
    }
}
