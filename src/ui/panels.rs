use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::filter::{Selection, value_label};
use crate::data::sort::SortOrder;
use crate::data::stats::GpaAveraging;
use crate::state::{AppState, Page};

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open roster…").clicked() {
                open_roster_dialog(state);
                ui.close_menu();
            }
            if ui.button("Reload").clicked() {
                let source = state.config.source.clone();
                state.load_source(&source);
                ui.close_menu();
            }
        });

        ui.separator();
        ui.selectable_value(&mut state.page, Page::Dashboard, "Dashboard");
        ui.selectable_value(&mut state.page, Page::BulkSearch, "Bulk Search");
        ui.separator();

        match &state.dataset {
            Some(ds) => {
                let visible = match state.page {
                    Page::Dashboard => state.dashboard_view.indices.len(),
                    Page::BulkSearch => state.bulk_view.indices.len(),
                };
                ui.label(format!("{} students loaded, {visible} shown", ds.len()));
            }
            None => {
                ui.label("No roster loaded");
            }
        }

        ui.separator();

        let mut exclude = state.config.gpa_average == GpaAveraging::ExcludeUnknown;
        if ui
            .checkbox(&mut exclude, "Skip unknown CGPA in average")
            .changed()
        {
            state.set_gpa_averaging(if exclude {
                GpaAveraging::ExcludeUnknown
            } else {
                GpaAveraging::ZeroSubstitute
            });
        }

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::YELLOW));
        }
    });
}

// ---------------------------------------------------------------------------
// Dashboard filter panel
// ---------------------------------------------------------------------------

/// Render the dashboard filters. Any change re-runs the dashboard reducer.
pub fn filter_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    let Some(dataset) = &state.dataset else {
        ui.label("No dataset loaded.");
        return;
    };
    let branches = dataset.branches.clone();
    let semesters = dataset.semesters.clone();

    let mut changed = false;

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.strong("Name");
            changed |= ui
                .add(
                    egui::TextEdit::singleline(&mut state.dashboard.filters.name_query)
                        .hint_text("Search name..."),
                )
                .changed();
            ui.add_space(6.0);

            ui.strong("Branch");
            changed |= selection_combo(
                ui,
                "branch_filter",
                &mut state.dashboard.filters.branch,
                &branches,
                "All Branches",
            );
            ui.add_space(6.0);

            ui.strong("Semester");
            changed |= selection_combo(
                ui,
                "semester_filter",
                &mut state.dashboard.filters.semester,
                &semesters,
                "All Semesters",
            );
            ui.add_space(6.0);

            ui.strong("CGPA range");
            let mut bounds_changed = false;
            ui.horizontal(|ui: &mut Ui| {
                bounds_changed |= ui
                    .add(
                        egui::TextEdit::singleline(&mut state.gpa_min_text)
                            .hint_text("Min")
                            .desired_width(60.0),
                    )
                    .changed();
                bounds_changed |= ui
                    .add(
                        egui::TextEdit::singleline(&mut state.gpa_max_text)
                            .hint_text("Max")
                            .desired_width(60.0),
                    )
                    .changed();
            });
            ui.add_space(6.0);

            ui.strong("Sort by");
            let before = state.dashboard.sort;
            egui::ComboBox::from_id_salt("sort_by")
                .selected_text(state.dashboard.sort.label())
                .show_ui(ui, |ui: &mut Ui| {
                    for order in SortOrder::ALL {
                        ui.selectable_value(&mut state.dashboard.sort, order, order.label());
                    }
                });
            changed |= before != state.dashboard.sort;

            ui.add_space(6.0);
            if ui
                .add_enabled(!state.dashboard.filters.is_empty(), egui::Button::new("Reset filters"))
                .clicked()
            {
                state.dashboard.filters = Default::default();
                state.gpa_min_text.clear();
                state.gpa_max_text.clear();
                changed = true;
            }

            ui.separator();

            egui::CollapsingHeader::new(RichText::new("Name list").strong())
                .default_open(false)
                .show(ui, |ui: &mut Ui| {
                    ui.add(
                        egui::TextEdit::multiline(&mut state.dashboard_names_text)
                            .hint_text("Names separated by commas or new lines")
                            .desired_rows(4),
                    );
                    ui.horizontal(|ui: &mut Ui| {
                        if ui.button("Find").clicked() {
                            state.search_dashboard_names();
                        }
                        if ui.button("Clear").clicked() {
                            state.clear_dashboard_names();
                        }
                    });
                    if let Some(names) = &state.dashboard.names {
                        ui.label(format!("{} names active", names.len()));
                    }
                });

            if bounds_changed {
                state.apply_gpa_bounds();
            }
        });

    if changed {
        state.refresh_dashboard();
    }
}

// ---------------------------------------------------------------------------
// Bulk search panel
// ---------------------------------------------------------------------------

/// Render the bulk search inputs: pasted names or an uploaded list file.
pub fn bulk_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Bulk Student Search");
    ui.separator();

    let Some(dataset) = &state.dataset else {
        ui.label("No dataset loaded.");
        return;
    };
    let semesters = dataset.semesters.clone();

    ui.strong("Enter Names");
    ui.add(
        egui::TextEdit::multiline(&mut state.bulk_names_text)
            .hint_text("Enter names separated by commas or new lines")
            .desired_rows(6),
    );
    if ui.button("Find Students").clicked() {
        state.search_bulk_text();
    }

    ui.add_space(8.0);
    ui.strong("Upload CSV of Names");
    if ui.button("Choose file…").clicked() {
        if let Some(path) = rfd::FileDialog::new()
            .set_title("Open name list")
            .add_filter("CSV", &["csv", "txt"])
            .pick_file()
        {
            state.search_bulk_file(&path);
        }
    }

    ui.add_space(8.0);
    ui.strong("Semester");
    if selection_combo(
        ui,
        "bulk_semester",
        &mut state.bulk.semester,
        &semesters,
        "All Semesters",
    ) {
        state.refresh_bulk();
    }
}

/// A dropdown over `All` plus each value. Returns whether the choice changed.
fn selection_combo(
    ui: &mut Ui,
    id: &str,
    selection: &mut Selection,
    values: &[String],
    all_label: &str,
) -> bool {
    let before = selection.clone();
    let selected_text = selection.label(all_label).to_string();
    egui::ComboBox::from_id_salt(id)
        .selected_text(selected_text)
        .show_ui(ui, |ui: &mut Ui| {
            ui.selectable_value(selection, Selection::All, all_label);
            for value in values {
                ui.selectable_value(selection, Selection::Only(value.clone()), value_label(value));
            }
        });
    before != *selection
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_roster_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open student roster")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.load_source(&path);
        state.config.source = path;
    }
}
