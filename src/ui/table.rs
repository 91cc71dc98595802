use eframe::egui::{self, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::model::{StudentDataset, StudentRecord};

const ROW_HEIGHT: f32 = 20.0;

// ---------------------------------------------------------------------------
// Result table
// ---------------------------------------------------------------------------

/// Render the records of a view. `serial` adds a 1-based S.No. column.
pub fn student_table(ui: &mut Ui, dataset: &StudentDataset, indices: &[usize], serial: bool) {
    let rows: Vec<&StudentRecord> = dataset.view(indices).collect();

    let mut table = TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .cell_layout(egui::Layout::left_to_right(egui::Align::Center));
    if serial {
        table = table.column(Column::auto().at_least(40.0));
    }
    table
        .column(Column::initial(220.0).at_least(100.0).clip(true))
        .column(Column::initial(160.0).at_least(80.0).clip(true))
        .column(Column::auto().at_least(70.0))
        .column(Column::remainder().at_least(60.0))
        .header(ROW_HEIGHT, |mut header| {
            if serial {
                header.col(|ui| {
                    ui.strong("S.No.");
                });
            }
            for title in ["Name", "Branch", "Semester", "CGPA"] {
                header.col(|ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|body| {
            body.rows(ROW_HEIGHT, rows.len(), |mut row| {
                let n = row.index();
                let Some(record) = rows.get(n) else {
                    return;
                };
                if serial {
                    row.col(|ui| {
                        ui.label((n + 1).to_string());
                    });
                }
                row.col(|ui| {
                    ui.label(record.name());
                });
                row.col(|ui| {
                    ui.label(record.branch());
                });
                row.col(|ui| {
                    ui.label(record.semester());
                });
                row.col(|ui| {
                    ui.label(format_gpa(record.gpa()));
                });
            });
        });
}

/// Table text for a GPA; unknown values show as "n/a".
pub fn format_gpa(gpa: f64) -> String {
    if gpa.is_nan() {
        "n/a".to_string()
    } else {
        format!("{gpa}")
    }
}
