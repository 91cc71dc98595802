use eframe::egui::{self, Color32, RichText, Ui};
use egui_plot::{Bar, BarChart, Legend, Plot};

use crate::color::BranchColors;
use crate::data::filter::value_label;
use crate::data::stats::Statistics;

const ACCENT: Color32 = Color32::from_rgb(0x22, 0xd3, 0xee);

// ---------------------------------------------------------------------------
// Statistics card
// ---------------------------------------------------------------------------

/// Render totals, the average CGPA and a per-branch bar chart.
pub fn statistics_card(ui: &mut Ui, id: &str, stats: &Statistics, colors: &BranchColors) {
    egui::Frame::group(ui.style()).show(ui, |ui: &mut Ui| {
        ui.label(RichText::new("Statistics").heading().color(ACCENT));

        let Some(summary) = stats.summary() else {
            ui.label(RichText::new("No data available").color(Color32::GRAY));
            return;
        };

        ui.horizontal(|ui: &mut Ui| {
            ui.label(RichText::new("Total Students:").color(ACCENT));
            ui.label(summary.total_count.to_string());
            ui.add_space(16.0);
            ui.label(RichText::new("Average CGPA:").color(ACCENT));
            ui.label(match summary.average_gpa {
                Some(avg) => format!("{avg:.2}"),
                None => "n/a".to_string(),
            });
        });

        // One chart per branch so the legend lists branch names.
        let charts: Vec<BarChart> = summary
            .branch_counts
            .iter()
            .enumerate()
            .map(|(i, (branch, count))| {
                let label = value_label(branch);
                let color = colors.color_for(branch);
                BarChart::new(vec![Bar::new(i as f64, *count as f64)
                    .name(label)
                    .fill(color)
                    .width(0.6)])
                .name(label)
                .color(color)
            })
            .collect();

        Plot::new(id)
            .height(220.0)
            .legend(Legend::default())
            .y_axis_label("Students")
            .show_x(false)
            .allow_drag(false)
            .allow_scroll(false)
            .allow_zoom(false)
            .allow_boxed_zoom(false)
            .show(ui, |plot_ui| {
                for chart in charts {
                    plot_ui.bar_chart(chart);
                }
            });
    });
}
