use eframe::egui::Ui;
use egui_plot::{Legend, Line, Plot, PlotPoints, Points};

use crate::color::series_color;
use crate::data::model::PlotStyle;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Measurement plot (central panel)
// ---------------------------------------------------------------------------

/// Render the current chart in the central panel.
pub fn measurement_plot(ui: &mut Ui, state: &AppState) {
    let plot = match (&state.log, &state.plot) {
        (None, _) => {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.heading("Open a measurement log to begin  (File → Open…)");
            });
            return;
        }
        (Some(_), None) => {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.heading("Choose a chart in the side panel");
            });
            return;
        }
        (Some(_), Some(plot)) => plot,
    };

    ui.heading(&plot.title);

    let count = plot.series.len();
    Plot::new("measurement_plot")
        .legend(Legend::default())
        .x_axis_label(plot.x_label.as_str())
        .y_axis_label(plot.y_label.as_str())
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for (idx, series) in plot.series.iter().enumerate() {
                let color = series_color(idx, count);
                let points = PlotPoints::from(series.points.clone());
                match plot.style {
                    PlotStyle::Line => {
                        plot_ui.line(Line::new(points).name(&series.name).color(color).width(1.5));
                    }
                    PlotStyle::Stem => {
                        plot_ui.points(
                            Points::new(points)
                                .stems(0.0_f32)
                                .radius(4.0_f32)
                                .name(&series.name)
                                .color(color),
                        );
                    }
                }
            }
        });
}
