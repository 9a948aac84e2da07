use eframe::egui::{Color32, Ui};
use egui_plot::{Legend, Line, Plot, PlotPoints, Points};

use crate::state::AppState;

const LINE_COLOUR: Color32 = Color32::from_rgb(31, 119, 180);

// ---------------------------------------------------------------------------
// Runtime plot (central panel)
// ---------------------------------------------------------------------------

/// Render size vs. time in the central panel.
pub fn runtime_plot(ui: &mut Ui, state: &AppState) {
    let series = &state.series;
    if series.is_empty() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("No samples to plot");
        });
        return;
    }

    let y_label = format!("Time ({})", series.unit);

    Plot::new("runtime_plot")
        .legend(Legend::default())
        .x_axis_label("Sample Size")
        .y_axis_label(y_label)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            let points: PlotPoints = series.points().map(|(x, y)| [x, y]).collect();
            plot_ui.line(
                Line::new(points)
                    .name("Execution Time")
                    .color(LINE_COLOUR)
                    .width(2.0),
            );

            if state.show_markers {
                let markers: PlotPoints = series.points().map(|(x, y)| [x, y]).collect();
                plot_ui.points(Points::new(markers).radius(3.5).color(LINE_COLOUR));
            }
        });
}
