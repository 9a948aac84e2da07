use eframe::egui::{self, Color32, RichText, Ui};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the summary / toolbar row.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.label(RichText::new(state.summary()).strong());

        if let Some(path) = &state.image_path {
            ui.separator();
            ui.label(format!("saved to {}", path.display()));
        }

        ui.separator();

        if ui
            .selectable_label(state.show_markers, "Markers")
            .clicked()
        {
            state.show_markers = !state.show_markers;
        }

        if state.skipped > 0 {
            ui.separator();
            ui.label(
                RichText::new(format!("{} records skipped", state.skipped))
                    .color(Color32::YELLOW),
            );
        }

        if state.mixed_units {
            ui.separator();
            ui.label(
                RichText::new(format!("mixed units: {}", state.units_seen.join(", ")))
                    .color(Color32::RED),
            );
        }
    });
}
