use anyhow::{Result, anyhow};
use eframe::egui;

use crate::state::AppState;
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct RuntimePlotApp {
    pub state: AppState,
}

impl RuntimePlotApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for RuntimePlotApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: summary bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Central panel: plot ----
        egui::CentralPanel::default().show(ctx, |ui| {
            plot::runtime_plot(ui, &self.state);
        });
    }
}

/// Open the interactive viewer and block until the window is closed.
pub fn show(state: AppState) -> Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1000.0, 650.0])
            .with_min_inner_size([500.0, 300.0]),
        ..Default::default()
    };

    let title = format!("Runtime Plot – {}", state.source.display());
    eframe::run_native(
        &title,
        options,
        Box::new(move |_cc| Ok(Box::new(RuntimePlotApp::new(state)))),
    )
    .map_err(|e| anyhow!("viewer failed: {e}"))
}
