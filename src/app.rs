use eframe::egui;

use crate::state::AppState;
use crate::ui::{panels, plot};

/// Vertical space reserved per row for the panel title and spacing.
const PANEL_CHROME: f32 = 36.0;
const MIN_PLOT_HEIGHT: f32 = 120.0;

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct RepoSpreadsApp {
    pub state: AppState,
}

impl RepoSpreadsApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for RepoSpreadsApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu + status ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &self.state);
        });

        // ---- Central panel: 2×2 grid of spread plots ----
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.heading(self.state.figure.title.as_str());
            });
            ui.add_space(4.0);

            let panels = &self.state.figure.panels;
            let rows = panels.len().div_ceil(2).max(1);
            let plot_height =
                (ui.available_height() / rows as f32 - PANEL_CHROME).max(MIN_PLOT_HEIGHT);

            for (row, pair) in panels.chunks(2).enumerate() {
                ui.columns(2, |columns| {
                    for (col, panel) in pair.iter().enumerate() {
                        plot::spread_plot(&mut columns[col], panel, row * 2 + col, plot_height);
                    }
                });
            }
        });
    }
}
