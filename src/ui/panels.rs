use eframe::egui::{self, Color32, RichText, Ui};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / status bar.
pub fn top_bar(ui: &mut Ui, state: &AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Quit").clicked() {
                ui.ctx().send_viewport_cmd(egui::ViewportCommand::Close);
            }
        });

        ui.separator();
        ui.label(state.summary());

        ui.separator();
        ui.label(format!("Saved: {}", state.output_path.display()));

        let skipped = state.skipped_columns();
        if !skipped.is_empty() {
            ui.separator();
            ui.label(
                RichText::new(format!("Not in data: {}", skipped.join(", ")))
                    .color(Color32::DARK_GRAY),
            );
        }
    });
}
