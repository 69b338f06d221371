mod app;
mod chart;
mod color;
mod config;
mod data;
mod error;
mod pipeline;
mod state;
mod ui;

use anyhow::{Context, Result, anyhow};
use app::RepoSpreadsApp;
use config::Config;
use eframe::egui;
use state::AppState;

fn main() -> Result<()> {
    env_logger::init();

    let config = Config::default();
    let run = pipeline::run(&config)
        .with_context(|| format!("processing {}", config.input_path.display()))?;

    ui::figure::save_figure(&run.figure, &config.output_path, config.figure_size)?;
    println!("Saved figure to {}", config.output_path.display());

    show(AppState::new(run, config.output_path.clone()))
}

/// Open the interactive window; returns when it is closed.
fn show(state: AppState) -> Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1600.0, 1000.0])
            .with_min_inner_size([800.0, 600.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Repo Spreads – Fee Space",
        options,
        Box::new(|_cc| Ok(Box::new(RepoSpreadsApp::new(state)))),
    )
    .map_err(|e| anyhow!("plot window failed: {e}"))
}
