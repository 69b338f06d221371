//! The data workflow behind a run: load → spreads → chart panels.
//!
//! Everything here finishes before anything is drawn, so a fatal error
//! never leaves a partial figure behind.

use crate::chart::{Figure, build_figure};
use crate::config::Config;
use crate::data::loader::load_rate_table;
use crate::data::model::{RateTable, SpreadTable};
use crate::data::spread::compute_spreads;
use crate::error::Result;

/// All computed outputs of a single run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub rates: RateTable,
    pub spreads: SpreadTable,
    pub figure: Figure,
}

pub fn run(config: &Config) -> Result<RunOutput> {
    let rates = load_rate_table(&config.input_path)?;
    if rates.is_empty() {
        log::warn!("{} has no data rows", config.input_path.display());
    }
    let spreads = compute_spreads(&rates, &config.reference_column)?;
    let figure = build_figure(
        &spreads,
        &config.groups,
        config.missing_columns,
        &config.title,
    )?;

    Ok(RunOutput {
        rates,
        spreads,
        figure,
    })
}
