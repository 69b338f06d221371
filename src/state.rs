use std::path::PathBuf;

use chrono::NaiveDateTime;

use crate::chart::Figure;
use crate::pipeline::RunOutput;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// What the window shows. Built once from a finished run; never reloaded.
pub struct AppState {
    pub figure: Figure,

    /// Where the static figure was written.
    pub output_path: PathBuf,

    /// Number of observation rows.
    pub observations: usize,

    /// Rate columns in the input, reference included.
    pub rate_columns: usize,

    /// First and last observation.
    pub time_range: Option<(NaiveDateTime, NaiveDateTime)>,
}

impl AppState {
    pub fn new(run: RunOutput, output_path: PathBuf) -> Self {
        Self {
            observations: run.rates.len(),
            rate_columns: run.rates.width(),
            time_range: run.rates.time_range(),
            figure: run.figure,
            output_path,
        }
    }

    /// One-line description of the loaded data for the status bar.
    pub fn summary(&self) -> String {
        match self.time_range {
            Some((first, last)) => format!(
                "{} observations of {} rates, {} to {}",
                self.observations,
                self.rate_columns,
                first.format("%Y-%m-%d"),
                last.format("%Y-%m-%d")
            ),
            None => "no observations".to_string(),
        }
    }

    /// Group columns absent from the data, across all panels.
    pub fn skipped_columns(&self) -> Vec<&str> {
        self.figure
            .panels
            .iter()
            .flat_map(|p| p.skipped.iter().map(String::as_str))
            .collect()
    }
}
