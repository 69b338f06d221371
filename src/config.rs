use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Fixed run settings
// ---------------------------------------------------------------------------

pub const INPUT_FILE: &str = "Cantor_BNP_Repo_Market_Data_with_DFF.csv";
pub const OUTPUT_FILE: &str = "repo_rates_fee_space.png";

/// Daily Fed Funds rate, the series every other rate is measured against.
pub const REFERENCE_COLUMN: &str = "DFF";

pub const FIGURE_TITLE: &str = "Repo Market Rates – Fee Space (Spread over Daily Fed Funds Rate)";
pub const Y_AXIS_LABEL: &str = "Spread over DFF (bps)";
pub const X_AXIS_LABEL: &str = "Date";

/// 18 × 12 inches at 150 dpi.
pub const FIGURE_SIZE: (u32, u32) = (2700, 1800);

pub const BASE_COLS: [&str; 8] = ["GC", "2Y", "3Y", "5Y", "7Y", "10Y", "20Y", "30Y"];
pub const O_COLS: [&str; 7] = ["O2Y", "O3Y", "O5Y", "O7Y", "O10Y", "O20Y", "O30Y"];
pub const OO_COLS: [&str; 7] = ["OO2Y", "OO3Y", "OO5Y", "OO7Y", "OO10Y", "OO20Y", "OO30Y"];
pub const OOO_COLS: [&str; 7] = ["OOO2Y", "OOO3Y", "OOO5Y", "OOO7Y", "OOO10Y", "OOO20Y", "OOO30Y"];

// ---------------------------------------------------------------------------
// Column groups
// ---------------------------------------------------------------------------

/// What to do when a group names a column the spread table lacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MissingColumnPolicy {
    /// Leave the series out of its panel.
    #[default]
    Skip,
    /// Fail with a schema error.
    Error,
}

/// One chart panel: a title and the columns drawn in it, in legend order.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesGroup {
    pub title: String,
    pub columns: Vec<String>,
}

impl SeriesGroup {
    pub fn new(title: impl Into<String>, columns: &[&str]) -> Self {
        SeriesGroup {
            title: title.into(),
            columns: columns.iter().map(|c| c.to_string()).collect(),
        }
    }
}

/// Base tenors first, then the O, OO and OOO variants.
pub fn default_groups() -> Vec<SeriesGroup> {
    vec![
        SeriesGroup::new("Base Repo Rates", &BASE_COLS),
        SeriesGroup::new("O-Series Repo Rates", &O_COLS),
        SeriesGroup::new("OO-Series Repo Rates", &OO_COLS),
        SeriesGroup::new("OOO-Series Repo Rates", &OOO_COLS),
    ]
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Config {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub reference_column: String,
    pub groups: Vec<SeriesGroup>,
    pub missing_columns: MissingColumnPolicy,
    /// Output image size in pixels.
    pub figure_size: (u32, u32),
    pub title: String,
}

impl Config {
    /// Input and output live next to each other in `dir`.
    pub fn in_dir(dir: &Path) -> Self {
        Config {
            input_path: dir.join(INPUT_FILE),
            output_path: dir.join(OUTPUT_FILE),
            reference_column: REFERENCE_COLUMN.to_string(),
            groups: default_groups(),
            missing_columns: MissingColumnPolicy::default(),
            figure_size: FIGURE_SIZE,
            title: FIGURE_TITLE.to_string(),
        }
    }
}

impl Default for Config {
    /// Files resolve against the crate directory.
    fn default() -> Self {
        Config::in_dir(Path::new(env!("CARGO_MANIFEST_DIR")))
    }
}
