//! Errors raised by the data layer.

use std::path::PathBuf;

use thiserror::Error;

/// Fatal errors while loading rates or deriving spreads.
///
/// Cells that fail numeric conversion are not errors; they load as missing.
#[derive(Error, Debug)]
pub enum Error {
    /// Input file missing or unreadable.
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed CSV framing (bad quoting, invalid UTF-8, ...).
    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    /// A timestamp cell that cannot be placed on the time axis.
    #[error("row {row}: cannot parse timestamp '{value}' in column '{column}'")]
    Parse {
        row: usize,
        column: String,
        value: String,
    },

    /// The table has no header or no columns at all.
    #[error("table has no columns")]
    EmptyHeader,

    /// A column the computation depends on is absent.
    #[error("missing required column: {0}")]
    Schema(String),
}

#[cfg(test)]
impl Error {
    pub fn is_io(&self) -> bool {
        matches!(self, Error::Io { .. })
    }

    pub fn is_parse(&self) -> bool {
        matches!(self, Error::Parse { .. } | Error::EmptyHeader)
    }

    pub fn is_schema(&self) -> bool {
        matches!(self, Error::Schema(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
