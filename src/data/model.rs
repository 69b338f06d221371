use std::ops::Deref;

use chrono::NaiveDateTime;

// ---------------------------------------------------------------------------
// Column – one named numeric series
// ---------------------------------------------------------------------------

/// A named series of cells aligned with the owning frame's index.
/// `None` is an explicit "missing" cell; it is never read as zero.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub values: Vec<Option<f64>>,
}

impl Column {
    pub fn new(name: impl Into<String>, values: Vec<Option<f64>>) -> Self {
        Column {
            name: name.into(),
            values,
        }
    }

    /// Number of missing cells.
    pub fn missing_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_none()).count()
    }
}

// ---------------------------------------------------------------------------
// Frame – time index plus ordered named columns
// ---------------------------------------------------------------------------

/// A table keyed by a timestamp index with one numeric column per series.
///
/// Every column holds exactly one cell per index entry. Frames are built once
/// and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Frame {
    index: Vec<NaiveDateTime>,
    columns: Vec<Column>,
}

impl Frame {
    /// Panics if a column's length differs from the index length.
    pub fn new(index: Vec<NaiveDateTime>, columns: Vec<Column>) -> Self {
        for col in &columns {
            assert_eq!(
                col.values.len(),
                index.len(),
                "column '{}' does not match the index length",
                col.name
            );
        }
        Frame { index, columns }
    }

    pub fn index(&self) -> &[NaiveDateTime] {
        &self.index
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Number of value columns (the index is not counted).
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    /// First and last timestamps.
    pub fn time_range(&self) -> Option<(NaiveDateTime, NaiveDateTime)> {
        Some((*self.index.first()?, *self.index.last()?))
    }
}

#[cfg(test)]
impl Frame {
    /// Cell lookup; `None` for a missing cell or an unknown column/row.
    pub fn value(&self, column: &str, row: usize) -> Option<f64> {
        self.column(column)?.values.get(row).copied().flatten()
    }
}

// ---------------------------------------------------------------------------
// RateTable / SpreadTable
// ---------------------------------------------------------------------------

/// Quoted rates in percentage points, as loaded from the source file.
/// The index is unique and strictly ascending.
#[derive(Debug, Clone, PartialEq)]
pub struct RateTable(Frame);

impl RateTable {
    pub fn new(frame: Frame) -> Self {
        RateTable(frame)
    }
}

impl Deref for RateTable {
    type Target = Frame;

    fn deref(&self) -> &Frame {
        &self.0
    }
}

/// Spreads over the reference rate in basis points. Shares the index of
/// the `RateTable` it was derived from and lacks the reference column.
#[derive(Debug, Clone, PartialEq)]
pub struct SpreadTable(Frame);

impl SpreadTable {
    pub fn new(frame: Frame) -> Self {
        SpreadTable(frame)
    }
}

impl Deref for SpreadTable {
    type Target = Frame;

    fn deref(&self) -> &Frame {
        &self.0
    }
}
