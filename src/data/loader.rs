use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use super::model::{Column, Frame, RateTable};
use crate::error::{Error, Result};

/// Header of the timestamp column. Falls back to the first column when no
/// header carries this name.
pub const TIME_COLUMN: &str = "time";

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%Y/%m/%d %H:%M:%S",
    // Excel's default date-time cell, e.g. `3/3/2025 0:00`.
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%Y%m%d"];

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load a rate table from a CSV file.
pub fn load_rate_table(path: &Path) -> Result<RateTable> {
    let file = File::open(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let table = load_rate_table_from_reader(file)?;
    log::info!(
        "Loaded {} rows x {} rate columns from {}",
        table.len(),
        table.width(),
        path.display()
    );
    Ok(table)
}

/// CSV layout: header row, one timestamp column, any number of rate
/// columns. Rows are sorted by timestamp; rate cells that are not finite
/// numbers (blank, `#DIV/0!`, ...) load as missing.
pub fn load_rate_table_from_reader<R: Read>(reader: R) -> Result<RateTable> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = dedup_headers(reader.headers()?.iter());
    if headers.iter().all(|h| h.is_empty()) {
        return Err(Error::EmptyHeader);
    }

    let time_idx = headers.iter().position(|h| h == TIME_COLUMN).unwrap_or(0);
    let value_cols: Vec<usize> = (0..headers.len()).filter(|&i| i != time_idx).collect();

    let mut rows: Vec<(NaiveDateTime, Vec<Option<f64>>)> = Vec::new();

    for (row_no, result) in reader.records().enumerate() {
        let record = result?;

        let raw_time = record.get(time_idx).unwrap_or("");
        let time = parse_timestamp(raw_time).ok_or_else(|| Error::Parse {
            row: row_no + 1,
            column: headers[time_idx].clone(),
            value: raw_time.to_string(),
        })?;

        let values: Vec<Option<f64>> = value_cols
            .iter()
            .map(|&col_idx| record.get(col_idx).and_then(parse_rate))
            .collect();

        rows.push((time, values));
    }

    // Stable sort, so among equal timestamps file order is kept and the
    // last row wins below.
    rows.sort_by_key(|(time, _)| *time);
    let n_read = rows.len();
    let rows = keep_last_per_timestamp(rows);
    if rows.len() < n_read {
        log::warn!(
            "{} duplicate timestamp row(s) replaced by later rows",
            n_read - rows.len()
        );
    }

    let (index, cells): (Vec<_>, Vec<_>) = rows.into_iter().unzip();
    let columns: Vec<Column> = value_cols
        .iter()
        .enumerate()
        .map(|(pos, &col_idx)| {
            let values = cells.iter().map(|row: &Vec<Option<f64>>| row[pos]).collect();
            Column::new(headers[col_idx].clone(), values)
        })
        .collect();

    let table = RateTable::new(Frame::new(index, columns));
    report_missing(&table);
    Ok(table)
}

fn report_missing(table: &RateTable) {
    log::debug!(
        "rate columns: {}",
        table.column_names().collect::<Vec<_>>().join(", ")
    );
    let mut total = 0;
    for col in table.columns() {
        let n = col.missing_count();
        if n > 0 {
            log::debug!("column '{}': {n} cell(s) loaded as missing", col.name);
        }
        total += n;
    }
    log::info!("{total} cell(s) could not be read as numbers and are missing");
}

// ---------------------------------------------------------------------------
// Cell parsing
// ---------------------------------------------------------------------------

/// Parse a timestamp cell. Date-only values map to midnight.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .or_else(|| DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.naive_utc()))
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

/// Numeric coercion for rate cells: anything but a finite number is missing.
pub fn parse_rate(raw: &str) -> Option<f64> {
    let v = raw.trim().parse::<f64>().ok()?;
    v.is_finite().then_some(v)
}

/// Repeated header names get `.1`, `.2`, ... suffixes so every column stays
/// addressable by name. A suffix already taken by another header is skipped.
fn dedup_headers<'a>(raw: impl Iterator<Item = &'a str>) -> Vec<String> {
    let raw: Vec<&str> = raw.collect();
    let mut taken: HashSet<String> = HashSet::new();
    let mut next_suffix: HashMap<&str, usize> = HashMap::new();
    let mut out = Vec::with_capacity(raw.len());

    for h in raw {
        let name = if taken.contains(h) {
            let n = next_suffix.entry(h).or_insert(1);
            while taken.contains(&format!("{h}.{n}")) {
                *n += 1;
            }
            let name = format!("{h}.{n}");
            *n += 1;
            name
        } else {
            h.to_string()
        };
        taken.insert(name.clone());
        out.push(name);
    }
    out
}

fn keep_last_per_timestamp(
    rows: Vec<(NaiveDateTime, Vec<Option<f64>>)>,
) -> Vec<(NaiveDateTime, Vec<Option<f64>>)> {
    let mut out: Vec<(NaiveDateTime, Vec<Option<f64>>)> = Vec::with_capacity(rows.len());
    for row in rows {
        match out.last_mut() {
            Some(last) if last.0 == row.0 => *last = row,
            _ => out.push(row),
        }
    }
    out
}
