//! Chart preparation shared by the PNG renderer and the interactive window.
//!
//! Turns a [`SpreadTable`] plus the configured column groups into plain
//! point lists, so neither drawing backend touches the table itself.

use chrono::{DateTime, NaiveDateTime};
use palette::Srgb;

use crate::color::ColorMap;
use crate::config::{MissingColumnPolicy, SeriesGroup};
use crate::data::model::SpreadTable;
use crate::error::{Error, Result};

/// One line on a panel. Missing cells break the line, so the points are
/// stored as contiguous segments of `(unix seconds, bps)`.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSeries {
    pub name: String,
    pub color: Srgb<u8>,
    pub segments: Vec<Vec<(f64, f64)>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartPanel {
    pub title: String,
    pub series: Vec<ChartSeries>,
    /// Group columns not found in the spread table.
    pub skipped: Vec<String>,
}

impl ChartPanel {
    /// Value range over all series, widened to include the zero line and
    /// padded by 5%. Non-finite points are ignored.
    pub fn y_range(&self) -> (f64, f64) {
        let (min, max) = self
            .series
            .iter()
            .flat_map(|s| s.segments.iter().flatten())
            .filter(|(_, y)| y.is_finite())
            .fold((0.0f64, 0.0f64), |(lo, hi), &(_, y)| (lo.min(y), hi.max(y)));
        pad_range(min, max, 0.05)
    }
}

/// Everything needed to draw the figure.
#[derive(Debug, Clone, PartialEq)]
pub struct Figure {
    pub title: String,
    pub panels: Vec<ChartPanel>,
    /// Shared time axis of all panels, in unix seconds.
    pub x_range: (f64, f64),
}

/// Build one panel per group, resolving group columns against `spreads`.
pub fn build_figure(
    spreads: &SpreadTable,
    groups: &[SeriesGroup],
    policy: MissingColumnPolicy,
    title: &str,
) -> Result<Figure> {
    let panels = groups
        .iter()
        .map(|group| build_panel(spreads, group, policy))
        .collect::<Result<Vec<_>>>()?;

    Ok(Figure {
        title: title.to_string(),
        panels,
        x_range: time_range(spreads),
    })
}

fn build_panel(
    spreads: &SpreadTable,
    group: &SeriesGroup,
    policy: MissingColumnPolicy,
) -> Result<ChartPanel> {
    let colors = ColorMap::new(&group.columns);
    let mut series = Vec::new();
    let mut skipped = Vec::new();

    for name in &group.columns {
        match spreads.column(name) {
            Some(col) => series.push(ChartSeries {
                name: name.clone(),
                color: colors.color_for(name),
                segments: segments(spreads.index(), &col.values),
            }),
            None if policy == MissingColumnPolicy::Skip => {
                log::debug!("'{}': column {name} not in data, skipped", group.title);
                skipped.push(name.clone());
            }
            None => return Err(Error::Schema(name.clone())),
        }
    }

    if series.is_empty() {
        log::warn!("'{}': none of its columns are in the data", group.title);
    }

    Ok(ChartPanel {
        title: group.title.clone(),
        series,
        skipped,
    })
}

/// Split a column into runs of present values.
pub fn segments(index: &[NaiveDateTime], values: &[Option<f64>]) -> Vec<Vec<(f64, f64)>> {
    let mut out = Vec::new();
    let mut current = Vec::new();
    for (&time, &value) in index.iter().zip(values) {
        match value {
            Some(y) => current.push((to_x(time), y)),
            None if !current.is_empty() => out.push(std::mem::take(&mut current)),
            None => {}
        }
    }
    if !current.is_empty() {
        out.push(current);
    }
    out
}

// ---------------------------------------------------------------------------
// Time axis
// ---------------------------------------------------------------------------

const SECONDS_PER_DAY: f64 = 86_400.0;

pub fn to_x(time: NaiveDateTime) -> f64 {
    time.and_utc().timestamp() as f64
}

pub fn from_x(x: f64) -> Option<NaiveDateTime> {
    DateTime::from_timestamp(x.round() as i64, 0).map(|dt| dt.naive_utc())
}

/// Tick label for the date axis, e.g. `Mar 03`.
pub fn format_date_tick(x: f64) -> String {
    from_x(x)
        .map(|t| t.format("%b %d").to_string())
        .unwrap_or_default()
}

/// Index span in unix seconds; a single row or an empty table is widened
/// by a day on each side.
fn time_range(spreads: &SpreadTable) -> (f64, f64) {
    match spreads.time_range() {
        Some((first, last)) if last > first => (to_x(first), to_x(last)),
        Some((first, _)) => {
            let x = to_x(first);
            (x - SECONDS_PER_DAY, x + SECONDS_PER_DAY)
        }
        None => (0.0, SECONDS_PER_DAY),
    }
}

fn pad_range(min: f64, max: f64, frac: f64) -> (f64, f64) {
    let span = max - min;
    if span <= f64::EPSILON {
        return (min - 1.0, max + 1.0);
    }
    let pad = span * frac;
    (min - pad, max + pad)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::default_groups;
    use crate::data::loader::{load_rate_table_from_reader, parse_timestamp};
    use crate::data::spread::compute_spreads;

    fn spreads(text: &str) -> SpreadTable {
        let rates = load_rate_table_from_reader(text.as_bytes()).unwrap();
        compute_spreads(&rates, "DFF").unwrap()
    }

    fn group(columns: &[&str]) -> Vec<SeriesGroup> {
        vec![SeriesGroup::new("Base Repo Rates", columns)]
    }

    #[test]
    fn absent_columns_are_skipped() {
        let spreads = spreads("time,DFF,GC,2Y\n2025-03-03,4.33,4.35,4.30\n");
        let figure = build_figure(
            &spreads,
            &group(&["GC", "3Y", "2Y"]),
            MissingColumnPolicy::Skip,
            "t",
        )
        .unwrap();

        let panel = &figure.panels[0];
        let names: Vec<_> = panel.series.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["GC", "2Y"]);
        assert_eq!(panel.skipped, vec!["3Y".to_string()]);
    }

    #[test]
    fn absent_columns_fail_under_strict_policy() {
        let spreads = spreads("time,DFF,GC\n2025-03-03,4.33,4.35\n");
        let err = build_figure(&spreads, &group(&["GC", "3Y"]), MissingColumnPolicy::Error, "t")
            .unwrap_err();
        assert!(matches!(err, Error::Schema(ref c) if c == "3Y"));
    }

    #[test]
    fn default_groups_give_four_panels_even_without_data() {
        let spreads = spreads("time,DFF,GC\n2025-03-03,4.33,4.35\n");
        let figure =
            build_figure(&spreads, &default_groups(), MissingColumnPolicy::Skip, "t").unwrap();
        assert_eq!(figure.panels.len(), 4);
        assert_eq!(figure.panels[0].series.len(), 1);
        assert!(figure.panels[3].series.is_empty());
        assert_eq!(figure.panels[3].skipped.len(), 7);
    }

    #[test]
    fn colours_follow_group_position() {
        let spreads = spreads("time,DFF,GC,2Y\n2025-03-03,4.33,4.35,4.30\n");
        let full = build_figure(&spreads, &group(&["GC", "2Y"]), MissingColumnPolicy::Skip, "t")
            .unwrap();
        let gapped = build_figure(
            &spreads,
            &group(&["GC", "3Y", "2Y"]),
            MissingColumnPolicy::Skip,
            "t",
        )
        .unwrap();
        assert_ne!(full.panels[0].series[0].color, full.panels[0].series[1].color);
        assert_eq!(full.panels[0].series[0].color, gapped.panels[0].series[0].color);
    }

    #[test]
    fn missing_cells_break_lines() {
        let index: Vec<_> = ["2025-03-03", "2025-03-04", "2025-03-05", "2025-03-06", "2025-03-07"]
            .iter()
            .map(|s| parse_timestamp(s).unwrap())
            .collect();
        let values = [Some(1.0), Some(2.0), None, None, Some(3.0)];

        let segs = segments(&index, &values);
        assert_eq!(segs.len(), 2);
        assert_eq!(segs[0], vec![(to_x(index[0]), 1.0), (to_x(index[1]), 2.0)]);
        assert_eq!(segs[1], vec![(to_x(index[4]), 3.0)]);

        assert!(segments(&index, &[None; 5]).is_empty());
    }

    #[test]
    fn y_range_includes_zero_line() {
        let spreads = spreads(
            "time,DFF,GC\n\
             2025-03-03,4.33,4.43\n\
             2025-03-04,4.33,4.53\n",
        );
        let figure = build_figure(&spreads, &group(&["GC"]), MissingColumnPolicy::Skip, "t")
            .unwrap();
        let (lo, hi) = figure.panels[0].y_range();
        assert!(lo < 0.0);
        assert!(hi > 20.0);
    }

    #[test]
    fn y_range_ignores_non_finite_points() {
        let panel = ChartPanel {
            title: "overflow".into(),
            series: vec![ChartSeries {
                name: "GC".into(),
                color: Srgb::new(0, 0, 0),
                segments: vec![vec![(0.0, f64::INFINITY), (1.0, 10.0), (2.0, f64::NAN)]],
            }],
            skipped: vec![],
        };
        let (lo, hi) = panel.y_range();
        assert!(lo.is_finite() && hi.is_finite());
        assert!(lo < 0.0 && hi > 10.0);
    }

    #[test]
    fn overflowing_input_still_draws_a_finite_panel() {
        let spreads = spreads(
            "time,DFF,GC\n\
             2025-03-03,-1e307,1e307\n\
             2025-03-04,1,2\n",
        );
        let figure = build_figure(&spreads, &group(&["GC"]), MissingColumnPolicy::Skip, "t")
            .unwrap();
        let (lo, hi) = figure.panels[0].y_range();
        assert!(lo.is_finite() && hi.is_finite());
        assert!(hi > 100.0 && hi < 200.0);
    }

    #[test]
    fn empty_panel_has_usable_ranges() {
        let panel = ChartPanel {
            title: "empty".into(),
            series: vec![],
            skipped: vec![],
        };
        assert_eq!(panel.y_range(), (-1.0, 1.0));

        let spreads = spreads("time,DFF\n2025-03-03,4.33\n");
        let figure = build_figure(&spreads, &[], MissingColumnPolicy::Skip, "t").unwrap();
        let (x0, x1) = figure.x_range;
        assert_eq!(x1 - x0, 2.0 * SECONDS_PER_DAY);
    }

    #[test]
    fn date_ticks_round_trip_the_index() {
        let t = parse_timestamp("2025-03-03").unwrap();
        assert_eq!(from_x(to_x(t)), Some(t));
        assert_eq!(format_date_tick(to_x(t)), "Mar 03");
    }
}
