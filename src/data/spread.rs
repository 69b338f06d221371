use super::model::{Column, Frame, RateTable, SpreadTable};
use crate::error::{Error, Result};

/// 1 percentage point = 100 basis points.
pub const BPS_PER_PERCENTAGE_POINT: f64 = 100.0;

/// Subtract the reference column from every other column, row by row, and
/// express the result in basis points.
///
/// Missing operands give a missing spread, as does a difference too large to
/// represent. Fails with [`Error::Schema`] when
/// `reference` is not a column of `rates`.
pub fn compute_spreads(rates: &RateTable, reference: &str) -> Result<SpreadTable> {
    let reference_values = &rates
        .column(reference)
        .ok_or_else(|| Error::Schema(reference.to_string()))?
        .values;

    let columns: Vec<Column> = rates
        .columns()
        .iter()
        .filter(|col| col.name != reference)
        .map(|col| {
            let values = col
                .values
                .iter()
                .zip(reference_values)
                .map(|(&value, &reference)| spread_bps(value, reference))
                .collect();
            Column::new(col.name.clone(), values)
        })
        .collect();

    log::info!(
        "Computed {} spread series over {} ({} rows)",
        columns.len(),
        reference,
        rates.len()
    );

    Ok(SpreadTable::new(Frame::new(rates.index().to_vec(), columns)))
}

fn spread_bps(value: Option<f64>, reference: Option<f64>) -> Option<f64> {
    let spread = BPS_PER_PERCENTAGE_POINT * (value? - reference?);
    spread.is_finite().then_some(spread)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::load_rate_table_from_reader;

    const EPS: f64 = 1e-9;

    fn rates(text: &str) -> RateTable {
        load_rate_table_from_reader(text.as_bytes()).unwrap()
    }

    fn assert_close(actual: Option<f64>, expected: f64) {
        let actual = actual.expect("expected a present value");
        assert!(
            (actual - expected).abs() < EPS,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn spread_in_basis_points_and_bad_cell_missing() {
        let rates = rates(
            "time,DFF,GC\n\
             2025-03-03,1.50,1.60\n\
             2025-03-04,1.55,bad\n",
        );
        let spreads = compute_spreads(&rates, "DFF").unwrap();

        let gc = &spreads.column("GC").unwrap().values;
        assert_eq!(gc.len(), 2);
        assert_close(gc[0], 10.0);
        assert_eq!(gc[1], None);
    }

    #[test]
    fn missing_reference_blanks_the_whole_row() {
        let rates = rates(
            "time,DFF,GC,2Y,5Y\n\
             2025-03-03,4.33,4.35,4.30,#DIV/0!\n\
             2025-03-04,,4.35,4.30,4.28\n",
        );
        let spreads = compute_spreads(&rates, "DFF").unwrap();

        for col in spreads.columns() {
            assert_eq!(col.values[1], None, "column {}", col.name);
        }
        assert_close(spreads.value("GC", 0), 2.0);
        assert_close(spreads.value("2Y", 0), -3.0);
        assert_eq!(spreads.value("5Y", 0), None);
    }

    #[test]
    fn missing_iff_either_operand_missing() {
        let rates = rates(
            "time,DFF,GC\n\
             2025-03-03,4.33,4.35\n\
             2025-03-04,4.33,\n\
             2025-03-05,,4.35\n\
             2025-03-06,,\n",
        );
        let spreads = compute_spreads(&rates, "DFF").unwrap();
        let reference = &rates.column("DFF").unwrap().values;
        let gc = &rates.column("GC").unwrap().values;

        for (row, spread) in spreads.column("GC").unwrap().values.iter().enumerate() {
            assert_eq!(
                spread.is_none(),
                gc[row].is_none() || reference[row].is_none(),
                "row {row}"
            );
        }
    }

    #[test]
    fn reference_column_dropped_and_index_kept() {
        let rates = rates(
            "time,GC,DFF,2Y\n\
             2025-03-04,4.35,4.33,4.30\n\
             2025-03-03,4.36,4.32,4.31\n",
        );
        let spreads = compute_spreads(&rates, "DFF").unwrap();

        assert_eq!(spreads.column_names().collect::<Vec<_>>(), vec!["GC", "2Y"]);
        assert_eq!(spreads.width(), rates.width() - 1);
        assert_eq!(spreads.index(), rates.index());
        assert!(spreads.column("DFF").is_none());
    }

    #[test]
    fn matches_formula_cell_by_cell() {
        let rates = rates(
            "time,DFF,GC,O5Y\n\
             2025-03-03,4.33,4.41,3.90\n\
             2025-03-04,4.32,4.29,\n\
             2025-03-05,4.35,4.36,4.01\n",
        );
        let spreads = compute_spreads(&rates, "DFF").unwrap();

        for name in ["GC", "O5Y"] {
            for row in 0..rates.len() {
                let expected = match (rates.value(name, row), rates.value("DFF", row)) {
                    (Some(v), Some(r)) => Some(100.0 * (v - r)),
                    _ => None,
                };
                assert_eq!(spreads.value(name, row), expected, "{name} row {row}");
            }
        }
    }

    #[test]
    fn overflowing_spread_is_missing() {
        let rates = rates(
            "time,DFF,GC\n\
             2025-03-03,-1e307,1e307\n\
             2025-03-04,1,2\n",
        );
        let spreads = compute_spreads(&rates, "DFF").unwrap();

        assert_eq!(spreads.value("GC", 0), None);
        assert_close(spreads.value("GC", 1), 100.0);
        let mut cells = spreads.columns().iter().flat_map(|c| &c.values).flatten();
        assert!(cells.all(|v| v.is_finite()));
    }

    #[test]
    fn recomputation_is_identical() {
        let rates = rates("time,DFF,GC\n2025-03-03,4.33,4.41\n2025-03-04,4.32,x\n");
        let first = compute_spreads(&rates, "DFF").unwrap();
        let second = compute_spreads(&rates, "DFF").unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn absent_reference_is_a_schema_error() {
        let rates = rates("time,GC,2Y\n2025-03-03,4.35,4.30\n");
        let err = compute_spreads(&rates, "DFF").unwrap_err();
        assert!(err.is_schema());
        assert_eq!(err.to_string(), "missing required column: DFF");
    }

    #[test]
    fn reference_only_table_gives_no_spreads() {
        let rates = rates("time,DFF\n2025-03-03,4.33\n");
        let spreads = compute_spreads(&rates, "DFF").unwrap();
        assert_eq!(spreads.width(), 0);
        assert_eq!(spreads.len(), 1);
    }
}
