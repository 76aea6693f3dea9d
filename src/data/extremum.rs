use super::error::DataError;
use super::model::{MeasurementTable, ThreadTiming};

/// Row with the smallest `real_time_used`, or `None` for no rows.
///
/// Ties go to the earliest row.
pub fn minimum(rows: &[ThreadTiming]) -> Option<ThreadTiming> {
    let mut best: Option<&ThreadTiming> = None;
    for row in rows {
        match best {
            Some(b) if row.real_time_used >= b.real_time_used => {}
            _ => best = Some(row),
        }
    }
    best.copied()
}

/// The minimum-time operating point of a table.
pub fn find_minimum(table: &MeasurementTable) -> Result<ThreadTiming, DataError> {
    minimum(table.rows()).ok_or_else(|| DataError::EmptyTable(table.name().to_string()))
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn table(rows: &[(u32, f64)]) -> MeasurementTable {
        MeasurementTable::new(
            "t",
            rows.iter().map(|&(t, s)| ThreadTiming::new(t, s)).collect(),
        )
    }

    #[test]
    fn picks_smallest_time() {
        let t = table(&[(1, 10.2), (2, 5.6), (4, 3.1), (8, 3.4)]);
        assert_eq!(find_minimum(&t).unwrap(), ThreadTiming::new(4, 3.1));
    }

    #[test]
    fn ties_resolve_to_first_row() {
        let t = table(&[(2, 1.0), (4, 1.0), (8, 3.0)]);
        assert_eq!(find_minimum(&t).unwrap(), ThreadTiming::new(2, 1.0));
    }

    #[test]
    fn tie_on_later_minimum_keeps_first_of_the_tied_rows() {
        let t = table(&[(1, 2.0), (2, 2.0), (4, 1.5), (16, 1.5)]);
        assert_eq!(find_minimum(&t).unwrap(), ThreadTiming::new(4, 1.5));
    }

    #[test]
    fn single_row_is_its_own_minimum() {
        let t = table(&[(32, 0.0)]);
        assert_eq!(find_minimum(&t).unwrap(), ThreadTiming::new(32, 0.0));
    }

    #[test]
    fn empty_table_is_an_error() {
        let err = find_minimum(&table(&[])).unwrap_err();
        assert!(matches!(err, DataError::EmptyTable(ref name) if name == "t"));
        assert_eq!(err.to_string(), "no data to display for `t`");
    }

    proptest! {
        #[test]
        fn minimum_is_a_row_no_greater_than_any_other(
            rows in prop::collection::vec((1u32..=64, 0.0f64..100.0), 1..40)
        ) {
            let t = table(&rows);
            let min = find_minimum(&t).unwrap();

            let first = t.rows().iter().position(|r| *r == min);
            prop_assert!(first.is_some());
            for row in t.rows() {
                prop_assert!(min.real_time_used <= row.real_time_used);
            }
            // No earlier row shares the minimal time.
            let first = first.unwrap();
            prop_assert!(t.rows()[..first]
                .iter()
                .all(|r| r.real_time_used > min.real_time_used));
        }

        #[test]
        fn minimum_is_idempotent(
            rows in prop::collection::vec((1u32..=64, 0.0f64..100.0), 1..40)
        ) {
            let t = table(&rows);
            prop_assert_eq!(find_minimum(&t).unwrap(), find_minimum(&t).unwrap());
        }
    }
}
