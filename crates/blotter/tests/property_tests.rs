//! Property-based tests for the column profiler.
//!
//! These tests use proptest to generate random tables and verify that the
//! profiler maintains its invariants under all conditions:
//!
//! 1. **Determinism**: profiling the same table twice yields identical
//!    results.
//! 2. **Cardinality bound**: a column never has more distinct values than
//!    the table has data rows.
//! 3. **Length invariant**: the reported max length equals the maximum
//!    character length over the distinct-value set.
//! 4. **Bounds**: an out-of-range column index is always an error.

use proptest::prelude::*;

use blotter::{DataTable, distinct_values, max_value_length, profile_columns};

const WIDTH: usize = 3;

/// Generate a field value (possibly empty, possibly multi-byte).
fn field() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-z0-9]{0,8}",
        "[A-Z ]{1,12}",
        "-?[0-9]{1,6}",
        "[0-9]{4}-[0-9]{2}-[0-9]{2}",
        "[àéü]{1,4}",
    ]
}

/// Generate a table with a fixed width and 0..40 data rows.
fn table() -> impl Strategy<Value = DataTable> {
    prop::collection::vec(prop::collection::vec(field(), WIDTH), 0..40).prop_map(|rows| {
        let headers = (0..WIDTH).map(|i| format!("col_{i}")).collect();
        DataTable::new(headers, rows, b',')
    })
}

proptest! {
    #[test]
    fn profiling_is_deterministic(table in table()) {
        for column in 0..WIDTH {
            let first = distinct_values(&table, column).unwrap();
            let second = distinct_values(&table, column).unwrap();
            prop_assert_eq!(first, second);
        }

        let first = profile_columns(&table).unwrap();
        let second = profile_columns(&table).unwrap();
        for (a, b) in first.iter().zip(&second) {
            prop_assert_eq!(a.distinct_count, b.distinct_count);
            prop_assert_eq!(a.max_length, b.max_length);
        }
    }

    #[test]
    fn distinct_count_never_exceeds_row_count(table in table()) {
        for profile in profile_columns(&table).unwrap() {
            prop_assert!(profile.distinct_count <= table.row_count());
        }
    }

    #[test]
    fn max_length_matches_distinct_set(table in table()) {
        for column in 0..WIDTH {
            let values = distinct_values(&table, column).unwrap();
            let expected = values.iter().map(|v| v.chars().count()).max();

            match expected {
                Some(expected) => {
                    prop_assert_eq!(max_value_length(&table, column).unwrap(), expected);
                }
                None => {
                    prop_assert!(max_value_length(&table, column).is_err());
                }
            }
        }
    }

    #[test]
    fn max_length_agrees_with_raw_values(table in table()) {
        // Deduplication cannot change the maximum: check against a scan of
        // the raw (non-deduplicated) occurrences.
        for column in 0..WIDTH {
            let raw_max = table
                .rows
                .iter()
                .filter_map(|row| row.get(column))
                .map(|v| v.chars().count())
                .max();

            let profile = &profile_columns(&table).unwrap()[column];
            prop_assert_eq!(profile.max_length, raw_max);
        }
    }

    #[test]
    fn out_of_range_index_is_always_an_error(table in table(), column in WIDTH..WIDTH + 8) {
        prop_assert!(distinct_values(&table, column).is_err());
    }
}
