//! Fuzz target for the column profiler.
//!
//! Parses arbitrary bytes as CSV and profiles every column; neither step
//! may panic, whatever the row shapes.

#![no_main]

use blotter::{Parser, profile_columns};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() > 100_000 {
        return;
    }

    let parser = Parser::new();
    if let Ok(table) = parser.parse_bytes(data, b',') {
        let _ = profile_columns(&table);
    }
});
