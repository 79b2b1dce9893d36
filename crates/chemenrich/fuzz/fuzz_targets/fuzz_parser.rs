//! Fuzz target for delimited table parsing.
//!
//! Arbitrary bytes must either parse into a rectangular table or fail with
//! an error, never panic.

#![no_main]

use chemenrich::Parser;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let text = String::from_utf8_lossy(data);
    if let Ok(table) = Parser::new().parse_str(&text) {
        for row in &table.rows {
            assert_eq!(row.len(), table.column_count());
        }
    }
});
