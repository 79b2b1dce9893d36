//! Fuzz target for CAS number parsing.
//!
//! Checks that the validator:
//! 1. Never panics on any input
//! 2. Agrees with itself with and without hyphens
//! 3. Produces a canonical form that parses back to the same digits

#![no_main]

use chemenrich::{validate, CasNumber};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let input = String::from_utf8_lossy(data);

    let Ok(cas) = CasNumber::parse(&input) else {
        assert!(validate(&input).is_err());
        return;
    };

    let bare: String = input.chars().filter(|&c| c != '-').collect();
    assert_eq!(validate(&bare).ok(), Some(cas.is_valid()));

    let again = CasNumber::parse(&cas.canonical()).expect("canonical form parses");
    assert_eq!(again.body, cas.body);
    assert_eq!(again.check_digit, cas.check_digit);
});
