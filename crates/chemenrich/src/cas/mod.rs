//! CAS Registry Number validation.
//!
//! - [`validate`] checks a single number's check digit.
//! - [`find_invalid`] filters a table down to the rows that fail.
//! - [`scan_column`] keeps the per-row verdicts for reporting.

mod filter;
mod number;

pub use filter::{find_invalid, scan_column, CasCheck, CasReport, CasRowCheck, CasScan};
pub use number::{validate, CasNumber};
