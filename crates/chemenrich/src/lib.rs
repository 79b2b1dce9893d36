//! chemenrich: CAS number validation and database enrichment for chemical tables.
//!
//! Three independent tools, each reading one column of a [`DataTable`]:
//!
//! - **CAS validation**: check digits of CAS Registry Numbers, and filter a
//!   table down to the rows that fail ([`cas`]).
//! - **HMDB enrichment**: CAS number → HMDB id → metabolite status
//!   ([`HmdbClient`]).
//! - **PubMed hit counts**: chemical name → number of literature results,
//!   resumable part-way through a batch ([`HitCounter`]).
//!
//! Lookups are sequential and blocking. Each row's outcome is a
//! [`LookupResult`]; a failing row never aborts the rest of the table.
//!
//! # Example
//!
//! ```
//! use chemenrich::{find_invalid, CasScan, DataTable};
//!
//! let table = DataTable::from_rows(
//!     &["CAS Number", "Chemical"],
//!     &[&["7732-18-5", "Water"], &["123-45-6", "Fictional Compound"]],
//! );
//!
//! match find_invalid(&table, "CAS Number").unwrap() {
//!     CasScan::AllValid => println!("All CASRNs are valid"),
//!     CasScan::Invalid(rows) => assert_eq!(rows.row_count(), 1),
//! }
//! ```

pub mod cas;
pub mod config;
pub mod error;
pub mod input;
pub mod lookup;

pub use cas::{find_invalid, scan_column, validate, CasNumber, CasReport, CasScan};
pub use config::{EnrichConfig, HmdbConfig, PubMedConfig};
pub use error::{EnrichError, Result};
pub use input::{DataTable, Parser};
pub use lookup::{
    merge_resumed, FetchError, Fetcher, HitCounter, HmdbClient, HttpFetcher, LookupResult,
    LookupSummary, MockFetcher, MockResponse,
};
