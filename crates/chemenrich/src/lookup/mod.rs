//! External database lookups.
//!
//! Every per-row lookup ends in a [`LookupResult`]; nothing is retried and
//! one row's failure never stops a batch.
//!
//! # Example
//!
//! ```no_run
//! use chemenrich::{DataTable, EnrichConfig, HmdbClient};
//!
//! let config = EnrichConfig::default();
//! let client = HmdbClient::new(config.hmdb.clone(), &config.user_agent).unwrap();
//!
//! let table = DataTable::from_rows(&["casId_final"], &[&["7732-18-5"]]);
//! let table = client.enrich_with_id(&table, "casId_final").unwrap();
//! let table = client.enrich_with_status(&table, "HMDB_id").unwrap();
//! ```

mod cooldown;
mod fetch;
mod hmdb;
mod mock;
mod pubmed;
mod result;

pub use cooldown::Cooldown;
pub use fetch::{FetchError, Fetcher, HttpFetcher, DEFAULT_USER_AGENT};
pub use hmdb::{parse_search_page, parse_status_page, HmdbClient};
pub use mock::{MockFetcher, MockResponse};
pub use pubmed::{merge_resumed, parse_hit_count, HitCounter};
pub use result::{
    LookupResult, LookupSummary, ERROR_PREFIX, NOT_ATTEMPTED, NOT_FOUND, TIMEOUT,
};

use tracing::{debug, info, warn};

fn log_outcome(step: &str, key: &str, result: &LookupResult) {
    match result {
        LookupResult::Error(message) => warn!(step, key, error = %message, "lookup failed"),
        LookupResult::Timeout => warn!(step, key, "lookup timed out"),
        other => debug!(step, key, result = %other, "lookup done"),
    }
}

fn log_summary(summary: &LookupSummary) {
    info!(
        step = %summary.step,
        total = summary.total,
        found = summary.found,
        not_found = summary.not_found,
        timeout = summary.timeout,
        error = summary.error,
        skipped = summary.not_attempted,
        "lookup batch finished"
    );
}
