//! Human Metabolome Database (HMDB) lookups.
//!
//! Two steps, each applied row by row:
//!
//! 1. CAS number → HMDB id, by scraping the site search for the first
//!    `.result-link` hit.
//! 2. HMDB id → status ("quantified", "detected", "expected", ...), read
//!    from the metabolite page's `Status` header cell.
//!
//! Every request is followed by a fixed cooldown (2 s by default), whatever
//! its outcome.

use std::sync::Arc;

use chrono::Utc;
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, info};
use url::Url;

use crate::config::HmdbConfig;
use crate::error::{EnrichError, Result};
use crate::input::DataTable;

use super::cooldown::Cooldown;
use super::fetch::{Fetcher, HttpFetcher};
use super::result::{to_cells, LookupResult, LookupSummary};
use super::{log_outcome, log_summary};

static RESULT_LINK: Lazy<Selector> =
    Lazy::new(|| Selector::parse(".result-link a[href]").expect("valid result-link selector"));

static HEADER_CELL: Lazy<Selector> =
    Lazy::new(|| Selector::parse("th").expect("valid th selector"));

/// Extract the HMDB id from a search results page.
///
/// The id is the last path segment of the first result link.
pub fn parse_search_page(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let link = document.select(&RESULT_LINK).next()?;
    let href = link.value().attr("href")?;

    let path = href.split(['?', '#']).next().unwrap_or(href);
    let id = path.trim_end_matches('/').rsplit('/').next()?.trim();

    if id.is_empty() {
        None
    } else {
        Some(id.to_string())
    }
}

/// Extract the status from a metabolite page.
///
/// Looks for a `<th>` reading exactly `Status` and returns the text of the
/// `<td>` that follows it.
pub fn parse_status_page(html: &str) -> Option<String> {
    let document = Html::parse_document(html);

    let header = document
        .select(&HEADER_CELL)
        .find(|th| th.text().collect::<String>().trim() == "Status")?;

    let cell = header
        .next_siblings()
        .filter_map(ElementRef::wrap)
        .find(|el| el.value().name() == "td")?;

    let status = cell.text().collect::<String>();
    let status = status.trim();
    if status.is_empty() {
        None
    } else {
        Some(status.to_string())
    }
}

/// Client for the HMDB search and metabolite pages.
pub struct HmdbClient {
    fetcher: Arc<dyn Fetcher>,
    config: HmdbConfig,
}

impl HmdbClient {
    /// Create a client that talks to the configured site over HTTP.
    pub fn new(config: HmdbConfig, user_agent: &str) -> Result<Self> {
        let fetcher = HttpFetcher::new(config.timeout(), user_agent)?;
        Ok(Self::with_fetcher(config, Arc::new(fetcher)))
    }

    /// Create a client over any [`Fetcher`].
    pub fn with_fetcher(config: HmdbConfig, fetcher: Arc<dyn Fetcher>) -> Self {
        Self { fetcher, config }
    }

    pub fn config(&self) -> &HmdbConfig {
        &self.config
    }

    fn page_url(&self, segments: &[&str]) -> Result<Url> {
        let mut url = Url::parse(&self.config.base_url).map_err(|e| {
            EnrichError::Config(format!("Invalid HMDB base URL '{}': {}", self.config.base_url, e))
        })?;
        url.path_segments_mut()
            .map_err(|_| {
                EnrichError::Config(format!(
                    "HMDB base URL '{}' cannot take a path",
                    self.config.base_url
                ))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Search URL for a CAS number, quoted for an exact match.
    pub fn search_url(&self, cas: &str) -> Result<Url> {
        let mut url = self.page_url(&["unearth", "q"])?;
        url.query_pairs_mut()
            .append_pair("utf8", "✓")
            .append_pair("query", &format!("\"{}\"", cas))
            .append_pair("searcher", "metabolites")
            .append_pair("button", "");
        Ok(url)
    }

    /// Metabolite page URL for an HMDB id.
    pub fn status_url(&self, hmdb_id: &str) -> Result<Url> {
        self.page_url(&["metabolites", hmdb_id])
    }

    /// Look up the HMDB id for a CAS number.
    ///
    /// Surrounding single quotes are stripped first. Never fails: errors are
    /// returned as [`LookupResult::Error`] or [`LookupResult::Timeout`].
    pub fn lookup_external_id(&self, cas: &str) -> LookupResult {
        let _cooldown = Cooldown::start(self.config.cooldown());
        let cas = cas.trim().trim_matches('\'');

        let url = match self.search_url(cas) {
            Ok(url) => url,
            Err(e) => return LookupResult::Error(e.to_string()),
        };

        let result = match self.fetcher.get(url.as_str()) {
            Ok(body) => match parse_search_page(&body) {
                Some(id) => LookupResult::Found(id),
                None => LookupResult::NotFound,
            },
            Err(e) => LookupResult::from_fetch_error(&e),
        };

        log_outcome("hmdb_id", cas, &result);
        result
    }

    /// Look up the status of an HMDB metabolite.
    pub fn lookup_status(&self, hmdb_id: &str) -> LookupResult {
        let _cooldown = Cooldown::start(self.config.cooldown());
        let hmdb_id = hmdb_id.trim();

        let url = match self.status_url(hmdb_id) {
            Ok(url) => url,
            Err(e) => return LookupResult::Error(e.to_string()),
        };

        let result = match self.fetcher.get(url.as_str()) {
            Ok(body) => match parse_status_page(&body) {
                Some(status) => LookupResult::Found(status),
                None => LookupResult::NotFound,
            },
            Err(e) => LookupResult::from_fetch_error(&e),
        };

        log_outcome("hmdb_status", hmdb_id, &result);
        result
    }

    /// Look up the HMDB id of every row's CAS number, in row order.
    pub fn lookup_ids(&self, table: &DataTable, column: &str) -> Result<Vec<LookupResult>> {
        let index = table.column_index(column)?;
        let total = table.row_count();
        info!(column, rows = total, "looking up HMDB ids");

        Ok(table
            .column_values(index)
            .enumerate()
            .map(|(row, cas)| {
                debug!(row, total, cas, "hmdb id lookup");
                self.lookup_external_id(cas)
            })
            .collect())
    }

    /// Look up the status of every row's HMDB id, in row order.
    ///
    /// Rows whose id cell does not hold a found id (not found, error,
    /// timeout, empty) are skipped without a request and come back as
    /// [`LookupResult::NotAttempted`].
    pub fn lookup_statuses(&self, table: &DataTable, id_column: &str) -> Result<Vec<LookupResult>> {
        let index = table.column_index(id_column)?;
        let total = table.row_count();
        info!(column = id_column, rows = total, "looking up HMDB statuses");

        Ok(table
            .column_values(index)
            .enumerate()
            .map(|(row, cell)| match LookupResult::from_cell(cell) {
                LookupResult::Found(id) => {
                    debug!(row, total, id = %id, "hmdb status lookup");
                    self.lookup_status(&id)
                }
                _ => {
                    debug!(row, cell, "no HMDB id, skipping status lookup");
                    LookupResult::NotAttempted
                }
            })
            .collect())
    }

    /// Return a copy of `table` with the HMDB id column added.
    pub fn enrich_with_id(&self, table: &DataTable, column: &str) -> Result<DataTable> {
        let started = Utc::now();
        let results = self.lookup_ids(table, column)?;
        log_summary(&LookupSummary::from_results("hmdb_id", &results, started));
        table.with_column(&self.config.id_output_column, to_cells(&results))
    }

    /// Return a copy of `table` with the HMDB status column added.
    pub fn enrich_with_status(&self, table: &DataTable, id_column: &str) -> Result<DataTable> {
        let started = Utc::now();
        let results = self.lookup_statuses(table, id_column)?;
        log_summary(&LookupSummary::from_results("hmdb_status", &results, started));
        table.with_column(&self.config.status_output_column, to_cells(&results))
    }
}
