//! PubMed literature hit counts.
//!
//! For each chemical name the counter searches PubMed for the quoted name
//! (optionally narrowed by a qualifier such as
//! `+AND+(human OR blood OR urine)`) and records the result count shown on
//! the search page.
//!
//! Long batches can be resumed: pass the index of the first unprocessed row
//! as `resume_from` and combine the runs with [`merge_resumed`].

use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use chrono::Utc;
use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use tracing::{debug, info, warn};
use url::form_urlencoded;

use crate::config::PubMedConfig;
use crate::error::{EnrichError, Result};
use crate::input::DataTable;

use super::cooldown::Cooldown;
use super::fetch::{Fetcher, HttpFetcher};
use super::result::{to_cells, LookupResult, LookupSummary};
use super::{log_outcome, log_summary};

static RESULT_COUNT: Lazy<Selector> =
    Lazy::new(|| Selector::parse("span.value").expect("valid result count selector"));

/// Extract the result count from a PubMed search page.
pub fn parse_hit_count(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let count = document.select(&RESULT_COUNT).next()?;
    let text = count.text().collect::<String>();
    let text = text.trim();
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

/// Combine a run stopped part-way with a later resumed run.
///
/// Each slot takes the later run's result when that run attempted the row,
/// otherwise the earlier run's. The output is as long as the longer input.
pub fn merge_resumed(earlier: &[LookupResult], later: &[LookupResult]) -> Vec<LookupResult> {
    let len = earlier.len().max(later.len());
    (0..len)
        .map(|i| match (earlier.get(i), later.get(i)) {
            (_, Some(result)) if result.was_attempted() => result.clone(),
            (Some(result), _) => result.clone(),
            (None, Some(result)) => result.clone(),
            (None, None) => LookupResult::NotAttempted,
        })
        .collect()
}

/// Counts PubMed search results for chemical names.
pub struct HitCounter {
    fetcher: Arc<dyn Fetcher>,
    config: PubMedConfig,
}

impl HitCounter {
    /// Create a counter that talks to PubMed over HTTP.
    pub fn new(config: PubMedConfig, user_agent: &str) -> Result<Self> {
        let fetcher = HttpFetcher::new(config.timeout(), user_agent)?;
        Ok(Self::with_fetcher(config, Arc::new(fetcher)))
    }

    /// Create a counter over any [`Fetcher`].
    pub fn with_fetcher(config: PubMedConfig, fetcher: Arc<dyn Fetcher>) -> Self {
        Self { fetcher, config }
    }

    pub fn config(&self) -> &PubMedConfig {
        &self.config
    }

    /// Build the search URL for one name.
    ///
    /// The name is form-encoded as given (every space becomes `+`, leading
    /// and trailing ones included) and wrapped in `("...")`; a non-empty
    /// `extra_query` is appended verbatim.
    pub fn query_url(&self, name: &str, extra_query: Option<&str>) -> String {
        let encoded: String = form_urlencoded::byte_serialize(name.as_bytes()).collect();
        let extra = extra_query.filter(|q| !q.is_empty()).unwrap_or("");
        format!("{}(\"{}\"){}", self.config.search_url, encoded, extra)
    }

    /// Count hits for a single name.
    pub fn count_one(&self, name: &str, extra_query: Option<&str>) -> LookupResult {
        let _cooldown = Cooldown::start(self.config.cooldown());
        let url = self.query_url(name, extra_query);

        let result = match self.fetcher.get(&url) {
            Ok(body) => match parse_hit_count(&body) {
                Some(count) => LookupResult::Found(count),
                None => LookupResult::NotFound,
            },
            Err(e) => LookupResult::from_fetch_error(&e),
        };

        log_outcome("pubmed_hits", name, &result);
        result
    }

    /// Count hits for every row of `name_column`.
    ///
    /// The output has one slot per row, in row order. Rows before
    /// `resume_from` are not requested and stay [`LookupResult::NotAttempted`].
    /// A timeout or error on one row never affects the others.
    pub fn count_hits(
        &self,
        table: &DataTable,
        name_column: &str,
        extra_query: Option<&str>,
        resume_from: usize,
    ) -> Result<Vec<LookupResult>> {
        let index = table.column_index(name_column)?;
        let total = table.row_count();
        let names: Vec<&str> = table.column_values(index).collect();
        let mut results = vec![LookupResult::NotAttempted; total];

        info!(
            column = name_column,
            rows = total,
            resume_from,
            "counting PubMed hits"
        );
        let started = Utc::now();

        for (row, name) in names.iter().enumerate().skip(resume_from) {
            debug!(row, total, name, "pubmed search");
            results[row] = self.count_one(name, extra_query);

            if let Some(path) = &self.config.progress_path {
                if let Err(e) = save_progress(path, name_column, &names, &results) {
                    warn!(path = %path.display(), error = %e, "failed to save progress");
                }
            }
        }

        log_summary(&LookupSummary::from_results("pubmed_hits", &results, started));
        Ok(results)
    }

    /// Return a copy of `table` with `results` in the configured output column.
    pub fn with_hits(&self, table: &DataTable, results: &[LookupResult]) -> Result<DataTable> {
        table.with_column(&self.config.output_column, to_cells(results))
    }
}

/// Rewrite the `name,Results` progress snapshot.
fn save_progress(
    path: &Path,
    name_column: &str,
    names: &[&str],
    results: &[LookupResult],
) -> Result<()> {
    let file = File::create(path).map_err(|e| EnrichError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    let mut writer = csv::Writer::from_writer(file);
    writer.write_record([name_column, "Results"])?;
    for (name, result) in names.iter().zip(results) {
        writer.write_record([*name, result.to_cell().as_str()])?;
    }
    writer.flush().map_err(csv::Error::from)?;
    Ok(())
}
