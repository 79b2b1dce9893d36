//! HMDB commands - add HMDB ids and statuses to a table.

use std::path::PathBuf;

use chemenrich::{EnrichConfig, HmdbClient, LookupSummary};
use chrono::Utc;
use colored::Colorize;

use super::{default_output, print_summary, read_table, save_report, save_table, CommandResult};

pub fn run(
    config: EnrichConfig,
    file: PathBuf,
    column: Option<String>,
    with_status: bool,
    output: Option<PathBuf>,
    report: Option<PathBuf>,
) -> CommandResult {
    let table = read_table(&file)?;
    let column = column.unwrap_or_else(|| config.hmdb.id_column.clone());
    let client = HmdbClient::new(config.hmdb.clone(), &config.user_agent)?;
    let id_column = &config.hmdb.id_output_column;

    print_eta(table.row_count(), &config, "HMDB ids");
    let started = Utc::now();
    let mut table = client.enrich_with_id(&table, &column)?;
    let ids = LookupSummary::from_column("hmdb_id", &table, id_column, started)?;
    print_summary(&ids);
    let found = ids.found;
    let mut summaries = vec![ids];

    if with_status {
        print_eta(found, &config, "HMDB statuses");
        let started = Utc::now();
        table = client.enrich_with_status(&table, id_column)?;
        let statuses = LookupSummary::from_column(
            "hmdb_status",
            &table,
            &config.hmdb.status_output_column,
            started,
        )?;
        print_summary(&statuses);
        summaries.push(statuses);
    }

    let output = output.unwrap_or_else(|| default_output(&file, "hmdb"));
    save_table(&table, &output)?;
    save_report(&summaries, report.as_deref())
}

pub fn run_status(
    config: EnrichConfig,
    file: PathBuf,
    id_column: Option<String>,
    output: Option<PathBuf>,
    report: Option<PathBuf>,
) -> CommandResult {
    let table = read_table(&file)?;
    let id_column = id_column.unwrap_or_else(|| config.hmdb.id_output_column.clone());
    let client = HmdbClient::new(config.hmdb.clone(), &config.user_agent)?;

    print_eta(table.row_count(), &config, "HMDB statuses");
    let started = Utc::now();
    let table = client.enrich_with_status(&table, &id_column)?;
    let summary = LookupSummary::from_column(
        "hmdb_status",
        &table,
        &config.hmdb.status_output_column,
        started,
    )?;
    print_summary(&summary);

    let output = output.unwrap_or_else(|| default_output(&file, "status"));
    save_table(&table, &output)?;
    save_report(&[summary], report.as_deref())
}

/// Lookups are paced by the cooldown, so the batch length is predictable.
fn print_eta(requests: usize, config: &EnrichConfig, what: &str) {
    let seconds = requests as u64 * config.hmdb.cooldown_ms / 1000;
    println!(
        "{} {} for {} rows (at least {}m{:02}s)",
        "Looking up".cyan().bold(),
        what,
        requests.to_string().white().bold(),
        seconds / 60,
        seconds % 60
    );
}
