//! PubMed command - add literature hit counts to a table.

use std::path::{Path, PathBuf};

use chemenrich::{merge_resumed, EnrichConfig, HitCounter, LookupResult, LookupSummary, Parser};
use chrono::Utc;
use colored::Colorize;

use super::{default_output, print_summary, read_table, save_report, save_table, CommandResult};

pub struct PubmedArgs {
    pub file: PathBuf,
    pub column: String,
    pub query: Option<String>,
    pub resume_from: usize,
    pub progress: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub report: Option<PathBuf>,
}

pub fn run(mut config: EnrichConfig, args: PubmedArgs) -> CommandResult {
    let table = read_table(&args.file)?;
    if args.progress.is_some() {
        config.pubmed.progress_path = args.progress.clone();
    }
    let counter = HitCounter::new(config.pubmed.clone(), &config.user_agent)?;
    let output = args
        .output
        .unwrap_or_else(|| default_output(&args.file, "pubmed"));

    println!(
        "{} PubMed hits for {} names in column {}",
        "Counting".cyan().bold(),
        table
            .row_count()
            .saturating_sub(args.resume_from)
            .to_string()
            .white()
            .bold(),
        args.column.cyan()
    );

    let started = Utc::now();
    let mut results = counter.count_hits(
        &table,
        &args.column,
        args.query.as_deref(),
        args.resume_from,
    )?;

    if args.resume_from > 0 {
        if let Some(earlier) = earlier_results(&output, &config.pubmed.output_column) {
            println!(
                "{} rows before {} from {}",
                "Keeping".cyan().bold(),
                args.resume_from,
                output.display()
            );
            results = merge_resumed(&earlier, &results);
            results.truncate(table.row_count());
        }
    }

    let summary = LookupSummary::from_results("pubmed_hits", &results, started);
    print_summary(&summary);

    if summary.failed() > 0 {
        println!(
            "{} {} rows timed out or failed; their cells read TIMEOUT or Error",
            "Note:".yellow().bold(),
            summary.failed()
        );
    }

    let table = counter.with_hits(&table, &results)?;
    save_table(&table, &output)?;
    save_report(&[summary], args.report.as_deref())
}

/// Results of a previous run, read back from its output table.
fn earlier_results(output: &Path, column: &str) -> Option<Vec<LookupResult>> {
    if !output.exists() {
        return None;
    }
    let table = Parser::new().parse_file(output).ok()?;
    let values = table.column_by_name(column)?;
    Some(values.into_iter().map(LookupResult::from_cell).collect())
}
