//! CLI command implementations.

pub mod check;
pub mod hmdb;
pub mod pubmed;
pub mod validate;

use std::path::{Path, PathBuf};

use chemenrich::{DataTable, EnrichConfig, LookupSummary, Parser};
use colored::Colorize;

pub type CommandResult = Result<(), Box<dyn std::error::Error>>;

/// Load the config file if given, otherwise defaults.
pub fn load_config(path: Option<&Path>) -> Result<EnrichConfig, Box<dyn std::error::Error>> {
    match path {
        Some(p) => Ok(EnrichConfig::load(p)?),
        None => Ok(EnrichConfig::default()),
    }
}

/// Parse the input table, failing early if the file is missing.
pub fn read_table(file: &Path) -> Result<DataTable, Box<dyn std::error::Error>> {
    if !file.exists() {
        return Err(format!("File not found: {}", file.display()).into());
    }
    Ok(Parser::new().parse_file(file)?)
}

/// `data.tsv` + `hmdb` → `data_hmdb.tsv`, next to the input.
pub fn default_output(file: &Path, suffix: &str) -> PathBuf {
    let stem = file.file_stem().unwrap_or_default().to_string_lossy();
    let ext = file
        .extension()
        .map(|e| e.to_string_lossy().into_owned())
        .unwrap_or_else(|| "csv".to_string());
    file.with_file_name(format!("{}_{}.{}", stem, suffix, ext))
}

/// Print a one-line lookup summary.
pub fn print_summary(summary: &LookupSummary) {
    println!(
        "{} {}: {} found, {} not found, {} timed out, {} errors, {} skipped",
        "Done".green().bold(),
        summary.step.cyan(),
        summary.found.to_string().green(),
        summary.not_found.to_string().yellow(),
        summary.timeout.to_string().red(),
        summary.error.to_string().red(),
        summary.not_attempted.to_string().dimmed()
    );
}

/// Save the summaries of a run as a JSON array.
pub fn save_report(summaries: &[LookupSummary], report: Option<&Path>) -> CommandResult {
    if let Some(path) = report {
        std::fs::write(path, serde_json::to_string_pretty(summaries)?)?;
        println!(
            "{} {}",
            "Report saved to".green().bold(),
            path.display().to_string().white()
        );
    }
    Ok(())
}

/// Write the enriched table and say where it went.
pub fn save_table(table: &DataTable, output: &Path) -> CommandResult {
    table.write_delimited(output)?;
    println!(
        "{} {}",
        "Saved to".green().bold(),
        output.display().to_string().white()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_output() {
        assert_eq!(
            default_output(Path::new("/data/chemicals.tsv"), "hmdb"),
            PathBuf::from("/data/chemicals_hmdb.tsv")
        );
        assert_eq!(
            default_output(Path::new("names"), "pubmed"),
            PathBuf::from("names_pubmed.csv")
        );
    }
}
