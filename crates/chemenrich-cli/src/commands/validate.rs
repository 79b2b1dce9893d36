//! Validate command - report rows with invalid CAS numbers.

use std::path::PathBuf;

use chemenrich::cas::CasCheck;
use chemenrich::{find_invalid, scan_column, CasScan};
use colored::Colorize;

use super::{read_table, save_table, CommandResult};

pub fn run(
    file: PathBuf,
    column: String,
    output: Option<PathBuf>,
    json_output: bool,
    verbose: bool,
) -> CommandResult {
    let table = read_table(&file)?;

    if json_output {
        let report = scan_column(&table, &column)?;
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!(
        "{} {} column {}",
        "Validating".cyan().bold(),
        file.display().to_string().white(),
        column.cyan()
    );

    if verbose {
        let report = scan_column(&table, &column)?;
        for row in report.failures() {
            let why = match &row.check {
                CasCheck::BadChecksum { expected, found } => {
                    format!("check digit {}, expected {}", found, expected)
                }
                CasCheck::Malformed { reason } => reason.clone(),
                CasCheck::Valid => continue,
            };
            println!(
                "  {} row {:>5}  {:15} {}",
                "•".dimmed(),
                row.row + 1,
                row.input,
                why.yellow()
            );
        }
    }

    match find_invalid(&table, &column)? {
        CasScan::AllValid => {
            println!("{}", "All CASRNs are valid".green());
        }
        CasScan::Invalid(rows) => {
            println!(
                "Found {} invalid CAS numbers in {} rows",
                rows.row_count().to_string().red().bold(),
                table.row_count()
            );
            println!();
            println!("{}", rows.headers.join("\t").yellow().bold());
            for row in &rows.rows {
                println!("{}", row.join("\t"));
            }

            if let Some(path) = output {
                println!();
                save_table(&rows, &path)?;
            }
        }
    }

    Ok(())
}
