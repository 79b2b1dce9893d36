//! Check command - validate CAS numbers given on the command line.

use chemenrich::{CasNumber, EnrichError};
use colored::Colorize;

use super::CommandResult;

pub fn run(numbers: Vec<String>, verbose: bool) -> CommandResult {
    let mut failures = 0;

    for input in &numbers {
        match CasNumber::parse(input) {
            Ok(cas) if cas.is_valid() => {
                let note = if cas.is_canonical() {
                    String::new()
                } else {
                    format!(" (canonical: {})", cas.canonical())
                };
                println!("{} {}{}", "✓".green(), input.white(), note.dimmed());
            }
            Ok(cas) => {
                failures += 1;
                println!(
                    "{} {} check digit {}, expected {}",
                    "✗".red(),
                    input.white(),
                    cas.check_digit.to_string().red(),
                    cas.expected_check_digit().to_string().green()
                );
            }
            Err(EnrichError::InvalidCas { reason, .. }) => {
                failures += 1;
                println!("{} {} {}", "✗".red(), input.white(), reason.yellow());
            }
            Err(e) => return Err(e.into()),
        }

        if verbose {
            if let Ok(cas) = CasNumber::parse(input) {
                let digits: Vec<String> = cas.body.iter().map(|d| d.to_string()).collect();
                println!(
                    "    body [{}] check {} checksum {}",
                    digits.join(" "),
                    cas.check_digit,
                    cas.expected_check_digit()
                );
            }
        }
    }

    if failures > 0 {
        return Err(format!("{} of {} CAS numbers are invalid", failures, numbers.len()).into());
    }
    Ok(())
}
