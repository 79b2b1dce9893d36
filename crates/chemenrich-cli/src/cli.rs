//! CLI argument definitions using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// chemenrich: CAS validation and HMDB/PubMed enrichment for chemical tables
#[derive(Parser)]
#[command(name = "chemenrich")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// JSON config file (endpoints, column names, timeouts, cooldowns)
    #[arg(long, global = true, value_name = "JSON")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Check one or more CAS numbers
    Check {
        /// CAS numbers, with or without hyphens
        #[arg(value_name = "CAS", required = true)]
        numbers: Vec<String>,
    },

    /// Find rows whose CAS number fails validation
    Validate {
        /// Path to the data file (CSV/TSV)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Column holding CAS numbers
        #[arg(short, long, default_value = "CAS Number")]
        column: String,

        /// Write the invalid rows to this file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output the per-row report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Add HMDB ids (and optionally statuses) looked up by CAS number
    Hmdb {
        /// Path to the data file (CSV/TSV)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Column holding CAS numbers (default from config: casId_final)
        #[arg(short, long)]
        column: Option<String>,

        /// Also look up the status of every found id
        #[arg(long)]
        with_status: bool,

        /// Output path (default: <file>_hmdb.<ext>)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Write a JSON summary of the lookups
        #[arg(long)]
        report: Option<PathBuf>,
    },

    /// Add HMDB statuses for a column of HMDB ids
    HmdbStatus {
        /// Path to the data file (CSV/TSV)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Column holding HMDB ids (default from config: HMDB_id)
        #[arg(long)]
        id_column: Option<String>,

        /// Output path (default: <file>_status.<ext>)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Write a JSON summary of the lookups
        #[arg(long)]
        report: Option<PathBuf>,
    },

    /// Count PubMed results for each chemical name
    Pubmed {
        /// Path to the data file (CSV/TSV)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Column holding chemical names
        #[arg(short, long)]
        column: String,

        /// Qualifier appended to every query, e.g. '+AND+(human OR urine)'
        #[arg(short, long)]
        query: Option<String>,

        /// Index of the first row to process
        #[arg(long, default_value = "0")]
        resume_from: usize,

        /// Rewrite a CSV progress snapshot after every row
        #[arg(long)]
        progress: Option<PathBuf>,

        /// Output path (default: <file>_pubmed.<ext>)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Write a JSON summary of the lookups
        #[arg(long)]
        report: Option<PathBuf>,
    },
}
