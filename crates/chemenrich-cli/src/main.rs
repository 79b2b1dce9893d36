//! chemenrich CLI - CAS validation and database enrichment.

mod cli;
mod commands;
mod logging;

use clap::Parser;
use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let result = commands::load_config(cli.config.as_deref()).and_then(|config| match cli.command {
        Commands::Check { numbers } => commands::check::run(numbers, cli.verbose),

        Commands::Validate {
            file,
            column,
            output,
            json,
        } => commands::validate::run(file, column, output, json, cli.verbose),

        Commands::Hmdb {
            file,
            column,
            with_status,
            output,
            report,
        } => commands::hmdb::run(config, file, column, with_status, output, report),

        Commands::HmdbStatus {
            file,
            id_column,
            output,
            report,
        } => commands::hmdb::run_status(config, file, id_column, output, report),

        Commands::Pubmed {
            file,
            column,
            query,
            resume_from,
            progress,
            output,
            report,
        } => commands::pubmed::run(
            config,
            commands::pubmed::PubmedArgs {
                file,
                column,
                query,
                resume_from,
                progress,
                output,
                report,
            },
        ),
    });

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
