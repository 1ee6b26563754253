//! # vize
//!
//! Vize - Component preview tooling in Rust.
//!
//! ## Name Origin
//!
//! **Vize** (/viːz/) is named after Vizier + Visor + Advisor, a wise tool
//! that sees through your code. This crate is the gateway to all Vize
//! functionality, providing a command-line interface for generating
//! component preview sources.

mod commands;
mod config;
mod error;
mod logging;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "vize")]
#[command(about = "Component preview tooling in Rust", long_about = None)]
#[command(version, disable_version_flag = true)]
struct Cli {
    /// Print version
    #[arg(short = 'v', short_alias = 'V', long, action = clap::ArgAction::Version)]
    version: (),
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate preview sources from a component analysis
    #[command(visible_alias = "esquisse")]
    Preview(commands::preview::PreviewArgs),

    /// Write the JSON Schema for vize.config.json
    Schema(commands::schema::SchemaArgs),
}

fn main() {
    logging::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Preview(args) => commands::preview::run(args),
        Commands::Schema(args) => commands::schema::run(args),
    };

    if let Err(e) = result {
        eprintln!("{}", error_message(&e));
        std::process::exit(1);
    }
}

/// Plain text, like the log output on the same stream.
fn error_message(err: &error::CliError) -> String {
    format!("Error: {}", err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use vize_esquisse::GenerateError;

    #[test]
    fn test_error_message_has_no_escape_codes() {
        let err = error::CliError::Analysis(GenerateError::UnknownPropsType("Props".to_string()));
        let message = error_message(&err);
        assert_eq!(message, "Error: Props type `Props` is not in the collected types");
        assert!(!message.contains('\x1b'));
    }
}
