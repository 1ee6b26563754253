//! Schema command - Write the JSON Schema for vize.config.json

use crate::config::{write_schema, VIZE_CONFIG_SCHEMA};
use crate::error::CliError;
use clap::Args;
use std::path::PathBuf;

#[derive(Args)]
pub struct SchemaArgs {
    /// Project directory (defaults to the current directory)
    #[arg(short, long)]
    pub dir: Option<PathBuf>,

    /// Print the schema instead of writing it
    #[arg(long)]
    pub stdout: bool,
}

pub fn run(args: SchemaArgs) -> Result<(), CliError> {
    if args.stdout {
        println!("{}", VIZE_CONFIG_SCHEMA);
        return Ok(());
    }

    let path = write_schema(args.dir.as_deref())?;
    eprintln!("Wrote {}", path.display());
    Ok(())
}
