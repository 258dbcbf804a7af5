//! CLI front end for the shared settings store. Every subcommand is a thin
//! wrapper over the public store surface; the interesting guarantees (the
//! cross-process lock, the reload-before-write discipline) all live in the
//! library.
use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use shared_settings::utils;

#[derive(Parser)]
#[command(name = "shared-settings")]
#[command(about = "Inspect and edit a settings file shared by concurrent application instances")]
struct Cli {
    /// Path to the settings file (the store never picks a default location)
    #[arg(short, long)]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List stored section names and the document's version stamp
    List,
    /// Print one section in the chosen format
    Get {
        /// Section name
        section: String,
        /// Output format: toml, json or yaml
        #[arg(long, default_value = "toml")]
        format: String,
    },
    /// Set one key in a section (a full read-modify-write cycle under the lock)
    Set {
        section: String,
        key: String,
        value: String,
    },
    /// Remove a whole section
    Remove { section: String },
    /// Compare this build's identity with the stamp on the document
    Version,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::List => utils::list_sections(cli.config),
        Commands::Get { section, format } => utils::show_section(cli.config, &section, &format),
        Commands::Set {
            section,
            key,
            value,
        } => utils::set_value(cli.config, section, key, value),
        Commands::Remove { section } => utils::remove_section(cli.config, section),
        Commands::Version => utils::version_report(cli.config),
    }
}
