//! scaffold CLI tool

#![forbid(unsafe_code)]
#![deny(clippy::all, clippy::pedantic, clippy::nursery)]
#![warn(clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use anyhow::Result;
use clap::{Parser, Subcommand};

use scaffold_kit::commands::{CreateCommand, DropCommand, FlushCommand};
use scaffold_kit::config::ScaffoldConfig;

#[derive(Parser)]
#[command(name = "scaffold")]
#[command(version)]
#[command(about = "Template-driven boilerplate generator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate model, controller, migration, seeder, resource, factory,
    /// and test files for a model
    Create {
        /// Model name (PascalCase, e.g. `Post`, `UserProfile`)
        #[arg(long)]
        model: String,

        /// Table or plural name (defaults to the model name)
        #[arg(long)]
        table: Option<String>,

        /// Schema string, e.g. "title:string, views:integer"
        #[arg(long)]
        schema: String,

        /// Comma-separated artifact kinds to generate (default: all)
        #[arg(long, value_name = "KINDS")]
        create: Option<String>,

        /// Run the configured migrate command after generation
        #[arg(long)]
        migrate: bool,

        /// Emit per-artifact results as JSON
        #[arg(long)]
        json: bool,
    },

    /// Delete the generated artifacts for a model
    Drop {
        /// Model name (PascalCase)
        #[arg(long)]
        model: String,

        /// Table or plural name the artifacts were generated with
        /// (defaults to the model name)
        #[arg(long)]
        table: Option<String>,

        /// Comma-separated artifact kinds to remove (default: all)
        #[arg(long, value_name = "KINDS")]
        drop: Option<String>,

        /// Emit per-artifact results as JSON
        #[arg(long)]
        json: bool,
    },

    /// Delete everything scaffold create produced; a flag-less invocation
    /// does nothing
    Flush {
        /// Flush the database catalog and every artifact kind
        #[arg(long)]
        full: bool,

        /// Drop all tables, views, triggers, and procedures
        #[arg(long)]
        flushdb: bool,

        /// Flush files for these model names (comma-separated)
        #[arg(long, value_name = "MODELS")]
        models: Option<String>,

        /// Skip the confirmation prompt
        #[arg(short = 'F', long)]
        force: bool,

        /// Emit per-artifact results as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = ScaffoldConfig::load()?;

    match cli.command {
        Commands::Create {
            model,
            table,
            schema,
            create,
            migrate,
            json,
        } => {
            let cmd = CreateCommand {
                model,
                table,
                schema,
                create,
                migrate,
                json,
            };
            cmd.execute(&config)?;
        }
        Commands::Drop {
            model,
            table,
            drop,
            json,
        } => {
            let cmd = DropCommand {
                model,
                table,
                drop,
                json,
            };
            cmd.execute(&config)?;
        }
        Commands::Flush {
            full,
            flushdb,
            models,
            force,
            json,
        } => {
            let cmd = FlushCommand {
                full,
                flushdb,
                models,
                force,
                json,
            };
            cmd.execute(&config)?;
        }
    }

    Ok(())
}
