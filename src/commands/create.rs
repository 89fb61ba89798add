//! `scaffold create` — generate artifacts for a model
//!
//! Parses the schema string, plans the selected artifact kinds, and renders
//! each one to its configured directory. Generation never overwrites:
//! existing files are skipped and reported.

use anyhow::{Context, Result};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::commands::{failure_count, report_results, run_shell_hook, CommandRefresh};
use crate::config::ScaffoldConfig;
use crate::scaffold::{
    migration_stamp, plan, ArtifactSelection, Generator, NamingContext, SchemaDefinition,
};
use crate::templates::TemplateStore;

/// Options for `scaffold create`
pub struct CreateCommand {
    /// Model name (`PascalCase`)
    pub model: String,
    /// Table or plural name; defaults to the model name
    pub table: Option<String>,
    /// Schema string (`"title:string, views:integer"`)
    pub schema: String,
    /// Comma-separated kinds to generate; default all
    pub create: Option<String>,
    /// Run the configured migrate command after generation
    pub migrate: bool,
    /// Emit results as JSON instead of styled lines
    pub json: bool,
}

impl CreateCommand {
    /// Execute the command.
    ///
    /// # Errors
    ///
    /// Returns an error on a malformed schema or selection, an invalid model
    /// name, or when any artifact failed to write.
    pub fn execute(&self, config: &ScaffoldConfig) -> Result<()> {
        // parse everything before touching the filesystem
        let schema = SchemaDefinition::parse(&self.schema)?;
        let ctx = NamingContext::new(&self.model, self.table.as_deref())?;
        let selection = match &self.create {
            Some(list) => ArtifactSelection::parse(list)?,
            None => ArtifactSelection::all(),
        };

        let stamp = migration_stamp();
        let tasks = plan(&ctx, &selection, &config.layout, &stamp);
        let store = TemplateStore::with_override_dir(config.templates.override_dir.clone());
        let generator = Generator::new(&store, &ctx, &schema);

        if !self.json {
            println!(
                "\n{} {} {}",
                style("Scaffolding").cyan().bold(),
                style(&self.model).green().bold(),
                style("...").cyan().bold()
            );
        }

        let spinner = if self.json {
            ProgressBar::hidden()
        } else {
            let spinner = ProgressBar::new_spinner();
            spinner.set_style(
                ProgressStyle::default_spinner()
                    .template("{spinner:.green} {msg}")
                    .context("Failed to set progress style")?,
            );
            spinner.enable_steady_tick(std::time::Duration::from_millis(100));
            spinner.set_message("Generating artifacts...");
            spinner
        };

        let mut refresh = CommandRefresh::new(config.hooks.refresh_command.as_deref());
        let results = generator.generate(&tasks, &mut refresh)?;
        spinner.finish_and_clear();

        report_results(&results, self.json);

        if self.migrate {
            self.run_migrations(config)?;
        }

        let failed = failure_count(&results);
        if failed > 0 {
            anyhow::bail!("{failed} artifact(s) failed to generate");
        }

        if !self.json {
            println!(
                "\n{} Scaffold for {} is ready.",
                style("✓").green().bold(),
                style(&self.model).green().bold()
            );
        }

        Ok(())
    }

    fn run_migrations(&self, config: &ScaffoldConfig) -> Result<()> {
        match &config.hooks.migrate_command {
            Some(command) => {
                if !self.json {
                    println!(
                        "\n{} {}",
                        style("Running migrations:").cyan().bold(),
                        style(command).yellow()
                    );
                }
                run_shell_hook(command).context("migrate command failed")
            }
            None => {
                if !self.json {
                    println!(
                        "\n{} no migrate command configured; set {} in scaffold.toml",
                        style("note:").yellow().bold(),
                        style("hooks.migrate_command").yellow()
                    );
                }
                Ok(())
            }
        }
    }
}
