//! `scaffold flush` — remove everything `scaffold create` produced
//!
//! A flag-less invocation touches nothing: `--flushdb` drops the database
//! catalog, `--full` (or an explicit `--models` list) additionally tears
//! down the generated files. Both destructive paths sit behind a
//! confirmation gate unless forced. The model list comes from `--models`
//! or discovery via the model directory; migrations are cleared by
//! filename pattern, since their names carry table names the model list
//! cannot reconstruct.

use anyhow::Result;
use console::style;
use dialoguer::Confirm;
use walkdir::WalkDir;

use crate::catalog::shell::ShellRunner;
use crate::catalog::{CatalogCleaner, CatalogConfig, CleanerState, Engine};
use crate::commands::{failure_count, report_results};
use crate::config::ScaffoldConfig;
use crate::error::ScaffoldError;
use crate::scaffold::{teardown, ArtifactKind, ArtifactResult, ArtifactSelection, NamingContext};

/// Kinds torn down per model; migrations are handled by filename pattern
/// instead, in one pass over the migration directory.
const PER_MODEL_KINDS: [ArtifactKind; 6] = [
    ArtifactKind::Model,
    ArtifactKind::Controller,
    ArtifactKind::Seeder,
    ArtifactKind::Resource,
    ArtifactKind::Factory,
    ArtifactKind::Test,
];

/// Options for `scaffold flush`
pub struct FlushCommand {
    /// Flush the database catalog and every artifact kind
    pub full: bool,
    /// Drop database tables, views, triggers, and procedures
    pub flushdb: bool,
    /// Flush files for these model names (comma-separated); default under
    /// `--full` is discovery via the configured model directory
    pub models: Option<String>,
    /// Skip the destructive-action confirmation
    pub force: bool,
    /// Emit results as JSON instead of styled lines
    pub json: bool,
}

impl FlushCommand {
    /// Execute the command.
    ///
    /// # Errors
    ///
    /// Returns an error on an unsupported database driver, a declined
    /// confirmation, a failed catalog step, or any failed file deletion.
    pub fn execute(&self, config: &ScaffoldConfig) -> Result<()> {
        if self.flushdb || self.full {
            self.flush_database(config)?;
        }

        // files are only touched when asked for explicitly
        if !self.full && self.models.is_none() {
            if !self.flushdb && !self.json {
                println!(
                    "{} nothing to flush; pass --full, --flushdb, or --models",
                    style("note:").yellow().bold()
                );
            }
            return Ok(());
        }

        self.flush_files(config)
    }

    fn flush_files(&self, config: &ScaffoldConfig) -> Result<()> {
        let models = self.model_list(config);
        if models.is_empty() {
            if !self.json {
                println!(
                    "{} no models found under {}",
                    style("note:").yellow().bold(),
                    config.layout.model_dir.display()
                );
            }
            return Ok(());
        }

        let confirmed = self.force
            || Confirm::new()
                .with_prompt(format!(
                    "Generated files for {} model(s) and all generated migrations \
                     will be deleted. Continue?",
                    models.len()
                ))
                .default(false)
                .interact()?;
        if !confirmed {
            return Err(ScaffoldError::ConfirmationDeclined.into());
        }

        let selection = ArtifactSelection::of(&PER_MODEL_KINDS);
        let mut all_results: Vec<ArtifactResult> = Vec::new();
        for model in &models {
            let Ok(ctx) = NamingContext::new(model, None) else {
                if !self.json {
                    println!(
                        "  {} skipping '{model}': not a model name",
                        style("!").yellow()
                    );
                }
                continue;
            };

            if !self.json {
                println!(
                    "\n{} {}",
                    style("Flushing").cyan().bold(),
                    style(model).green().bold()
                );
            }
            let results = teardown::remove(&selection, &ctx, &config.layout);
            if !self.json {
                report_results(&results, false);
            }
            all_results.extend(results);
        }

        let migrations = teardown::remove_all_migrations(&config.layout);
        if !self.json {
            println!("\n{}", style("Flushing migrations").cyan().bold());
            report_results(&migrations, false);
        }
        all_results.extend(migrations);

        if self.json {
            report_results(&all_results, true);
        }

        let failed = failure_count(&all_results);
        if failed > 0 {
            anyhow::bail!("{failed} artifact(s) failed to delete");
        }

        Ok(())
    }

    /// Drop all catalog objects for the configured connection, behind the
    /// confirmation gate.
    fn flush_database(&self, config: &ScaffoldConfig) -> Result<()> {
        // engine dispatch fails before any statement executes
        let engine = Engine::from_driver(&config.database.driver)?;

        let mut cleaner = CatalogCleaner::new(CatalogConfig {
            engine,
            database: config.database.name.clone(),
        });
        cleaner.request()?;

        let confirmed = self.force
            || Confirm::new()
                .with_prompt(
                    "All tables, views, triggers and procedures will be deleted. Continue?",
                )
                .default(false)
                .interact()?;

        if cleaner.resolve(confirmed)? == CleanerState::Aborted {
            return Err(ScaffoldError::ConfirmationDeclined.into());
        }

        let mut runner = ShellRunner::new(
            engine,
            &config.database.name,
            config.database.client.as_deref(),
        );
        let report = cleaner.run(&mut runner)?;

        if !self.json {
            println!(
                "{} {} tables, {} views, {} triggers, {} procedures dropped",
                style("✓").green(),
                report.tables,
                report.views,
                report.triggers,
                report.procedures
            );
        }

        Ok(())
    }

    /// Explicit `--models` list, or the file stems of the configured model
    /// directory.
    fn model_list(&self, config: &ScaffoldConfig) -> Vec<String> {
        if let Some(list) = &self.models {
            return list
                .split(',')
                .map(str::trim)
                .filter(|m| !m.is_empty())
                .map(str::to_string)
                .collect();
        }

        let extension = &config.layout.source_extension;
        let mut models: Vec<String> = WalkDir::new(&config.layout.model_dir)
            .max_depth(1)
            .into_iter()
            .filter_map(Result::ok)
            .filter(|entry| entry.file_type().is_file())
            .filter(|entry| {
                entry
                    .path()
                    .extension()
                    .is_some_and(|e| e.to_string_lossy() == *extension)
            })
            .filter_map(|entry| {
                entry
                    .path()
                    .file_stem()
                    .map(|stem| stem.to_string_lossy().into_owned())
            })
            .collect();
        models.sort();
        models
    }
}
