//! `scaffold drop` — remove generated artifacts for a model
//!
//! Resolves the same target paths generation uses and deletes whatever
//! exists. Missing files are reported and skipped, never fatal.

use anyhow::Result;
use console::style;

use crate::commands::{failure_count, report_results};
use crate::config::ScaffoldConfig;
use crate::scaffold::{teardown, ArtifactSelection, NamingContext};

/// Options for `scaffold drop`
pub struct DropCommand {
    /// Model name (`PascalCase`)
    pub model: String,
    /// Table or plural name the artifacts were generated with; defaults to
    /// the model name. Needed to match the migration filename.
    pub table: Option<String>,
    /// Comma-separated kinds to remove; default all
    pub drop: Option<String>,
    /// Emit results as JSON instead of styled lines
    pub json: bool,
}

impl DropCommand {
    /// Execute the command.
    ///
    /// # Errors
    ///
    /// Returns an error on an invalid model name or selection, or when any
    /// artifact failed to delete.
    pub fn execute(&self, config: &ScaffoldConfig) -> Result<()> {
        let ctx = NamingContext::new(&self.model, self.table.as_deref())?;
        let selection = match &self.drop {
            Some(list) => ArtifactSelection::parse(list)?,
            None => ArtifactSelection::all(),
        };

        if !self.json {
            println!(
                "\n{} {} {}",
                style("Dropping artifacts for").cyan().bold(),
                style(&self.model).green().bold(),
                style("...").cyan().bold()
            );
        }

        let results = teardown::remove(&selection, &ctx, &config.layout);
        report_results(&results, self.json);

        let failed = failure_count(&results);
        if failed > 0 {
            anyhow::bail!("{failed} artifact(s) failed to delete");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LayoutSettings;

    #[test]
    fn test_drop_matches_migration_for_custom_table_name() {
        let dir = tempfile::tempdir().unwrap();
        let config = ScaffoldConfig {
            layout: LayoutSettings {
                migration_dir: dir.path().to_path_buf(),
                ..LayoutSettings::default()
            },
            ..ScaffoldConfig::default()
        };
        let migration = dir.path().join("20260829120000_create_posts_table.sql");
        std::fs::write(&migration, "CREATE TABLE posts ();").unwrap();

        let cmd = DropCommand {
            model: "Post".to_string(),
            table: Some("Posts".to_string()),
            drop: Some("migration".to_string()),
            json: true,
        };
        cmd.execute(&config).unwrap();
        assert!(!migration.exists());
    }

    #[test]
    fn test_drop_without_table_only_matches_the_default_name() {
        let dir = tempfile::tempdir().unwrap();
        let config = ScaffoldConfig {
            layout: LayoutSettings {
                migration_dir: dir.path().to_path_buf(),
                ..LayoutSettings::default()
            },
            ..ScaffoldConfig::default()
        };
        let migration = dir.path().join("20260829120000_create_posts_table.sql");
        std::fs::write(&migration, "CREATE TABLE posts ();").unwrap();

        let cmd = DropCommand {
            model: "Post".to_string(),
            table: None,
            drop: Some("migration".to_string()),
            json: true,
        };
        // not found is reported, not fatal; the file is for another table
        cmd.execute(&config).unwrap();
        assert!(migration.exists());
    }
}
