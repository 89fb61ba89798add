//! Configuration for scaffold-kit
//!
//! Settings are loaded from layered sources with clear precedence:
//!
//! 1. Environment variables (highest priority, `SCAFFOLD_` prefix,
//!    double underscore for nesting, e.g. `SCAFFOLD_LAYOUT__MODEL_DIR`)
//! 2. `./scaffold.toml`
//! 3. Hardcoded defaults (fallback)
//!
//! # Example Configuration
//!
//! ```toml
//! # scaffold.toml
//! [layout]
//! model_dir = "src/models"
//! migration_dir = "migrations"
//!
//! [templates]
//! override_dir = "stubs"
//!
//! [database]
//! driver = "pgsql"
//! name = "app_dev"
//!
//! [hooks]
//! refresh_command = "cargo check --quiet"
//! migrate_command = "cargo run --bin migrate"
//! ```

use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Per-kind base directories for generated files, plus the source file
/// extension for code artifacts. Migrations are always written as `.sql`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutSettings {
    /// Directory for model files
    pub model_dir: PathBuf,
    /// Directory for controller files
    pub controller_dir: PathBuf,
    /// Directory for migration files
    pub migration_dir: PathBuf,
    /// Directory for seeder files
    pub seeder_dir: PathBuf,
    /// Directory for API resource files
    pub resource_dir: PathBuf,
    /// Directory for factory files
    pub factory_dir: PathBuf,
    /// Directory for test files
    pub test_dir: PathBuf,
    /// Extension for generated code artifacts (without the dot)
    pub source_extension: String,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            model_dir: PathBuf::from("src/models"),
            controller_dir: PathBuf::from("src/controllers"),
            migration_dir: PathBuf::from("migrations"),
            seeder_dir: PathBuf::from("src/seeders"),
            resource_dir: PathBuf::from("src/resources"),
            factory_dir: PathBuf::from("src/factories"),
            test_dir: PathBuf::from("tests"),
            source_extension: "rs".to_string(),
        }
    }
}

/// Template store configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateSettings {
    /// Directory holding `<templateId>.stub` files that shadow the built-in
    /// template bodies. Unset means built-ins only.
    pub override_dir: Option<PathBuf>,
}

/// Database connection settings consumed by the catalog cleaner
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseSettings {
    /// Driver name (`mysql` or `pgsql`)
    pub driver: String,
    /// Database name, used in catalog queries
    pub name: String,
    /// Client binary used to reach the server (defaults per driver:
    /// `mysql` / `psql`)
    pub client: Option<String>,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            driver: "pgsql".to_string(),
            name: "app".to_string(),
            client: None,
        }
    }
}

/// External commands run around generation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HookSettings {
    /// Command run once per successfully written artifact (dependency index
    /// refresh, e.g. autoload or workspace metadata regeneration)
    pub refresh_command: Option<String>,
    /// Command run by `scaffold create --migrate` after generation
    pub migrate_command: Option<String>,
}

/// Root configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ScaffoldConfig {
    /// Generated-file layout
    pub layout: LayoutSettings,
    /// Template store settings
    pub templates: TemplateSettings,
    /// Database settings for destructive catalog operations
    pub database: DatabaseSettings,
    /// External command hooks
    pub hooks: HookSettings,
}

impl ScaffoldConfig {
    /// Load configuration: defaults, then `./scaffold.toml`, then
    /// `SCAFFOLD_`-prefixed environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a config source is present but malformed.
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from("scaffold.toml")
    }

    /// Load configuration from a specific TOML file path (if it exists),
    /// with defaults below it and environment variables above it.
    ///
    /// # Errors
    ///
    /// Returns an error if a config source is present but malformed.
    pub fn load_from(path: &str) -> anyhow::Result<Self> {
        let config = Figment::new()
            .merge(Toml::string(&toml::to_string(&Self::default())?))
            .merge(Toml::file(path))
            .merge(Env::prefixed("SCAFFOLD_").split("__").lowercase(true))
            .extract()?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_load_without_any_file() {
        figment::Jail::expect_with(|_jail| {
            let config = ScaffoldConfig::load().expect("defaults should load");
            assert_eq!(config.layout.model_dir, PathBuf::from("src/models"));
            assert_eq!(config.layout.source_extension, "rs");
            assert_eq!(config.database.driver, "pgsql");
            assert!(config.hooks.refresh_command.is_none());
            Ok(())
        });
    }

    #[test]
    fn test_file_overrides_defaults() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "scaffold.toml",
                r#"
                [layout]
                model_dir = "app/models"

                [database]
                driver = "mysql"
                name = "blog"
                "#,
            )?;

            let config = ScaffoldConfig::load().expect("config should load");
            assert_eq!(config.layout.model_dir, PathBuf::from("app/models"));
            // untouched sections keep their defaults
            assert_eq!(config.layout.migration_dir, PathBuf::from("migrations"));
            assert_eq!(config.database.driver, "mysql");
            assert_eq!(config.database.name, "blog");
            Ok(())
        });
    }

    #[test]
    fn test_env_overrides_file() {
        figment::Jail::expect_with(|jail| {
            jail.create_file("scaffold.toml", "[database]\ndriver = \"mysql\"\n")?;
            jail.set_env("SCAFFOLD_DATABASE__DRIVER", "pgsql");

            let config = ScaffoldConfig::load().expect("config should load");
            assert_eq!(config.database.driver, "pgsql");
            Ok(())
        });
    }
}
