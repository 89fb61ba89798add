//! Generation executor
//!
//! Walks the planned tasks, rendering and writing each artifact. Generation
//! never overwrites: a pre-existing file yields `AlreadyExists` and the
//! batch continues. Filesystem failures are isolated per artifact with the
//! underlying cause preserved in the outcome.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ScaffoldError;
use crate::scaffold::naming::NamingContext;
use crate::scaffold::planner::{ArtifactKind, ArtifactTask};
use crate::scaffold::schema::SchemaDefinition;
use crate::templates::{Placeholders, TemplateStore};

/// What happened to one artifact
#[derive(Debug)]
pub enum Outcome {
    /// File rendered and written
    Created,
    /// File already present; nothing written
    AlreadyExists,
    /// Render or write failed; cause preserved
    WriteFailed(std::io::Error),
    /// File removed
    Deleted,
    /// Nothing to remove
    NotFound,
    /// Delete failed; cause preserved
    DeleteFailed(std::io::Error),
}

impl Outcome {
    /// Whether this outcome should fail the overall invocation.
    #[must_use]
    pub const fn is_failure(&self) -> bool {
        matches!(self, Self::WriteFailed(_) | Self::DeleteFailed(_))
    }

    /// Short status word for reporting.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::AlreadyExists => "already exists",
            Self::WriteFailed(_) => "write failed",
            Self::Deleted => "deleted",
            Self::NotFound => "not found",
            Self::DeleteFailed(_) => "delete failed",
        }
    }
}

/// Result for one artifact of a generate or teardown batch
#[derive(Debug)]
pub struct ArtifactResult {
    /// Artifact kind
    pub kind: ArtifactKind,
    /// Path the artifact lives at (or would have)
    pub path: PathBuf,
    /// What happened
    pub outcome: Outcome,
}

impl ArtifactResult {
    /// Machine-readable form for `--json` output.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        let cause = match &self.outcome {
            Outcome::WriteFailed(e) | Outcome::DeleteFailed(e) => {
                Some(serde_json::Value::String(e.to_string()))
            }
            _ => None,
        };
        serde_json::json!({
            "kind": self.kind,
            "path": self.path.display().to_string(),
            "outcome": self.outcome.label(),
            "cause": cause,
        })
    }
}

/// Post-write collaborator, called at most once per successfully written
/// artifact. Keeps the core decoupled from any specific build or autoload
/// system.
pub trait RefreshIndex {
    /// React to a newly written artifact at `path`.
    fn refresh(&mut self, path: &Path);
}

/// Hook that does nothing.
#[derive(Debug, Default)]
pub struct NoopRefresh;

impl RefreshIndex for NoopRefresh {
    fn refresh(&mut self, _path: &Path) {}
}

/// Generation executor for one invocation. Context and schema are read-only
/// inputs threaded through every kind's render.
pub struct Generator<'a> {
    store: &'a TemplateStore,
    ctx: &'a NamingContext,
    schema: &'a SchemaDefinition,
}

impl<'a> Generator<'a> {
    /// Build an executor over a template store, naming context, and parsed
    /// schema.
    #[must_use]
    pub const fn new(
        store: &'a TemplateStore,
        ctx: &'a NamingContext,
        schema: &'a SchemaDefinition,
    ) -> Self {
        Self { store, ctx, schema }
    }

    /// Generate every planned artifact, returning one result per task in
    /// task order. `refresh` runs once after each successful write.
    ///
    /// # Errors
    ///
    /// Returns [`ScaffoldError::UnknownTemplate`] if a task names a template
    /// the store cannot resolve; per-artifact I/O failures are outcomes, not
    /// errors.
    pub fn generate(
        &self,
        tasks: &[ArtifactTask],
        refresh: &mut dyn RefreshIndex,
    ) -> Result<Vec<ArtifactResult>, ScaffoldError> {
        let mut results = Vec::with_capacity(tasks.len());

        for task in tasks {
            let outcome = if task.target_path.exists() {
                Outcome::AlreadyExists
            } else {
                let body = self.store.body(task.template_id)?;
                let placeholders = Placeholders::for_artifact(self.ctx, self.schema);
                let content = placeholders.render(&body);

                match write_artifact(&task.target_path, &content) {
                    Ok(()) => {
                        refresh.refresh(&task.target_path);
                        Outcome::Created
                    }
                    Err(e) => Outcome::WriteFailed(e),
                }
            };

            results.push(ArtifactResult {
                kind: task.kind,
                path: task.target_path.clone(),
                outcome,
            });
        }

        Ok(results)
    }
}

fn write_artifact(path: &Path, content: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LayoutSettings;
    use crate::scaffold::planner::{plan, ArtifactSelection};

    struct CountingRefresh(usize);

    impl RefreshIndex for CountingRefresh {
        fn refresh(&mut self, _path: &Path) {
            self.0 += 1;
        }
    }

    fn layout_in(root: &Path) -> LayoutSettings {
        let defaults = LayoutSettings::default();
        LayoutSettings {
            model_dir: root.join(defaults.model_dir),
            controller_dir: root.join(defaults.controller_dir),
            migration_dir: root.join(defaults.migration_dir),
            seeder_dir: root.join(defaults.seeder_dir),
            resource_dir: root.join(defaults.resource_dir),
            factory_dir: root.join(defaults.factory_dir),
            test_dir: root.join(defaults.test_dir),
            source_extension: defaults.source_extension,
        }
    }

    fn fixtures() -> (NamingContext, SchemaDefinition) {
        let ctx = NamingContext::new("Post", Some("Posts")).unwrap();
        let schema = SchemaDefinition::parse("title:string, views:integer").unwrap();
        (ctx, schema)
    }

    #[test]
    fn test_generate_writes_every_selected_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let layout = layout_in(dir.path());
        let (ctx, schema) = fixtures();
        let tasks = plan(&ctx, &ArtifactSelection::all(), &layout, "20260829000000");

        let store = TemplateStore::builtin();
        let generator = Generator::new(&store, &ctx, &schema);
        let mut refresh = CountingRefresh(0);
        let results = generator.generate(&tasks, &mut refresh).unwrap();

        assert_eq!(results.len(), 7);
        for result in &results {
            assert!(matches!(result.outcome, Outcome::Created), "{result:?}");
            assert!(result.path.exists());
        }
        // hook fired once per successful write
        assert_eq!(refresh.0, 7);

        let model = std::fs::read_to_string(dir.path().join("src/models/Post.rs")).unwrap();
        assert!(model.contains("pub struct Post"));
        assert!(model.contains("pub title: String,"));
        assert!(model.contains(r#"pub const TABLE: &'static str = "posts";"#));
    }

    #[test]
    fn test_generate_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let layout = layout_in(dir.path());
        let (ctx, schema) = fixtures();
        let tasks = plan(&ctx, &ArtifactSelection::all(), &layout, "20260829000000");

        let store = TemplateStore::builtin();
        let generator = Generator::new(&store, &ctx, &schema);

        generator.generate(&tasks, &mut NoopRefresh).unwrap();
        let mut refresh = CountingRefresh(0);
        let second = generator.generate(&tasks, &mut refresh).unwrap();

        for result in &second {
            assert!(matches!(result.outcome, Outcome::AlreadyExists), "{result:?}");
        }
        // nothing written, so the hook never fires
        assert_eq!(refresh.0, 0);
    }

    #[test]
    fn test_existing_file_is_never_overwritten() {
        let dir = tempfile::tempdir().unwrap();
        let layout = layout_in(dir.path());
        let (ctx, schema) = fixtures();
        let tasks = plan(
            &ctx,
            &ArtifactSelection::of(&[ArtifactKind::Model]),
            &layout,
            "0",
        );

        std::fs::create_dir_all(&layout.model_dir).unwrap();
        let existing = layout.model_dir.join("Post.rs");
        std::fs::write(&existing, "hand-written").unwrap();

        let store = TemplateStore::builtin();
        let generator = Generator::new(&store, &ctx, &schema);
        let results = generator.generate(&tasks, &mut NoopRefresh).unwrap();

        assert_eq!(results.len(), 1);
        assert!(matches!(results[0].outcome, Outcome::AlreadyExists));
        assert_eq!(std::fs::read_to_string(&existing).unwrap(), "hand-written");
    }

    #[test]
    fn test_write_failure_is_isolated_per_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let mut layout = layout_in(dir.path());
        // model dir path occupied by a file, so creating it as a directory fails
        std::fs::write(dir.path().join("blocked"), "").unwrap();
        layout.model_dir = dir.path().join("blocked/nested");

        let (ctx, schema) = fixtures();
        let tasks = plan(
            &ctx,
            &ArtifactSelection::of(&[ArtifactKind::Model, ArtifactKind::Factory]),
            &layout,
            "0",
        );

        let store = TemplateStore::builtin();
        let generator = Generator::new(&store, &ctx, &schema);
        let results = generator.generate(&tasks, &mut NoopRefresh).unwrap();

        assert_eq!(results.len(), 2);
        assert!(matches!(results[0].outcome, Outcome::WriteFailed(_)));
        // the batch continued past the failure
        assert!(matches!(results[1].outcome, Outcome::Created));
    }

    #[test]
    fn test_unknown_template_aborts_before_any_write() {
        let dir = tempfile::tempdir().unwrap();
        let layout = layout_in(dir.path());
        let (ctx, schema) = fixtures();

        let tasks = vec![ArtifactTask {
            kind: ArtifactKind::Model,
            target_path: layout.model_dir.join("Post.rs"),
            template_id: "bogus",
        }];

        let store = TemplateStore::builtin();
        let generator = Generator::new(&store, &ctx, &schema);
        let result = generator.generate(&tasks, &mut NoopRefresh);

        assert!(matches!(result, Err(ScaffoldError::UnknownTemplate(_))));
        assert!(!layout.model_dir.join("Post.rs").exists());
    }
}
