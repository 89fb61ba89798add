//! Artifact planning
//!
//! The planner turns a naming context and a selection of artifact kinds into
//! an ordered list of tasks, each carrying a target path and a template id.
//! Planning does no I/O: paths are pure functions of `(kind, context,
//! layout)`, which keeps generation and teardown in agreement and makes the
//! planner testable without a filesystem.

use std::collections::BTreeSet;
use std::path::PathBuf;

use serde::Serialize;

use crate::config::LayoutSettings;
use crate::error::ScaffoldError;
use crate::scaffold::naming::NamingContext;

/// One generated or removed artifact kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactKind {
    /// Data model
    Model,
    /// HTTP controller
    Controller,
    /// Database seeder
    Seeder,
    /// Schema migration
    Migration,
    /// API resource
    Resource,
    /// Test-data factory
    Factory,
    /// Feature test
    Test,
}

impl ArtifactKind {
    /// Canonical planning order. Later artifacts reference class names of
    /// earlier ones (the controller names the resource class), so the order
    /// is fixed regardless of how the selection was written.
    pub const CANONICAL_ORDER: [Self; 7] = [
        Self::Model,
        Self::Controller,
        Self::Seeder,
        Self::Migration,
        Self::Resource,
        Self::Factory,
        Self::Test,
    ];

    /// Template id for this kind. Static table, never computed.
    #[must_use]
    pub const fn template_id(self) -> &'static str {
        match self {
            Self::Model => "model",
            Self::Controller => "controller",
            Self::Seeder => "seeder",
            Self::Migration => "migration",
            Self::Resource => "resource",
            Self::Factory => "factory",
            Self::Test => "test",
        }
    }

    /// Human-readable label for per-artifact reporting.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Model => "Model",
            Self::Controller => "Controller",
            Self::Seeder => "Seeder",
            Self::Migration => "Migration",
            Self::Resource => "Resource",
            Self::Factory => "Factory",
            Self::Test => "Test",
        }
    }

    /// Parse one selection token (`model`, `controller`, ...).
    ///
    /// # Errors
    ///
    /// Returns [`ScaffoldError::UnknownKind`] for anything outside the
    /// supported set.
    pub fn parse_token(token: &str) -> Result<Self, ScaffoldError> {
        match token.trim().to_lowercase().as_str() {
            "model" => Ok(Self::Model),
            "controller" => Ok(Self::Controller),
            "seeder" => Ok(Self::Seeder),
            "migration" => Ok(Self::Migration),
            "resource" => Ok(Self::Resource),
            "factory" => Ok(Self::Factory),
            "test" => Ok(Self::Test),
            other => Err(ScaffoldError::UnknownKind(other.to_string())),
        }
    }
}

/// Set of artifact kinds an operation acts on. Defaults to all kinds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactSelection {
    kinds: BTreeSet<ArtifactKind>,
}

impl ArtifactSelection {
    /// Every kind.
    #[must_use]
    pub fn all() -> Self {
        Self {
            kinds: ArtifactKind::CANONICAL_ORDER.into_iter().collect(),
        }
    }

    /// Build a selection from explicit kinds.
    #[must_use]
    pub fn of(kinds: &[ArtifactKind]) -> Self {
        Self {
            kinds: kinds.iter().copied().collect(),
        }
    }

    /// Parse a comma-separated kind list (`"model,controller"`).
    ///
    /// # Errors
    ///
    /// Returns [`ScaffoldError::UnknownKind`] on any unrecognized token.
    pub fn parse(list: &str) -> Result<Self, ScaffoldError> {
        let kinds = list
            .split(',')
            .filter(|t| !t.trim().is_empty())
            .map(ArtifactKind::parse_token)
            .collect::<Result<BTreeSet<_>, _>>()?;
        Ok(Self { kinds })
    }

    /// Whether the selection includes `kind`.
    #[must_use]
    pub fn contains(&self, kind: ArtifactKind) -> bool {
        self.kinds.contains(&kind)
    }

    /// Number of selected kinds.
    #[must_use]
    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    /// Whether nothing is selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }
}

impl Default for ArtifactSelection {
    fn default() -> Self {
        Self::all()
    }
}

/// One planned artifact: what to render and where to put it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactTask {
    /// Artifact kind
    pub kind: ArtifactKind,
    /// Path the artifact is written to or removed from
    pub target_path: PathBuf,
    /// Template the content is rendered from
    pub template_id: &'static str,
}

/// Compute the target path for one artifact kind. Shared by generation and
/// teardown so the two can never disagree.
///
/// `stamp` is the ordering prefix used only by migrations
/// (`<stamp>_create_<table>_table.sql`).
#[must_use]
pub fn target_path(
    kind: ArtifactKind,
    ctx: &NamingContext,
    layout: &LayoutSettings,
    stamp: &str,
) -> PathBuf {
    let ext = &layout.source_extension;
    match kind {
        ArtifactKind::Model => layout.model_dir.join(format!("{}.{ext}", ctx.model_class())),
        ArtifactKind::Controller => layout
            .controller_dir
            .join(format!("{}.{ext}", ctx.controller_class())),
        ArtifactKind::Seeder => layout
            .seeder_dir
            .join(format!("{}.{ext}", ctx.seeder_class())),
        ArtifactKind::Migration => layout
            .migration_dir
            .join(format!("{stamp}{}", migration_suffix(ctx))),
        ArtifactKind::Resource => layout
            .resource_dir
            .join(format!("{}.{ext}", ctx.resource_class())),
        ArtifactKind::Factory => layout
            .factory_dir
            .join(format!("{}.{ext}", ctx.factory_class())),
        ArtifactKind::Test => layout.test_dir.join(format!("{}.{ext}", ctx.test_class())),
    }
}

/// Deterministic migration filename suffix for a context
/// (`_create_<table>_table.sql`). Teardown matches on this because the
/// generation-time stamp is unknowable at drop time.
#[must_use]
pub fn migration_suffix(ctx: &NamingContext) -> String {
    format!("_create_{}_table.sql", ctx.table())
}

/// Ordering prefix for newly generated migrations (UTC, seconds precision).
#[must_use]
pub fn migration_stamp() -> String {
    chrono::Utc::now().format("%Y%m%d%H%M%S").to_string()
}

/// Plan the artifacts to generate or remove for a context and selection,
/// iterated in canonical order. Deterministic and side-effect-free.
#[must_use]
pub fn plan(
    ctx: &NamingContext,
    selection: &ArtifactSelection,
    layout: &LayoutSettings,
    stamp: &str,
) -> Vec<ArtifactTask> {
    ArtifactKind::CANONICAL_ORDER
        .into_iter()
        .filter(|kind| selection.contains(*kind))
        .map(|kind| ArtifactTask {
            kind,
            target_path: target_path(kind, ctx, layout, stamp),
            template_id: kind.template_id(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> NamingContext {
        NamingContext::new("Post", Some("Posts")).unwrap()
    }

    #[test]
    fn test_plan_uses_canonical_order() {
        let tasks = plan(&ctx(), &ArtifactSelection::all(), &LayoutSettings::default(), "0");
        let kinds: Vec<_> = tasks.iter().map(|t| t.kind).collect();
        assert_eq!(kinds, ArtifactKind::CANONICAL_ORDER);
    }

    #[test]
    fn test_plan_is_deterministic_regardless_of_selection_order() {
        let layout = LayoutSettings::default();
        let a = ArtifactSelection::of(&[ArtifactKind::Model, ArtifactKind::Controller]);
        let b = ArtifactSelection::of(&[ArtifactKind::Controller, ArtifactKind::Model]);
        assert_eq!(plan(&ctx(), &a, &layout, "0"), plan(&ctx(), &b, &layout, "0"));

        let tasks = plan(&ctx(), &a, &layout, "0");
        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[0].target_path, PathBuf::from("src/models/Post.rs"));
        assert_eq!(
            tasks[1].target_path,
            PathBuf::from("src/controllers/PostController.rs")
        );
    }

    #[test]
    fn test_migration_path_carries_stamp_and_table() {
        let layout = LayoutSettings::default();
        let path = target_path(ArtifactKind::Migration, &ctx(), &layout, "20260829120000");
        assert_eq!(
            path,
            PathBuf::from("migrations/20260829120000_create_posts_table.sql")
        );
    }

    #[test]
    fn test_template_ids_are_static() {
        for kind in ArtifactKind::CANONICAL_ORDER {
            assert!(!kind.template_id().is_empty());
        }
    }

    #[test]
    fn test_selection_parse_accepts_known_kinds() {
        let selection = ArtifactSelection::parse("model, controller,test").unwrap();
        assert_eq!(selection.len(), 3);
        assert!(selection.contains(ArtifactKind::Model));
        assert!(selection.contains(ArtifactKind::Controller));
        assert!(selection.contains(ArtifactKind::Test));
        assert!(!selection.contains(ArtifactKind::Seeder));
    }

    #[test]
    fn test_selection_parse_rejects_unknown_kind() {
        assert!(ArtifactSelection::parse("model,view").is_err());
    }

    #[test]
    fn test_default_selection_is_all() {
        assert_eq!(ArtifactSelection::default().len(), 7);
    }

    #[test]
    fn test_paths_respect_configured_layout() {
        let layout = LayoutSettings {
            model_dir: PathBuf::from("app"),
            source_extension: "php".to_string(),
            ..LayoutSettings::default()
        };
        let path = target_path(ArtifactKind::Model, &ctx(), &layout, "0");
        assert_eq!(path, PathBuf::from("app/Post.php"));
    }
}
