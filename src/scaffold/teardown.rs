//! Teardown executor
//!
//! Mirror image of generation: resolves the same target paths and removes
//! whatever exists. A missing file is reported, never fatal, and kinds are
//! independent, so the batch always runs to completion.
//!
//! Migrations are the one kind whose filename carries a generation-time
//! stamp, so they are resolved by scanning the migration directory for the
//! deterministic `_create_<table>_table.sql` suffix instead of
//! reconstructing the exact path.

use std::fs;
use std::path::PathBuf;

use walkdir::WalkDir;

use crate::config::LayoutSettings;
use crate::scaffold::generator::{ArtifactResult, Outcome};
use crate::scaffold::naming::NamingContext;
use crate::scaffold::planner::{migration_suffix, target_path, ArtifactKind, ArtifactSelection};

/// Remove every selected artifact for a context. Returns one result per
/// removed or missing file, in canonical kind order.
#[must_use]
pub fn remove(
    selection: &ArtifactSelection,
    ctx: &NamingContext,
    layout: &LayoutSettings,
) -> Vec<ArtifactResult> {
    let mut results = Vec::new();

    for kind in ArtifactKind::CANONICAL_ORDER {
        if !selection.contains(kind) {
            continue;
        }

        if kind == ArtifactKind::Migration {
            results.extend(remove_migrations(ctx, layout));
        } else {
            let path = target_path(kind, ctx, layout, "");
            results.push(remove_file(kind, path));
        }
    }

    results
}

fn remove_file(kind: ArtifactKind, path: PathBuf) -> ArtifactResult {
    let outcome = if path.exists() {
        match fs::remove_file(&path) {
            Ok(()) => Outcome::Deleted,
            Err(e) => Outcome::DeleteFailed(e),
        }
    } else {
        Outcome::NotFound
    };

    ArtifactResult {
        kind,
        path,
        outcome,
    }
}

/// Remove every generated migration regardless of table name
/// (`*_create_*_table.sql`). A full flush uses this: migration filenames
/// carry each model's table name, which the model list alone cannot
/// reconstruct.
#[must_use]
pub fn remove_all_migrations(layout: &LayoutSettings) -> Vec<ArtifactResult> {
    let mut matches: Vec<PathBuf> = WalkDir::new(&layout.migration_dir)
        .max_depth(1)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| {
            entry
                .file_name()
                .to_str()
                .is_some_and(|name| name.contains("_create_") && name.ends_with("_table.sql"))
        })
        .map(walkdir::DirEntry::into_path)
        .collect();
    matches.sort();

    if matches.is_empty() {
        return vec![ArtifactResult {
            kind: ArtifactKind::Migration,
            path: layout.migration_dir.join("*_create_*_table.sql"),
            outcome: Outcome::NotFound,
        }];
    }

    matches
        .into_iter()
        .map(|path| remove_file(ArtifactKind::Migration, path))
        .collect()
}

fn remove_migrations(ctx: &NamingContext, layout: &LayoutSettings) -> Vec<ArtifactResult> {
    let suffix = migration_suffix(ctx);

    let matches: Vec<PathBuf> = WalkDir::new(&layout.migration_dir)
        .max_depth(1)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| {
            entry
                .file_name()
                .to_str()
                .is_some_and(|name| name.ends_with(&suffix))
        })
        .map(walkdir::DirEntry::into_path)
        .collect();

    if matches.is_empty() {
        // report the path pattern that was searched for
        return vec![ArtifactResult {
            kind: ArtifactKind::Migration,
            path: layout.migration_dir.join(format!("*{suffix}")),
            outcome: Outcome::NotFound,
        }];
    }

    matches
        .into_iter()
        .map(|path| remove_file(ArtifactKind::Migration, path))
        .collect()
}
