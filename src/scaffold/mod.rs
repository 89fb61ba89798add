//! The scaffolding engine
//!
//! Two symmetric pipelines over one schema model: schema string → parsed
//! fields → filtered projections → rendered templates → planned artifacts →
//! filesystem, and the mirror-image teardown. Everything up to the executors
//! is pure and deterministic.

pub mod generator;
pub mod naming;
pub mod planner;
pub mod schema;
pub mod teardown;

pub use generator::{ArtifactResult, Generator, NoopRefresh, Outcome, RefreshIndex};
pub use naming::NamingContext;
pub use planner::{
    migration_stamp, migration_suffix, plan, target_path, ArtifactKind, ArtifactSelection,
    ArtifactTask,
};
pub use schema::{FieldDescriptor, SchemaDefinition, DEFAULT_FIELD_TYPE};
