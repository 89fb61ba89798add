//! scaffold-kit library
//!
//! Template-driven file scaffolding with idempotent, reversible artifact
//! generation, plus a confirmation-gated database catalog cleaner. The
//! `scaffold` binary wires these pieces to a CLI; everything here is usable
//! as a library.

#![forbid(unsafe_code)]
#![deny(clippy::all, clippy::pedantic, clippy::nursery)]
#![warn(clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

pub mod catalog;
pub mod commands;
pub mod config;
pub mod error;
pub mod scaffold;
pub mod templates;

pub use config::ScaffoldConfig;
pub use error::ScaffoldError;
pub use scaffold::{
    ArtifactKind, ArtifactResult, ArtifactSelection, Generator, NamingContext, Outcome,
    SchemaDefinition,
};
pub use templates::{Placeholders, TemplateStore};
