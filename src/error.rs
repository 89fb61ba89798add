//! Error types for the scaffolding engine

use thiserror::Error;

/// Scaffolding error type
///
/// Only parse, selection, and engine-dispatch failures are hard errors: they
/// abort an operation before any side effect occurs. Per-artifact I/O
/// failures are reported as outcomes in the result sequence instead, so one
/// bad artifact never sinks the rest of the batch.
#[derive(Debug, Error)]
pub enum ScaffoldError {
    /// Schema string could not be parsed
    #[error("malformed schema: {reason} (token {position})")]
    MalformedSchema {
        /// 1-based index of the offending comma-separated token
        position: usize,
        /// What was wrong with the token
        reason: String,
    },

    /// Artifact kind token not in the supported set
    #[error("unknown artifact kind: '{0}' (expected one of: model, controller, seeder, migration, resource, factory, test)")]
    UnknownKind(String),

    /// Template id with no built-in body and no override on disk
    #[error("unknown template id: '{0}'")]
    UnknownTemplate(String),

    /// Database driver name with no matching engine
    #[error("unsupported database driver: '{0}' (supported: mysql, pgsql)")]
    UnsupportedEngine(String),

    /// User declined a destructive-action confirmation
    #[error("operation cancelled")]
    ConfirmationDeclined,

    /// Model name failed validation
    #[error("invalid model name: '{0}' (must start with an uppercase letter)")]
    InvalidModelName(String),
}
