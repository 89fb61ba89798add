//! Destructive database-catalog cleanup
//!
//! Enumerates and drops tables, views, triggers, and procedures for a
//! configured engine. The whole sequence is gated behind an explicit
//! confirmation (unless forced), runs inside one transaction, and rolls back
//! on the first failed step. Database access goes through the [`SqlRunner`]
//! trait; this crate ships no driver.
//!
//! State machine:
//!
//! ```text
//! Idle -> AwaitingConfirmation -> { Aborted | Executing } -> Done
//! ```

use thiserror::Error;

use crate::error::ScaffoldError;

pub mod shell;

/// Error from a [`SqlRunner`] implementation
#[derive(Debug, Error)]
#[error("{0}")]
pub struct SqlError(pub String);

/// Thin driver seam: catalog reads and statement execution against one live
/// connection. Implementations decide how a "transaction" is realized.
pub trait SqlRunner {
    /// Run a catalog query, returning rows of column values.
    ///
    /// # Errors
    ///
    /// Returns [`SqlError`] when the query cannot be executed.
    fn query(&mut self, sql: &str) -> Result<Vec<Vec<String>>, SqlError>;

    /// Execute one statement.
    ///
    /// # Errors
    ///
    /// Returns [`SqlError`] when the statement fails.
    fn execute(&mut self, sql: &str) -> Result<(), SqlError>;

    /// Open the drop transaction.
    ///
    /// # Errors
    ///
    /// Returns [`SqlError`] when the transaction cannot be opened.
    fn begin(&mut self) -> Result<(), SqlError>;

    /// Commit the drop transaction.
    ///
    /// # Errors
    ///
    /// Returns [`SqlError`] when the commit fails.
    fn commit(&mut self) -> Result<(), SqlError>;

    /// Roll the drop transaction back.
    ///
    /// # Errors
    ///
    /// Returns [`SqlError`] when the rollback fails.
    fn rollback(&mut self) -> Result<(), SqlError>;
}

/// Supported database engines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Engine {
    /// MySQL-like: `SHOW`-statement catalog
    MySql,
    /// Postgres-like: `information_schema` / `pg_catalog`
    Postgres,
}

impl Engine {
    /// Typed dispatch from a connection's declared driver name.
    ///
    /// # Errors
    ///
    /// Returns [`ScaffoldError::UnsupportedEngine`] for unknown drivers,
    /// before any statement executes.
    pub fn from_driver(driver: &str) -> Result<Self, ScaffoldError> {
        match driver.trim().to_lowercase().as_str() {
            "mysql" | "mariadb" => Ok(Self::MySql),
            "pgsql" | "postgres" | "postgresql" => Ok(Self::Postgres),
            other => Err(ScaffoldError::UnsupportedEngine(other.to_string())),
        }
    }

    /// Default client binary for [`shell::ShellRunner`].
    #[must_use]
    pub const fn default_client(self) -> &'static str {
        match self {
            Self::MySql => "mysql",
            Self::Postgres => "psql",
        }
    }
}

/// Explicit configuration for the cleaner; no process-wide lookups.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Engine resolved from the connection's driver name
    pub engine: Engine,
    /// Database the catalog queries are scoped to
    pub database: String,
}

/// Cleaner lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CleanerState {
    /// Nothing requested yet
    Idle,
    /// Destructive run requested, waiting on the confirmation gate
    AwaitingConfirmation,
    /// Confirmation declined; nothing was executed
    Aborted,
    /// Confirmed and ready to run
    Executing,
    /// Drop sequence committed
    Done,
}

/// Counts of dropped catalog objects
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CleanReport {
    /// Tables dropped
    pub tables: usize,
    /// Views dropped
    pub views: usize,
    /// Triggers dropped
    pub triggers: usize,
    /// Procedures dropped
    pub procedures: usize,
}

/// Catalog cleanup error
#[derive(Debug, Error)]
pub enum CatalogError {
    /// A drop or catalog statement failed; the transaction was rolled back
    #[error("statement failed (rolled back): {sql}: {message}")]
    Statement {
        /// Statement that failed
        sql: String,
        /// Driver-reported cause
        message: String,
    },

    /// Opening, committing, or rolling back the transaction failed
    #[error("transaction error: {0}")]
    Transaction(String),

    /// A lifecycle method was called out of order
    #[error("cleaner is not in a runnable state ({0:?})")]
    InvalidState(CleanerState),
}

/// Confirmation-gated, transaction-wrapped catalog cleaner
#[derive(Debug)]
pub struct CatalogCleaner {
    config: CatalogConfig,
    state: CleanerState,
}

impl CatalogCleaner {
    /// Build an idle cleaner for an explicit configuration.
    #[must_use]
    pub const fn new(config: CatalogConfig) -> Self {
        Self {
            config,
            state: CleanerState::Idle,
        }
    }

    /// Current lifecycle state.
    #[must_use]
    pub const fn state(&self) -> CleanerState {
        self.state
    }

    /// Request a destructive run; the cleaner now awaits confirmation.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::InvalidState`] unless the cleaner is idle.
    pub fn request(&mut self) -> Result<(), CatalogError> {
        if self.state != CleanerState::Idle {
            return Err(CatalogError::InvalidState(self.state));
        }
        self.state = CleanerState::AwaitingConfirmation;
        Ok(())
    }

    /// Resolve the confirmation gate. A force flag resolves with `true`
    /// without prompting anyone.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::InvalidState`] unless a run was requested.
    pub fn resolve(&mut self, confirmed: bool) -> Result<CleanerState, CatalogError> {
        if self.state != CleanerState::AwaitingConfirmation {
            return Err(CatalogError::InvalidState(self.state));
        }
        self.state = if confirmed {
            CleanerState::Executing
        } else {
            CleanerState::Aborted
        };
        Ok(self.state)
    }

    /// Run the drop sequence (tables, views, triggers, procedures) inside
    /// one transaction. Any failed step rolls the transaction back; the
    /// MySQL foreign-key toggle is restored on the error path as well.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::InvalidState`] unless confirmed, or the first
    /// step failure after rollback.
    pub fn run(&mut self, runner: &mut dyn SqlRunner) -> Result<CleanReport, CatalogError> {
        if self.state != CleanerState::Executing {
            return Err(CatalogError::InvalidState(self.state));
        }

        runner
            .begin()
            .map_err(|e| CatalogError::Transaction(e.to_string()))?;

        match self.drop_all(runner) {
            Ok(report) => {
                runner
                    .commit()
                    .map_err(|e| CatalogError::Transaction(e.to_string()))?;
                self.state = CleanerState::Done;
                Ok(report)
            }
            Err(e) => {
                if self.config.engine == Engine::MySql {
                    // best effort; the original failure is what gets reported
                    let _ = runner.execute("SET FOREIGN_KEY_CHECKS = 1");
                }
                let _ = runner.rollback();
                Err(e)
            }
        }
    }

    fn drop_all(&self, runner: &mut dyn SqlRunner) -> Result<CleanReport, CatalogError> {
        Ok(CleanReport {
            tables: self.drop_tables(runner)?,
            views: self.drop_views(runner)?,
            triggers: self.drop_triggers(runner)?,
            procedures: self.drop_procedures(runner)?,
        })
    }

    fn drop_tables(&self, runner: &mut dyn SqlRunner) -> Result<usize, CatalogError> {
        match self.config.engine {
            Engine::MySql => {
                let tables = first_column(query(runner, "SHOW TABLES")?);
                if tables.is_empty() {
                    return Ok(0);
                }
                exec(runner, "SET FOREIGN_KEY_CHECKS = 0")?;
                exec(runner, &format!("DROP TABLE {}", tables.join(",")))?;
                exec(runner, "SET FOREIGN_KEY_CHECKS = 1")?;
                Ok(tables.len())
            }
            Engine::Postgres => {
                let tables = first_column(query(
                    runner,
                    "SELECT tablename FROM pg_tables WHERE schemaname = 'public'",
                )?);
                if tables.is_empty() {
                    return Ok(0);
                }
                exec(
                    runner,
                    &format!("DROP TABLE IF EXISTS {} CASCADE", tables.join(",")),
                )?;
                Ok(tables.len())
            }
        }
    }

    fn drop_views(&self, runner: &mut dyn SqlRunner) -> Result<usize, CatalogError> {
        match self.config.engine {
            Engine::MySql => {
                let sql = format!(
                    "SHOW FULL TABLES IN {} WHERE TABLE_TYPE LIKE 'VIEW'",
                    self.config.database
                );
                let views = first_column(query(runner, &sql)?);
                if views.is_empty() {
                    return Ok(0);
                }
                exec(runner, &format!("DROP VIEW {}", views.join(",")))?;
                Ok(views.len())
            }
            Engine::Postgres => {
                let sql = format!(
                    "SELECT table_name FROM information_schema.views \
                     WHERE table_catalog = '{}' AND table_schema = 'public'",
                    self.config.database
                );
                let views = first_column(query(runner, &sql)?);
                if views.is_empty() {
                    return Ok(0);
                }
                exec(
                    runner,
                    &format!("DROP VIEW IF EXISTS {} CASCADE", views.join(",")),
                )?;
                Ok(views.len())
            }
        }
    }

    fn drop_triggers(&self, runner: &mut dyn SqlRunner) -> Result<usize, CatalogError> {
        match self.config.engine {
            Engine::MySql => {
                let triggers = first_column(query(runner, "SHOW TRIGGERS")?);
                for trigger in &triggers {
                    exec(runner, &format!("DROP TRIGGER {trigger}"))?;
                }
                Ok(triggers.len())
            }
            Engine::Postgres => {
                // a Postgres trigger is dropped relative to its table
                let rows = query(
                    runner,
                    "SELECT trigger_name, event_object_table FROM information_schema.triggers \
                     WHERE trigger_schema = 'public'",
                )?;
                let mut dropped = 0;
                for row in rows {
                    if let [name, table, ..] = row.as_slice() {
                        exec(runner, &format!("DROP TRIGGER IF EXISTS {name} ON {table}"))?;
                        dropped += 1;
                    }
                }
                Ok(dropped)
            }
        }
    }

    fn drop_procedures(&self, runner: &mut dyn SqlRunner) -> Result<usize, CatalogError> {
        match self.config.engine {
            Engine::MySql => {
                let sql = format!(
                    "SHOW PROCEDURE STATUS WHERE Db = '{}'",
                    self.config.database
                );
                let procedures = first_column(query(runner, &sql)?);
                for procedure in &procedures {
                    exec(runner, &format!("DROP PROCEDURE {procedure}"))?;
                }
                Ok(procedures.len())
            }
            Engine::Postgres => {
                let procedures = first_column(query(
                    runner,
                    "SELECT routine_name FROM information_schema.routines \
                     WHERE routine_schema = 'public' AND routine_type = 'PROCEDURE'",
                )?);
                for procedure in &procedures {
                    exec(runner, &format!("DROP PROCEDURE IF EXISTS {procedure}"))?;
                }
                Ok(procedures.len())
            }
        }
    }
}

fn query(runner: &mut dyn SqlRunner, sql: &str) -> Result<Vec<Vec<String>>, CatalogError> {
    runner.query(sql).map_err(|e| CatalogError::Statement {
        sql: sql.to_string(),
        message: e.to_string(),
    })
}

fn exec(runner: &mut dyn SqlRunner, sql: &str) -> Result<(), CatalogError> {
    runner.execute(sql).map_err(|e| CatalogError::Statement {
        sql: sql.to_string(),
        message: e.to_string(),
    })
}

fn first_column(rows: Vec<Vec<String>>) -> Vec<String> {
    rows.into_iter()
        .filter_map(|row| row.into_iter().next())
        .collect()
}
