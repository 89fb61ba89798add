//! `SqlRunner` backed by the engine's command-line client
//!
//! The crate ships no database driver; this runner reaches the server
//! through `mysql`/`psql` child processes instead. Catalog queries run
//! immediately, one invocation each. Statements issued between `begin` and
//! `commit` are buffered and submitted as a single
//! `BEGIN; ...; COMMIT;` script in one invocation, which is the only way to
//! keep the drop sequence transactional across separate client processes.
//! `rollback` simply discards the buffer.

use std::process::Command;

use super::{Engine, SqlError, SqlRunner};

/// Client-process runner
#[derive(Debug)]
pub struct ShellRunner {
    engine: Engine,
    database: String,
    program: String,
    pending: Vec<String>,
    in_transaction: bool,
}

impl ShellRunner {
    /// Build a runner for an engine and database, optionally overriding the
    /// client binary (`mysql` / `psql` by default).
    #[must_use]
    pub fn new(engine: Engine, database: &str, client: Option<&str>) -> Self {
        Self {
            engine,
            database: database.to_string(),
            program: client.map_or_else(|| engine.default_client().to_string(), str::to_string),
            pending: Vec::new(),
            in_transaction: false,
        }
    }

    fn invoke(&self, sql: &str) -> Result<String, SqlError> {
        let mut command = Command::new(&self.program);
        match self.engine {
            Engine::MySql => {
                command.args(["-N", "-B", "-e", sql, &self.database]);
            }
            Engine::Postgres => {
                command.args(["-t", "-A", "-F", "\t", "-c", sql, &self.database]);
            }
        }

        let output = command
            .output()
            .map_err(|e| SqlError(format!("failed to run {}: {e}", self.program)))?;

        if !output.status.success() {
            return Err(SqlError(format!(
                "{} exited with {}: {}",
                self.program,
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl SqlRunner for ShellRunner {
    fn query(&mut self, sql: &str) -> Result<Vec<Vec<String>>, SqlError> {
        let stdout = self.invoke(sql)?;
        Ok(stdout
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| line.split('\t').map(str::to_string).collect())
            .collect())
    }

    fn execute(&mut self, sql: &str) -> Result<(), SqlError> {
        if self.in_transaction {
            self.pending.push(sql.to_string());
            Ok(())
        } else {
            self.invoke(sql).map(|_| ())
        }
    }

    fn begin(&mut self) -> Result<(), SqlError> {
        self.in_transaction = true;
        self.pending.clear();
        Ok(())
    }

    fn commit(&mut self) -> Result<(), SqlError> {
        self.in_transaction = false;
        if self.pending.is_empty() {
            return Ok(());
        }
        let script = format!("BEGIN;\n{};\nCOMMIT;", self.pending.join(";\n"));
        self.pending.clear();
        self.invoke(&script).map(|_| ())
    }

    fn rollback(&mut self) -> Result<(), SqlError> {
        self.in_transaction = false;
        self.pending.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffered_statements_are_discarded_on_rollback() {
        let mut runner = ShellRunner::new(Engine::Postgres, "blog", None);
        runner.begin().unwrap();
        runner.execute("DROP TABLE posts").unwrap();
        assert_eq!(runner.pending.len(), 1);

        runner.rollback().unwrap();
        assert!(runner.pending.is_empty());
        // nothing left to submit either
        runner.commit().unwrap();
    }

    #[test]
    fn test_default_clients_per_engine() {
        let mysql = ShellRunner::new(Engine::MySql, "blog", None);
        assert_eq!(mysql.program, "mysql");
        let pg = ShellRunner::new(Engine::Postgres, "blog", Some("psql17"));
        assert_eq!(pg.program, "psql17");
    }
}
