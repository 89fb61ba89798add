//! CLI command implementations

use std::path::Path;
use std::process::Command;

use console::style;

use crate::scaffold::{ArtifactResult, Outcome, RefreshIndex};

pub mod create;
pub mod drop;
pub mod flush;

pub use create::CreateCommand;
pub use drop::DropCommand;
pub use flush::FlushCommand;

/// Print one styled line per artifact outcome, or the whole batch as JSON.
pub(crate) fn report_results(results: &[ArtifactResult], json: bool) {
    if json {
        let values: Vec<_> = results.iter().map(ArtifactResult::to_json).collect();
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::Value::Array(values))
                .unwrap_or_else(|_| "[]".to_string())
        );
        return;
    }

    for result in results {
        let path = result.path.display();
        let label = result.kind.label();
        match &result.outcome {
            Outcome::Created => println!(
                "  {} {} ({})",
                style("✓").green(),
                style(path).dim(),
                style(label).dim()
            ),
            Outcome::Deleted => println!(
                "  {} {} ({})",
                style("✓").green(),
                style(path).dim(),
                style(format!("{label} removed")).dim()
            ),
            Outcome::AlreadyExists => println!(
                "  {} {} already exists, skipped",
                style("!").yellow(),
                style(path).dim()
            ),
            Outcome::NotFound => println!(
                "  {} {} not found, skipped",
                style("!").yellow(),
                style(path).dim()
            ),
            Outcome::WriteFailed(e) => println!(
                "  {} {} write failed: {e}",
                style("✗").red(),
                style(path).dim()
            ),
            Outcome::DeleteFailed(e) => println!(
                "  {} {} delete failed: {e}",
                style("✗").red(),
                style(path).dim()
            ),
        }
    }
}

/// Number of outcomes that should fail the invocation.
pub(crate) fn failure_count(results: &[ArtifactResult]) -> usize {
    results.iter().filter(|r| r.outcome.is_failure()).count()
}

/// Post-write hook running the configured refresh command once per written
/// artifact. No configured command means no-op.
pub(crate) struct CommandRefresh {
    command: Option<String>,
}

impl CommandRefresh {
    pub(crate) fn new(command: Option<&str>) -> Self {
        Self {
            command: command.map(str::to_string),
        }
    }
}

impl RefreshIndex for CommandRefresh {
    fn refresh(&mut self, _path: &Path) {
        let Some(command) = &self.command else {
            return;
        };
        if let Err(e) = run_shell_hook(command) {
            println!(
                "  {} refresh hook failed: {e}",
                style("warning:").yellow().bold()
            );
        }
    }
}

/// Run a configured hook command, splitting it into program and arguments.
pub(crate) fn run_shell_hook(command: &str) -> anyhow::Result<()> {
    let mut parts = command.split_whitespace();
    let Some(program) = parts.next() else {
        return Ok(());
    };

    let status = Command::new(program).args(parts).status()?;
    if !status.success() {
        anyhow::bail!("'{command}' exited with {status}");
    }
    Ok(())
}
