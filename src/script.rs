//! Edit scripts: JSON-lines files of scene commands.
//!
//! Each non-blank line that does not start with `#` is one
//! [`Command`](scene::Command), for example:
//!
//! ```text
//! # draw a box, nudge it, change our mind
//! {"op": "add", "object": {"id": "1", "type": "rectangle", "left": 0, "top": 0, "width": 10, "height": 10}}
//! {"op": "update", "id": "1", "changes": {"left": 5}}
//! {"op": "undo"}
//! ```
//!
//! The whole script is parsed before anything is applied, and replay stops at
//! the first failing command.

use scene::{Command, Outcome, SceneStore};
use tracing::debug;

use crate::CliError;

/// A parsed command and the 1-based line it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct ScriptLine {
    pub line: usize,
    pub command: Command,
}

/// Counts reported after a successful replay.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplaySummary {
    /// Commands applied.
    pub applied: usize,
    /// Commands that changed the object list.
    pub changed: usize,
}

/// Parse every command in `text`.
pub fn parse_script(text: &str) -> Result<Vec<ScriptLine>, CliError> {
    let mut out = Vec::new();
    for (index, raw) in text.lines().enumerate() {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let line = index + 1;
        let command = serde_json::from_str(trimmed).map_err(|source| CliError::ScriptParse { line, source })?;
        out.push(ScriptLine { line, command });
    }
    Ok(out)
}

/// Apply `lines` to `store` in order.
pub fn replay(store: &mut SceneStore, lines: Vec<ScriptLine>) -> Result<ReplaySummary, CliError> {
    let mut summary = ReplaySummary::default();
    for ScriptLine { line, command } in lines {
        let op = command.name();
        let content = command.is_content();
        let outcome = store.apply(command).map_err(|source| CliError::ScriptApply { line, op, source })?;
        debug!(line, op, content, ?outcome, "command applied");

        summary.applied += 1;
        if outcome == Outcome::Changed {
            summary.changed += 1;
        }
    }
    Ok(summary)
}

#[cfg(test)]
#[path = "script_test.rs"]
mod tests;
