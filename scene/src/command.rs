//! Command surface: serializable requests mapped 1:1 onto store operations.
//!
//! UI chrome, gesture handlers and scripts describe what they want as a
//! [`Command`]; [`SceneStore::apply`] dispatches it. On the wire a command is
//! a JSON object tagged by `"op"`, for example
//! `{"op": "update", "id": "1", "changes": {"left": 5}}`.

#[cfg(test)]
#[path = "command_test.rs"]
mod command_test;

use serde::{Deserialize, Serialize};

use crate::object::{DrawableObject, ObjectId, PartialObject};
use crate::store::{SceneError, SceneStore};
use crate::tool::Tool;

/// A single request against the scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Command {
    /// Replace the scene with an empty document.
    New,
    Add { object: DrawableObject },
    Update { id: ObjectId, changes: PartialObject },
    Remove { id: ObjectId },
    /// Select an object; a missing `id` clears the selection.
    Select {
        #[serde(default)]
        id: Option<ObjectId>,
    },
    Tool { tool: Tool },
    Zoom { factor: f64 },
    ZoomIn,
    ZoomOut,
    Undo,
    Redo,
    BeginGesture,
    EndGesture,
}

impl Command {
    /// The `op` name of this command.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Add { .. } => "add",
            Self::Update { .. } => "update",
            Self::Remove { .. } => "remove",
            Self::Select { .. } => "select",
            Self::Tool { .. } => "tool",
            Self::Zoom { .. } => "zoom",
            Self::ZoomIn => "zoom_in",
            Self::ZoomOut => "zoom_out",
            Self::Undo => "undo",
            Self::Redo => "redo",
            Self::BeginGesture => "begin_gesture",
            Self::EndGesture => "end_gesture",
        }
    }

    /// Whether this command can change the object list.
    #[must_use]
    pub fn is_content(&self) -> bool {
        matches!(
            self,
            Self::New | Self::Add { .. } | Self::Update { .. } | Self::Remove { .. } | Self::Undo | Self::Redo
        )
    }
}

/// What applying a command did to the object list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The object list changed; a renderer should repaint.
    Changed,
    /// Only view state changed, or the command was a no-op.
    Unchanged,
}

impl From<bool> for Outcome {
    fn from(changed: bool) -> Self {
        if changed { Self::Changed } else { Self::Unchanged }
    }
}

impl SceneStore {
    /// Dispatch `command` to the matching store operation.
    ///
    /// # Errors
    ///
    /// Propagates the error of the underlying operation; the scene is left
    /// unchanged.
    pub fn apply(&mut self, command: Command) -> Result<Outcome, SceneError> {
        let outcome = match command {
            Command::New => {
                self.new_document();
                Outcome::Changed
            }
            Command::Add { object } => {
                self.add_object(object)?;
                Outcome::Changed
            }
            Command::Update { id, changes } => self.update_object(&id, &changes)?.into(),
            Command::Remove { id } => self.remove_object(&id).into(),
            Command::Select { id } => {
                self.select_object(id.as_ref());
                Outcome::Unchanged
            }
            Command::Tool { tool } => {
                self.set_active_tool(tool);
                Outcome::Unchanged
            }
            Command::Zoom { factor } => {
                self.set_zoom(factor);
                Outcome::Unchanged
            }
            Command::ZoomIn => {
                self.zoom_in();
                Outcome::Unchanged
            }
            Command::ZoomOut => {
                self.zoom_out();
                Outcome::Unchanged
            }
            Command::Undo => self.undo().into(),
            Command::Redo => self.redo().into(),
            Command::BeginGesture => {
                self.begin_gesture();
                Outcome::Unchanged
            }
            Command::EndGesture => {
                self.end_gesture();
                Outcome::Unchanged
            }
        };
        Ok(outcome)
    }
}
