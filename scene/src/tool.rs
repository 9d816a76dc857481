//! Drawing tools selectable by the user.
//!
//! The active tool is UI state, not document content: switching tools is
//! never recorded in history. Gesture handlers outside this crate look at the
//! active tool to decide which object to build from pointer input.

#[cfg(test)]
#[path = "tool_test.rs"]
mod tool_test;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::object::ShapeKind;

/// Which tool is currently active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    /// Pointer / selection tool (default).
    #[default]
    Select,
    /// Draw a rectangle.
    Rectangle,
    /// Draw a circle.
    Circle,
    /// Draw a straight line.
    Line,
    /// Freehand drawing.
    Pen,
    /// Place a text object.
    Text,
    /// Delete objects by clicking them.
    Eraser,
}

impl Tool {
    /// Every tool, in toolbar order.
    pub const ALL: [Tool; 7] =
        [Self::Select, Self::Rectangle, Self::Circle, Self::Line, Self::Pen, Self::Text, Self::Eraser];

    /// The kind of object this tool creates, if it creates one.
    #[must_use]
    pub fn shape_kind(self) -> Option<ShapeKind> {
        match self {
            Self::Rectangle => Some(ShapeKind::Rectangle),
            Self::Circle => Some(ShapeKind::Circle),
            Self::Line => Some(ShapeKind::Line),
            Self::Pen => Some(ShapeKind::Path),
            Self::Text => Some(ShapeKind::Text),
            Self::Select | Self::Eraser => None,
        }
    }

    /// Whether this tool creates new objects.
    #[must_use]
    pub fn is_drawing(self) -> bool {
        self.shape_kind().is_some()
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Select => "select",
            Self::Rectangle => "rectangle",
            Self::Circle => "circle",
            Self::Line => "line",
            Self::Pen => "pen",
            Self::Text => "text",
            Self::Eraser => "eraser",
        }
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown tool: {0}")]
pub struct UnknownTool(pub String);

impl FromStr for Tool {
    type Err = UnknownTool;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|tool| tool.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownTool(s.to_string()))
    }
}
