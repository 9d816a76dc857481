//! Object model: drawable objects, their shape variants, and sparse updates.
//!
//! This module defines what lives in the scene (`DrawableObject`, `Shape`),
//! the freehand path encoding (`PathCommand`), and the sparse-update type used
//! by direct-manipulation edits (`PartialObject`).
//!
//! Every object shares one base of geometry and style fields. Kind-specific
//! payload (line endpoints, text, path commands) lives only on the matching
//! `Shape` variant, so a circle can never carry a path. On the wire the object
//! is a single flat JSON record with a `"type"` discriminator, which is the
//! shape the `.vec` file format has always used.

#[cfg(test)]
#[path = "object_test.rs"]
mod object_test;

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::consts::{DEFAULT_FILL, DEFAULT_STROKE};

// =============================================================================
// IDS AND KINDS
// =============================================================================

/// Opaque unique identifier for a drawable object.
///
/// Freshly created objects get a v4 UUID; ids read from documents are kept
/// verbatim, since older files use decimal timestamps.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectId(String);

impl ObjectId {
    /// Mint a new id that has never been used before.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ObjectId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for ObjectId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The kind of a drawable object, without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    Rectangle,
    Circle,
    Line,
    Text,
    /// Freehand pen stroke.
    Path,
}

impl ShapeKind {
    /// Name used for this kind in documents.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Rectangle => "rectangle",
            Self::Circle => "circle",
            Self::Line => "line",
            Self::Text => "text",
            Self::Path => "path",
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// SHAPES
// =============================================================================

/// Kind-specific part of a drawable object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Shape {
    /// Axis-aligned rectangle filling the bounding box.
    Rectangle,
    /// Circle whose diameter is the bounding-box width.
    Circle,
    /// Straight segment. The endpoints are authoritative over the bounding box.
    Line { x1: f64, y1: f64, x2: f64, y2: f64 },
    /// Single text run.
    Text { text: String },
    /// Freehand stroke recorded by the pen tool.
    Path { path: Vec<PathCommand> },
}

impl Shape {
    #[must_use]
    pub fn kind(&self) -> ShapeKind {
        match self {
            Self::Rectangle => ShapeKind::Rectangle,
            Self::Circle => ShapeKind::Circle,
            Self::Line { .. } => ShapeKind::Line,
            Self::Text { .. } => ShapeKind::Text,
            Self::Path { .. } => ShapeKind::Path,
        }
    }
}

/// Error decoding a path command from its array form.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PathCommandError {
    #[error("path command is empty")]
    Empty,
    #[error("path command must start with a letter")]
    MissingLetter,
    #[error("unknown path command `{0}`")]
    UnknownCommand(String),
    #[error("path command `{command}` expects {expected} numbers, got {got}")]
    Arity { command: char, expected: usize, got: usize },
    #[error("path command `{command}` has a non-numeric argument")]
    NotANumber { command: char },
}

/// One step of a freehand path.
///
/// Encoded as an SVG-style array: `["M", x, y]`, `["L", x, y]`,
/// `["Q", cx, cy, x, y]`, `["C", c1x, c1y, c2x, c2y, x, y]`, `["Z"]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Value>", into = "Vec<Value>")]
pub enum PathCommand {
    MoveTo { x: f64, y: f64 },
    LineTo { x: f64, y: f64 },
    QuadTo { cx: f64, cy: f64, x: f64, y: f64 },
    CubicTo { c1x: f64, c1y: f64, c2x: f64, c2y: f64, x: f64, y: f64 },
    Close,
}

impl PathCommand {
    /// The SVG letter for this command.
    #[must_use]
    pub fn letter(&self) -> char {
        match self {
            Self::MoveTo { .. } => 'M',
            Self::LineTo { .. } => 'L',
            Self::QuadTo { .. } => 'Q',
            Self::CubicTo { .. } => 'C',
            Self::Close => 'Z',
        }
    }

    fn args(&self) -> Vec<f64> {
        match *self {
            Self::MoveTo { x, y } | Self::LineTo { x, y } => vec![x, y],
            Self::QuadTo { cx, cy, x, y } => vec![cx, cy, x, y],
            Self::CubicTo { c1x, c1y, c2x, c2y, x, y } => vec![c1x, c1y, c2x, c2y, x, y],
            Self::Close => Vec::new(),
        }
    }
}

impl From<PathCommand> for Vec<Value> {
    fn from(cmd: PathCommand) -> Self {
        let mut out = vec![Value::String(cmd.letter().to_string())];
        out.extend(cmd.args().into_iter().map(Value::from));
        out
    }
}

impl TryFrom<Vec<Value>> for PathCommand {
    type Error = PathCommandError;

    fn try_from(raw: Vec<Value>) -> Result<Self, Self::Error> {
        let (head, rest) = raw.split_first().ok_or(PathCommandError::Empty)?;
        let letter = head.as_str().ok_or(PathCommandError::MissingLetter)?;
        let command = match letter {
            "M" | "m" => 'M',
            "L" | "l" => 'L',
            "Q" | "q" => 'Q',
            "C" | "c" => 'C',
            "Z" | "z" => 'Z',
            other => return Err(PathCommandError::UnknownCommand(other.to_string())),
        };

        let expected = match command {
            'M' | 'L' => 2,
            'Q' => 4,
            'C' => 6,
            _ => 0,
        };
        if rest.len() != expected {
            return Err(PathCommandError::Arity { command, expected, got: rest.len() });
        }

        let mut n = Vec::with_capacity(expected);
        for value in rest {
            n.push(value.as_f64().ok_or(PathCommandError::NotANumber { command })?);
        }

        Ok(match command {
            'M' => Self::MoveTo { x: n[0], y: n[1] },
            'L' => Self::LineTo { x: n[0], y: n[1] },
            'Q' => Self::QuadTo { cx: n[0], cy: n[1], x: n[2], y: n[3] },
            'C' => Self::CubicTo { c1x: n[0], c1y: n[1], c2x: n[2], c2y: n[3], x: n[4], y: n[5] },
            _ => Self::Close,
        })
    }
}

// =============================================================================
// DRAWABLE OBJECT
// =============================================================================

/// Why an object failed validation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ObjectError {
    #[error("object {id}: `{field}` must be a finite number")]
    NonFinite { id: ObjectId, field: &'static str },
    #[error("object {id}: `{field}` must not be negative")]
    Negative { id: ObjectId, field: &'static str },
    #[error("object {id}: opacity {value} is outside 0..=1")]
    OpacityOutOfRange { id: ObjectId, value: f64 },
    #[error("object {id}: `{field}` does not apply to a {kind}")]
    FieldNotApplicable { id: ObjectId, field: &'static str, kind: ShapeKind },
}

fn one() -> f64 {
    1.0
}

fn default_fill() -> String {
    DEFAULT_FILL.to_string()
}

fn default_stroke() -> String {
    DEFAULT_STROKE.to_string()
}

/// A single shape on the scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrawableObject {
    /// Unique within the scene; never reused.
    pub id: ObjectId,
    /// Kind and kind-specific payload.
    #[serde(flatten)]
    pub shape: Shape,
    /// Left edge of the unscaled bounding box.
    pub left: f64,
    /// Top edge of the unscaled bounding box.
    pub top: f64,
    /// Unscaled bounding-box width.
    pub width: f64,
    /// Unscaled bounding-box height.
    pub height: f64,
    /// Rotation in degrees.
    #[serde(default)]
    pub angle: f64,
    #[serde(default = "one")]
    pub scale_x: f64,
    #[serde(default = "one")]
    pub scale_y: f64,
    /// Fill color as a CSS color string.
    #[serde(default = "default_fill")]
    pub fill: String,
    /// Stroke color as a CSS color string.
    #[serde(default = "default_stroke")]
    pub stroke: String,
    #[serde(default = "one")]
    pub stroke_width: f64,
    #[serde(default = "one")]
    pub opacity: f64,
}

impl DrawableObject {
    /// Create an object with a zero-sized box at the origin and default style.
    #[must_use]
    pub fn new(id: impl Into<ObjectId>, shape: Shape) -> Self {
        Self {
            id: id.into(),
            shape,
            left: 0.0,
            top: 0.0,
            width: 0.0,
            height: 0.0,
            angle: 0.0,
            scale_x: 1.0,
            scale_y: 1.0,
            fill: default_fill(),
            stroke: default_stroke(),
            stroke_width: 1.0,
            opacity: 1.0,
        }
    }

    /// Set the bounding box.
    #[must_use]
    pub fn at(mut self, left: f64, top: f64, width: f64, height: f64) -> Self {
        self.left = left;
        self.top = top;
        self.width = width;
        self.height = height;
        self
    }

    #[must_use]
    pub fn kind(&self) -> ShapeKind {
        self.shape.kind()
    }

    /// Check geometry and style constraints.
    ///
    /// # Errors
    ///
    /// Returns the first violated constraint: a non-finite number, a negative
    /// size or stroke width, or an opacity outside `0..=1`.
    pub fn validate(&self) -> Result<(), ObjectError> {
        let mut numbers = vec![
            ("left", self.left),
            ("top", self.top),
            ("width", self.width),
            ("height", self.height),
            ("angle", self.angle),
            ("scaleX", self.scale_x),
            ("scaleY", self.scale_y),
            ("strokeWidth", self.stroke_width),
        ];
        if let Shape::Line { x1, y1, x2, y2 } = self.shape {
            numbers.extend([("x1", x1), ("y1", y1), ("x2", x2), ("y2", y2)]);
        }
        for (field, value) in numbers {
            if !value.is_finite() {
                return Err(ObjectError::NonFinite { id: self.id.clone(), field });
            }
        }

        for (field, value) in [("width", self.width), ("height", self.height), ("strokeWidth", self.stroke_width)] {
            if value < 0.0 {
                return Err(ObjectError::Negative { id: self.id.clone(), field });
            }
        }

        if !(0.0..=1.0).contains(&self.opacity) {
            return Err(ObjectError::OpacityOutOfRange { id: self.id.clone(), value: self.opacity });
        }
        Ok(())
    }
}

// =============================================================================
// PARTIAL UPDATES
// =============================================================================

/// Sparse update for a drawable object. Only present fields are applied.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartialObject {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub left: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub angle: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale_x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale_y: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke_width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    /// Text content; text objects only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Replacement path; freehand objects only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<Vec<PathCommand>>,
    /// Line endpoints; line objects only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x1: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y1: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x2: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y2: Option<f64>,
}

impl PartialObject {
    /// Returns `true` if no field would be changed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Merge present fields into `obj`.
    ///
    /// The merge is all-or-nothing: if a payload field does not belong to the
    /// object's kind, or the merged object fails validation, `obj` is left as
    /// it was.
    ///
    /// # Errors
    ///
    /// Returns `FieldNotApplicable` for a foreign payload field, or the
    /// validation error of the merged result.
    pub fn apply_to(&self, obj: &mut DrawableObject) -> Result<(), ObjectError> {
        if let Some(field) = self.foreign_field(obj.kind()) {
            return Err(ObjectError::FieldNotApplicable { id: obj.id.clone(), field, kind: obj.kind() });
        }

        let mut next = obj.clone();
        self.merge_base(&mut next);
        self.merge_payload(&mut next.shape);
        next.validate()?;

        *obj = next;
        Ok(())
    }

    fn foreign_field(&self, kind: ShapeKind) -> Option<&'static str> {
        let endpoints = [("x1", self.x1), ("y1", self.y1), ("x2", self.x2), ("y2", self.y2)];
        if kind != ShapeKind::Line {
            if let Some((field, _)) = endpoints.iter().find(|(_, v)| v.is_some()) {
                return Some(*field);
            }
        }
        if kind != ShapeKind::Text && self.text.is_some() {
            return Some("text");
        }
        if kind != ShapeKind::Path && self.path.is_some() {
            return Some("path");
        }
        None
    }

    fn merge_base(&self, obj: &mut DrawableObject) {
        let numbers = [
            (&mut obj.left, self.left),
            (&mut obj.top, self.top),
            (&mut obj.width, self.width),
            (&mut obj.height, self.height),
            (&mut obj.angle, self.angle),
            (&mut obj.scale_x, self.scale_x),
            (&mut obj.scale_y, self.scale_y),
            (&mut obj.stroke_width, self.stroke_width),
            (&mut obj.opacity, self.opacity),
        ];
        for (slot, value) in numbers {
            if let Some(v) = value {
                *slot = v;
            }
        }
        if let Some(ref fill) = self.fill {
            obj.fill.clone_from(fill);
        }
        if let Some(ref stroke) = self.stroke {
            obj.stroke.clone_from(stroke);
        }
    }

    fn merge_payload(&self, shape: &mut Shape) {
        match shape {
            Shape::Line { x1, y1, x2, y2 } => {
                for (slot, value) in [(x1, self.x1), (y1, self.y1), (x2, self.x2), (y2, self.y2)] {
                    if let Some(v) = value {
                        *slot = v;
                    }
                }
            }
            Shape::Text { text } => {
                if let Some(ref t) = self.text {
                    text.clone_from(t);
                }
            }
            Shape::Path { path } => {
                if let Some(ref p) = self.path {
                    path.clone_from(p);
                }
            }
            Shape::Rectangle | Shape::Circle => {}
        }
    }
}
