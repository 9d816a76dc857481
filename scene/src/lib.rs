//! Scene model and undo/redo history for the vector drawing editor.
//!
//! This crate owns the editable scene: the ordered list of drawable objects,
//! the active tool, the current selection, and the zoom factor. Every content
//! mutation goes through [`store::SceneStore`], which records a full snapshot
//! of the object list in its [`history::History`] before applying the change.
//! Rendering, pointer gestures and file pickers live outside this crate; they
//! read the store's public state and call back into its operations.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`store`] | The scene store and its mutation operations |
//! | [`history`] | Bounded snapshot history with linear undo/redo |
//! | [`object`] | Drawable objects, shape variants, and sparse updates |
//! | [`tool`] | Drawing tools selectable by the user |
//! | [`zoom`] | Zoom bounds and scene configuration |
//! | [`document`] | The `.vec` persistence format |
//! | [`command`] | Serializable command surface mapped onto store operations |
//! | [`consts`] | Shared constants (history depth, zoom defaults, format version) |

pub mod command;
pub mod consts;
pub mod document;
pub mod history;
pub mod object;
pub mod store;
pub mod tool;
pub mod zoom;

pub use command::{Command, Outcome};
pub use document::{Document, DocumentError};
pub use history::History;
pub use object::{DrawableObject, ObjectId, PartialObject, PathCommand, Shape, ShapeKind};
pub use store::{SceneError, SceneStore};
pub use tool::Tool;
pub use zoom::{SceneConfig, ZoomBounds};
