//! The `.vec` document format.
//!
//! A document is a JSON object `{ "version": "1.0.0", "objects": [...] }`
//! where each object uses the flat wire form of
//! [`DrawableObject`](crate::object::DrawableObject). Opening a document
//! replaces the whole scene; saving writes the current object list.
//!
//! Parsing fully validates before anything reaches the store, so a bad file
//! can never leave a half-loaded scene behind.

#[cfg(test)]
#[path = "document_test.rs"]
mod document_test;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::consts::FORMAT_VERSION;
use crate::object::{DrawableObject, ObjectError, ObjectId};
use crate::store::{SceneError, SceneStore, find_duplicate};

#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("malformed document: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("document has no version")]
    MissingVersion,
    #[error("document contains duplicate object id: {0}")]
    DuplicateId(ObjectId),
    #[error("document contains an invalid object: {0}")]
    InvalidObject(#[from] ObjectError),
}

/// A persisted drawing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Format version the document was written with.
    pub version: String,
    /// Objects in paint order.
    pub objects: Vec<DrawableObject>,
}

impl Document {
    /// Wrap `objects` in a document stamped with the current format version.
    #[must_use]
    pub fn new(objects: Vec<DrawableObject>) -> Self {
        Self { version: FORMAT_VERSION.to_string(), objects }
    }

    /// Parse and validate a document.
    ///
    /// Documents written by a different format version are accepted; the
    /// mismatch is logged.
    ///
    /// # Errors
    ///
    /// Returns `Malformed` for JSON or schema errors, `MissingVersion` for a
    /// blank version, `DuplicateId` if two objects share an id, and
    /// `InvalidObject` if an object fails validation.
    pub fn parse(text: &str) -> Result<Self, DocumentError> {
        let doc: Self = serde_json::from_str(text)?;

        if doc.version.trim().is_empty() {
            return Err(DocumentError::MissingVersion);
        }
        if doc.version != FORMAT_VERSION {
            warn!(version = %doc.version, expected = FORMAT_VERSION, "document version differs from current format");
        }
        if let Some(id) = find_duplicate(&doc.objects) {
            return Err(DocumentError::DuplicateId(id.clone()));
        }
        for object in &doc.objects {
            object.validate()?;
        }

        debug!(version = %doc.version, count = doc.objects.len(), "document parsed");
        Ok(doc)
    }

    /// Serialize as pretty-printed JSON with two-space indentation.
    ///
    /// # Errors
    ///
    /// Returns `Malformed` if serialization fails.
    pub fn to_json_pretty(&self) -> Result<String, DocumentError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl SceneStore {
    /// Open a document: parse `text` and replace every object with its
    /// contents. On error the scene is left untouched.
    ///
    /// # Errors
    ///
    /// Returns `Document` if `text` is not a valid document.
    pub fn load_document(&mut self, text: &str) -> Result<(), SceneError> {
        let doc = Document::parse(text)?;
        self.replace_all_objects(doc.objects)
    }

    /// Snapshot the current objects as a document.
    #[must_use]
    pub fn to_document(&self) -> Document {
        Document::new(self.objects().to_vec())
    }

    /// Serialize the current objects as document text.
    ///
    /// # Errors
    ///
    /// Returns `Document` if serialization fails.
    pub fn save_document(&self) -> Result<String, SceneError> {
        Ok(self.to_document().to_json_pretty()?)
    }
}
