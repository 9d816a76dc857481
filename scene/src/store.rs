//! Scene store: the single source of truth for the editable scene.
//!
//! DESIGN
//! ======
//! `SceneStore` owns the ordered object list (insertion order is paint order),
//! the selection, the active tool, and the zoom factor. Content mutations go
//! through `add_object`, `update_object`, `remove_object` and
//! `replace_all_objects`; each one validates first, then records a history
//! checkpoint of the untouched list, then applies. A rejected mutation leaves
//! both the scene and its history exactly as they were.
//!
//! Tool, selection and zoom changes are view state and are never recorded.
//! The selection must always name an existing object, so it is reconciled
//! after every whole-list change (undo, redo, replace).

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use std::collections::HashSet;

use tracing::debug;

use crate::document::DocumentError;
use crate::history::History;
use crate::object::{DrawableObject, ObjectError, ObjectId, PartialObject};
use crate::tool::Tool;
use crate::zoom::SceneConfig;

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum SceneError {
    #[error("duplicate object id: {0}")]
    DuplicateId(ObjectId),
    #[error(transparent)]
    InvalidObject(#[from] ObjectError),
    #[error("invalid zoom bounds: min {min}, max {max}")]
    InvalidZoomBounds { min: f64, max: f64 },
    #[error(transparent)]
    Document(#[from] DocumentError),
}

impl SceneError {
    /// Stable machine-readable code for this error.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::DuplicateId(_) => "E_DUPLICATE_ID",
            Self::InvalidObject(ObjectError::FieldNotApplicable { .. }) => "E_FIELD_NOT_APPLICABLE",
            Self::InvalidObject(_) => "E_INVALID_OBJECT",
            Self::InvalidZoomBounds { .. } => "E_INVALID_ZOOM_BOUNDS",
            Self::Document(_) => "E_DOCUMENT",
        }
    }
}

/// The editable scene and its undo history.
#[derive(Debug, Clone)]
pub struct SceneStore {
    objects: Vec<DrawableObject>,
    selected_id: Option<ObjectId>,
    tool: Tool,
    zoom: f64,
    config: SceneConfig,
    history: History<Vec<DrawableObject>>,
    revision: u64,
}

impl Default for SceneStore {
    fn default() -> Self {
        Self::new(SceneConfig::default())
    }
}

impl SceneStore {
    /// Create an empty scene.
    #[must_use]
    pub fn new(config: SceneConfig) -> Self {
        Self {
            objects: Vec::new(),
            selected_id: None,
            tool: Tool::default(),
            zoom: config.zoom.clamp(1.0),
            config,
            history: History::new(config.history_limit),
            revision: 0,
        }
    }

    /// Create a scene that starts from `objects` with empty history, as when
    /// a session begins from an opened file.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateId` or `InvalidObject` if `objects` is not a valid
    /// scene.
    pub fn with_objects(objects: Vec<DrawableObject>, config: SceneConfig) -> Result<Self, SceneError> {
        check_objects(&objects)?;
        let mut store = Self::new(config);
        store.objects = objects;
        Ok(store)
    }

    // --- View state (not tracked) ---

    /// Set the active tool.
    pub fn set_active_tool(&mut self, tool: Tool) {
        debug!(%tool, "active tool changed");
        self.tool = tool;
    }

    /// Select an object, or clear the selection with `None`.
    ///
    /// An id that names no object is ignored and `false` is returned.
    pub fn select_object(&mut self, id: Option<&ObjectId>) -> bool {
        match id {
            None => {
                self.selected_id = None;
                true
            }
            Some(id) if self.contains(id) => {
                self.selected_id = Some(id.clone());
                true
            }
            Some(id) => {
                debug!(%id, "select ignored: no such object");
                false
            }
        }
    }

    /// Store `factor` clamped to the configured bounds and return the stored
    /// value. A NaN factor is ignored.
    pub fn set_zoom(&mut self, factor: f64) -> f64 {
        if factor.is_nan() {
            debug!("zoom ignored: not a number");
            return self.zoom;
        }
        self.zoom = self.config.zoom.clamp(factor);
        self.zoom
    }

    /// Zoom in by one configured step.
    pub fn zoom_in(&mut self) -> f64 {
        self.set_zoom(self.zoom + self.config.zoom_step)
    }

    /// Zoom out by one configured step.
    pub fn zoom_out(&mut self) -> f64 {
        self.set_zoom(self.zoom - self.config.zoom_step)
    }

    // --- Tracked mutations ---

    /// Append an object on top of the paint order.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateId` if the id is already in the scene, or
    /// `InvalidObject` if the object fails validation. Nothing is recorded.
    pub fn add_object(&mut self, object: DrawableObject) -> Result<(), SceneError> {
        if self.contains(&object.id) {
            return Err(SceneError::DuplicateId(object.id));
        }
        object.validate()?;

        self.history.checkpoint(&self.objects);
        debug!(id = %object.id, kind = %object.kind(), "object added");
        self.objects.push(object);
        self.revision += 1;
        Ok(())
    }

    /// Merge `changes` into the object with `id`.
    ///
    /// Returns `Ok(false)` without recording anything when no such object
    /// exists.
    ///
    /// # Errors
    ///
    /// Returns `InvalidObject` if a field does not apply to the object's kind
    /// or the merged object fails validation. Nothing is recorded.
    pub fn update_object(&mut self, id: &ObjectId, changes: &PartialObject) -> Result<bool, SceneError> {
        let Some(index) = self.index_of(id) else {
            debug!(%id, "update skipped: no such object");
            return Ok(false);
        };

        let mut next = self.objects[index].clone();
        changes.apply_to(&mut next)?;

        self.history.checkpoint(&self.objects);
        debug!(%id, "object updated");
        self.objects[index] = next;
        self.revision += 1;
        Ok(true)
    }

    /// Remove the object with `id`, clearing the selection if it pointed at
    /// it. Returns `false` and records nothing when no such object exists.
    pub fn remove_object(&mut self, id: &ObjectId) -> bool {
        let Some(index) = self.index_of(id) else {
            debug!(%id, "remove skipped: no such object");
            return false;
        };

        self.history.checkpoint(&self.objects);
        self.objects.remove(index);
        if self.selected_id.as_ref() == Some(id) {
            self.selected_id = None;
        }
        debug!(%id, "object removed");
        self.revision += 1;
        true
    }

    /// Replace the whole object list, as on file open or new document.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateId` if two incoming objects share an id, or
    /// `InvalidObject` if one fails validation. Nothing is recorded.
    pub fn replace_all_objects(&mut self, objects: Vec<DrawableObject>) -> Result<(), SceneError> {
        check_objects(&objects)?;

        self.history.checkpoint(&self.objects);
        debug!(count = objects.len(), "objects replaced");
        self.objects = objects;
        self.reconcile_selection();
        self.revision += 1;
        Ok(())
    }

    /// Start a new empty document. Undoable like any other replacement.
    pub fn new_document(&mut self) {
        self.history.checkpoint(&self.objects);
        debug!("new document");
        self.objects.clear();
        self.selected_id = None;
        self.revision += 1;
    }

    // --- History ---

    /// Undo the most recent tracked mutation. Returns `false` when there is
    /// nothing to undo.
    pub fn undo(&mut self) -> bool {
        if !self.history.undo(&mut self.objects) {
            return false;
        }
        self.reconcile_selection();
        self.revision += 1;
        debug!(past = self.history.past_len(), future = self.history.future_len(), "undo");
        true
    }

    /// Redo the most recently undone mutation. Returns `false` when there is
    /// nothing to redo.
    pub fn redo(&mut self) -> bool {
        if !self.history.redo(&mut self.objects) {
            return false;
        }
        self.reconcile_selection();
        self.revision += 1;
        debug!(past = self.history.past_len(), future = self.history.future_len(), "redo");
        true
    }

    /// Group the following tracked mutations into a single undo step until
    /// [`end_gesture`](Self::end_gesture).
    pub fn begin_gesture(&mut self) {
        self.history.begin_batch();
    }

    pub fn end_gesture(&mut self) {
        self.history.end_batch();
    }

    // --- Queries ---

    /// Objects in paint order (later = on top).
    #[must_use]
    pub fn objects(&self) -> &[DrawableObject] {
        &self.objects
    }

    /// Look up an object by id.
    #[must_use]
    pub fn object(&self, id: &ObjectId) -> Option<&DrawableObject> {
        self.objects.iter().find(|obj| &obj.id == id)
    }

    #[must_use]
    pub fn contains(&self, id: &ObjectId) -> bool {
        self.index_of(id).is_some()
    }

    #[must_use]
    pub fn selected_object_id(&self) -> Option<&ObjectId> {
        self.selected_id.as_ref()
    }

    /// The currently selected object, if any.
    #[must_use]
    pub fn selected_object(&self) -> Option<&DrawableObject> {
        self.selected_id.as_ref().and_then(|id| self.object(id))
    }

    #[must_use]
    pub fn active_tool(&self) -> Tool {
        self.tool
    }

    #[must_use]
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Read-only view of the undo history.
    #[must_use]
    pub fn history(&self) -> &History<Vec<DrawableObject>> {
        &self.history
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Counter bumped on every content change; a renderer repaints when it
    /// differs from the value it last drew.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn index_of(&self, id: &ObjectId) -> Option<usize> {
        self.objects.iter().position(|obj| &obj.id == id)
    }

    fn reconcile_selection(&mut self) {
        let stale = self.selected_id.as_ref().is_some_and(|id| !self.contains(id));
        if stale {
            debug!("selection cleared: object no longer in scene");
            self.selected_id = None;
        }
    }
}

/// Validate a full object list: unique ids, every object valid.
pub(crate) fn check_objects(objects: &[DrawableObject]) -> Result<(), SceneError> {
    if let Some(id) = find_duplicate(objects) {
        return Err(SceneError::DuplicateId(id.clone()));
    }
    for object in objects {
        object.validate()?;
    }
    Ok(())
}

/// First id that appears more than once, if any.
pub(crate) fn find_duplicate(objects: &[DrawableObject]) -> Option<&ObjectId> {
    let mut seen = HashSet::with_capacity(objects.len());
    objects.iter().map(|obj| &obj.id).find(|id| !seen.insert(*id))
}
