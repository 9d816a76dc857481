//! Zoom bounds and the scene configuration they live in.

#[cfg(test)]
#[path = "zoom_test.rs"]
mod zoom_test;

use crate::consts::{DEFAULT_ZOOM_MAX, DEFAULT_ZOOM_MIN, DEFAULT_ZOOM_STEP, MAX_HISTORY_LENGTH};
use crate::store::SceneError;

/// Inclusive range the zoom factor is clamped to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomBounds {
    min: f64,
    max: f64,
}

impl ZoomBounds {
    /// Build bounds, requiring `0 < min <= max` with both finite.
    ///
    /// # Errors
    ///
    /// Returns `InvalidZoomBounds` when the range is empty, non-positive or
    /// not finite.
    pub fn new(min: f64, max: f64) -> Result<Self, SceneError> {
        if !min.is_finite() || !max.is_finite() || min <= 0.0 || min > max {
            return Err(SceneError::InvalidZoomBounds { min, max });
        }
        Ok(Self { min, max })
    }

    #[must_use]
    pub fn min(&self) -> f64 {
        self.min
    }

    #[must_use]
    pub fn max(&self) -> f64 {
        self.max
    }

    /// Clamp `factor` into the range.
    #[must_use]
    pub fn clamp(&self, factor: f64) -> f64 {
        factor.clamp(self.min, self.max)
    }

    /// Whether `factor` already lies inside the range.
    #[must_use]
    pub fn contains(&self, factor: f64) -> bool {
        (self.min..=self.max).contains(&factor)
    }
}

impl Default for ZoomBounds {
    fn default() -> Self {
        Self { min: DEFAULT_ZOOM_MIN, max: DEFAULT_ZOOM_MAX }
    }
}

/// Tunables injected into a [`SceneStore`](crate::store::SceneStore).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneConfig {
    /// Range the zoom factor is clamped to.
    pub zoom: ZoomBounds,
    /// Step applied by zoom-in / zoom-out.
    pub zoom_step: f64,
    /// Maximum undo depth. Zero disables undo.
    pub history_limit: usize,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self { zoom: ZoomBounds::default(), zoom_step: DEFAULT_ZOOM_STEP, history_limit: MAX_HISTORY_LENGTH }
    }
}
