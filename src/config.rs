//! Scene configuration parsed from command-line flags and environment variables.

use clap::Args;
use scene::consts::{DEFAULT_ZOOM_MAX, DEFAULT_ZOOM_MIN, DEFAULT_ZOOM_STEP, MAX_HISTORY_LENGTH};
use scene::{SceneConfig, ZoomBounds};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("zoom bounds {min}..{max} are invalid (need 0 < min <= max)")]
    ZoomBounds { min: f64, max: f64 },
    #[error("zoom step {0} must be a positive number")]
    ZoomStep(f64),
}

/// Tunables shared by every subcommand.
///
/// Each flag can also be set through its environment variable:
/// - `VECDRAW_ZOOM_MIN`: default 0.5
/// - `VECDRAW_ZOOM_MAX`: default 2.0
/// - `VECDRAW_ZOOM_STEP`: default 0.1
/// - `VECDRAW_HISTORY_LIMIT`: default 50 (0 disables undo)
#[derive(Args, Debug, Clone)]
pub struct SceneArgs {
    /// Smallest allowed zoom factor.
    #[arg(long, env = "VECDRAW_ZOOM_MIN", default_value_t = DEFAULT_ZOOM_MIN, global = true)]
    pub zoom_min: f64,

    /// Largest allowed zoom factor.
    #[arg(long, env = "VECDRAW_ZOOM_MAX", default_value_t = DEFAULT_ZOOM_MAX, global = true)]
    pub zoom_max: f64,

    /// Amount a zoom_in / zoom_out command changes the zoom factor.
    #[arg(long, env = "VECDRAW_ZOOM_STEP", default_value_t = DEFAULT_ZOOM_STEP, global = true)]
    pub zoom_step: f64,

    /// Number of undo steps kept before the oldest is dropped.
    #[arg(long, env = "VECDRAW_HISTORY_LIMIT", default_value_t = MAX_HISTORY_LENGTH, global = true)]
    pub history_limit: usize,
}

impl SceneArgs {
    /// Build a validated scene configuration.
    pub fn to_config(&self) -> Result<SceneConfig, ConfigError> {
        let zoom = ZoomBounds::new(self.zoom_min, self.zoom_max)
            .map_err(|_| ConfigError::ZoomBounds { min: self.zoom_min, max: self.zoom_max })?;
        if !self.zoom_step.is_finite() || self.zoom_step <= 0.0 {
            return Err(ConfigError::ZoomStep(self.zoom_step));
        }
        Ok(SceneConfig { zoom, zoom_step: self.zoom_step, history_limit: self.history_limit })
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
