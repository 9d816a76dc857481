//! Shared constants for the scene crate.

// ── History ─────────────────────────────────────────────────────

/// Default number of undo steps kept before the oldest is evicted.
pub const MAX_HISTORY_LENGTH: usize = 50;

// ── Zoom ────────────────────────────────────────────────────────

/// Default lower zoom bound.
pub const DEFAULT_ZOOM_MIN: f64 = 0.5;

/// Default upper zoom bound.
pub const DEFAULT_ZOOM_MAX: f64 = 2.0;

/// Amount added or removed by a single zoom-in / zoom-out command.
pub const DEFAULT_ZOOM_STEP: f64 = 0.1;

// ── Persistence ─────────────────────────────────────────────────

/// Version string written into every saved document.
pub const FORMAT_VERSION: &str = "1.0.0";

// ── Style defaults ──────────────────────────────────────────────

/// Fill used when a stored object omits `fill`.
pub const DEFAULT_FILL: &str = "transparent";

/// Stroke used when a stored object omits `stroke`.
pub const DEFAULT_STROKE: &str = "#000000";
