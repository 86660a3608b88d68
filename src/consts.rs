//! Shared numeric constants for the canvas crate.
//!
//! These are the defaults baked into [`crate::config::CanvasConfig`]; the
//! config can override most of them at runtime.

// ── Viewport ────────────────────────────────────────────────────

/// Lowest zoom factor the store accepts.
pub const ZOOM_MIN: f64 = 0.1;

/// Highest zoom factor the store accepts.
pub const ZOOM_MAX: f64 = 3.0;

/// Zoom change per Ctrl/Cmd + wheel tick, regardless of wheel delta magnitude.
pub const ZOOM_STEP: f64 = 0.1;

// ── Elements ────────────────────────────────────────────────────

/// Smallest width or height an interactive resize may produce, in page units.
pub const MIN_ELEMENT_SIZE: f64 = 50.0;

/// Offset applied to both axes of a duplicated element.
pub const DUPLICATE_OFFSET: f64 = 20.0;

/// Default size of a panel created with the panel tool.
pub const DEFAULT_PANEL_SIZE: (f64, f64) = (300.0, 200.0);

/// Default size of a text box created with the text tool.
pub const DEFAULT_TEXT_SIZE: (f64, f64) = (200.0, 50.0);

/// Default size of a dialogue bubble created with the dialogue tool.
pub const DEFAULT_DIALOGUE_SIZE: (f64, f64) = (200.0, 150.0);

// ── Pages ───────────────────────────────────────────────────────

/// Default page width (A4-ish portrait in CSS pixels).
pub const PAGE_WIDTH: f64 = 800.0;

/// Default page height.
pub const PAGE_HEIGHT: f64 = 1200.0;

// ── Hit-testing ─────────────────────────────────────────────────

/// Screen-space hit slop in pixels for resize handles.
pub const HANDLE_RADIUS_PX: f64 = 8.0;
