//! Canvas configuration: zoom range, sizing rules, and tool defaults.

use crate::consts::{
    DEFAULT_DIALOGUE_SIZE, DEFAULT_PANEL_SIZE, DEFAULT_TEXT_SIZE, DUPLICATE_OFFSET, HANDLE_RADIUS_PX,
    MIN_ELEMENT_SIZE, ZOOM_MAX, ZOOM_MIN, ZOOM_STEP,
};
use crate::error::CanvasError;
use crate::geometry::Size;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasConfig {
    pub zoom_min: f64,
    pub zoom_max: f64,
    pub zoom_step: f64,
    /// Per-axis floor applied by interactive resizes.
    pub min_element_size: f64,
    /// Offset on both axes for duplicated elements.
    pub duplicate_offset: f64,
    /// Hit slop around resize handles, in screen pixels.
    pub handle_radius_px: f64,
    pub panel_size: Size,
    pub text_size: Size,
    pub dialogue_size: Size,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            zoom_min: ZOOM_MIN,
            zoom_max: ZOOM_MAX,
            zoom_step: ZOOM_STEP,
            min_element_size: MIN_ELEMENT_SIZE,
            duplicate_offset: DUPLICATE_OFFSET,
            handle_radius_px: HANDLE_RADIUS_PX,
            panel_size: Size::new(DEFAULT_PANEL_SIZE.0, DEFAULT_PANEL_SIZE.1),
            text_size: Size::new(DEFAULT_TEXT_SIZE.0, DEFAULT_TEXT_SIZE.1),
            dialogue_size: Size::new(DEFAULT_DIALOGUE_SIZE.0, DEFAULT_DIALOGUE_SIZE.1),
        }
    }
}

impl CanvasConfig {
    /// Build config from environment variables, falling back to defaults.
    ///
    /// Optional:
    /// - `CANVAS_ZOOM_MIN`: default 0.1
    /// - `CANVAS_ZOOM_MAX`: default 3.0
    /// - `CANVAS_ZOOM_STEP`: default 0.1
    /// - `CANVAS_MIN_ELEMENT_SIZE`: default 50
    /// - `CANVAS_DUPLICATE_OFFSET`: default 20
    ///
    /// Unparsable values are ignored.
    ///
    /// # Errors
    ///
    /// Returns `ConfigParse` if the resulting values are inconsistent.
    pub fn from_env() -> Result<Self, CanvasError> {
        Self::from_lookup(|key| match std::env::var(key) {
            Ok(value) => Some(value),
            Err(_) => None,
        })
    }

    /// Same as [`CanvasConfig::from_env`] with a pluggable variable source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigParse` if the resulting values are inconsistent.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, CanvasError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let parse = |key: &str, default: f64| -> f64 {
            match lookup(key).map(|raw| raw.trim().parse::<f64>()) {
                Some(Ok(v)) if v.is_finite() => v,
                Some(_) => {
                    tracing::warn!(key, "ignoring unparsable config value");
                    default
                }
                None => default,
            }
        };
        let config = Self {
            zoom_min: parse("CANVAS_ZOOM_MIN", defaults.zoom_min),
            zoom_max: parse("CANVAS_ZOOM_MAX", defaults.zoom_max),
            zoom_step: parse("CANVAS_ZOOM_STEP", defaults.zoom_step),
            min_element_size: parse("CANVAS_MIN_ELEMENT_SIZE", defaults.min_element_size),
            duplicate_offset: parse("CANVAS_DUPLICATE_OFFSET", defaults.duplicate_offset),
            ..defaults
        };
        config.validate()?;
        Ok(config)
    }

    /// Check the zoom range and sizing rules.
    ///
    /// # Errors
    ///
    /// Returns `ConfigParse` describing the first violated rule.
    pub fn validate(&self) -> Result<(), CanvasError> {
        let values = [
            ("zoom_min", self.zoom_min),
            ("zoom_max", self.zoom_max),
            ("zoom_step", self.zoom_step),
            ("min_element_size", self.min_element_size),
            ("duplicate_offset", self.duplicate_offset),
            ("handle_radius_px", self.handle_radius_px),
        ];
        if let Some((name, value)) = values.iter().find(|(_, v)| !v.is_finite()) {
            return Err(CanvasError::ConfigParse(format!("{name} must be finite, got {value}")));
        }
        if self.zoom_min <= 0.0 {
            return Err(CanvasError::ConfigParse(format!("zoom_min must be positive, got {}", self.zoom_min)));
        }
        if self.zoom_min > self.zoom_max {
            return Err(CanvasError::ConfigParse(format!(
                "zoom_min {} exceeds zoom_max {}",
                self.zoom_min, self.zoom_max
            )));
        }
        if self.zoom_step <= 0.0 {
            return Err(CanvasError::ConfigParse(format!("zoom_step must be positive, got {}", self.zoom_step)));
        }
        if self.min_element_size <= 0.0 {
            return Err(CanvasError::ConfigParse(format!(
                "min_element_size must be positive, got {}",
                self.min_element_size
            )));
        }
        if self.duplicate_offset.abs() < f64::EPSILON {
            return Err(CanvasError::ConfigParse("duplicate_offset must be non-zero".into()));
        }
        Ok(())
    }

    /// Clamp `zoom` into the configured range.
    #[must_use]
    pub fn clamp_zoom(&self, zoom: f64) -> f64 {
        zoom.clamp(self.zoom_min, self.zoom_max)
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
