use crate::foundation::error::{HeliographError, HeliographResult};

pub use kurbo::Vec2;

/// Vertical placement of a tracked scroll container, in CSS pixels relative to the viewport.
///
/// `top` is the distance from the viewport's top edge to the container's top edge; it goes
/// negative once the container has scrolled past the top.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TrackBounds {
    /// Container top edge relative to the viewport top.
    pub top: f64,
    /// Full container height.
    pub height: f64,
}

impl TrackBounds {
    /// Create bounds, rejecting non-finite values and negative heights.
    pub fn new(top: f64, height: f64) -> HeliographResult<Self> {
        if !top.is_finite() || !height.is_finite() {
            return Err(HeliographError::validation(
                "TrackBounds top/height must be finite",
            ));
        }
        if height < 0.0 {
            return Err(HeliographError::validation(
                "TrackBounds height must be >= 0",
            ));
        }
        Ok(Self { top, height })
    }

    /// Bounds of a container whose document offset is `doc_top`, seen at scroll offset `scroll_y`.
    pub fn at_scroll(doc_top: f64, height: f64, scroll_y: f64) -> Self {
        Self {
            top: doc_top - scroll_y,
            height,
        }
    }

    /// Container bottom edge relative to the viewport top.
    pub fn bottom(self) -> f64 {
        self.top + self.height
    }
}

/// Visible area of the host document.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Viewport {
    /// Width in CSS pixels.
    pub width: f64,
    /// Height in CSS pixels.
    pub height: f64,
}

impl Viewport {
    /// Create a viewport with finite, non-negative dimensions.
    pub fn new(width: f64, height: f64) -> HeliographResult<Self> {
        if !(width.is_finite() && height.is_finite()) || width < 0.0 || height < 0.0 {
            return Err(HeliographError::validation(
                "Viewport dimensions must be finite and >= 0",
            ));
        }
        Ok(Self { width, height })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
