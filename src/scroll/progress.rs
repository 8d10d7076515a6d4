use crate::foundation::core::TrackBounds;

/// Normalized progress of a tracked container through its scroll range.
///
/// 0 while the container's top edge is at or below the viewport top, 1 once its bottom edge has
/// reached the viewport bottom, linear in between. An unmounted container (`None`) reads as 0.
/// A container no taller than the viewport snaps from 0 to 1 as its top edge passes the
/// viewport top.
pub fn scroll_progress(bounds: Option<TrackBounds>, viewport_height: f64) -> f64 {
    let Some(bounds) = bounds else {
        return 0.0;
    };
    if !(bounds.top.is_finite() && bounds.height.is_finite() && viewport_height.is_finite()) {
        return 0.0;
    }

    let range = bounds.height - viewport_height;
    if range <= 0.0 {
        return if bounds.top < 0.0 { 1.0 } else { 0.0 };
    }
    (-bounds.top / range).clamp(0.0, 1.0)
}

#[cfg(test)]
#[path = "../../tests/unit/scroll/progress.rs"]
mod tests;
