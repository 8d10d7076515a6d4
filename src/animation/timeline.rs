//! Data-driven phase composition.
//!
//! A [`Timeline`] is a flat list of [`Track`]s. Every track maps the same progress value through
//! its own [`Ranges`], so "phases" are nothing more than the sub-ranges of progress over which
//! tracks move. Tracks may overlap freely; there is no explicit phase state.

use std::collections::BTreeMap;

use crate::{
    animation::{ease::Ease, interp::Ranges},
    foundation::core::Vec2,
    foundation::error::{HeliographError, HeliographResult},
};

/// Unit of a sampled parameter. Informational except for [`ParamUnit::Opacity`], whose outputs
/// are validated to stay in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParamUnit {
    /// Rotation in degrees.
    Deg,
    /// Offset in CSS pixels.
    Px,
    /// Opacity or intensity in `[0, 1]`.
    Opacity,
    /// Scale factor.
    Scale,
}

/// One animated parameter.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Track {
    /// Parameter name exposed to presentation markup.
    pub param: String,
    /// Choreography phase label (e.g. `"spin"`); purely descriptive.
    pub phase: String,
    /// Output unit.
    pub unit: ParamUnit,
    /// Progress breakpoints and output values.
    pub ranges: Ranges,
    /// Per-segment easing.
    #[serde(default)]
    pub ease: Ease,
}

impl Track {
    /// Build a linear track.
    pub fn new(
        param: impl Into<String>,
        phase: impl Into<String>,
        unit: ParamUnit,
        input: Vec<f64>,
        output: Vec<f64>,
    ) -> HeliographResult<Self> {
        Ok(Self {
            param: param.into(),
            phase: phase.into(),
            unit,
            ranges: Ranges::new(input, output)?,
            ease: Ease::Linear,
        })
    }

    /// Replace the easing curve.
    pub fn with_ease(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }

    /// Sample this track at `progress`.
    pub fn sample(&self, progress: f64) -> f64 {
        self.ranges.sample_eased(progress, self.ease)
    }

    /// `true` while `progress` is strictly inside this track's breakpoint domain.
    pub fn is_active(&self, progress: f64) -> bool {
        let (start, end) = self.ranges.domain();
        start < progress && progress < end
    }

    fn validate(&self) -> HeliographResult<()> {
        if self.param.trim().is_empty() {
            return Err(HeliographError::validation("track param must be non-empty"));
        }
        let (start, end) = self.ranges.domain();
        if start < 0.0 || end > 1.0 {
            return Err(HeliographError::validation(format!(
                "track '{}' breakpoints must lie in [0, 1]",
                self.param
            )));
        }
        if self.unit == ParamUnit::Opacity
            && !self.ranges.output().iter().all(|v| (0.0..=1.0).contains(v))
        {
            return Err(HeliographError::validation(format!(
                "opacity track '{}' outputs must lie in [0, 1]",
                self.param
            )));
        }
        Ok(())
    }
}

/// Parameter values for one progress sample.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct FrameParams {
    /// Progress the values were sampled at, clamped to `[0, 1]`.
    pub progress: f64,
    /// Value per parameter name.
    pub values: BTreeMap<String, f64>,
}

impl FrameParams {
    /// Value of `param`, if the timeline has such a track.
    pub fn get(&self, param: &str) -> Option<f64> {
        self.values.get(param).copied()
    }

    /// Value of `param`, or `fallback` when absent.
    pub fn get_or(&self, param: &str, fallback: f64) -> f64 {
        self.get(param).unwrap_or(fallback)
    }

    /// Pair two parameters into an offset vector (missing parameters read as 0).
    pub fn vec2(&self, x: &str, y: &str) -> Vec2 {
        Vec2::new(self.get_or(x, 0.0), self.get_or(y, 0.0))
    }
}

/// Ordered set of tracks sharing one progress clock.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Timeline {
    /// Tracks in declaration order.
    pub tracks: Vec<Track>,
}

impl Timeline {
    /// Build and validate a timeline.
    pub fn new(tracks: Vec<Track>) -> HeliographResult<Self> {
        let timeline = Self { tracks };
        timeline.validate()?;
        Ok(timeline)
    }

    /// Parse and validate a JSON timeline.
    pub fn from_json(s: &str) -> HeliographResult<Self> {
        let timeline: Self = serde_json::from_str(s)?;
        timeline.validate()?;
        Ok(timeline)
    }

    /// Check per-track invariants and that parameter names are unique.
    pub fn validate(&self) -> HeliographResult<()> {
        let mut seen = std::collections::BTreeSet::new();
        for track in &self.tracks {
            track.validate()?;
            if !seen.insert(track.param.as_str()) {
                return Err(HeliographError::validation(format!(
                    "duplicate track param '{}'",
                    track.param
                )));
            }
        }
        Ok(())
    }

    /// Track for `param`.
    pub fn track(&self, param: &str) -> Option<&Track> {
        self.tracks.iter().find(|t| t.param == param)
    }

    /// Sample every track at `progress`.
    pub fn sample(&self, progress: f64) -> FrameParams {
        let progress = clamp_progress(progress);
        FrameParams {
            progress,
            values: self
                .tracks
                .iter()
                .map(|t| (t.param.clone(), t.sample(progress)))
                .collect(),
        }
    }

    /// Sample every track into `out`, in track order, reusing its allocation.
    pub fn sample_into(&self, progress: f64, out: &mut Vec<f64>) {
        let progress = clamp_progress(progress);
        out.clear();
        out.extend(self.tracks.iter().map(|t| t.sample(progress)));
    }

    /// Distinct phase labels with at least one track moving at `progress`, in track order.
    pub fn active_phases(&self, progress: f64) -> Vec<&str> {
        let mut out: Vec<&str> = Vec::new();
        for t in self.tracks.iter().filter(|t| t.is_active(progress)) {
            if !out.contains(&t.phase.as_str()) {
                out.push(&t.phase);
            }
        }
        out
    }

    /// Progress sub-range `(start, end)` covered by the tracks of `phase`.
    pub fn phase_span(&self, phase: &str) -> Option<(f64, f64)> {
        self.tracks
            .iter()
            .filter(|t| t.phase == phase)
            .map(|t| t.ranges.domain())
            .reduce(|(a0, a1), (b0, b1)| (a0.min(b0), a1.max(b1)))
    }

    /// The landing-page cube choreography: fold, spin, tilt, then content reveal.
    ///
    /// | phase  | params                          | progress   |
    /// |--------|---------------------------------|------------|
    /// | fold   | `fold_angle`, `fold_opacity`    | 0.00-0.20  |
    /// | spin   | `rotate_y`                      | 0.15-0.70  |
    /// | tilt   | `tilt_x`, `translate_y`         | 0.60-0.85  |
    /// | reveal | `glow`, `content_opacity`       | 0.75-1.00  |
    pub fn cube_reveal() -> Self {
        fn track(
            param: &str,
            phase: &str,
            unit: ParamUnit,
            input: &[f64],
            output: &[f64],
            ease: Ease,
        ) -> Track {
            Track {
                param: param.to_owned(),
                phase: phase.to_owned(),
                unit,
                ranges: Ranges::from_trusted(input.to_vec(), output.to_vec()),
                ease,
            }
        }

        use ParamUnit::{Deg, Opacity, Px};
        Self {
            tracks: vec![
                track("fold_angle", "fold", Deg, &[0.0, 0.2], &[90.0, 0.0], Ease::OutCubic),
                track("fold_opacity", "fold", Opacity, &[0.0, 0.15], &[0.0, 1.0], Ease::Linear),
                track("rotate_y", "spin", Deg, &[0.15, 0.7], &[0.0, 360.0], Ease::InOutQuad),
                track("tilt_x", "tilt", Deg, &[0.6, 0.8], &[0.0, -12.0], Ease::OutQuad),
                track("translate_y", "tilt", Px, &[0.6, 0.85], &[0.0, -80.0], Ease::Linear),
                track("glow", "reveal", Opacity, &[0.75, 0.9, 1.0], &[0.0, 1.0, 0.6], Ease::Linear),
                track("content_opacity", "reveal", Opacity, &[0.8, 1.0], &[0.0, 1.0], Ease::Linear),
            ],
        }
    }
}

fn clamp_progress(progress: f64) -> f64 {
    if progress.is_nan() {
        0.0
    } else {
        progress.clamp(0.0, 1.0)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/timeline.rs"]
mod tests;
