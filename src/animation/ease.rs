/// Easing curve applied to the normalized position inside one interpolation segment.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ease {
    /// Identity.
    #[default]
    Linear,
    /// Quadratic ease-in.
    InQuad,
    /// Quadratic ease-out.
    OutQuad,
    /// Quadratic ease-in-out.
    InOutQuad,
    /// Cubic ease-in.
    InCubic,
    /// Cubic ease-out.
    OutCubic,
    /// Cubic ease-in-out.
    InOutCubic,
}

impl Ease {
    /// Every variant, in declaration order.
    pub const ALL: [Ease; 7] = [
        Ease::Linear,
        Ease::InQuad,
        Ease::OutQuad,
        Ease::InOutQuad,
        Ease::InCubic,
        Ease::OutCubic,
        Ease::InOutCubic,
    ];

    /// Apply the curve to `t`, clamped to `[0, 1]` first.
    ///
    /// Out curves mirror the matching in curve through `(1, 1)`; in-out curves run the in curve
    /// on the first half and its mirror on the second.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::InQuad | Self::InCubic => self.power_in(t),
            Self::OutQuad | Self::OutCubic => 1.0 - self.power_in(1.0 - t),
            Self::InOutQuad | Self::InOutCubic => {
                if t < 0.5 {
                    self.power_in(2.0 * t) / 2.0
                } else {
                    1.0 - self.power_in(2.0 - 2.0 * t) / 2.0
                }
            }
        }
    }

    fn power_in(self, t: f64) -> f64 {
        match self {
            Self::Linear => t,
            Self::InQuad | Self::OutQuad | Self::InOutQuad => t * t,
            Self::InCubic | Self::OutCubic | Self::InOutCubic => t * t * t,
        }
    }

    /// `true` for the identity curve.
    pub fn is_linear(&self) -> bool {
        matches!(self, Self::Linear)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
