use crate::{
    animation::ease::Ease,
    foundation::error::{HeliographError, HeliographResult},
};

/// Piecewise-linear map of `value` from `input` breakpoints onto `output` values.
///
/// Values at or below the first breakpoint clamp to `output[0]`, values at or above the last
/// clamp to the last output. Between breakpoints the result lies on the segment joining the
/// two bracketing points. `input` must be sorted ascending and both slices must share a length
/// of at least 2; use [`Ranges`] to get that checked once up front.
pub fn interpolate(value: f64, input: &[f64], output: &[f64]) -> f64 {
    interpolate_eased(value, input, output, Ease::Linear)
}

/// [`interpolate`] with `ease` applied to the normalized position inside the active segment.
pub fn interpolate_eased(value: f64, input: &[f64], output: &[f64], ease: Ease) -> f64 {
    debug_assert_eq!(input.len(), output.len());
    debug_assert!(input.len() >= 2);

    let n = input.len().min(output.len());
    match n {
        0 => return f64::NAN,
        1 => return output[0],
        _ => {}
    }

    // NaN lands here too.
    if !(value > input[0]) {
        return output[0];
    }
    if value >= input[n - 1] {
        return output[n - 1];
    }

    let idx = input[..n].partition_point(|&x| x < value);
    let (a, b) = (idx - 1, idx);
    let denom = input[b] - input[a];
    if denom <= 0.0 {
        return output[b];
    }

    let t = ease.apply((value - input[a]) / denom);
    output[a] + (output[b] - output[a]) * t
}

/// Validated, owned pair of breakpoint/output sequences.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "RangesDef", into = "RangesDef")]
pub struct Ranges {
    input: Vec<f64>,
    output: Vec<f64>,
}

#[derive(serde::Serialize, serde::Deserialize)]
struct RangesDef {
    input: Vec<f64>,
    output: Vec<f64>,
}

impl TryFrom<RangesDef> for Ranges {
    type Error = HeliographError;

    fn try_from(def: RangesDef) -> HeliographResult<Self> {
        Self::new(def.input, def.output)
    }
}

impl From<Ranges> for RangesDef {
    fn from(r: Ranges) -> Self {
        Self {
            input: r.input,
            output: r.output,
        }
    }
}

impl Ranges {
    /// Validate and wrap `input`/`output`.
    pub fn new(input: Vec<f64>, output: Vec<f64>) -> HeliographResult<Self> {
        if input.len() != output.len() {
            return Err(HeliographError::validation(format!(
                "input range has {} breakpoints but output range has {}",
                input.len(),
                output.len()
            )));
        }
        if input.len() < 2 {
            return Err(HeliographError::validation(
                "ranges need at least 2 breakpoints",
            ));
        }
        if !input.iter().chain(output.iter()).all(|v| v.is_finite()) {
            return Err(HeliographError::validation("range values must be finite"));
        }
        if !input.windows(2).all(|w| w[0] <= w[1]) {
            return Err(HeliographError::validation(
                "input breakpoints must be non-decreasing",
            ));
        }
        Ok(Self { input, output })
    }

    /// Wrap literal ranges known to be valid.
    pub(crate) fn from_trusted(input: Vec<f64>, output: Vec<f64>) -> Self {
        debug_assert!(input.len() == output.len() && input.len() >= 2);
        Self { input, output }
    }

    /// Breakpoints.
    pub fn input(&self) -> &[f64] {
        &self.input
    }

    /// Output values, one per breakpoint.
    pub fn output(&self) -> &[f64] {
        &self.output
    }

    /// First and last breakpoint.
    pub fn domain(&self) -> (f64, f64) {
        (self.input[0], self.input[self.input.len() - 1])
    }

    /// Map `value` through these ranges.
    pub fn sample(&self, value: f64) -> f64 {
        interpolate(value, &self.input, &self.output)
    }

    /// Map `value` through these ranges with per-segment easing.
    pub fn sample_eased(&self, value: f64, ease: Ease) -> f64 {
        interpolate_eased(value, &self.input, &self.output, ease)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/interp.rs"]
mod tests;
