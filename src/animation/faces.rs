use crate::foundation::error::{HeliographError, HeliographResult};

/// Discrete face/content derivation for a rotating polygonal structure.
///
/// Every `step_deg` of rotation another face becomes primary (camera-facing). Content variants
/// are handed out per primary moment: the `k`-th quarter turn shows variant `k mod variants` on
/// face `k mod faces`. A face that was primary at most one step ago keeps that content; any
/// other face already shows the content of its next primary moment. Content therefore only
/// swaps on the face turned away from the viewer.
///
/// With 4 faces and at least 3 variants, the primary face and its two neighbours never share a
/// variant.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FaceCycle {
    /// Number of faces around the rotation axis.
    pub faces: u32,
    /// Number of distinct content variants cycled across the faces.
    pub variants: u32,
    /// Rotation per face, in degrees.
    pub step_deg: f64,
}

/// Face assignment for one rotation angle.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct FaceAssignment {
    /// Whole steps turned (floor of `angle / step`).
    pub turns: i64,
    /// Index of the camera-facing face.
    pub primary_face: usize,
    /// Content variant per face index.
    pub contents: Vec<usize>,
}

impl FaceAssignment {
    /// Content variant on the primary face.
    pub fn primary_content(&self) -> usize {
        self.contents[self.primary_face]
    }
}

impl Default for FaceCycle {
    fn default() -> Self {
        Self {
            faces: 4,
            variants: 3,
            step_deg: 90.0,
        }
    }
}

impl FaceCycle {
    /// Build a validated cycle.
    pub fn new(faces: u32, variants: u32, step_deg: f64) -> HeliographResult<Self> {
        let cycle = Self {
            faces,
            variants,
            step_deg,
        };
        cycle.validate()?;
        Ok(cycle)
    }

    /// Check that counts are non-zero and the step is a positive finite angle.
    pub fn validate(&self) -> HeliographResult<()> {
        if self.faces == 0 || self.variants == 0 {
            return Err(HeliographError::validation(
                "FaceCycle faces and variants must be > 0",
            ));
        }
        if !(self.step_deg.is_finite() && self.step_deg > 0.0) {
            return Err(HeliographError::validation(
                "FaceCycle step_deg must be finite and > 0",
            ));
        }
        Ok(())
    }

    /// Whole steps contained in `angle_deg`, rounded toward negative infinity.
    ///
    /// Saturates at the `i64` bounds; non-finite angles count as zero.
    pub fn turns(&self, angle_deg: f64) -> i64 {
        if !angle_deg.is_finite() {
            return 0;
        }
        (angle_deg / self.step_deg).floor() as i64
    }

    /// Index of the camera-facing face at `angle_deg`.
    pub fn primary_face(&self, angle_deg: f64) -> usize {
        self.turns(angle_deg).rem_euclid(i64::from(self.faces)) as usize
    }

    /// Content variant shown on `face` at `angle_deg`.
    pub fn content_for(&self, face: usize, angle_deg: f64) -> usize {
        self.content_at_turns(face, self.turns(angle_deg))
    }

    /// Full assignment at `angle_deg`.
    pub fn assign(&self, angle_deg: f64) -> FaceAssignment {
        let turns = self.turns(angle_deg);
        FaceAssignment {
            turns,
            primary_face: turns.rem_euclid(i64::from(self.faces)) as usize,
            contents: (0..self.faces as usize)
                .map(|face| self.content_at_turns(face, turns))
                .collect(),
        }
    }

    fn content_at_turns(&self, face: usize, turns: i64) -> usize {
        // Widened so the saturated turn counts of huge angles cannot overflow.
        let turns = i128::from(turns);
        let faces = i128::from(self.faces);
        let variants = i128::from(self.variants);
        let face = face as i128;

        // Most recent turn count at which `face` was primary.
        let last = turns - (turns - face).rem_euclid(faces);
        let moment = if turns - last <= 1 { last } else { last + faces };
        moment.rem_euclid(variants) as usize
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/faces.rs"]
mod tests;
