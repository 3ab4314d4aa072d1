//! Quality signals attached to every analysis.
//!
//! Landmark detection is noisy, so each result carries four factors in
//! [0, 1]: measurement plausibility, bilateral eye symmetry, depth stability
//! of the facial oval, and a weighted blend of the three. All four are
//! rounded to two decimals.

use serde::Serialize;
use tracing::warn;

use crate::geometry::distance;
use crate::landmarks::PixelFace;
use crate::measurements::Measurements;

/// Plausible length-to-width range; outside it quality drops by 25%.
const LENGTH_TO_WIDTH_RANGE: (f64, f64) = (0.9, 1.8);
const LENGTH_TO_WIDTH_PENALTY: f64 = 0.75;

/// Plausible jaw angle range in degrees; outside it quality drops by 15%.
const JAW_ANGLE_RANGE: (f64, f64) = (110.0, 170.0);
const JAW_ANGLE_PENALTY: f64 = 0.85;

/// Largest in-plane roll, radians, before quality drops by 25%.
const MAX_ROTATION: f64 = 0.25;
const ROTATION_PENALTY: f64 = 0.75;

const STABILITY_VARIANCE_SCALE: f64 = 15.0;

/// Stability reported when the detector supplies no depth.
pub const NEUTRAL_STABILITY: f64 = 0.5;

const QUALITY_WEIGHT: f64 = 0.4;
const SYMMETRY_WEIGHT: f64 = 0.4;
const STABILITY_WEIGHT: f64 = 0.2;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfidenceFactors {
    pub measurement_quality: f64,
    pub symmetry: f64,
    pub landmark_stability: f64,
    pub overall_confidence: f64,
}

impl ConfidenceFactors {
    /// Compute every factor for one face. `roll` is the in-plane head
    /// rotation in radians.
    pub fn estimate(face: &PixelFace<'_>, measurements: &Measurements, roll: f64) -> Self {
        let idx = face.indices();

        let quality = measurement_quality(measurements, roll);

        let (left_eye_width, right_eye_width) = eye_widths(face);
        let symmetry = eye_symmetry(left_eye_width, right_eye_width);

        let depths: Option<Vec<f64>> = idx
            .stability_points()
            .iter()
            .map(|&i| face.landmarks()[i].z)
            .collect();
        let stability = match depths {
            Some(z) => depth_stability(&z),
            None => {
                warn!("landmarks carry no depth, using neutral stability");
                NEUTRAL_STABILITY
            }
        };

        Self::from_parts(quality, symmetry, stability)
    }

    /// Blend three unrounded factors into the rounded set.
    pub fn from_parts(quality: f64, symmetry: f64, stability: f64) -> Self {
        let overall =
            QUALITY_WEIGHT * quality + SYMMETRY_WEIGHT * symmetry + STABILITY_WEIGHT * stability;
        Self {
            measurement_quality: round2(quality),
            symmetry: round2(symmetry),
            landmark_stability: round2(stability),
            overall_confidence: round2(overall),
        }
    }
}

/// Starts at 1.0; each implausible signal multiplies in its penalty.
pub fn measurement_quality(m: &Measurements, roll: f64) -> f64 {
    let mut quality = 1.0;

    let (lo, hi) = LENGTH_TO_WIDTH_RANGE;
    if m.length_to_width_ratio < lo || m.length_to_width_ratio > hi {
        quality *= LENGTH_TO_WIDTH_PENALTY;
    }

    let (lo, hi) = JAW_ANGLE_RANGE;
    if m.jaw_angle < lo || m.jaw_angle > hi {
        quality *= JAW_ANGLE_PENALTY;
    }

    if roll.abs() > MAX_ROTATION {
        quality *= ROTATION_PENALTY;
    }

    quality
}

/// `1 - |l - r| / max(l, r)`. Two zero-width eyes count as symmetric; a
/// single zero-width eye gives 0.
pub fn eye_symmetry(left_width: f64, right_width: f64) -> f64 {
    let widest = left_width.max(right_width);
    if widest <= 0.0 {
        return 1.0;
    }
    1.0 - (left_width - right_width).abs() / widest
}

/// `max(0, 1 - 15 * variance)` of the sampled depths.
pub fn depth_stability(z: &[f64]) -> f64 {
    if z.is_empty() {
        return NEUTRAL_STABILITY;
    }
    let n = z.len() as f64;
    let mean = z.iter().sum::<f64>() / n;
    let variance = z.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    (1.0 - variance * STABILITY_VARIANCE_SCALE).max(0.0)
}

/// Eye-corner widths of both eyes, in the detector's normalized coordinates.
pub fn eye_widths(face: &PixelFace<'_>) -> (f64, f64) {
    let idx = face.indices();
    let lm = face.landmarks();
    (
        distance(&lm[idx.left_eye_outer], &lm[idx.left_eye_inner]),
        distance(&lm[idx.right_eye_outer], &lm[idx.right_eye_inner]),
    )
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}
