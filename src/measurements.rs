//! Facial measurements extracted from landmark geometry.
//!
//! Widths and the face length are stored in IPD units (divided by the
//! inter-pupillary distance), so they do not depend on how large the face
//! appears in the frame. The ratios are computed from pixel distances; the
//! IPD scale cancels, so they are identical to ratios of the normalized
//! widths. `ipd` itself stays in pixels and `jaw_angle` in degrees.

use serde::{Deserialize, Serialize};

use crate::geometry::angle;
use crate::landmarks::PixelFace;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Measurements {
    pub face_length: f64,
    /// Canonical face width, equal to the cheekbone width
    pub face_width: f64,
    pub forehead_width: f64,
    pub cheekbone_width: f64,
    pub jaw_width: f64,
    pub chin_width: f64,
    /// Inter-pupillary distance in pixels
    pub ipd: f64,

    pub length_to_width_ratio: f64,
    pub forehead_to_jaw_ratio: f64,
    /// Cheekbone width over the mean of forehead and jaw width
    pub cheekbone_prominence: f64,
    pub chin_to_jaw_ratio: f64,
    /// Mean of the left and right jaw corner angles, degrees
    pub jaw_angle: f64,
}

/// Widths converted back to pixels, for display.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PixelWidths {
    pub face_length: f64,
    pub forehead_width: f64,
    pub cheekbone_width: f64,
    pub jaw_width: f64,
    pub chin_width: f64,
}

impl Measurements {
    /// Names of the numeric fields, in [`Measurements::to_array`] order.
    pub const FIELD_NAMES: [&'static str; 12] = [
        "faceLength",
        "faceWidth",
        "foreheadWidth",
        "cheekboneWidth",
        "jawWidth",
        "chinWidth",
        "ipd",
        "lengthToWidthRatio",
        "foreheadToJawRatio",
        "cheekboneProminence",
        "chinToJawRatio",
        "jawAngle",
    ];

    pub fn from_face(face: &PixelFace<'_>) -> Self {
        let idx = face.indices();

        let forehead = face.span(idx.forehead_left, idx.forehead_right);
        let cheekbone = face.span(idx.cheekbone_left, idx.cheekbone_right);
        let jaw = face.span(idx.jaw_left, idx.jaw_right);
        let chin = face.span(idx.chin_left, idx.chin_right);
        let length = face.span(idx.face_oval_top, idx.chin);
        let ipd = face.span(idx.left_eye_center, idx.right_eye_center);

        let chin_p = face.point(idx.chin);
        let left_angle = angle(
            &face.point(idx.jaw_angle_above_left),
            &face.point(idx.jaw_left),
            &chin_p,
        );
        let right_angle = angle(
            &face.point(idx.jaw_angle_above_right),
            &face.point(idx.jaw_right),
            &chin_p,
        );

        Self {
            face_length: length / ipd,
            face_width: cheekbone / ipd,
            forehead_width: forehead / ipd,
            cheekbone_width: cheekbone / ipd,
            jaw_width: jaw / ipd,
            chin_width: chin / ipd,
            ipd,
            length_to_width_ratio: length / cheekbone,
            forehead_to_jaw_ratio: forehead / jaw,
            cheekbone_prominence: cheekbone / ((forehead + jaw) / 2.0),
            chin_to_jaw_ratio: chin / jaw,
            jaw_angle: (left_angle + right_angle) / 2.0,
        }
    }

    pub fn to_array(&self) -> [f64; 12] {
        [
            self.face_length,
            self.face_width,
            self.forehead_width,
            self.cheekbone_width,
            self.jaw_width,
            self.chin_width,
            self.ipd,
            self.length_to_width_ratio,
            self.forehead_to_jaw_ratio,
            self.cheekbone_prominence,
            self.chin_to_jaw_ratio,
            self.jaw_angle,
        ]
    }

    pub fn from_array(v: [f64; 12]) -> Self {
        let [face_length, face_width, forehead_width, cheekbone_width, jaw_width, chin_width, ipd, length_to_width_ratio, forehead_to_jaw_ratio, cheekbone_prominence, chin_to_jaw_ratio, jaw_angle] =
            v;
        Self {
            face_length,
            face_width,
            forehead_width,
            cheekbone_width,
            jaw_width,
            chin_width,
            ipd,
            length_to_width_ratio,
            forehead_to_jaw_ratio,
            cheekbone_prominence,
            chin_to_jaw_ratio,
            jaw_angle,
        }
    }

    /// Field-wise `self * (1 - alpha) + current * alpha`.
    pub fn blend(&self, current: &Measurements, alpha: f64) -> Measurements {
        let prev = self.to_array();
        let cur = current.to_array();
        let mut out = [0.0; 12];
        for (o, (p, c)) in out.iter_mut().zip(prev.iter().zip(cur.iter())) {
            *o = p * (1.0 - alpha) + c * alpha;
        }
        Self::from_array(out)
    }

    pub fn pixel_widths(&self) -> PixelWidths {
        PixelWidths {
            face_length: self.face_length * self.ipd,
            forehead_width: self.forehead_width * self.ipd,
            cheekbone_width: self.cheekbone_width * self.ipd,
            jaw_width: self.jaw_width * self.ipd,
            chin_width: self.chin_width * self.ipd,
        }
    }
}
