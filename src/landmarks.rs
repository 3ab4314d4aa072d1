//! Landmark role binding and per-face landmark summary.
//!
//! The detector numbers its keypoints with a fixed scheme. [`LandmarkIndices`]
//! binds each semantic role used by the measurement pipeline to one of those
//! indices. The default binding targets the 478-point face mesh (468 surface
//! points plus 10 refined iris points).

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::geometry::distance;
use crate::types::{Landmarks, Point};

/// Number of keypoints produced by the default face mesh detector.
pub const MESH_LANDMARK_COUNT: usize = 478;

/// Role → keypoint index table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LandmarkIndices {
    pub forehead_left: usize,
    pub forehead_right: usize,
    pub cheekbone_left: usize,
    pub cheekbone_right: usize,
    pub jaw_left: usize,
    pub jaw_right: usize,
    pub chin: usize,
    pub chin_left: usize,
    pub chin_right: usize,
    /// Contour point above the left jaw corner, used for the jaw angle
    pub jaw_angle_above_left: usize,
    pub jaw_angle_above_right: usize,
    /// Refined iris centers, used for IPD and head roll
    pub left_eye_center: usize,
    pub right_eye_center: usize,
    pub left_eye_outer: usize,
    pub left_eye_inner: usize,
    pub left_eye_top: usize,
    pub left_eye_bottom: usize,
    pub right_eye_outer: usize,
    pub right_eye_inner: usize,
    pub right_eye_top: usize,
    pub right_eye_bottom: usize,
    pub nose_bridge: usize,
    pub face_oval_top: usize,
}

impl Default for LandmarkIndices {
    fn default() -> Self {
        Self {
            forehead_left: 21,
            forehead_right: 251,
            cheekbone_left: 234,
            cheekbone_right: 454,
            jaw_left: 172,
            jaw_right: 397,
            chin: 152,
            chin_left: 149,
            chin_right: 378,
            jaw_angle_above_left: 132,
            jaw_angle_above_right: 361,
            left_eye_center: 468,
            right_eye_center: 473,
            left_eye_outer: 33,
            left_eye_inner: 133,
            left_eye_top: 159,
            left_eye_bottom: 145,
            right_eye_outer: 263,
            right_eye_inner: 362,
            right_eye_top: 386,
            right_eye_bottom: 374,
            nose_bridge: 6,
            face_oval_top: 10,
        }
    }
}

impl LandmarkIndices {
    /// Every role with its bound index.
    pub fn roles(&self) -> [(&'static str, usize); 23] {
        [
            ("foreheadLeft", self.forehead_left),
            ("foreheadRight", self.forehead_right),
            ("cheekboneLeft", self.cheekbone_left),
            ("cheekboneRight", self.cheekbone_right),
            ("jawLeft", self.jaw_left),
            ("jawRight", self.jaw_right),
            ("chin", self.chin),
            ("chinLeft", self.chin_left),
            ("chinRight", self.chin_right),
            ("jawAngleAboveLeft", self.jaw_angle_above_left),
            ("jawAngleAboveRight", self.jaw_angle_above_right),
            ("leftEyeCenter", self.left_eye_center),
            ("rightEyeCenter", self.right_eye_center),
            ("leftEyeOuter", self.left_eye_outer),
            ("leftEyeInner", self.left_eye_inner),
            ("leftEyeTop", self.left_eye_top),
            ("leftEyeBottom", self.left_eye_bottom),
            ("rightEyeOuter", self.right_eye_outer),
            ("rightEyeInner", self.right_eye_inner),
            ("rightEyeTop", self.right_eye_top),
            ("rightEyeBottom", self.right_eye_bottom),
            ("noseBridge", self.nose_bridge),
            ("faceOvalTop", self.face_oval_top),
        ]
    }

    /// Smallest keypoint count that satisfies every role.
    pub fn required_len(&self) -> usize {
        self.roles().iter().map(|(_, idx)| idx + 1).max().unwrap_or(0)
    }

    /// Check that every role resolves to a keypoint of `landmarks`.
    pub fn validate(&self, landmarks: &Landmarks) -> Result<()> {
        let len = landmarks.len();
        match self.roles().into_iter().find(|(_, idx)| *idx >= len) {
            Some((role, index)) => Err(Error::LandmarkOutOfRange { role, index, len }),
            None => Ok(()),
        }
    }

    /// The four facial-oval points whose depth spread measures stability:
    /// top of forehead, chin, left and right cheekbone.
    pub fn stability_points(&self) -> [usize; 4] {
        [
            self.face_oval_top,
            self.chin,
            self.cheekbone_left,
            self.cheekbone_right,
        ]
    }
}

/// A validated face whose keypoints are read in pixel space.
///
/// Construction checks the role table against the keypoint count, so role
/// lookups never go out of bounds afterwards.
#[derive(Debug, Clone, Copy)]
pub struct PixelFace<'a> {
    landmarks: &'a Landmarks,
    indices: &'a LandmarkIndices,
    width: f64,
    height: f64,
}

impl<'a> PixelFace<'a> {
    pub fn new(
        landmarks: &'a Landmarks,
        indices: &'a LandmarkIndices,
        width: f64,
        height: f64,
    ) -> Result<Self> {
        if !(width > 0.0 && height > 0.0 && width.is_finite() && height.is_finite()) {
            return Err(Error::InvalidDimensions { width, height });
        }
        indices.validate(landmarks)?;
        Ok(Self {
            landmarks,
            indices,
            width,
            height,
        })
    }

    pub fn indices(&self) -> &LandmarkIndices {
        self.indices
    }

    pub fn landmarks(&self) -> &Landmarks {
        self.landmarks
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    /// Keypoint `idx` rescaled into pixel space.
    pub fn point(&self, idx: usize) -> Point {
        self.landmarks[idx].scale(self.width, self.height)
    }

    /// Pixel distance between two keypoints.
    pub fn span(&self, a: usize, b: usize) -> f64 {
        distance(&self.point(a), &self.point(b))
    }

    /// In-plane head roll in radians, from the iris centers.
    pub fn roll(&self) -> f64 {
        let left = self.point(self.indices.left_eye_center);
        let right = self.point(self.indices.right_eye_center);
        (right.y - left.y).atan2(right.x - left.x)
    }
}

/// Center and extent of one eye, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EyeRegion {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Pixel-space landmark summary handed back for overlays.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LandmarkSummary {
    pub keypoints: Vec<Point>,
    pub eye_center: Point,
    /// Outer-corner to outer-corner distance across both eyes
    pub eye_width: f64,
    pub face_width: f64,
    /// Roll between the eye-corner centers, radians
    pub face_angle: f64,
    pub left_eye: EyeRegion,
    pub right_eye: EyeRegion,
    pub nose_bridge: Point,
}

impl LandmarkSummary {
    pub fn from_face(face: &PixelFace<'_>) -> Self {
        let idx = face.indices();

        let left_eye = eye_region(
            face,
            idx.left_eye_outer,
            idx.left_eye_inner,
            idx.left_eye_top,
            idx.left_eye_bottom,
        );
        let right_eye = eye_region(
            face,
            idx.right_eye_outer,
            idx.right_eye_inner,
            idx.right_eye_top,
            idx.right_eye_bottom,
        );

        Self {
            keypoints: face.landmarks().to_pixels(face.width(), face.height()),
            eye_center: Point::new(
                (left_eye.x + right_eye.x) / 2.0,
                (left_eye.y + right_eye.y) / 2.0,
            ),
            eye_width: face.span(idx.left_eye_outer, idx.right_eye_outer),
            face_width: face.span(idx.cheekbone_left, idx.cheekbone_right),
            face_angle: (right_eye.y - left_eye.y).atan2(right_eye.x - left_eye.x),
            left_eye,
            right_eye,
            nose_bridge: face.point(idx.nose_bridge),
        }
    }
}

// Horizontal center from the corners, vertical center from the lids.
fn eye_region(face: &PixelFace<'_>, outer: usize, inner: usize, top: usize, bottom: usize) -> EyeRegion {
    let outer_p = face.point(outer);
    let inner_p = face.point(inner);
    let top_p = face.point(top);
    let bottom_p = face.point(bottom);

    EyeRegion {
        x: (outer_p.x + inner_p.x) / 2.0,
        y: (top_p.y + bottom_p.y) / 2.0,
        width: distance(&outer_p, &inner_p),
        height: distance(&top_p, &bottom_p),
    }
}
