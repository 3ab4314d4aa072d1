//! Synthetic 478-point faces with chosen proportions.
#![allow(dead_code)]

use face_shape::{Detection, LandmarkIndices, Landmarks, Point, MESH_LANDMARK_COUNT};

/// Frame size used by every synthetic detection.
pub const FRAME: f64 = 1000.0;

/// Face proportions in normalized frame units (fractions of the frame).
#[derive(Debug, Clone, Copy)]
pub struct FaceSpec {
    pub ipd: f64,
    pub forehead: f64,
    pub cheekbone: f64,
    pub jaw: f64,
    pub chin: f64,
    pub length: f64,
    /// Target angle at each jaw corner, degrees
    pub jaw_angle: f64,
    pub left_eye_width: f64,
    pub right_eye_width: f64,
    /// Vertical offset of the right iris, for head roll
    pub roll_offset: f64,
    /// Depth of the four stability points, `None` for a 2D detector
    pub depth: Option<[f64; 4]>,
}

impl FaceSpec {
    /// L/W 1.18, jaw 138°, width variance 0.05, forehead/jaw 1.05.
    pub fn oval() -> Self {
        Self {
            ipd: 0.10,
            forehead: 0.315,
            cheekbone: 0.30,
            jaw: 0.30,
            chin: 0.24,
            length: 0.354,
            jaw_angle: 138.0,
            left_eye_width: 0.03,
            right_eye_width: 0.03,
            roll_offset: 0.0,
            depth: Some([0.0; 4]),
        }
    }

    /// Forehead/jaw 1.30, jaw/cheek 0.70, chin/jaw 0.70.
    pub fn heart() -> Self {
        Self {
            forehead: 0.273,
            jaw: 0.21,
            chin: 0.147,
            length: 0.363,
            jaw_angle: 137.0,
            ..Self::oval()
        }
    }

    /// Jaw 120°, L/W 1.05, width variance 0.08.
    pub fn square() -> Self {
        Self {
            forehead: 0.294,
            jaw: 0.27,
            chin: 0.216,
            length: 0.315,
            jaw_angle: 120.0,
            ..Self::oval()
        }
    }

    pub fn landmarks(&self) -> Landmarks {
        self.landmarks_at(0.5, 1.0)
    }

    /// Build the face centered horizontally at `cx`, scaled by `scale`
    /// around (cx, 0.5).
    pub fn landmarks_at(&self, cx: f64, scale: f64) -> Landmarks {
        let idx = LandmarkIndices::default();
        let mut p = vec![Point::new(cx, 0.5); MESH_LANDMARK_COUNT];

        let eye_y = 0.40;
        let chin_y = 0.65;
        let jaw_y = 0.58;

        p[idx.left_eye_center] = Point::new(cx - self.ipd / 2.0, eye_y);
        p[idx.right_eye_center] = Point::new(cx + self.ipd / 2.0, eye_y + self.roll_offset);

        let lx = cx - self.ipd / 2.0;
        let rx = cx + self.ipd / 2.0;
        p[idx.left_eye_outer] = Point::new(lx - self.left_eye_width / 2.0, eye_y);
        p[idx.left_eye_inner] = Point::new(lx + self.left_eye_width / 2.0, eye_y);
        p[idx.left_eye_top] = Point::new(lx, eye_y - 0.008);
        p[idx.left_eye_bottom] = Point::new(lx, eye_y + 0.008);
        p[idx.right_eye_outer] = Point::new(rx + self.right_eye_width / 2.0, eye_y);
        p[idx.right_eye_inner] = Point::new(rx - self.right_eye_width / 2.0, eye_y);
        p[idx.right_eye_top] = Point::new(rx, eye_y - 0.008);
        p[idx.right_eye_bottom] = Point::new(rx, eye_y + 0.008);
        p[idx.nose_bridge] = Point::new(cx, eye_y);

        p[idx.forehead_left] = Point::new(cx - self.forehead / 2.0, 0.32);
        p[idx.forehead_right] = Point::new(cx + self.forehead / 2.0, 0.32);
        p[idx.cheekbone_left] = Point::new(cx - self.cheekbone / 2.0, 0.45);
        p[idx.cheekbone_right] = Point::new(cx + self.cheekbone / 2.0, 0.45);

        let jaw_l = Point::new(cx - self.jaw / 2.0, jaw_y);
        let jaw_r = Point::new(cx + self.jaw / 2.0, jaw_y);
        let chin = Point::new(cx, chin_y);
        p[idx.jaw_left] = jaw_l;
        p[idx.jaw_right] = jaw_r;
        p[idx.chin] = chin;
        p[idx.jaw_angle_above_left] = point_at_angle(jaw_l, chin, self.jaw_angle);
        p[idx.jaw_angle_above_right] = point_at_angle(jaw_r, chin, self.jaw_angle);
        p[idx.chin_left] = Point::new(cx - self.chin / 2.0, chin_y - 0.02);
        p[idx.chin_right] = Point::new(cx + self.chin / 2.0, chin_y - 0.02);
        p[idx.face_oval_top] = Point::new(cx, chin_y - self.length);

        if let Some(z) = self.depth {
            for (&i, &depth) in idx.stability_points().iter().zip(z.iter()) {
                p[i].z = Some(depth);
            }
        }

        if scale != 1.0 {
            for point in p.iter_mut() {
                point.x = cx + (point.x - cx) * scale;
                point.y = 0.5 + (point.y - 0.5) * scale;
            }
        }

        Landmarks::new(p)
    }

    pub fn detection(&self) -> Detection {
        Detection {
            width: FRAME,
            height: FRAME,
            faces: vec![self.landmarks()],
        }
    }
}

/// A point above `vertex` such that the angle at `vertex` between it and
/// `toward` is `degrees`.
fn point_at_angle(vertex: Point, toward: Point, degrees: f64) -> Point {
    let d = toward - vertex;
    let len = d.x.hypot(d.y);
    let (ux, uy) = (d.x / len, d.y / len);
    let t = degrees.to_radians();
    let candidates = [
        (ux * t.cos() - uy * t.sin(), ux * t.sin() + uy * t.cos()),
        (ux * t.cos() + uy * t.sin(), -ux * t.sin() + uy * t.cos()),
    ];
    // Image y grows downward; "above" is the smaller y.
    let (rx, ry) = if candidates[0].1 < candidates[1].1 {
        candidates[0]
    } else {
        candidates[1]
    };
    Point::new(vertex.x + rx * 0.08, vertex.y + ry * 0.08)
}

pub fn assert_close(actual: f64, expected: f64, eps: f64) {
    assert!(
        (actual - expected).abs() < eps,
        "expected {expected}, got {actual}"
    );
}
