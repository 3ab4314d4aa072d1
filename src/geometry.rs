//! Plane geometry on landmark points.
//!
//! Both functions ignore depth and work in whatever coordinate space the
//! points are in. Degenerate input (a ray of zero length in [`angle`])
//! yields NaN; landmarks from a real face never coincide.

use crate::types::Point;

/// Euclidean distance between two points.
pub fn distance(p1: &Point, p2: &Point) -> f64 {
    p1.distance(p2)
}

/// Angle at vertex `b` between the rays `b→a` and `b→c`, in degrees.
pub fn angle(a: &Point, b: &Point, c: &Point) -> f64 {
    let ba = *a - *b;
    let bc = *c - *b;

    let dot = ba.x * bc.x + ba.y * bc.y;
    let mag_ba = ba.x.hypot(ba.y);
    let mag_bc = bc.x.hypot(bc.y);

    (dot / (mag_ba * mag_bc)).acos().to_degrees()
}
