use serde::{Deserialize, Serialize};

/// A landmark position. `z` carries the detector's relative depth when it
/// reports one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z: Option<f64>,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y, z: None }
    }

    pub const fn with_depth(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z: Some(z) }
    }

    pub const fn zero() -> Self {
        Self::new(0.0, 0.0)
    }

    pub fn distance(&self, other: &Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Midpoint in the image plane. Depth is dropped.
    pub fn midpoint(&self, other: &Point) -> Point {
        Point::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }

    /// Rescale a normalized [0,1] detector point into pixel space.
    /// Depth is left untouched.
    pub fn scale(&self, width: f64, height: f64) -> Point {
        Point {
            x: self.x * width,
            y: self.y * height,
            z: self.z,
        }
    }
}

impl std::ops::Add for Point {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl std::ops::Sub for Point {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl std::ops::Mul<f64> for Point {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self::Output {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

/// The keypoints of one detected face, indexed by the detector's fixed
/// numbering scheme.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Landmarks {
    pub points: Vec<Point>,
}

impl Landmarks {
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn get(&self, idx: usize) -> Option<&Point> {
        self.points.get(idx)
    }

    /// Rescale every keypoint into pixel space.
    pub fn to_pixels(&self, width: f64, height: f64) -> Vec<Point> {
        self.points.iter().map(|p| p.scale(width, height)).collect()
    }

    /// Area of the axis-aligned box around all keypoints, in the points'
    /// own coordinate space. Zero for an empty set.
    pub fn bounding_area(&self) -> f64 {
        let Some(first) = self.points.first() else {
            return 0.0;
        };
        let (mut min_x, mut max_x, mut min_y, mut max_y) = (first.x, first.x, first.y, first.y);
        for p in &self.points[1..] {
            min_x = min_x.min(p.x);
            max_x = max_x.max(p.x);
            min_y = min_y.min(p.y);
            max_y = max_y.max(p.y);
        }
        (max_x - min_x) * (max_y - min_y)
    }
}

impl std::ops::Index<usize> for Landmarks {
    type Output = Point;

    fn index(&self, idx: usize) -> &Self::Output {
        &self.points[idx]
    }
}

impl From<Vec<Point>> for Landmarks {
    fn from(points: Vec<Point>) -> Self {
        Self::new(points)
    }
}
