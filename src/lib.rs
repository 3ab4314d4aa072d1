//! # face-shape
//!
//! Face shape classification from facial landmark geometry, with eyewear
//! recommendations for the detected shape.
//!
//! This crate provides:
//! - **Measurements**: forehead, cheekbone, jaw and chin widths, face length
//!   and jaw angle from a 478-point face mesh, normalized by the
//!   inter-pupillary distance (IPD)
//! - **Confidence**: measurement plausibility, eye symmetry and depth
//!   stability of each detection
//! - **Classification**: banded heuristic scoring against seven shapes
//!   (oval, round, square, heart, oblong, diamond, rectangle)
//! - **Advice**: shape descriptions, feature descriptors and frame styles to
//!   wear or avoid
//!
//! The landmark detector itself is external. The crate consumes the
//! normalized keypoints it returns for one image (see [`Detection`]).
//!
//! ## Pipeline
//!
//! 1. Pick one face ([`FacePolicy`]) and rescale its keypoints to pixels
//! 2. Extract [`Measurements`] through the role table in [`LandmarkIndices`]
//! 3. Smooth them against earlier frames (live capture only)
//! 4. Estimate [`ConfidenceFactors`]
//! 5. Score every [`FaceShape`], damp by asymmetry, rank, and derive the
//!    integer confidence
//!
//! ## Quick Start
//!
//! ```rust
//! use face_shape::{classify, FaceShape, Measurements};
//!
//! let m = Measurements {
//!     forehead_width: 2.1,
//!     cheekbone_width: 2.0,
//!     face_width: 2.0,
//!     jaw_width: 2.0,
//!     face_length: 2.36,
//!     chin_width: 1.6,
//!     ipd: 100.0,
//!     length_to_width_ratio: 1.18,
//!     forehead_to_jaw_ratio: 1.05,
//!     cheekbone_prominence: 2.0 / 2.05,
//!     chin_to_jaw_ratio: 0.8,
//!     jaw_angle: 138.0,
//! };
//!
//! let result = classify(&m, 1.0);
//! assert_eq!(result.shape, FaceShape::Oval);
//! println!("{} ({}%)", result.shape.name(), result.confidence);
//! for style in result.shape.profile().recommendations {
//!     println!("  try: {style}");
//! }
//! ```
//!
//! With keypoints from a detector, go through [`FaceAnalyzer`]:
//!
//! ```rust,ignore
//! let analyzer = FaceAnalyzer::default();
//! let result = analyzer.analyze(&detection)?;
//!
//! // Live camera: one session per person
//! let mut session = analyzer.session();
//! for frame in frames {
//!     let result = session.analyze_frame(&frame)?;
//! }
//! ```

pub mod analysis;
pub mod catalog;
pub mod classifier;
pub mod config;
pub mod confidence;
mod error;
pub mod features;
pub mod geometry;
pub mod landmarks;
pub mod logging;
pub mod measurements;
pub mod smoothing;
mod types;

pub use analysis::{
    select_face, AnalysisResult, AnalysisSession, Detection, FaceAnalyzer, FacePolicy,
    LandmarkDetector,
};
pub use catalog::ShapeProfile;
pub use classifier::{classify, gap_adjusted_confidence, Classification, FaceShape, ShapeScore};
pub use confidence::ConfidenceFactors;
pub use config::AnalyzerConfig;
pub use error::{Error, ErrorKind, Result};
pub use features::{FacialFeatures, Grade};
pub use landmarks::{LandmarkIndices, LandmarkSummary, MESH_LANDMARK_COUNT};
pub use measurements::Measurements;
pub use smoothing::MeasurementSmoother;
pub use types::{Landmarks, Point};
