//! End-to-end analysis of one detected face.
//!
//! ```text
//! keypoints ─► Measurements ─► [smoother] ─┬─► ConfidenceFactors ─┐
//!                                          └─────────────────────►├─► classify ─► AnalysisResult
//! ```
//!
//! A still photo goes through [`FaceAnalyzer::analyze`]. A live capture opens
//! an [`AnalysisSession`], which owns the smoothing state for that capture
//! and nothing else, so sessions for different people never mix.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::catalog::ShapeProfile;
use crate::classifier::{classify, FaceShape, ShapeScore};
use crate::confidence::ConfidenceFactors;
use crate::config::AnalyzerConfig;
use crate::error::{Error, Result};
use crate::features::FacialFeatures;
use crate::landmarks::{LandmarkSummary, PixelFace};
use crate::measurements::Measurements;
use crate::smoothing::MeasurementSmoother;
use crate::types::Landmarks;

/// What to do when the detector reports more than one face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FacePolicy {
    /// Use the first face the detector returned.
    #[default]
    First,
    /// Use the face whose keypoints span the largest area.
    Largest,
    /// Refuse with [`Error::MultipleFaces`].
    Reject,
}

impl FromStr for FacePolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "first" => Ok(FacePolicy::First),
            "largest" => Ok(FacePolicy::Largest),
            "reject" => Ok(FacePolicy::Reject),
            other => Err(format!("unknown face policy `{other}`")),
        }
    }
}

/// Pick the single face to analyze.
pub fn select_face(faces: &[Landmarks], policy: FacePolicy) -> Result<&Landmarks> {
    match faces {
        [] => Err(Error::NoFace),
        [only] => Ok(only),
        _ => match policy {
            FacePolicy::First => {
                warn!(count = faces.len(), "multiple faces detected, using the first");
                Ok(&faces[0])
            }
            FacePolicy::Largest => {
                let mut best = &faces[0];
                let mut best_area = best.bounding_area();
                for face in &faces[1..] {
                    let area = face.bounding_area();
                    if area > best_area {
                        best = face;
                        best_area = area;
                    }
                }
                debug!(count = faces.len(), area = best_area, "selected largest face");
                Ok(best)
            }
            FacePolicy::Reject => Err(Error::MultipleFaces { count: faces.len() }),
        },
    }
}

/// Landmarks for every face found in one image, plus the image size used to
/// rescale the normalized keypoints into pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub faces: Vec<Landmarks>,
}

/// The external landmark model.
///
/// Implementations report their own failures (model load, inference) as
/// [`Error::Model`]; zero faces is a normal, empty detection.
pub trait LandmarkDetector {
    type Frame: ?Sized;

    fn detect(&mut self, frame: &Self::Frame) -> Result<Detection>;
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    #[serde(rename = "faceShapeId")]
    pub face_shape: FaceShape,
    /// 0..=100
    pub confidence: u32,
    /// All seven shapes, best first
    pub all_scores: Vec<ShapeScore>,
    pub measurements: Measurements,
    pub landmarks: LandmarkSummary,
    pub confidence_factors: ConfidenceFactors,
}

impl AnalysisResult {
    pub fn profile(&self) -> &'static ShapeProfile {
        self.face_shape.profile()
    }

    /// Up to `n` runners-up, best first.
    pub fn secondary_matches(&self, n: usize) -> &[ShapeScore] {
        let end = self.all_scores.len().min(n.saturating_add(1));
        self.all_scores.get(1..end).unwrap_or(&[])
    }

    pub fn features(&self) -> FacialFeatures {
        FacialFeatures::describe(&self.measurements)
    }
}

#[derive(Debug, Clone, Default)]
pub struct FaceAnalyzer {
    config: AnalyzerConfig,
}

impl FaceAnalyzer {
    pub fn new(config: AnalyzerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Analyze a still photo. No smoothing is applied.
    pub fn analyze(&self, detection: &Detection) -> Result<AnalysisResult> {
        let face = select_face(&detection.faces, self.config.face_policy)?;
        self.analyze_face(face, detection.width, detection.height, None)
    }

    /// Run the detector on `frame` and analyze the result as a still photo.
    pub fn detect_and_analyze<D: LandmarkDetector>(
        &self,
        detector: &mut D,
        frame: &D::Frame,
    ) -> Result<AnalysisResult> {
        let detection = detector.detect(frame)?;
        self.analyze(&detection)
    }

    /// Start a continuous-capture session with fresh smoothing state.
    pub fn session(&self) -> AnalysisSession {
        AnalysisSession {
            analyzer: self.clone(),
            smoother: MeasurementSmoother::new(self.config.smoothing_alpha),
        }
    }

    /// Full pipeline for one face, optionally smoothing the measurements.
    pub fn analyze_face(
        &self,
        landmarks: &Landmarks,
        width: f64,
        height: f64,
        smoother: Option<&mut MeasurementSmoother>,
    ) -> Result<AnalysisResult> {
        let face = PixelFace::new(landmarks, &self.config.landmarks, width, height)?;

        let raw = Measurements::from_face(&face);
        debug!(?raw, "extracted measurements");
        let measurements = match smoother {
            Some(s) => s.smooth(raw),
            None => raw,
        };

        let factors = ConfidenceFactors::estimate(&face, &measurements, face.roll());

        if let Some(min) = self.config.min_overall_confidence {
            if factors.overall_confidence < min {
                warn!(
                    overall = factors.overall_confidence,
                    min, "analysis rejected as poor quality"
                );
                return Err(Error::PoorQuality {
                    overall: factors.overall_confidence,
                });
            }
        }

        let classification = classify(&measurements, factors.symmetry);
        info!(
            shape = classification.shape.id(),
            confidence = classification.confidence,
            overall = factors.overall_confidence,
            "face analyzed"
        );

        Ok(AnalysisResult {
            face_shape: classification.shape,
            confidence: classification.confidence,
            all_scores: classification.all_scores,
            measurements,
            landmarks: LandmarkSummary::from_face(&face),
            confidence_factors: factors,
        })
    }
}

/// Continuous capture of one person.
#[derive(Debug, Clone)]
pub struct AnalysisSession {
    analyzer: FaceAnalyzer,
    smoother: MeasurementSmoother,
}

impl AnalysisSession {
    /// Analyze the next frame, smoothing against the frames before it.
    pub fn analyze_frame(&mut self, detection: &Detection) -> Result<AnalysisResult> {
        let face = select_face(&detection.faces, self.analyzer.config.face_policy)?;
        self.analyzer
            .analyze_face(face, detection.width, detection.height, Some(&mut self.smoother))
    }

    pub fn smoother(&self) -> &MeasurementSmoother {
        &self.smoother
    }

    /// Forget the smoothing history, e.g. when a different person steps in.
    pub fn reset(&mut self) {
        self.smoother.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Point;

    fn blob(x0: f64, y0: f64, size: f64) -> Landmarks {
        Landmarks::new(vec![Point::new(x0, y0), Point::new(x0 + size, y0 + size)])
    }

    #[test]
    fn no_faces_is_no_face() {
        assert!(matches!(select_face(&[], FacePolicy::First), Err(Error::NoFace)));
    }

    #[test]
    fn single_face_ignores_policy() {
        let faces = vec![blob(0.1, 0.1, 0.2)];
        assert!(select_face(&faces, FacePolicy::Reject).is_ok());
    }

    #[test]
    fn policies_with_two_faces() {
        let faces = vec![blob(0.1, 0.1, 0.1), blob(0.5, 0.5, 0.3)];

        let first = select_face(&faces, FacePolicy::First).unwrap();
        assert_eq!(first, &faces[0]);

        let largest = select_face(&faces, FacePolicy::Largest).unwrap();
        assert_eq!(largest, &faces[1]);

        match select_face(&faces, FacePolicy::Reject) {
            Err(Error::MultipleFaces { count }) => assert_eq!(count, 2),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn policy_parses_case_insensitively() {
        assert_eq!("Largest".parse::<FacePolicy>(), Ok(FacePolicy::Largest));
        assert!("biggest".parse::<FacePolicy>().is_err());
    }

    #[test]
    fn detection_without_faces_key_is_empty() {
        let d: Detection = serde_json::from_str(r#"{"width": 640, "height": 480}"#).unwrap();
        assert!(d.faces.is_empty());
        assert!(matches!(FaceAnalyzer::default().analyze(&d), Err(Error::NoFace)));
    }
}
