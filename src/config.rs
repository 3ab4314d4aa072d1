use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::analysis::FacePolicy;
use crate::error::Result;
use crate::landmarks::LandmarkIndices;
use crate::smoothing::DEFAULT_ALPHA;

/// Analyzer settings. Every key is optional in JSON; missing keys take the
/// defaults below.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AnalyzerConfig {
    /// Role → keypoint index binding for the detector in use
    pub landmarks: LandmarkIndices,
    /// EMA weight of the newest frame in continuous capture
    pub smoothing_alpha: f64,
    pub face_policy: FacePolicy,
    /// Reject analyses whose overall confidence falls below this
    pub min_overall_confidence: Option<f64>,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            landmarks: LandmarkIndices::default(),
            smoothing_alpha: DEFAULT_ALPHA,
            face_policy: FacePolicy::default(),
            min_overall_confidence: None,
        }
    }
}

impl AnalyzerConfig {
    pub fn from_json_str(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }
}
