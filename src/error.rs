use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("No face detected")]
    NoFace,

    #[error("Expected a single face, detector returned {count}")]
    MultipleFaces { count: usize },

    #[error("Overall confidence {overall:.2} is below the required minimum")]
    PoorQuality { overall: f64 },

    #[error("Landmark model error: {0}")]
    Model(String),

    #[error("Landmark `{role}` uses index {index} but the face has only {len} keypoints")]
    LandmarkOutOfRange {
        role: &'static str,
        index: usize,
        len: usize,
    },

    #[error("Invalid image dimensions {width}x{height}")]
    InvalidDimensions { width: f64, height: f64 },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Coarse failure classes handed back to callers that only need to decide
/// how to re-prompt the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ErrorKind {
    NoFace,
    MultipleFaces,
    PoorQuality,
    ModelError,
    InvalidInput,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::NoFace => "no-face",
            ErrorKind::MultipleFaces => "multiple-faces",
            ErrorKind::PoorQuality => "poor-quality",
            ErrorKind::ModelError => "model-error",
            ErrorKind::InvalidInput => "invalid-input",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::NoFace => ErrorKind::NoFace,
            Error::MultipleFaces { .. } => ErrorKind::MultipleFaces,
            Error::PoorQuality { .. } => ErrorKind::PoorQuality,
            Error::Model(_) => ErrorKind::ModelError,
            Error::LandmarkOutOfRange { .. }
            | Error::InvalidDimensions { .. }
            | Error::Io(_)
            | Error::Json(_) => ErrorKind::InvalidInput,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
