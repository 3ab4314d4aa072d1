//! Qualitative descriptions of facial features.
//!
//! These labels summarize a measurement set for people; they play no part
//! in classification.

use serde::Serialize;

use crate::measurements::Measurements;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ForeheadWidth {
    Wide,
    Narrow,
    Balanced,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Cheekbones {
    Prominent,
    Defined,
    Subtle,
    Balanced,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Jawline {
    StrongWide,
    Angular,
    Tapered,
    Narrow,
    Pointed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum JawAngle {
    Angular,
    Defined,
    Soft,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum FaceLength {
    Elongated,
    Long,
    Balanced,
    Short,
    VeryShort,
}

/// Grade of a [0, 1] confidence factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Grade {
    Fair,
    Good,
    Excellent,
}

impl Grade {
    pub fn of(value: f64) -> Self {
        if value >= 0.8 {
            Grade::Excellent
        } else if value >= 0.6 {
            Grade::Good
        } else {
            Grade::Fair
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Grade::Excellent => "Excellent",
            Grade::Good => "Good",
            Grade::Fair => "Fair",
        }
    }
}

/// One labelled feature with a short explanation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Descriptor<T> {
    pub value: T,
    pub detail: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FacialFeatures {
    pub forehead: Descriptor<ForeheadWidth>,
    pub cheekbones: Descriptor<Cheekbones>,
    pub jawline: Descriptor<Jawline>,
    pub jaw_angle: Descriptor<JawAngle>,
    pub face_length: Descriptor<FaceLength>,
}

impl FacialFeatures {
    pub fn describe(m: &Measurements) -> Self {
        Self {
            forehead: forehead(m),
            cheekbones: cheekbones(m),
            jawline: jawline(m),
            jaw_angle: jaw_angle(m),
            face_length: face_length(m),
        }
    }
}

fn forehead(m: &Measurements) -> Descriptor<ForeheadWidth> {
    let value = if m.forehead_width > m.cheekbone_width * 1.05 {
        ForeheadWidth::Wide
    } else if m.forehead_width < m.cheekbone_width * 0.9 {
        ForeheadWidth::Narrow
    } else {
        ForeheadWidth::Balanced
    };
    let detail = if m.forehead_to_jaw_ratio > 1.15 {
        "Wider than your jawline"
    } else if m.forehead_to_jaw_ratio < 0.9 {
        "Narrower than your jawline"
    } else {
        "Similar width to jawline"
    };
    Descriptor { value, detail }
}

fn cheekbones(m: &Measurements) -> Descriptor<Cheekbones> {
    let p = m.cheekbone_prominence;
    let value = if p > 1.1 {
        Cheekbones::Prominent
    } else if p > 1.02 {
        Cheekbones::Defined
    } else if p < 0.95 {
        Cheekbones::Subtle
    } else {
        Cheekbones::Balanced
    };
    let detail = if p > 1.1 {
        "Cheekbones are your widest feature"
    } else if p > 1.0 {
        "Cheekbones are moderately defined"
    } else {
        "Cheekbones blend smoothly with face"
    };
    Descriptor { value, detail }
}

fn jawline(m: &Measurements) -> Descriptor<Jawline> {
    let jaw_to_forehead = m.jaw_width / m.forehead_width;
    let value = if jaw_to_forehead > 1.05 {
        Jawline::StrongWide
    } else if jaw_to_forehead > 0.95 {
        Jawline::Angular
    } else if jaw_to_forehead > 0.85 {
        Jawline::Tapered
    } else if jaw_to_forehead > 0.7 {
        Jawline::Narrow
    } else {
        Jawline::Pointed
    };
    let detail = if jaw_to_forehead > 0.95 {
        "Strong, defined jawline"
    } else if jaw_to_forehead > 0.8 {
        "Gently tapering toward chin"
    } else {
        "Narrow, pointed chin area"
    };
    Descriptor { value, detail }
}

fn jaw_angle(m: &Measurements) -> Descriptor<JawAngle> {
    if m.jaw_angle < 130.0 {
        Descriptor {
            value: JawAngle::Angular,
            detail: "Sharp jaw corners indicate a square or angular jawline",
        }
    } else if m.jaw_angle <= 140.0 {
        Descriptor {
            value: JawAngle::Defined,
            detail: "Moderately defined jaw with some angularity",
        }
    } else {
        Descriptor {
            value: JawAngle::Soft,
            detail: "Smooth, rounded jaw contour typical of oval or round faces",
        }
    }
}

fn face_length(m: &Measurements) -> Descriptor<FaceLength> {
    let r = m.length_to_width_ratio;
    let value = if r > 1.5 {
        FaceLength::Elongated
    } else if r > 1.35 {
        FaceLength::Long
    } else if r > 1.15 {
        FaceLength::Balanced
    } else if r > 1.0 {
        FaceLength::Short
    } else {
        FaceLength::VeryShort
    };
    let detail = if r > 1.5 {
        "Face is significantly longer than wide"
    } else if r > 1.3 {
        "Face is moderately longer than wide"
    } else if r > 1.1 {
        "Face length and width are well-balanced"
    } else {
        "Face width and length are nearly equal"
    };
    Descriptor { value, detail }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn face(forehead: f64, cheekbone: f64, jaw: f64, length_to_width: f64, angle: f64) -> Measurements {
        Measurements {
            forehead_width: forehead,
            cheekbone_width: cheekbone,
            jaw_width: jaw,
            forehead_to_jaw_ratio: forehead / jaw,
            cheekbone_prominence: cheekbone / ((forehead + jaw) / 2.0),
            length_to_width_ratio: length_to_width,
            jaw_angle: angle,
            ..Measurements::default()
        }
    }

    #[test]
    fn heart_like_face() {
        let f = FacialFeatures::describe(&face(2.2, 2.0, 1.4, 1.2, 128.0));
        assert_eq!(f.forehead.value, ForeheadWidth::Wide);
        assert_eq!(f.forehead.detail, "Wider than your jawline");
        assert_eq!(f.jawline.value, Jawline::Pointed);
        assert_eq!(f.jaw_angle.value, JawAngle::Angular);
        assert_eq!(f.face_length.value, FaceLength::Balanced);
    }

    #[test]
    fn round_like_face() {
        let f = FacialFeatures::describe(&face(1.9, 2.0, 1.9, 1.0, 150.0));
        assert_eq!(f.forehead.value, ForeheadWidth::Balanced);
        assert_eq!(f.cheekbones.value, Cheekbones::Defined);
        assert_eq!(f.jawline.value, Jawline::Angular);
        assert_eq!(f.jaw_angle.value, JawAngle::Soft);
        assert_eq!(f.face_length.value, FaceLength::VeryShort);
        assert_eq!(f.face_length.detail, "Face width and length are nearly equal");
    }

    #[test]
    fn jaw_angle_boundary_is_inclusive() {
        assert_eq!(jaw_angle(&face(2.0, 2.0, 2.0, 1.2, 140.0)).value, JawAngle::Defined);
        assert_eq!(jaw_angle(&face(2.0, 2.0, 2.0, 1.2, 130.0)).value, JawAngle::Defined);
    }

    #[test]
    fn grades() {
        assert_eq!(Grade::of(0.8), Grade::Excellent);
        assert_eq!(Grade::of(0.79), Grade::Good);
        assert_eq!(Grade::of(0.6), Grade::Good);
        assert_eq!(Grade::of(0.59), Grade::Fair);
        assert!(Grade::Excellent > Grade::Fair);
    }
}
