//! Shape descriptions and eyewear advice.

use serde::Serialize;

use crate::classifier::FaceShape;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShapeProfile {
    #[serde(rename = "id")]
    pub shape: FaceShape,
    pub name: &'static str,
    pub description: &'static str,
    pub characteristics: &'static [&'static str],
    /// Frame styles that suit the shape
    pub recommendations: &'static [&'static str],
    /// Frame styles to avoid
    pub avoid: &'static [&'static str],
}

impl FaceShape {
    pub fn profile(&self) -> &'static ShapeProfile {
        match self {
            FaceShape::Oval => &OVAL,
            FaceShape::Round => &ROUND,
            FaceShape::Square => &SQUARE,
            FaceShape::Heart => &HEART,
            FaceShape::Oblong => &OBLONG,
            FaceShape::Diamond => &DIAMOND,
            FaceShape::Rectangle => &RECTANGLE,
        }
    }

    pub fn name(&self) -> &'static str {
        self.profile().name
    }
}

static OVAL: ShapeProfile = ShapeProfile {
    shape: FaceShape::Oval,
    name: "Oval",
    description: "Considered the most balanced shape, an oval face is slightly longer than it is wide. \
                  It has a gently rounded jawline and forehead that's a little broader than the chin.",
    characteristics: &[
        "Slightly longer than wide",
        "Gently rounded jawline",
        "Forehead is a little broader than chin",
        "Balanced, versatile proportions",
    ],
    recommendations: &[
        "Square frames",
        "Rectangular frames",
        "Aviator styles",
        "Cat-eye frames",
        "Geometric shapes",
    ],
    avoid: &["Oversized frames that overwhelm your features"],
};

static ROUND: ShapeProfile = ShapeProfile {
    shape: FaceShape::Round,
    name: "Round",
    description: "Round faces are soft and full, with equal width and length. The cheeks are typically \
                  the widest part, and the jawline has minimal angles, giving a youthful, approachable look.",
    characteristics: &[
        "Equal width and length",
        "Cheeks are typically the widest part",
        "Minimal jaw angles",
        "Soft, curved features",
    ],
    recommendations: &[
        "Rectangular frames",
        "Square frames",
        "Angular cat-eye",
        "Browline frames",
        "Geometric shapes",
    ],
    avoid: &["Round frames", "Small frames", "Rimless styles"],
};

static SQUARE: ShapeProfile = ShapeProfile {
    shape: FaceShape::Square,
    name: "Square",
    description: "Square faces have a strong, defined jawline with a forehead, cheekbones, and jaw that \
                  are about the same width. This shape often gives off a bold, confident impression.",
    characteristics: &[
        "Strong, defined jawline",
        "Forehead, cheekbones, and jaw about the same width",
        "Bold, angular features",
        "Face width and length are similar",
    ],
    recommendations: &[
        "Round frames",
        "Oval frames",
        "Rimless styles",
        "Butterfly frames",
        "Curved cat-eye",
    ],
    avoid: &["Square frames", "Angular geometric shapes", "Boxy styles"],
};

static HEART: ShapeProfile = ShapeProfile {
    shape: FaceShape::Heart,
    name: "Heart",
    description: "A heart-shaped face has a wider forehead and a narrow, pointed chin. The cheekbones \
                  are often prominent, creating a soft yet striking look.",
    characteristics: &[
        "Wider forehead",
        "Narrow, pointed chin",
        "Prominent cheekbones",
        "May have widow's peak",
    ],
    recommendations: &[
        "Bottom-heavy frames",
        "Oval frames",
        "Round frames",
        "Light-colored frames",
        "Rimless bottom styles",
    ],
    avoid: &["Top-heavy frames", "Decorated temples", "Cat-eye styles"],
};

static OBLONG: ShapeProfile = ShapeProfile {
    shape: FaceShape::Oblong,
    name: "Oblong",
    description: "This face is longer than it is wide, with a straight cheek line. The forehead, cheeks, \
                  and jaw are close in width, but the overall face length gives it an elegant, elongated appearance.",
    characteristics: &[
        "Longer than wide",
        "Straight cheek line",
        "Forehead, cheeks, and jaw close in width",
        "Elegant, elongated appearance",
    ],
    recommendations: &[
        "Oversized frames",
        "Decorative temples",
        "Square frames",
        "Round frames",
        "Deep frames",
    ],
    avoid: &["Narrow frames", "Small frames", "Frames that add length"],
};

static DIAMOND: ShapeProfile = ShapeProfile {
    shape: FaceShape::Diamond,
    name: "Diamond",
    description: "Diamond faces are characterized by a narrow forehead and chin, with the cheekbones \
                  being the widest point. This face shape often appears sharp and sculpted.",
    characteristics: &[
        "Narrow forehead and chin",
        "Cheekbones are the widest point",
        "Sharp, sculpted appearance",
        "Angular features",
    ],
    recommendations: &[
        "Oval frames",
        "Cat-eye frames",
        "Rimless styles",
        "Frames with detailing on top",
        "Curved frames",
    ],
    avoid: &["Narrow frames", "Boxy styles", "Frames wider than cheekbones"],
};

static RECTANGLE: ShapeProfile = ShapeProfile {
    shape: FaceShape::Rectangle,
    name: "Rectangle",
    description: "A rectangle face is longer than it is wide with a strong, angular jawline. The forehead, \
                  cheekbones, and jaw are similar in width, creating a structured, elongated appearance.",
    characteristics: &[
        "Longer than wide",
        "Strong, angular jawline",
        "Forehead, cheekbones, and jaw similar in width",
        "Structured, elongated appearance",
    ],
    recommendations: &[
        "Round frames",
        "Oval frames",
        "Wide frames to add width",
        "Decorative temples",
        "Deep frames to shorten face",
    ],
    avoid: &[
        "Narrow frames",
        "Small frames",
        "Square frames that emphasize angles",
    ],
};
