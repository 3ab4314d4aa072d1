//! Banded heuristic face shape classifier.
//!
//! Every shape has a fixed list of [`Rule`]s. A rule reads one signal and
//! awards the points of the first band that contains it (bands are listed
//! tightest first). A shape's raw score is the sum over its rules, which
//! tops out at 100 for every shape.
//!
//! Raw scores are damped by facial asymmetry, rounded, and ranked. The
//! winner's score becomes the confidence, nudged up when it clearly beats
//! the runner-up and down when the race is close.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::measurements::Measurements;

/// Symmetry assumed when no symmetry factor is available.
pub const DEFAULT_SYMMETRY: f64 = 1.0;

const SYMMETRY_FLOOR: f64 = 0.7;
const SYMMETRY_WEIGHT: f64 = 0.3;

const CLEAR_WIN_GAP: u32 = 20;
const CLOSE_RACE_GAP: u32 = 10;
const GAP_ADJUSTMENT: u32 = 10;
const CLOSE_RACE_FLOOR: u32 = 50;
const MAX_CONFIDENCE: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FaceShape {
    Oval,
    Round,
    Square,
    Heart,
    Oblong,
    Diamond,
    Rectangle,
}

impl FaceShape {
    /// All shapes in tie-break order.
    pub const ALL: [FaceShape; 7] = [
        FaceShape::Oval,
        FaceShape::Round,
        FaceShape::Square,
        FaceShape::Heart,
        FaceShape::Oblong,
        FaceShape::Diamond,
        FaceShape::Rectangle,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            FaceShape::Oval => "oval",
            FaceShape::Round => "round",
            FaceShape::Square => "square",
            FaceShape::Heart => "heart",
            FaceShape::Oblong => "oblong",
            FaceShape::Diamond => "diamond",
            FaceShape::Rectangle => "rectangle",
        }
    }

    pub fn rules(&self) -> &'static [Rule] {
        match self {
            FaceShape::Oval => OVAL,
            FaceShape::Round => ROUND,
            FaceShape::Square => SQUARE,
            FaceShape::Heart => HEART,
            FaceShape::Oblong => OBLONG,
            FaceShape::Diamond => DIAMOND,
            FaceShape::Rectangle => RECTANGLE,
        }
    }

    /// Unscaled sum of the shape's band awards.
    pub fn raw_score(&self, signals: &Signals) -> u32 {
        self.rules().iter().map(|rule| rule.award(signals)).sum()
    }
}

impl fmt::Display for FaceShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownShape(pub String);

impl fmt::Display for UnknownShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown face shape `{}`", self.0)
    }
}

impl std::error::Error for UnknownShape {}

impl FromStr for FaceShape {
    type Err = UnknownShape;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FaceShape::ALL
            .into_iter()
            .find(|shape| shape.id().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownShape(s.to_string()))
    }
}

/// A measurement or derived ratio inspected by the rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    LengthToWidth,
    JawAngle,
    WidthVariance,
    ForeheadToJaw,
    ForeheadToCheek,
    JawToCheek,
    CheekboneProminence,
    ChinToJaw,
}

/// Signal values for one measurement set, derived once and shared by every
/// shape's rules.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Signals {
    pub length_to_width: f64,
    pub jaw_angle: f64,
    /// `|forehead - jaw| / cheekbone`
    pub width_variance: f64,
    pub forehead_to_jaw: f64,
    pub forehead_to_cheek: f64,
    pub jaw_to_cheek: f64,
    pub cheekbone_prominence: f64,
    pub chin_to_jaw: f64,
}

impl Signals {
    pub fn from_measurements(m: &Measurements) -> Self {
        Self {
            length_to_width: m.length_to_width_ratio,
            jaw_angle: m.jaw_angle,
            width_variance: (m.forehead_width - m.jaw_width).abs() / m.cheekbone_width,
            forehead_to_jaw: m.forehead_to_jaw_ratio,
            forehead_to_cheek: m.forehead_width / m.cheekbone_width,
            jaw_to_cheek: m.jaw_width / m.cheekbone_width,
            cheekbone_prominence: m.cheekbone_prominence,
            chin_to_jaw: m.chin_to_jaw_ratio,
        }
    }

    pub fn get(&self, signal: Signal) -> f64 {
        match signal {
            Signal::LengthToWidth => self.length_to_width,
            Signal::JawAngle => self.jaw_angle,
            Signal::WidthVariance => self.width_variance,
            Signal::ForeheadToJaw => self.forehead_to_jaw,
            Signal::ForeheadToCheek => self.forehead_to_cheek,
            Signal::JawToCheek => self.jaw_to_cheek,
            Signal::CheekboneProminence => self.cheekbone_prominence,
            Signal::ChinToJaw => self.chin_to_jaw,
        }
    }
}

/// A numeric range. `Within` is closed; `Above` and `Below` are strict.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Band {
    Within(f64, f64),
    Above(f64),
    Below(f64),
}

impl Band {
    pub fn contains(&self, v: f64) -> bool {
        match *self {
            Band::Within(lo, hi) => v >= lo && v <= hi,
            Band::Above(t) => v > t,
            Band::Below(t) => v < t,
        }
    }
}

/// One scored signal of a shape template.
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    pub signal: Signal,
    /// Checked in order; the first band containing the value wins.
    pub bands: &'static [(Band, u32)],
}

impl Rule {
    pub fn award(&self, signals: &Signals) -> u32 {
        let v = signals.get(self.signal);
        self.bands
            .iter()
            .find(|(band, _)| band.contains(v))
            .map_or(0, |&(_, points)| points)
    }
}

use Band::{Above, Below, Within};
use Signal::*;

const OVAL: &[Rule] = &[
    Rule {
        signal: LengthToWidth,
        bands: &[(Within(1.15, 1.22), 30), (Within(1.10, 1.27), 20)],
    },
    Rule {
        signal: JawAngle,
        bands: &[(Within(133.0, 145.0), 25), (Within(130.0, 150.0), 15)],
    },
    Rule {
        signal: WidthVariance,
        bands: &[(Below(0.10), 25), (Below(0.15), 15)],
    },
    Rule {
        signal: ForeheadToJaw,
        bands: &[(Within(1.0, 1.15), 20), (Within(0.95, 1.20), 10)],
    },
];

const ROUND: &[Rule] = &[
    Rule {
        signal: LengthToWidth,
        bands: &[(Within(0.95, 1.12), 35), (Within(0.90, 1.15), 20)],
    },
    Rule {
        signal: JawAngle,
        bands: &[(Above(145.0), 30), (Above(140.0), 20), (Above(135.0), 10)],
    },
    Rule {
        signal: WidthVariance,
        bands: &[(Below(0.08), 20), (Below(0.12), 10)],
    },
    Rule {
        signal: CheekboneProminence,
        bands: &[(Within(1.0, 1.10), 15)],
    },
];

const SQUARE: &[Rule] = &[
    Rule {
        signal: LengthToWidth,
        bands: &[(Within(1.0, 1.15), 25), (Within(0.95, 1.20), 15)],
    },
    Rule {
        signal: JawAngle,
        bands: &[(Below(125.0), 35), (Below(130.0), 25), (Below(133.0), 15)],
    },
    Rule {
        signal: WidthVariance,
        bands: &[(Below(0.10), 25), (Below(0.15), 15)],
    },
    Rule {
        signal: JawToCheek,
        bands: &[(Above(0.85), 15), (Above(0.78), 10)],
    },
];

const HEART: &[Rule] = &[
    Rule {
        signal: ForeheadToJaw,
        bands: &[(Above(1.25), 40), (Above(1.18), 30), (Above(1.12), 20)],
    },
    Rule {
        signal: JawToCheek,
        bands: &[(Below(0.75), 30), (Below(0.82), 20)],
    },
    Rule {
        signal: ChinToJaw,
        bands: &[(Below(0.75), 20), (Below(0.85), 10)],
    },
    Rule {
        signal: LengthToWidth,
        bands: &[(Below(1.25), 10)],
    },
];

const OBLONG: &[Rule] = &[
    Rule {
        signal: LengthToWidth,
        bands: &[(Above(1.30), 40), (Above(1.25), 30), (Above(1.20), 20)],
    },
    Rule {
        signal: JawAngle,
        bands: &[(Above(135.0), 25), (Above(130.0), 15)],
    },
    Rule {
        signal: WidthVariance,
        bands: &[(Below(0.12), 20), (Below(0.18), 10)],
    },
    Rule {
        signal: ForeheadToCheek,
        bands: &[(Within(0.90, 1.10), 15)],
    },
];

const DIAMOND: &[Rule] = &[
    Rule {
        signal: ForeheadToCheek,
        bands: &[(Below(0.90), 35), (Below(0.95), 25), (Below(1.0), 15)],
    },
    Rule {
        signal: JawToCheek,
        bands: &[(Below(0.70), 35), (Below(0.78), 25), (Below(0.85), 15)],
    },
    Rule {
        signal: CheekboneProminence,
        bands: &[(Above(1.10), 20), (Above(1.05), 10)],
    },
    Rule {
        signal: JawAngle,
        bands: &[(Below(140.0), 10)],
    },
];

const RECTANGLE: &[Rule] = &[
    Rule {
        signal: LengthToWidth,
        bands: &[(Above(1.30), 35), (Above(1.25), 25), (Above(1.20), 15)],
    },
    Rule {
        signal: JawAngle,
        bands: &[(Below(125.0), 35), (Below(130.0), 25), (Below(133.0), 15)],
    },
    Rule {
        signal: WidthVariance,
        bands: &[(Below(0.12), 20), (Below(0.18), 10)],
    },
    Rule {
        signal: JawToCheek,
        bands: &[(Above(0.82), 10)],
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShapeScore {
    #[serde(rename = "shapeId")]
    pub shape: FaceShape,
    pub score: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Classification {
    #[serde(rename = "shapeId")]
    pub shape: FaceShape,
    /// 0..=100
    pub confidence: u32,
    /// All seven shapes, best first
    pub all_scores: Vec<ShapeScore>,
}

/// Score all shapes and pick the winner.
///
/// `symmetry` is the eye-symmetry factor in [0, 1]; pass
/// [`DEFAULT_SYMMETRY`] when none is available.
pub fn classify(measurements: &Measurements, symmetry: f64) -> Classification {
    let signals = Signals::from_measurements(measurements);
    let scale = symmetry_scale(symmetry);

    let mut all_scores: Vec<ShapeScore> = FaceShape::ALL
        .iter()
        .map(|&shape| {
            let raw = shape.raw_score(&signals);
            debug!(shape = shape.id(), raw, "shape score");
            ShapeScore {
                shape,
                score: (raw as f64 * scale).round() as u32,
            }
        })
        .collect();

    // Stable: equal scores keep enumeration order.
    all_scores.sort_by(|a, b| b.score.cmp(&a.score));

    let winner = all_scores[0];
    let runner_up = all_scores[1];

    Classification {
        shape: winner.shape,
        confidence: gap_adjusted_confidence(winner.score, runner_up.score),
        all_scores,
    }
}

/// `0.7 + 0.3 * symmetry`, with symmetry clamped to [0, 1].
pub fn symmetry_scale(symmetry: f64) -> f64 {
    let symmetry = if symmetry.is_nan() {
        DEFAULT_SYMMETRY
    } else {
        symmetry.clamp(0.0, 1.0)
    };
    SYMMETRY_FLOOR + SYMMETRY_WEIGHT * symmetry
}

/// Winner's score, +10 (max 100) on a gap above 20, -10 (min 50) on a gap
/// below 10.
pub fn gap_adjusted_confidence(winner: u32, runner_up: u32) -> u32 {
    let gap = winner.saturating_sub(runner_up);
    if gap > CLEAR_WIN_GAP {
        (winner + GAP_ADJUSTMENT).min(MAX_CONFIDENCE)
    } else if gap < CLOSE_RACE_GAP {
        winner.saturating_sub(GAP_ADJUSTMENT).max(CLOSE_RACE_FLOOR)
    } else {
        winner
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn measurements(
        length_to_width: f64,
        jaw_angle: f64,
        forehead: f64,
        cheekbone: f64,
        jaw: f64,
        chin_to_jaw: f64,
    ) -> Measurements {
        Measurements {
            face_length: length_to_width * cheekbone,
            face_width: cheekbone,
            forehead_width: forehead,
            cheekbone_width: cheekbone,
            jaw_width: jaw,
            chin_width: chin_to_jaw * jaw,
            ipd: 100.0,
            length_to_width_ratio: length_to_width,
            forehead_to_jaw_ratio: forehead / jaw,
            cheekbone_prominence: cheekbone / ((forehead + jaw) / 2.0),
            chin_to_jaw_ratio: chin_to_jaw,
            jaw_angle,
        }
    }

    fn score_of(c: &Classification, shape: FaceShape) -> u32 {
        c.all_scores
            .iter()
            .find(|s| s.shape == shape)
            .map(|s| s.score)
            .unwrap()
    }

    #[test]
    fn every_template_tops_out_at_100() {
        for shape in FaceShape::ALL {
            let max: u32 = shape
                .rules()
                .iter()
                .map(|r| r.bands.iter().map(|&(_, p)| p).max().unwrap_or(0))
                .sum();
            assert_eq!(max, 100, "{shape}");
        }
    }

    #[test]
    fn bands_are_checked_tightest_first() {
        let rule = &OVAL[0];
        let at = |v: f64| {
            let mut s = Signals::from_measurements(&measurements(1.0, 138.0, 2.0, 2.0, 2.0, 0.8));
            s.length_to_width = v;
            rule.award(&s)
        };
        assert_eq!(at(1.15), 30);
        assert_eq!(at(1.22), 30);
        assert_eq!(at(1.10), 20);
        assert_eq!(at(1.25), 20);
        assert_eq!(at(1.28), 0);
    }

    #[test]
    fn strict_thresholds_exclude_the_edge() {
        assert!(!Band::Above(145.0).contains(145.0));
        assert!(Band::Above(145.0).contains(145.01));
        assert!(!Band::Below(0.08).contains(0.08));
        assert!(Band::Within(1.0, 1.1).contains(1.0));
        assert!(Band::Within(1.0, 1.1).contains(1.1));
    }

    #[test]
    fn oval_face() {
        // L/W 1.18, jaw 138, width variance 0.05, forehead/jaw 1.05
        let m = measurements(1.18, 138.0, 2.1, 2.0, 2.0, 0.8);
        let c = classify(&m, 1.0);
        assert_eq!(c.shape, FaceShape::Oval);
        assert_eq!(score_of(&c, FaceShape::Oval), 100);
        assert_eq!(score_of(&c, FaceShape::Oblong), 60);
        assert_eq!(score_of(&c, FaceShape::Square), 55);
        assert_eq!(c.confidence, 100);
    }

    #[test]
    fn square_face() {
        // jaw 120, L/W 1.05, width variance 0.08
        let m = measurements(1.05, 120.0, 1.96, 2.0, 1.80, 0.8);
        let c = classify(&m, 1.0);
        assert_eq!(c.shape, FaceShape::Square);
        assert_eq!(score_of(&c, FaceShape::Square), 100);
        assert!(score_of(&c, FaceShape::Round) < 100);
        assert!(score_of(&c, FaceShape::Oval) < 100);
    }

    #[test]
    fn heart_face() {
        // forehead/jaw 1.30, jaw/cheek 0.70, chin/jaw 0.70
        let m = measurements(1.2, 130.0, 1.82, 2.0, 1.4, 0.70);
        let c = classify(&m, 1.0);
        assert_eq!(c.shape, FaceShape::Heart);
        assert_eq!(score_of(&c, FaceShape::Heart), 100);
        assert_eq!(score_of(&c, FaceShape::Diamond), 80);
        // gap of exactly 20 leaves the score alone
        assert_eq!(c.confidence, 100);
    }

    #[test]
    fn asymmetry_damps_scores() {
        let m = measurements(1.18, 138.0, 2.1, 2.0, 2.0, 0.8);
        let c = classify(&m, 0.5);
        // 100 * 0.85, 60 * 0.85
        assert_eq!(score_of(&c, FaceShape::Oval), 85);
        assert_eq!(score_of(&c, FaceShape::Oblong), 51);
        assert_eq!(c.confidence, 95);
    }

    #[test]
    fn ties_keep_enumeration_order() {
        // Diamond and rectangle both score 35; oval and square both 0.
        let m = measurements(5.0, 200.0, 10.0, 2.0, 0.5, 5.0);
        let c = classify(&m, 1.0);
        let ranked: Vec<_> = c.all_scores.iter().map(|s| s.shape).collect();
        assert_eq!(
            ranked,
            vec![
                FaceShape::Heart,
                FaceShape::Oblong,
                FaceShape::Diamond,
                FaceShape::Rectangle,
                FaceShape::Round,
                FaceShape::Oval,
                FaceShape::Square,
            ]
        );
    }

    #[test]
    fn clear_win_adds_ten() {
        assert_eq!(gap_adjusted_confidence(80, 55), 90);
        assert_eq!(gap_adjusted_confidence(95, 40), 100);
    }

    #[test]
    fn close_race_subtracts_ten() {
        assert_eq!(gap_adjusted_confidence(60, 55), 50);
        assert_eq!(gap_adjusted_confidence(75, 70), 65);
        assert_eq!(gap_adjusted_confidence(20, 20), 50);
    }

    #[test]
    fn moderate_gap_is_unchanged() {
        assert_eq!(gap_adjusted_confidence(70, 60), 70);
        assert_eq!(gap_adjusted_confidence(70, 50), 70);
    }

    #[test]
    fn shape_ids_round_trip_through_strings() {
        for shape in FaceShape::ALL {
            assert_eq!(shape.id().parse::<FaceShape>(), Ok(shape));
        }
        assert_eq!("Heart".parse::<FaceShape>(), Ok(FaceShape::Heart));
        assert!("triangle".parse::<FaceShape>().is_err());
        assert_eq!(serde_json::to_string(&FaceShape::Oblong).unwrap(), "\"oblong\"");
    }

    #[test]
    fn serializes_like_the_ui_contract() {
        let m = measurements(1.18, 138.0, 2.1, 2.0, 2.0, 0.8);
        let json = serde_json::to_value(classify(&m, 1.0)).unwrap();
        assert_eq!(json["shapeId"], "oval");
        assert_eq!(json["allScores"][0]["shapeId"], "oval");
        assert_eq!(json["allScores"].as_array().unwrap().len(), 7);
    }
}
