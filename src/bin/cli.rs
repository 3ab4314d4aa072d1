//! CLI for face shape analysis of detector output.
//!
//! Usage:
//!   face-shape <landmarks.json>                  # Human-readable output
//!   face-shape <landmarks.json> --json           # JSON output
//!   face-shape <landmarks.json> -o result.json   # Save to file
//!
//! The input is the landmark detector's output: `{"width", "height",
//! "faces": [[{x, y, z}, ...]]}` for a photo, or `{"width", "height",
//! "frames": [{"faces": ...}, ...]}` for a live capture, which is smoothed
//! across frames.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use face_shape::logging::init_tracing;
use face_shape::{
    AnalysisResult, AnalyzerConfig, Detection, FaceAnalyzer, FacePolicy, FacialFeatures, Grade,
    Landmarks, ShapeProfile,
};
use serde::de::IgnoredAny;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

#[derive(Parser, Debug)]
#[command(name = "face-shape")]
#[command(author, version, about = "Face shape analysis and eyewear advice", long_about = None)]
struct Args {
    /// Detector output (JSON)
    #[arg(required = true)]
    input: PathBuf,

    /// Output as JSON
    #[arg(short, long)]
    json: bool,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Analyzer configuration (JSON)
    #[arg(long)]
    config: Option<PathBuf>,

    /// What to do when several faces are detected
    #[arg(long, value_enum)]
    policy: Option<PolicyArg>,

    /// Reject results whose overall confidence is below this (0-1)
    #[arg(long)]
    min_confidence: Option<f64>,

    /// Number of secondary matches to show
    #[arg(long, default_value = "2")]
    secondary: usize,

    /// Show verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum PolicyArg {
    First,
    Largest,
    Reject,
}

impl From<PolicyArg> for FacePolicy {
    fn from(p: PolicyArg) -> Self {
        match p {
            PolicyArg::First => FacePolicy::First,
            PolicyArg::Largest => FacePolicy::Largest,
            PolicyArg::Reject => FacePolicy::Reject,
        }
    }
}

#[derive(Deserialize)]
struct Frame {
    #[serde(default)]
    faces: Vec<Landmarks>,
}

#[derive(Deserialize)]
struct Capture {
    width: f64,
    height: f64,
    frames: Vec<Frame>,
}

enum Input {
    Capture(Capture),
    Photo(Detection),
}

impl Input {
    /// A top-level `frames` key marks a capture. The chosen type is parsed
    /// on its own so errors keep their line and column.
    fn parse(text: &str) -> serde_json::Result<Self> {
        #[derive(Deserialize)]
        struct TopLevel {
            frames: Option<IgnoredAny>,
        }

        let top: TopLevel = serde_json::from_str(text)?;
        if top.frames.is_some() {
            Ok(Input::Capture(serde_json::from_str(text)?))
        } else {
            Ok(Input::Photo(serde_json::from_str(text)?))
        }
    }
}

/// One analysis with the advice attached.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Report<'a> {
    #[serde(flatten)]
    result: &'a AnalysisResult,
    profile: &'static ShapeProfile,
    features: FacialFeatures,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FrameReport<'a> {
    frame: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    analysis: Option<Report<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

fn main() {
    let args = Args::parse();

    init_tracing(if args.verbose { "debug" } else { "info" });

    if let Err(e) = run(&args) {
        eprintln!("Error ({}): {}", e.kind(), e);
        std::process::exit(1);
    }
}

fn run(args: &Args) -> face_shape::Result<()> {
    let mut config = match &args.config {
        Some(path) => {
            debug!(?path, "loading configuration");
            AnalyzerConfig::from_json_file(path)?
        }
        None => AnalyzerConfig::default(),
    };
    if let Some(policy) = args.policy {
        config.face_policy = policy.into();
    }
    if let Some(min) = args.min_confidence {
        config.min_overall_confidence = Some(min);
    }
    let analyzer = FaceAnalyzer::new(config);

    debug!(path = ?args.input, "reading detector output");
    let text = std::fs::read_to_string(&args.input)?;
    let input = Input::parse(&text)?;

    let output_str = match input {
        Input::Photo(detection) => {
            info!(faces = detection.faces.len(), "analyzing photo");
            let result = analyzer.analyze(&detection)?;
            let report = report(&result);
            if args.json {
                serde_json::to_string_pretty(&report)?
            } else {
                format_human_readable(&report, args.secondary)
            }
        }
        Input::Capture(Capture {
            width,
            height,
            frames,
        }) => {
            info!(frames = frames.len(), "analyzing capture");
            let mut session = analyzer.session();
            let results: Vec<_> = frames
                .into_iter()
                .map(|f| {
                    session.analyze_frame(&Detection {
                        width,
                        height,
                        faces: f.faces,
                    })
                })
                .collect();
            format_capture(&results, args)?
        }
    };

    if let Some(ref path) = args.output {
        std::fs::write(path, &output_str)?;
        info!(?path, "output written");
    } else {
        println!("{}", output_str);
    }

    Ok(())
}

fn report(result: &AnalysisResult) -> Report<'_> {
    Report {
        result,
        profile: result.profile(),
        features: result.features(),
    }
}

fn format_capture(
    results: &[face_shape::Result<AnalysisResult>],
    args: &Args,
) -> face_shape::Result<String> {
    if args.json {
        let frames: Vec<FrameReport> = results
            .iter()
            .enumerate()
            .map(|(i, r)| match r {
                Ok(result) => FrameReport {
                    frame: i,
                    analysis: Some(report(result)),
                    error: None,
                },
                Err(e) => FrameReport {
                    frame: i,
                    analysis: None,
                    error: Some(e.kind().to_string()),
                },
            })
            .collect();
        return Ok(serde_json::to_string_pretty(&frames)?);
    }

    let mut s = String::new();
    for (i, r) in results.iter().enumerate() {
        match r {
            Ok(result) => s.push_str(&format!(
                "Frame {:>3}: {:<9} {:>3}%  (overall {:.2})\n",
                i,
                result.profile().name,
                result.confidence,
                result.confidence_factors.overall_confidence
            )),
            Err(e) => {
                warn!(frame = i, kind = %e.kind(), "frame skipped");
                s.push_str(&format!("Frame {:>3}: {}\n", i, e.kind()));
            }
        }
    }
    if let Some(Ok(last)) = results.iter().rev().find(|r| r.is_ok()) {
        s.push_str("\nFinal (smoothed) result:\n\n");
        s.push_str(&format_human_readable(&report(last), args.secondary));
    }
    Ok(s)
}

fn format_human_readable(report: &Report<'_>, secondary: usize) -> String {
    let result = report.result;
    let profile = report.profile;
    let m = &result.measurements;
    let px = m.pixel_widths();
    let f = &result.confidence_factors;
    let mut s = String::new();

    s.push_str(&format!("Face shape: {} ({}% confidence)\n", profile.name, result.confidence));
    s.push_str(&format!("{}\n", profile.description));

    let others = result.secondary_matches(secondary);
    if !others.is_empty() {
        s.push_str("\nAlso resembles:\n");
        for other in others {
            s.push_str(&format!("  {:<10} {:>3}\n", other.shape.name(), other.score));
        }
    }

    s.push_str("\nMeasurements (pixels):\n");
    s.push_str(&format!("  Face length:      {:.0}\n", px.face_length));
    s.push_str(&format!("  Forehead width:   {:.0}\n", px.forehead_width));
    s.push_str(&format!("  Cheekbone width:  {:.0}\n", px.cheekbone_width));
    s.push_str(&format!("  Jaw width:        {:.0}\n", px.jaw_width));
    s.push_str(&format!("  IPD:              {:.0}\n", m.ipd));

    s.push_str("\nRatios:\n");
    s.push_str(&format!("  Length:Width      {:.2}\n", m.length_to_width_ratio));
    s.push_str(&format!("  Forehead:Jaw      {:.2}\n", m.forehead_to_jaw_ratio));
    s.push_str(&format!("  Cheekbones        {:.2}\n", m.cheekbone_prominence));
    s.push_str(&format!("  Chin:Jaw          {:.2}\n", m.chin_to_jaw_ratio));
    s.push_str(&format!("  Jaw angle         {:.1}°\n", m.jaw_angle));

    let feat = &report.features;
    s.push_str("\nFeatures:\n");
    s.push_str(&format!("  Forehead:   {:?} - {}\n", feat.forehead.value, feat.forehead.detail));
    s.push_str(&format!("  Cheekbones: {:?} - {}\n", feat.cheekbones.value, feat.cheekbones.detail));
    s.push_str(&format!("  Jawline:    {:?} - {}\n", feat.jawline.value, feat.jawline.detail));
    s.push_str(&format!("  Jaw angle:  {:?} - {}\n", feat.jaw_angle.value, feat.jaw_angle.detail));
    s.push_str(&format!("  Length:     {:?} - {}\n", feat.face_length.value, feat.face_length.detail));

    s.push_str(&format!(
        "\nDetection confidence: {} ({:.0}%)\n",
        Grade::of(f.overall_confidence).label(),
        f.overall_confidence * 100.0
    ));
    s.push_str(&format!("  Measurement quality: {:.2}\n", f.measurement_quality));
    s.push_str(&format!("  Symmetry:            {:.2}\n", f.symmetry));
    s.push_str(&format!("  Landmark stability:  {:.2}\n", f.landmark_stability));

    s.push_str("\nRecommended frames:\n");
    for style in profile.recommendations {
        s.push_str(&format!("  + {}\n", style));
    }
    s.push_str("Avoid:\n");
    for style in profile.avoid {
        s.push_str(&format!("  - {}\n", style));
    }

    s
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frames_key_selects_capture() {
        let text = r#"{"width": 640, "height": 480, "frames": [{"faces": []}, {}]}"#;
        match Input::parse(text) {
            Ok(Input::Capture(c)) => assert_eq!(c.frames.len(), 2),
            _ => panic!("expected a capture"),
        }

        match Input::parse(r#"{"width": 640, "height": 480}"#) {
            Ok(Input::Photo(d)) => assert!(d.faces.is_empty()),
            _ => panic!("expected a photo"),
        }
    }

    #[test]
    fn malformed_input_reports_position() {
        let photo = "{\n  \"width\": 640,\n  \"height\": \"tall\"\n}";
        let msg = Input::parse(photo).err().map(|e| e.to_string()).unwrap_or_default();
        assert!(msg.contains("line 3"), "{msg}");
        assert!(msg.contains("invalid type"), "{msg}");

        let capture = "{\"width\": 640, \"height\": 480,\n \"frames\": [{\"faces\": 7}]}";
        let msg = Input::parse(capture).err().map(|e| e.to_string()).unwrap_or_default();
        assert!(msg.contains("line 2"), "{msg}");
    }
}
