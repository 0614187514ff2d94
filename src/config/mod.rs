//! JSON configuration for the `process_image` tool.
//!
//! ```json
//! {
//!   "input": "photo.jpg",
//!   "output": "out/photo.png",
//!   "report": "out/timing.json",
//!   "parallelism": { "maxDegreeOfParallelism": 4 },
//!   "orientation": 6,
//!   "steps": [
//!     { "op": "gaussianBlur", "sigma": 1.5 },
//!     { "op": "sepia", "region": { "x": 0, "y": 0, "width": 64, "height": 64 } }
//!   ]
//! }
//! ```
pub mod steps;

pub use self::steps::{Step, StepConfig};

use crate::affine::Orientation;
use crate::geometry::Rectangle;
use crate::processor::ParallelOptions;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    /// Optional JSON timing report.
    #[serde(default)]
    pub report: Option<PathBuf>,
    #[serde(default)]
    pub parallelism: ParallelOptions,
    /// Region used by steps that do not name their own. Whole image if unset.
    #[serde(default)]
    pub region: Option<Rectangle>,
    /// EXIF orientation of the input. When set, the image is auto-oriented
    /// before the first step.
    #[serde(default)]
    pub orientation: Option<Orientation>,
    #[serde(default)]
    pub steps: Vec<StepConfig>,
}

pub fn load_config(path: &Path) -> Result<PipelineConfig, String> {
    let data = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    parse_config(&data).map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
}

pub fn parse_config(json: &str) -> Result<PipelineConfig, String> {
    let config: PipelineConfig = serde_json::from_str(json).map_err(|e| e.to_string())?;
    config.parallelism.validate().map_err(|e| e.to_string())?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convolution::EdgeDetection;

    #[test]
    fn parses_full_document() {
        let json = r#"{
            "input": "in.png",
            "output": "out.png",
            "report": "timing.json",
            "parallelism": { "maxDegreeOfParallelism": 2 },
            "region": { "x": 1, "y": 2, "width": 3, "height": 4 },
            "orientation": 8,
            "steps": [
                { "op": "boxBlur", "radius": 3 },
                { "op": "edgeDetect", "operator": "scharr" },
                { "op": "hue", "degrees": 45.0, "region": { "x": 0, "y": 0, "width": 2, "height": 2 } },
                { "op": "rotateFlip", "rotate": "rotate90", "flip": "horizontal" }
            ]
        }"#;
        let config = parse_config(json).unwrap();
        assert_eq!(config.parallelism.max_degree_of_parallelism, Some(2));
        assert_eq!(config.region, Some(Rectangle::new(1, 2, 3, 4)));
        assert_eq!(config.orientation, Some(Orientation::LeftBottom));
        assert_eq!(config.steps.len(), 4);
        assert_eq!(config.steps[0].step, Step::BoxBlur { radius: 3 });
        assert_eq!(
            config.steps[1].step,
            Step::EdgeDetect {
                operator: EdgeDetection::Scharr,
                grayscale: true
            }
        );
        assert_eq!(config.steps[2].region, Some(Rectangle::new(0, 0, 2, 2)));
    }

    #[test]
    fn minimal_document_uses_defaults() {
        let config = parse_config(r#"{ "input": "a.png", "output": "b.png" }"#).unwrap();
        assert!(config.steps.is_empty());
        assert!(config.report.is_none());
        assert_eq!(config.parallelism, ParallelOptions::default());
    }

    #[test]
    fn zero_parallelism_is_rejected() {
        let json = r#"{ "input": "a", "output": "b", "parallelism": { "maxDegreeOfParallelism": 0 } }"#;
        assert!(parse_config(json).is_err());
    }

    #[test]
    fn unknown_op_is_rejected() {
        let json = r#"{ "input": "a", "output": "b", "steps": [{ "op": "posterize" }] }"#;
        assert!(parse_config(json).is_err());
    }
}
