//! Serializable run reports for tools.
//!
//! The library itself never records timings; the `process_image` tool wraps
//! each configured step and writes a [`RunReport`] next to its output.

pub mod timing;

pub use timing::{StageTiming, TimingBreakdown};

use crate::affine::Orientation;
use serde::{Deserialize, Serialize};

/// Summary written by the `process_image` tool.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunReport {
    pub input_size: [usize; 2],
    pub output_size: [usize; 2],
    /// Orientation the input was corrected from, if one was configured.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub orientation: Option<Orientation>,
    pub timing: TimingBreakdown,
}
