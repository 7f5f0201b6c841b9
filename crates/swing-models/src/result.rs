//! The terminal analysis result.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::category::SwingCategory;
use crate::metrics::{AggregateMetrics, PeakRecord};

/// The structured output of one completed analysis run.
///
/// Created once per completed run and read-only thereafter. Field names
/// and units (degrees for angles, seconds for time, 0..1 visibility)
/// are the stable contract with renderers and history stores.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct AnalysisResult {
    /// Swing-type category the feedback was generated for
    pub category: SwingCategory,

    /// Number of timestamps the sampler visited
    pub total_sampled_frames: usize,

    /// Number of frames that passed the visibility and validity gates
    pub used_frame_count: usize,

    /// Per-field mean over all accepted frames
    pub avg: AggregateMetrics,

    /// The accepted frame with maximum trunk lean
    pub peak: PeakRecord,

    /// Human-readable coaching feedback, newline-separated
    pub message: String,

    /// Suggested follow-up drill for the category
    pub next_drill: String,

    /// When the run completed
    pub created_at: DateTime<Utc>,
}
