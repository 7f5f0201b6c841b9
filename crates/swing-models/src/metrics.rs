//! Per-frame and aggregated biomechanical metrics.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Angle measurements for one accepted sampled frame.
///
/// Created once per frame that passes the visibility and validity gates
/// and never mutated afterwards. All angles are in degrees within
/// `[0, 180]`; `t` is seconds from the start of the video.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct FrameMetrics {
    /// Timestamp of the sampled frame, in seconds
    pub t: f64,
    /// Trunk lean from vertical, in degrees (0 = upright)
    pub trunk_lean_deg: f64,
    /// Included angle at the hip (shoulder-hip-knee), in degrees
    pub hip_angle_deg: f64,
    /// Included angle at the knee (hip-knee-ankle), in degrees
    pub knee_angle_deg: f64,
    /// Mean landmark visibility for the frame (0.0 to 1.0)
    pub visibility_score: f64,
}

/// Arithmetic mean of each metric over all accepted frames.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct AggregateMetrics {
    /// Mean trunk lean, in degrees
    pub trunk_lean_deg: f64,
    /// Mean hip angle, in degrees
    pub hip_angle_deg: f64,
    /// Mean knee angle, in degrees
    pub knee_angle_deg: f64,
    /// Mean visibility score (0.0 to 1.0)
    pub visibility_score: f64,
}

/// The accepted frame with the maximum trunk lean. Ties are broken by
/// the earliest timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PeakRecord {
    /// Metrics of the peak frame
    pub frame: FrameMetrics,
}

impl PeakRecord {
    /// Create a peak record from the winning frame.
    pub fn new(frame: FrameMetrics) -> Self {
        Self { frame }
    }

    /// Trunk lean of the peak frame, in degrees.
    pub fn trunk_lean_deg(&self) -> f64 {
        self.frame.trunk_lean_deg
    }

    /// Timestamp of the peak frame, in seconds.
    pub fn t(&self) -> f64 {
        self.frame.t
    }
}
