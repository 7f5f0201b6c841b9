//! Per-frame metric construction with quality gating.

use tracing::debug;

use crate::geometry::{angle_abc, trunk_lean_deg};
use crate::landmarks::select_landmarks;
use swing_models::{FrameMetrics, PoseFrame};

/// Turns one pose-detection result into a [`FrameMetrics`] record.
///
/// Two quality gates apply: a frame whose visibility score is below the
/// gate, or whose landmarks produce a degenerate angle, is silently
/// dropped rather than counted as an error.
#[derive(Debug, Clone, Copy)]
pub struct FrameMetricsBuilder {
    visibility_gate: f64,
}

impl FrameMetricsBuilder {
    /// Create a builder with the given visibility gate.
    pub fn new(visibility_gate: f64) -> Self {
        Self { visibility_gate }
    }

    /// Build metrics for the frame at timestamp `t`.
    ///
    /// Returns `None` when the detector found no body, when required
    /// joints are missing, when the visibility score falls below the
    /// gate (the gate value itself is accepted), or when any angle is
    /// degenerate.
    pub fn build(&self, pose: Option<&PoseFrame>, t: f64) -> Option<FrameMetrics> {
        let pose = pose?;
        let selected = select_landmarks(pose)?;

        if selected.visibility_score < self.visibility_gate {
            debug!(
                t,
                score = selected.visibility_score,
                "frame below visibility gate"
            );
            return None;
        }

        let trunk_lean_deg = trunk_lean_deg(selected.shoulder_mid, selected.hip_mid)?;
        let hip_angle_deg = angle_abc(selected.shoulder, selected.hip, selected.knee)?;
        let knee_angle_deg = angle_abc(selected.hip, selected.knee, selected.ankle)?;

        Some(FrameMetrics {
            t,
            trunk_lean_deg,
            hip_angle_deg,
            knee_angle_deg,
            visibility_score: selected.visibility_score,
        })
    }
}
