//! Reduction of per-frame metrics into run-level summaries.

use crate::error::{AnalysisError, PipelineResult};
use swing_models::{AggregateMetrics, FrameMetrics, PeakRecord};

/// Per-field arithmetic mean over all accepted frames.
///
/// Fails with [`AnalysisError::EmptyInput`] on an empty slice; the
/// orchestrator's no-valid-frames check gates this call.
pub fn aggregate(frames: &[FrameMetrics]) -> PipelineResult<AggregateMetrics> {
    if frames.is_empty() {
        return Err(AnalysisError::EmptyInput);
    }

    let n = frames.len() as f64;
    Ok(AggregateMetrics {
        trunk_lean_deg: frames.iter().map(|f| f.trunk_lean_deg).sum::<f64>() / n,
        hip_angle_deg: frames.iter().map(|f| f.hip_angle_deg).sum::<f64>() / n,
        knee_angle_deg: frames.iter().map(|f| f.knee_angle_deg).sum::<f64>() / n,
        visibility_score: frames.iter().map(|f| f.visibility_score).sum::<f64>() / n,
    })
}

/// The frame with maximum trunk lean.
///
/// Strictly-greater comparison, so among equal peaks the earliest
/// timestamp wins. The input is in sample order, which matches
/// timestamp order.
pub fn find_peak(frames: &[FrameMetrics]) -> PipelineResult<PeakRecord> {
    let mut iter = frames.iter();
    let first = iter.next().ok_or(AnalysisError::EmptyInput)?;

    let mut best = first;
    for frame in iter {
        if frame.trunk_lean_deg > best.trunk_lean_deg {
            best = frame;
        }
    }
    Ok(PeakRecord::new(*best))
}
