//! Configuration for the analysis pipeline.

use serde::{Deserialize, Serialize};

/// Tunable parameters of the analysis pipeline.
///
/// The defaults reproduce the reference behavior; none of them is a
/// derived precision constant, so overriding them is safe.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Frames per second to sample for analysis (default: 6.0)
    pub sample_fps: f64,

    /// Minimum visibility score for a frame to be accepted
    /// (default: 0.45, the boundary value itself is accepted)
    pub visibility_gate: f64,

    /// Trunk-lean commentary thresholds in degrees:
    /// below the first is "too upright", above the second is
    /// "excessive" (default: 12 / 25, strict comparisons)
    pub trunk_thresholds: (f64, f64),

    /// Hip/knee commentary thresholds in degrees: below the first is
    /// "fold too shallow", above the second is "over-extended"
    /// (default: 150 / 175, strict comparisons)
    pub joint_thresholds: (f64, f64),

    /// Frame dimensions assumed when the source reports none
    /// (default: 720x1280)
    pub fallback_dimensions: (u32, u32),
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            sample_fps: 6.0,
            visibility_gate: 0.45,
            trunk_thresholds: (12.0, 25.0),
            joint_thresholds: (150.0, 175.0),
            fallback_dimensions: (720, 1280),
        }
    }
}

impl AnalysisConfig {
    /// Create config from environment variables, falling back to the
    /// defaults for anything unset or unparsable.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            sample_fps: env_f64("SWING_SAMPLE_FPS").unwrap_or(defaults.sample_fps),
            visibility_gate: env_f64("SWING_VISIBILITY_GATE").unwrap_or(defaults.visibility_gate),
            trunk_thresholds: (
                env_f64("SWING_TRUNK_UPRIGHT_DEG").unwrap_or(defaults.trunk_thresholds.0),
                env_f64("SWING_TRUNK_LEAN_DEG").unwrap_or(defaults.trunk_thresholds.1),
            ),
            joint_thresholds: (
                env_f64("SWING_JOINT_FOLD_DEG").unwrap_or(defaults.joint_thresholds.0),
                env_f64("SWING_JOINT_EXTEND_DEG").unwrap_or(defaults.joint_thresholds.1),
            ),
            fallback_dimensions: defaults.fallback_dimensions,
        }
    }
}

fn env_f64(name: &str) -> Option<f64> {
    std::env::var(name).ok().and_then(|s| s.parse().ok())
}
