//! Error types for the analysis pipeline.

use thiserror::Error;

/// Result type for pipeline operations.
pub type PipelineResult<T> = Result<T, AnalysisError>;

/// Errors that can occur during an analysis run.
///
/// Per-frame failures ([`AnalysisError::Seek`], [`AnalysisError::Detection`])
/// are recovered locally by the orchestrator: the frame is skipped and
/// sampling continues. The remaining variants abort the run.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("video source unavailable: {0}")]
    SourceUnavailable(String),

    #[error("seek to {timestamp:.3}s failed")]
    Seek { timestamp: f64 },

    #[error("pose detector could not be initialized: {0}")]
    DetectorInit(String),

    #[error("pose detection failed: {0}")]
    Detection(String),

    #[error(
        "no frame passed the quality gates; retake with better lighting, \
         the full body in frame, and a stationary camera"
    )]
    NoValidFrames,

    #[error("cannot aggregate an empty set of frame metrics")]
    EmptyInput,

    #[error("invalid state for this operation: expected {expected}, was {actual}")]
    InvalidState {
        expected: &'static str,
        actual: &'static str,
    },

    #[error("analysis cancelled")]
    Cancelled,
}

impl AnalysisError {
    /// Create a source-unavailable error.
    pub fn source_unavailable(message: impl Into<String>) -> Self {
        Self::SourceUnavailable(message.into())
    }

    /// Create a detector-initialization error.
    pub fn detector_init(message: impl Into<String>) -> Self {
        Self::DetectorInit(message.into())
    }

    /// Create a per-frame detection error.
    pub fn detection(message: impl Into<String>) -> Self {
        Self::Detection(message.into())
    }

    /// True if the error only affects a single sampled frame.
    pub fn is_per_frame(&self) -> bool {
        matches!(self, Self::Seek { .. } | Self::Detection(_))
    }
}
