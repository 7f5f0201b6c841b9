//! Capability traits consumed by the pipeline.
//!
//! The core never touches codecs or model weights. It drives a seekable
//! [`VideoSource`] and feeds decoded frames to a [`PoseDetector`]; both
//! are injected by the caller (a desktop capture layer, an upload
//! worker, a test fake).

use async_trait::async_trait;

use crate::error::PipelineResult;
use swing_models::PoseFrame;

/// Opaque handle to one decoded frame image.
///
/// The pipeline only shuttles this from the source to the detector; the
/// two sides agree on what the token means (a texture id, a buffer key,
/// a canvas reference).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameImage(pub u64);

/// Resolved metadata of a video source.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VideoMeta {
    /// Duration in seconds (finite, > 0)
    pub duration: f64,
    /// Frame width in pixels
    pub width: u32,
    /// Frame height in pixels
    pub height: u32,
}

/// A seekable video with known duration and frame dimensions.
///
/// The playback position is a single shared cursor: the pipeline owns
/// it exclusively for the length of a run, and callers must not seek
/// the same source concurrently.
#[async_trait]
pub trait VideoSource: Send {
    /// Duration in seconds. Must be finite and positive for analysis.
    fn duration(&self) -> f64;

    /// Frame dimensions in pixels, if the source reports them.
    fn dimensions(&self) -> Option<(u32, u32)>;

    /// Seek to the given timestamp. Resolves when the frame at `t` is
    /// decoded and readable, or fails with [`AnalysisError::Seek`].
    ///
    /// [`AnalysisError::Seek`]: crate::error::AnalysisError::Seek
    async fn seek(&mut self, t: f64) -> PipelineResult<()>;

    /// Handle to the frame at the current position. Only meaningful
    /// after a successful [`VideoSource::seek`].
    fn current_frame(&self) -> FrameImage;
}

/// A pose-estimation model consumed as a black box.
///
/// One instance is exclusively owned by one in-flight run and must be
/// released with [`PoseDetector::close`] at the end of every run,
/// whether the run succeeded, failed, or was cancelled.
#[async_trait]
pub trait PoseDetector: Send {
    /// Run inference on one frame. Returns `None` when no body was
    /// found at all; per-landmark confidence lives inside the frame.
    async fn detect(
        &mut self,
        frame: FrameImage,
        timestamp_ms: i64,
    ) -> PipelineResult<Option<PoseFrame>>;

    /// Release the detector's resources.
    async fn close(&mut self);
}
