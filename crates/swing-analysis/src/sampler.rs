//! Uniform frame sampling over a seekable video source.

use tracing::debug;

use crate::error::{AnalysisError, PipelineResult};
use crate::source::{FrameImage, VideoSource};

/// One sampled frame: its index, timestamp, and decoded image handle.
#[derive(Debug, Clone, Copy)]
pub struct Sample {
    /// Zero-based sample index
    pub index: usize,
    /// Timestamp in seconds
    pub t: f64,
    /// Handle to the decoded frame at `t`
    pub image: FrameImage,
}

/// Drives a video source through a fixed number of evenly spaced
/// timestamps.
///
/// The sequence is lazy, finite, and non-restartable. Sampling is
/// strictly sequential: [`FrameSampler::advance`] blocks on the seek of
/// sample `i` before sample `i + 1` can be requested, because a video
/// source has only one playback position.
#[derive(Debug)]
pub struct FrameSampler {
    total_frames: usize,
    step: f64,
    next_index: usize,
}

impl FrameSampler {
    /// Plan a sampling pass over `duration` seconds at `sample_fps`.
    ///
    /// `total = max(1, floor(duration * sample_fps))`, so even a clip
    /// shorter than one sample interval yields one sample (at t = 0).
    pub fn new(duration: f64, sample_fps: f64) -> Self {
        let total_frames = ((duration * sample_fps).floor() as usize).max(1);
        Self {
            total_frames,
            step: duration / total_frames as f64,
            next_index: 0,
        }
    }

    /// Number of timestamps this pass will visit.
    pub fn total_frames(&self) -> usize {
        self.total_frames
    }

    /// Interval between consecutive samples, in seconds.
    pub fn step(&self) -> f64 {
        self.step
    }

    /// Seek the source to the next timestamp and return the decoded
    /// frame.
    ///
    /// Returns `None` once the sequence is exhausted. A failed seek
    /// yields `Some(Err(..))` and still consumes the timestamp, so the
    /// caller can skip the frame and keep sampling.
    pub async fn advance<S: VideoSource + ?Sized>(
        &mut self,
        source: &mut S,
    ) -> Option<PipelineResult<Sample>> {
        if self.next_index >= self.total_frames {
            return None;
        }

        let index = self.next_index;
        self.next_index += 1;
        let t = index as f64 * self.step;

        if let Err(err) = source.seek(t).await {
            debug!(index, t, "seek failed, skipping sample: {err}");
            return Some(Err(AnalysisError::Seek { timestamp: t }));
        }

        Some(Ok(Sample {
            index,
            t,
            image: source.current_frame(),
        }))
    }
}
