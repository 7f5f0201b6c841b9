//! Analysis orchestration.
//!
//! One [`Analyzer`] owns one video source and drives the whole
//! sample -> detect -> gate -> aggregate -> feedback pipeline as a single
//! cooperative task. Sampling is strictly sequential: the detector and
//! the video source are single-position resources, so no parallel frame
//! processing is permitted.

use chrono::Utc;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::aggregate::{aggregate, find_peak};
use crate::config::AnalysisConfig;
use crate::error::{AnalysisError, PipelineResult};
use crate::feedback::{generate_feedback, FirstVariant, VariantPicker};
use crate::frame_metrics::FrameMetricsBuilder;
use crate::sampler::FrameSampler;
use crate::source::{PoseDetector, VideoMeta, VideoSource};
use swing_models::{AnalysisResult, FrameMetrics, SwingCategory};

/// Lifecycle of one analyzer.
///
/// A failed analysis returns to `Ready`, not `Idle`, so the caller can
/// retry without re-resolving the video. A failed load returns to
/// `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalyzerState {
    /// No video attached yet
    Idle,
    /// Resolving video metadata
    LoadingVideo,
    /// Video resolved, run can start
    Ready,
    /// Run in flight
    Analyzing,
    /// Run completed, result surfaced
    Done,
}

impl AnalyzerState {
    /// Get string representation of the state.
    pub fn as_str(&self) -> &'static str {
        match self {
            AnalyzerState::Idle => "idle",
            AnalyzerState::LoadingVideo => "loading_video",
            AnalyzerState::Ready => "ready",
            AnalyzerState::Analyzing => "analyzing",
            AnalyzerState::Done => "done",
        }
    }
}

/// Progress of an in-flight run, emitted after every sampled frame
/// whether or not the frame passed the quality gates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalysisProgress {
    /// Frames sampled so far (1-based once the first frame is done)
    pub current_frame: usize,
    /// Total frames the run will sample
    pub total_frames: usize,
}

impl AnalysisProgress {
    /// Completion percentage (0 to 100).
    pub fn percentage(&self) -> f64 {
        if self.total_frames == 0 {
            return 0.0;
        }
        (self.current_frame as f64 / self.total_frames as f64) * 100.0
    }
}

/// Callback type for progress updates.
pub type ProgressCallback = Box<dyn Fn(AnalysisProgress) + Send>;

/// Sequences sampling, detection, gating, aggregation and feedback
/// under a cancellable, progress-reporting run.
pub struct Analyzer<S: VideoSource> {
    config: AnalysisConfig,
    state: AnalyzerState,
    source: Option<S>,
    meta: Option<VideoMeta>,
    progress: Option<ProgressCallback>,
    cancel_rx: Option<watch::Receiver<bool>>,
    picker: Box<dyn VariantPicker + Send>,
}

impl<S: VideoSource> Analyzer<S> {
    /// Create an idle analyzer.
    pub fn new(config: AnalysisConfig) -> Self {
        Self {
            config,
            state: AnalyzerState::Idle,
            source: None,
            meta: None,
            progress: None,
            cancel_rx: None,
            picker: Box::new(FirstVariant),
        }
    }

    /// Set a progress callback.
    pub fn with_progress(mut self, callback: ProgressCallback) -> Self {
        self.progress = Some(callback);
        self
    }

    /// Set a cancellation signal. The run aborts at the next
    /// suspension point once the watched value turns true.
    pub fn with_cancel(mut self, cancel_rx: watch::Receiver<bool>) -> Self {
        self.cancel_rx = Some(cancel_rx);
        self
    }

    /// Replace the phrasing variant picker (deterministic first-variant
    /// selection by default).
    pub fn with_picker(mut self, picker: Box<dyn VariantPicker + Send>) -> Self {
        self.picker = picker;
        self
    }

    /// Current lifecycle state.
    pub fn state(&self) -> AnalyzerState {
        self.state
    }

    /// Resolved video metadata, once loaded.
    pub fn video_meta(&self) -> Option<VideoMeta> {
        self.meta
    }

    /// Attach a video source and resolve its metadata.
    ///
    /// On success the analyzer is `Ready`. When the duration cannot be
    /// resolved the analyzer returns to `Idle` with
    /// [`AnalysisError::SourceUnavailable`].
    pub fn load_video(&mut self, source: S) -> PipelineResult<VideoMeta> {
        if self.state != AnalyzerState::Idle {
            return Err(AnalysisError::InvalidState {
                expected: AnalyzerState::Idle.as_str(),
                actual: self.state.as_str(),
            });
        }
        self.state = AnalyzerState::LoadingVideo;

        let duration = source.duration();
        if !duration.is_finite() || duration <= 0.0 {
            self.state = AnalyzerState::Idle;
            return Err(AnalysisError::source_unavailable(format!(
                "video duration could not be resolved (got {duration})"
            )));
        }

        let (width, height) = source
            .dimensions()
            .unwrap_or(self.config.fallback_dimensions);
        let meta = VideoMeta {
            duration,
            width,
            height,
        };

        info!(duration, width, height, "video resolved");
        self.source = Some(source);
        self.meta = Some(meta);
        self.state = AnalyzerState::Ready;
        Ok(meta)
    }

    /// Run one analysis.
    ///
    /// The detector is exclusively owned by this run and is closed on
    /// every exit path. On success the analyzer is `Done`; on failure
    /// or cancellation it returns to `Ready` with the video still
    /// loaded, so the caller may retry.
    pub async fn analyze<D: PoseDetector>(
        &mut self,
        mut detector: D,
        category: SwingCategory,
    ) -> PipelineResult<AnalysisResult> {
        if self.state != AnalyzerState::Ready {
            detector.close().await;
            return Err(AnalysisError::InvalidState {
                expected: AnalyzerState::Ready.as_str(),
                actual: self.state.as_str(),
            });
        }

        let meta = match self.meta {
            Some(meta) => meta,
            None => {
                detector.close().await;
                return Err(AnalysisError::source_unavailable(
                    "no video metadata for a ready analyzer",
                ));
            }
        };
        let mut source = match self.source.take() {
            Some(source) => source,
            None => {
                detector.close().await;
                return Err(AnalysisError::source_unavailable(
                    "no video source for a ready analyzer",
                ));
            }
        };

        self.state = AnalyzerState::Analyzing;
        info!(category = %category.label(), duration = meta.duration, "analysis started");

        let outcome = self.run_pipeline(&mut source, &mut detector, meta).await;

        // Resource release is unconditional: success, failure or
        // cancellation, the detector instance is returned.
        detector.close().await;
        self.source = Some(source);

        match outcome.and_then(|(frames, total)| self.assemble_result(category, &frames, total)) {
            Ok(result) => {
                info!(
                    used = result.used_frame_count,
                    total = result.total_sampled_frames,
                    "analysis complete"
                );
                self.state = AnalyzerState::Done;
                Ok(result)
            }
            Err(err) => {
                warn!("analysis failed: {err}");
                self.state = AnalyzerState::Ready;
                Err(err)
            }
        }
    }

    /// The side-effecting driver loop: seek, detect, gate, buffer.
    ///
    /// Returns the accepted frames (in strictly increasing timestamp
    /// order) and the number of timestamps visited.
    async fn run_pipeline<D: PoseDetector>(
        &mut self,
        source: &mut S,
        detector: &mut D,
        meta: VideoMeta,
    ) -> PipelineResult<(Vec<FrameMetrics>, usize)> {
        let mut sampler = FrameSampler::new(meta.duration, self.config.sample_fps);
        let total_frames = sampler.total_frames();
        let builder = FrameMetricsBuilder::new(self.config.visibility_gate);
        let mut accepted: Vec<FrameMetrics> = Vec::new();
        let mut current_frame = 0;

        info!(
            total_frames,
            sample_fps = self.config.sample_fps,
            "sampling {total_frames} frames over {:.2}s",
            meta.duration
        );

        while let Some(step) = sampler.advance(source).await {
            self.check_cancelled()?;

            match step {
                Ok(sample) => {
                    let timestamp_ms = (sample.t * 1000.0).round() as i64;
                    match detector.detect(sample.image, timestamp_ms).await {
                        Ok(pose) => {
                            self.check_cancelled()?;
                            if let Some(metrics) = builder.build(pose.as_ref(), sample.t) {
                                accepted.push(metrics);
                            } else {
                                debug!(t = sample.t, "frame rejected by quality gates");
                            }
                        }
                        Err(err) if err.is_per_frame() => {
                            warn!(t = sample.t, "detection failed, skipping frame: {err}");
                        }
                        Err(err) => return Err(err),
                    }
                }
                // A failed seek removes the timestamp from the accepted
                // set but does not abort the run.
                Err(err) if err.is_per_frame() => {
                    warn!("sample skipped: {err}");
                }
                Err(err) => return Err(err),
            }

            current_frame += 1;
            if let Some(ref callback) = self.progress {
                callback(AnalysisProgress {
                    current_frame,
                    total_frames,
                });
            }
        }

        if accepted.is_empty() {
            return Err(AnalysisError::NoValidFrames);
        }
        Ok((accepted, total_frames))
    }

    fn assemble_result(
        &mut self,
        category: SwingCategory,
        frames: &[FrameMetrics],
        total_sampled_frames: usize,
    ) -> PipelineResult<AnalysisResult> {
        let avg = aggregate(frames)?;
        let peak = find_peak(frames)?;
        let feedback = generate_feedback(&self.config, category, &avg, &peak, &mut *self.picker);

        Ok(AnalysisResult {
            category,
            total_sampled_frames,
            used_frame_count: frames.len(),
            avg,
            peak,
            message: feedback.message,
            next_drill: feedback.next_drill,
            created_at: Utc::now(),
        })
    }

    fn check_cancelled(&self) -> PipelineResult<()> {
        if let Some(ref cancel_rx) = self.cancel_rx {
            if *cancel_rx.borrow() {
                info!("analysis cancelled, discarding partial buffer");
                return Err(AnalysisError::Cancelled);
            }
        }
        Ok(())
    }
}
