#![deny(unreachable_patterns)]
//! Batting-swing analysis pipeline.
//!
//! This crate provides:
//! - Uniform frame sampling over a seekable video source
//! - Landmark-to-angle conversion (trunk lean, hip angle, knee angle)
//! - Visibility-gated frame acceptance
//! - Time-series aggregation (per-field mean, peak with timestamp)
//! - Category-conditioned coaching feedback
//! - A cancellable, progress-reporting analysis orchestrator
//!
//! Video decoding and pose inference are consumed as capabilities
//! ([`VideoSource`], [`PoseDetector`]); the crate never touches codecs
//! or model weights itself.

pub mod aggregate;
pub mod config;
pub mod error;
pub mod feedback;
pub mod frame_metrics;
pub mod geometry;
pub mod landmarks;
pub mod orchestrator;
pub mod sampler;
pub mod source;

pub use aggregate::{aggregate, find_peak};
pub use config::AnalysisConfig;
pub use error::{AnalysisError, PipelineResult};
pub use feedback::{generate_feedback, Feedback, FirstVariant, VariantPicker};
pub use frame_metrics::FrameMetricsBuilder;
pub use landmarks::{select_landmarks, SelectedLandmarks};
pub use orchestrator::{Analyzer, AnalyzerState, AnalysisProgress, ProgressCallback};
pub use sampler::{FrameSampler, Sample};
pub use source::{FrameImage, PoseDetector, VideoMeta, VideoSource};
