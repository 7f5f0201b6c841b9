//! Shared data models for the SwingLab analysis pipeline.
//!
//! This crate provides Serde-serializable types for:
//! - Pose landmarks and per-frame detections
//! - Per-frame and aggregated biomechanical metrics
//! - Swing-type categories
//! - The final analysis result handed to renderers and persisters

pub mod category;
pub mod landmark;
pub mod metrics;
pub mod point;
pub mod result;

// Re-export common types
pub use category::{CategoryParseError, SwingCategory};
pub use landmark::{BodySide, Joint, Landmark, PoseFrame};
pub use metrics::{AggregateMetrics, FrameMetrics, PeakRecord};
pub use point::Point2D;
pub use result::AnalysisResult;
