//! Pose landmarks for a single detected frame.
//!
//! The detector reports one [`Landmark`] per named body joint. Joints are
//! addressed through the [`Joint`] enum rather than raw numeric indices so
//! a typo in a joint reference fails at compile time, not at runtime.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::point::Point2D;

/// A named body joint tracked by the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Joint {
    LeftShoulder,
    RightShoulder,
    LeftHip,
    RightHip,
    LeftKnee,
    RightKnee,
    LeftAnkle,
    RightAnkle,
}

impl Joint {
    /// The shoulder, hip, knee and ankle of one body side, in that order.
    pub fn side_chain(side: BodySide) -> [Joint; 4] {
        match side {
            BodySide::Left => [
                Joint::LeftShoulder,
                Joint::LeftHip,
                Joint::LeftKnee,
                Joint::LeftAnkle,
            ],
            BodySide::Right => [
                Joint::RightShoulder,
                Joint::RightHip,
                Joint::RightKnee,
                Joint::RightAnkle,
            ],
        }
    }
}

/// The body side a landmark chain belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum BodySide {
    Left,
    Right,
}

/// A tracked joint position plus the detector's confidence that the
/// joint is visible and correctly located.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Landmark {
    /// Normalized image-plane position
    pub position: Point2D,
    /// Visibility confidence (0.0 to 1.0)
    pub visibility: f64,
}

impl Landmark {
    /// Create a new landmark.
    pub fn new(x: f64, y: f64, visibility: f64) -> Self {
        Self {
            position: Point2D::new(x, y),
            visibility,
        }
    }
}

/// The set of landmarks produced by one detection call.
///
/// A detector that found no body returns no `PoseFrame` at all; a
/// `PoseFrame` that exists may still be missing individual joints.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PoseFrame {
    landmarks: HashMap<Joint, Landmark>,
}

impl PoseFrame {
    /// Create an empty pose frame.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a pose frame from joint/landmark pairs.
    pub fn from_landmarks(pairs: impl IntoIterator<Item = (Joint, Landmark)>) -> Self {
        Self {
            landmarks: pairs.into_iter().collect(),
        }
    }

    /// Insert or replace a landmark.
    pub fn insert(&mut self, joint: Joint, landmark: Landmark) {
        self.landmarks.insert(joint, landmark);
    }

    /// Look up a landmark by joint.
    pub fn get(&self, joint: Joint) -> Option<&Landmark> {
        self.landmarks.get(&joint)
    }

    /// Visibility of a joint, or 0.0 when the joint was not reported.
    pub fn visibility_of(&self, joint: Joint) -> f64 {
        self.landmarks.get(&joint).map_or(0.0, |l| l.visibility)
    }

    /// Number of reported landmarks.
    pub fn len(&self) -> usize {
        self.landmarks.len()
    }

    /// True if no landmarks were reported.
    pub fn is_empty(&self) -> bool {
        self.landmarks.is_empty()
    }
}
