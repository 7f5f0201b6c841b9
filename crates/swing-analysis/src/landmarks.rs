//! Landmark selection for angle computation.
//!
//! One detection gives landmarks for both body sides; a batting swing is
//! filmed side-on, so one side is usually occluded. The selector keeps
//! the side whose shoulder/hip/knee/ankle chain is more visible and
//! builds the midpoints the trunk-lean computation needs.

use swing_models::{BodySide, Joint, Point2D, PoseFrame};

/// The landmarks chosen from one pose frame for angle computation.
#[derive(Debug, Clone, Copy)]
pub struct SelectedLandmarks {
    /// The more visible body side
    pub side: BodySide,
    /// Midpoint between the two shoulders
    pub shoulder_mid: Point2D,
    /// Midpoint between the two hips
    pub hip_mid: Point2D,
    /// Chosen side's shoulder
    pub shoulder: Point2D,
    /// Chosen side's hip
    pub hip: Point2D,
    /// Chosen side's knee
    pub knee: Point2D,
    /// Chosen side's ankle
    pub ankle: Point2D,
    /// Mean visibility across both shoulders, both hips, and the chosen
    /// side's knee and ankle
    pub visibility_score: f64,
}

/// Total visibility of one side's shoulder/hip/knee/ankle chain.
/// Missing joints count as zero.
fn side_visibility(pose: &PoseFrame, side: BodySide) -> f64 {
    Joint::side_chain(side)
        .iter()
        .map(|&j| pose.visibility_of(j))
        .sum()
}

/// Pick the more visible side and assemble the landmarks for angle
/// computation.
///
/// Returns `None` when any joint the geometry needs is missing from
/// the frame or reported outside the normalized image plane. Ties
/// between sides favor the left side.
pub fn select_landmarks(pose: &PoseFrame) -> Option<SelectedLandmarks> {
    let left = side_visibility(pose, BodySide::Left);
    let right = side_visibility(pose, BodySide::Right);
    // Strictly greater: a tie keeps the default left side.
    let side = if right > left {
        BodySide::Right
    } else {
        BodySide::Left
    };

    let left_shoulder = pose.get(Joint::LeftShoulder)?;
    let right_shoulder = pose.get(Joint::RightShoulder)?;
    let left_hip = pose.get(Joint::LeftHip)?;
    let right_hip = pose.get(Joint::RightHip)?;

    let [shoulder_joint, hip_joint, knee_joint, ankle_joint] = Joint::side_chain(side);
    let shoulder = pose.get(shoulder_joint)?;
    let hip = pose.get(hip_joint)?;
    let knee = pose.get(knee_joint)?;
    let ankle = pose.get(ankle_joint)?;

    // Coordinates the detector placed outside the frame are as useless
    // as missing joints.
    let used = [
        left_shoulder,
        right_shoulder,
        left_hip,
        right_hip,
        shoulder,
        hip,
        knee,
        ankle,
    ];
    if used.iter().any(|l| !l.position.is_valid()) {
        return None;
    }

    let visibility_score = (left_shoulder.visibility
        + right_shoulder.visibility
        + left_hip.visibility
        + right_hip.visibility
        + knee.visibility
        + ankle.visibility)
        / 6.0;

    Some(SelectedLandmarks {
        side,
        shoulder_mid: left_shoulder.position.midpoint(&right_shoulder.position),
        hip_mid: left_hip.position.midpoint(&right_hip.position),
        shoulder: shoulder.position,
        hip: hip.position,
        knee: knee.position,
        ankle: ankle.position,
        visibility_score,
    })
}
