use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A normalized image-plane coordinate (0.0 to 1.0) as reported by the
/// pose detector. Y grows downward.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Point2D {
    /// X coordinate (0.0 = left, 1.0 = right)
    pub x: f64,
    /// Y coordinate (0.0 = top, 1.0 = bottom)
    pub y: f64,
}

impl Point2D {
    /// Create a new point.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Midpoint between this point and another.
    pub fn midpoint(&self, other: &Point2D) -> Point2D {
        Point2D {
            x: (self.x + other.x) / 2.0,
            y: (self.y + other.y) / 2.0,
        }
    }

    /// Check if the point lies within the normalized frame. A small
    /// epsilon is allowed for float precision at the edges.
    pub fn is_valid(&self) -> bool {
        self.x >= -0.001 && self.x <= 1.001 && self.y >= -0.001 && self.y <= 1.001
    }
}
