//! Swing-type categories.
//!
//! The four categories are assigned upstream (matrix selection screen)
//! and only select which feedback template the pipeline uses. Inputs
//! arrive in several spellings: `1`..`4`, ASCII roman `I`..`IV`, and
//! fullwidth roman `Ⅰ`..`Ⅳ`.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Error returned when a category string cannot be normalized.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognized swing category: {0:?}")]
pub struct CategoryParseError(pub String);

/// One of the four fixed swing-type categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum SwingCategory {
    /// Ⅰ 前伸傾向 (forward lean, rising)
    ForwardRising,
    /// Ⅱ 前沈傾向 (forward lean, sinking)
    ForwardSinking,
    /// Ⅲ 後伸傾向 (backward lean, rising)
    BackwardRising,
    /// Ⅳ 後沈傾向 (backward lean, sinking)
    BackwardSinking,
}

impl SwingCategory {
    /// Numeric identifier (1 to 4).
    pub fn id(&self) -> u8 {
        match self {
            Self::ForwardRising => 1,
            Self::ForwardSinking => 2,
            Self::BackwardRising => 3,
            Self::BackwardSinking => 4,
        }
    }

    /// Category from its numeric identifier.
    pub fn from_id(id: u8) -> Option<Self> {
        match id {
            1 => Some(Self::ForwardRising),
            2 => Some(Self::ForwardSinking),
            3 => Some(Self::BackwardRising),
            4 => Some(Self::BackwardSinking),
            _ => None,
        }
    }

    /// Normalize a category string in any accepted spelling.
    pub fn parse(raw: &str) -> Result<Self, CategoryParseError> {
        match raw.trim().to_uppercase().as_str() {
            "1" | "I" | "Ⅰ" => Ok(Self::ForwardRising),
            "2" | "II" | "Ⅱ" => Ok(Self::ForwardSinking),
            "3" | "III" | "Ⅲ" => Ok(Self::BackwardRising),
            "4" | "IV" | "Ⅳ" => Ok(Self::BackwardSinking),
            _ => Err(CategoryParseError(raw.to_string())),
        }
    }

    /// Display label (roman numeral plus Japanese tendency name).
    pub fn label(&self) -> &'static str {
        match self {
            Self::ForwardRising => "Ⅰ 前伸傾向",
            Self::ForwardSinking => "Ⅱ 前沈傾向",
            Self::BackwardRising => "Ⅲ 後伸傾向",
            Self::BackwardSinking => "Ⅳ 後沈傾向",
        }
    }
}

impl fmt::Display for SwingCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
