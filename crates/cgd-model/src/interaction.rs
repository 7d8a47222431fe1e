// SPDX-License-Identifier: Apache-2.0

use crate::gene::ParseError;
use serde::{Deserialize, Serialize};

/// Interactions scoring below this are discarded upstream, not stored.
pub const INTERACTION_SCORE_FLOOR: f64 = 400.0;

/// Synthetic score used to force self-interactions into the top bucket.
pub const SELF_INTERACTION_SCORE: f64 = 1000.0;

/// Ordinal confidence bucket for a continuous interaction score.
///
/// Sub-threshold interactions are filtered out before bucketing, so a
/// persisted record never carries `Low`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum Confidence {
    Low,
    Medium,
    High,
    Highest,
}

impl Confidence {
    /// Pure monotonic step function over the raw evidence score.
    #[must_use]
    pub fn from_score(score: f64) -> Self {
        if score >= 900.0 {
            Self::Highest
        } else if score >= 700.0 {
            Self::High
        } else if score >= 400.0 {
            Self::Medium
        } else {
            Self::Low
        }
    }

    pub fn parse(raw: &str) -> Result<Self, ParseError> {
        match raw {
            "Low" => Ok(Self::Low),
            "Medium" => Ok(Self::Medium),
            "High" => Ok(Self::High),
            "Highest" => Ok(Self::Highest),
            _ => Err(ParseError::InvalidFormat(
                "confidence must be one of Low, Medium, High, Highest",
            )),
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::Highest => "Highest",
        }
    }
}
