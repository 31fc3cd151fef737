//! Looping skeleton animation descriptors
//!
//! These only describe an animation. Running it (moving a gradient across a
//! layer, pulsing opacity) is the renderer's job.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{check_duration, Result};

/// Direction a sliding gradient travels
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlideDirection {
    #[default]
    LeftRight,
    RightLeft,
    TopBottom,
    BottomTop,
    TopLeftBottomRight,
    BottomRightTopLeft,
    TopRightBottomLeft,
    BottomLeftTopRight,
}

impl SlideDirection {
    /// Start and end points of the slide in unit coordinates
    pub fn points(&self) -> ((f32, f32), (f32, f32)) {
        match self {
            SlideDirection::LeftRight => ((-1.0, 0.5), (2.0, 0.5)),
            SlideDirection::RightLeft => ((2.0, 0.5), (-1.0, 0.5)),
            SlideDirection::TopBottom => ((0.5, -1.0), (0.5, 2.0)),
            SlideDirection::BottomTop => ((0.5, 2.0), (0.5, -1.0)),
            SlideDirection::TopLeftBottomRight => ((-1.0, -1.0), (2.0, 2.0)),
            SlideDirection::BottomRightTopLeft => ((2.0, 2.0), (-1.0, -1.0)),
            SlideDirection::TopRightBottomLeft => ((2.0, -1.0), (-1.0, 2.0)),
            SlideDirection::BottomLeftTopRight => ((-1.0, 2.0), (2.0, -1.0)),
        }
    }
}

/// A looping animation applied on top of a skeleton decoration
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum SkeletonAnimation {
    /// Gradient sweep in `direction`, one pass every `duration` seconds
    Sliding {
        direction: SlideDirection,
        duration: f32,
    },
    /// Opacity pulse, one full cycle every `duration` seconds
    Pulse { duration: f32 },
}

impl SkeletonAnimation {
    pub const DEFAULT_SLIDING_DURATION: f32 = 1.5;
    pub const DEFAULT_PULSE_DURATION: f32 = 1.0;

    pub fn sliding(direction: SlideDirection) -> Self {
        SkeletonAnimation::Sliding {
            direction,
            duration: Self::DEFAULT_SLIDING_DURATION,
        }
    }

    pub fn sliding_with_duration(direction: SlideDirection, secs: f32) -> Result<Self> {
        Ok(SkeletonAnimation::Sliding {
            direction,
            duration: check_duration(secs)?,
        })
    }

    pub fn pulse() -> Self {
        SkeletonAnimation::Pulse {
            duration: Self::DEFAULT_PULSE_DURATION,
        }
    }

    pub fn pulse_with_duration(secs: f32) -> Result<Self> {
        Ok(SkeletonAnimation::Pulse {
            duration: check_duration(secs)?,
        })
    }

    pub fn validate(self) -> Result<Self> {
        match self {
            SkeletonAnimation::Sliding { duration, .. } | SkeletonAnimation::Pulse { duration } => {
                check_duration(duration)?;
            }
        }
        Ok(self)
    }

    pub fn duration(&self) -> Duration {
        let secs = match self {
            SkeletonAnimation::Sliding { duration, .. } | SkeletonAnimation::Pulse { duration } => {
                *duration
            }
        };
        Duration::try_from_secs_f32(secs).unwrap_or(Duration::ZERO)
    }
}

impl Default for SkeletonAnimation {
    /// Left-to-right sliding gradient
    fn default() -> Self {
        Self::sliding(SlideDirection::LeftRight)
    }
}
