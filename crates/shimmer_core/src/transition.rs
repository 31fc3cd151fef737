//! Appear/disappear transitions

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{check_duration, Result};

/// How skeleton decoration appears or disappears
///
/// Equality is structural: two cross-dissolves are equal only when their
/// durations are bit-for-bit the same.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionStyle {
    /// Apply or remove instantly
    None,
    /// Fade over the given number of seconds
    CrossDissolve(f32),
}

impl TransitionStyle {
    /// Cross-dissolve over 0.25 seconds
    pub const DEFAULT: TransitionStyle = TransitionStyle::CrossDissolve(0.25);

    /// Create a cross-dissolve, rejecting negative or non-finite durations
    pub fn cross_dissolve(secs: f32) -> Result<Self> {
        Ok(TransitionStyle::CrossDissolve(check_duration(secs)?))
    }

    /// Check a value that may have been built directly or deserialized
    pub fn validate(self) -> Result<Self> {
        match self {
            TransitionStyle::None => Ok(self),
            TransitionStyle::CrossDissolve(secs) => Self::cross_dissolve(secs),
        }
    }

    /// Transition length, zero for [`TransitionStyle::None`]
    pub fn duration(&self) -> Duration {
        match self {
            TransitionStyle::None => Duration::ZERO,
            TransitionStyle::CrossDissolve(secs) => {
                Duration::try_from_secs_f32(*secs).unwrap_or(Duration::ZERO)
            }
        }
    }

    pub fn is_animated(&self) -> bool {
        matches!(self, TransitionStyle::CrossDissolve(secs) if *secs > 0.0)
    }
}

impl Default for TransitionStyle {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SkeletonError;

    #[test]
    fn test_rejects_negative() {
        assert_eq!(
            TransitionStyle::cross_dissolve(-0.1),
            Err(SkeletonError::NegativeDuration(-0.1))
        );
    }

    #[test]
    fn test_rejects_nan() {
        assert!(matches!(
            TransitionStyle::cross_dissolve(f32::NAN),
            Err(SkeletonError::NonFiniteDuration(_))
        ));
    }

    #[test]
    fn test_zero_is_allowed() {
        let t = TransitionStyle::cross_dissolve(0.0).unwrap();
        assert!(!t.is_animated());
        assert_eq!(t.duration(), Duration::ZERO);
    }

    #[test]
    fn test_structural_equality() {
        assert_eq!(TransitionStyle::default(), TransitionStyle::CrossDissolve(0.25));
        assert_ne!(
            TransitionStyle::CrossDissolve(0.25),
            TransitionStyle::CrossDissolve(0.250_001)
        );
        assert_ne!(TransitionStyle::None, TransitionStyle::CrossDissolve(0.0));
    }

    #[test]
    fn test_validate_catches_direct_construction() {
        assert!(TransitionStyle::CrossDissolve(-1.0).validate().is_err());
        assert!(TransitionStyle::None.validate().is_ok());
    }
}
