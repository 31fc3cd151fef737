//! Core error types

use thiserror::Error;

/// Errors raised while building skeleton configs and appearance defaults
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SkeletonError {
    /// A transition or animation was given a negative duration
    #[error("Duration must be non-negative, got {0}s")]
    NegativeDuration(f32),

    /// A duration was NaN or infinite
    #[error("Duration must be finite, got {0}")]
    NonFiniteDuration(f32),

    /// A config or gradient was built without any color
    #[error("At least one color is required")]
    EmptyColors,

    /// Appearance configuration could not be parsed or failed validation
    #[error("Invalid appearance configuration: {0}")]
    InvalidAppearance(String),

    /// The process-wide appearance was already set
    #[error("Appearance already initialized")]
    AppearanceAlreadyInitialized,
}

/// Result type for core operations
pub type Result<T> = std::result::Result<T, SkeletonError>;

/// Validate a duration expressed in seconds
pub(crate) fn check_duration(secs: f32) -> Result<f32> {
    if !secs.is_finite() {
        return Err(SkeletonError::NonFiniteDuration(secs));
    }
    if secs < 0.0 {
        return Err(SkeletonError::NegativeDuration(secs));
    }
    Ok(secs)
}
