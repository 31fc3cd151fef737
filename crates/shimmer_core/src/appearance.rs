//! Default skeleton appearance
//!
//! [`SkeletonAppearance`] holds the values public calls fall back on when the
//! caller omits a color, gradient, transition or animation. The engine takes
//! one explicitly at construction. For apps that prefer a process-wide default,
//! [`AppearanceState`] stores one behind a `OnceLock`:
//!
//! ```ignore
//! // At app startup, before the first skeleton is shown
//! AppearanceState::init(SkeletonAppearance::from_toml_str(include_str!("shimmer.toml"))?)?;
//!
//! // Later
//! let skeletons = Skeletons::from_global();
//! ```
//!
//! The global is set at most once and is read-only afterwards.

use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::animation::SkeletonAnimation;
use crate::color::{Color, SkeletonGradient};
use crate::error::{Result, SkeletonError};
use crate::transition::TransitionStyle;

/// Global appearance instance
static APPEARANCE_STATE: OnceLock<AppearanceState> = OnceLock::new();

/// Defaults resolved by the public show/update calls
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkeletonAppearance {
    /// Solid skeleton color
    pub tint_color: Color,
    /// Gradient skeleton colors
    pub gradient: SkeletonGradient,
    /// Transition used when the caller passes none
    pub transition: TransitionStyle,
    /// Animation used by animated calls that pass no descriptor
    pub animation: SkeletonAnimation,
}

impl Default for SkeletonAppearance {
    fn default() -> Self {
        Self {
            tint_color: Color::CLOUDS,
            gradient: SkeletonGradient::new(Color::CLOUDS),
            transition: TransitionStyle::DEFAULT,
            animation: SkeletonAnimation::default(),
        }
    }
}

impl SkeletonAppearance {
    /// Parse an appearance from TOML, filling missing keys with defaults
    ///
    /// ```toml
    /// tint_color = { r = 0.9, g = 0.9, b = 0.92 }
    /// transition = { cross_dissolve = 0.4 }
    ///
    /// [animation]
    /// kind = "sliding"
    /// direction = "top_bottom"
    /// duration = 2.0
    /// ```
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let appearance: SkeletonAppearance = toml::from_str(content)
            .map_err(|e| SkeletonError::InvalidAppearance(e.to_string()))?;
        appearance.validate()
    }

    /// Check durations and color sets, which deserialization cannot enforce
    pub fn validate(self) -> Result<Self> {
        if self.gradient.colors().is_empty() {
            return Err(SkeletonError::InvalidAppearance(
                "gradient must contain at least one color".to_string(),
            ));
        }
        self.transition.validate()?;
        self.animation.validate()?;
        Ok(self)
    }
}

/// Process-wide appearance, set once at startup
#[derive(Debug)]
pub struct AppearanceState {
    appearance: SkeletonAppearance,
}

impl AppearanceState {
    /// Initialize the global appearance
    ///
    /// Fails if the appearance is invalid or the global was already set.
    pub fn init(appearance: SkeletonAppearance) -> Result<()> {
        let appearance = appearance.validate()?;
        APPEARANCE_STATE
            .set(AppearanceState { appearance })
            .map_err(|_| SkeletonError::AppearanceAlreadyInitialized)?;
        tracing::debug!("AppearanceState initialized");
        Ok(())
    }

    /// Initialize with [`SkeletonAppearance::default`] unless already set
    pub fn init_default() {
        let _ = APPEARANCE_STATE.set(AppearanceState {
            appearance: SkeletonAppearance::default(),
        });
    }

    /// Get the global appearance state
    ///
    /// # Panics
    ///
    /// Panics if `init()` has not been called.
    pub fn get() -> &'static AppearanceState {
        APPEARANCE_STATE
            .get()
            .expect("AppearanceState not initialized. Call AppearanceState::init() at app startup.")
    }

    /// Try to get the global appearance (returns None if not initialized)
    pub fn try_get() -> Option<&'static AppearanceState> {
        APPEARANCE_STATE.get()
    }

    pub fn is_initialized() -> bool {
        APPEARANCE_STATE.get().is_some()
    }

    pub fn appearance(&self) -> &SkeletonAppearance {
        &self.appearance
    }
}
