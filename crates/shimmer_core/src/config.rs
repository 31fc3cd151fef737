//! Skeleton configuration
//!
//! A [`SkeletonConfig`] describes one show or update request. It is built once
//! through [`SkeletonConfigBuilder`] and never mutated afterwards; every public
//! call constructs a fresh one.
//!
//! # Example
//!
//! ```rust
//! use shimmer_core::{Color, SkeletonConfig, SkeletonKind, TransitionStyle};
//!
//! let config = SkeletonConfig::solid(Color::RED)
//!     .animated(true)
//!     .transition(TransitionStyle::None)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.kind(), SkeletonKind::Solid);
//! assert_eq!(config.primary_color(), Color::RED);
//! ```

use smallvec::SmallVec;

use crate::animation::SkeletonAnimation;
use crate::color::{Color, SkeletonGradient};
use crate::error::{Result, SkeletonError};
use crate::transition::TransitionStyle;

/// Color set carried by configs and decorations
pub type ColorSet = SmallVec<[Color; 4]>;

/// Placeholder fill kind
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SkeletonKind {
    Solid,
    Gradient,
}

/// Immutable description of a single show/update request
#[derive(Clone, Debug, PartialEq)]
pub struct SkeletonConfig {
    kind: SkeletonKind,
    colors: ColorSet,
    animated: bool,
    animation: Option<SkeletonAnimation>,
    transition: TransitionStyle,
}

impl SkeletonConfig {
    /// Start building a solid skeleton config
    pub fn solid(color: Color) -> SkeletonConfigBuilder {
        SkeletonConfigBuilder::new(SkeletonKind::Solid, std::iter::once(color).collect())
    }

    /// Start building a gradient skeleton config
    pub fn gradient(gradient: &SkeletonGradient) -> SkeletonConfigBuilder {
        SkeletonConfigBuilder::new(
            SkeletonKind::Gradient,
            gradient.colors().iter().copied().collect(),
        )
    }

    pub fn kind(&self) -> SkeletonKind {
        self.kind
    }

    /// All colors. Solid configs carry exactly one.
    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    pub fn primary_color(&self) -> Color {
        self.colors[0]
    }

    pub fn is_animated(&self) -> bool {
        self.animated
    }

    /// The explicitly requested animation, if any
    pub fn animation(&self) -> Option<SkeletonAnimation> {
        self.animation
    }

    /// The animation to run: the requested one, or the default slide when
    /// `animated` is set without a descriptor. `None` for static skeletons.
    pub fn resolved_animation(&self) -> Option<SkeletonAnimation> {
        self.animated.then(|| self.animation.unwrap_or_default())
    }

    pub fn transition(&self) -> TransitionStyle {
        self.transition
    }

    /// Decoration record this config produces on a leaf
    pub fn decoration(&self) -> SkeletonDecoration {
        let colors = match self.kind {
            SkeletonKind::Solid => self.colors.iter().take(1).copied().collect(),
            SkeletonKind::Gradient => self.colors.clone(),
        };
        SkeletonDecoration {
            kind: self.kind,
            colors,
        }
    }
}

/// Builder for [`SkeletonConfig`]
#[derive(Clone, Debug)]
pub struct SkeletonConfigBuilder {
    kind: SkeletonKind,
    colors: ColorSet,
    animated: bool,
    animation: Option<SkeletonAnimation>,
    transition: TransitionStyle,
}

impl SkeletonConfigBuilder {
    fn new(kind: SkeletonKind, colors: ColorSet) -> Self {
        Self {
            kind,
            colors,
            animated: false,
            animation: None,
            transition: TransitionStyle::None,
        }
    }

    pub fn animated(mut self, animated: bool) -> Self {
        self.animated = animated;
        self
    }

    pub fn animation(mut self, animation: Option<SkeletonAnimation>) -> Self {
        self.animation = animation;
        self
    }

    pub fn transition(mut self, transition: TransitionStyle) -> Self {
        self.transition = transition;
        self
    }

    /// Validate and freeze the config
    pub fn build(self) -> Result<SkeletonConfig> {
        if self.colors.is_empty() {
            return Err(SkeletonError::EmptyColors);
        }
        let transition = self.transition.validate()?;
        let animation = self.animation.map(SkeletonAnimation::validate).transpose()?;

        Ok(SkeletonConfig {
            kind: self.kind,
            colors: self.colors,
            animated: self.animated,
            animation,
            transition,
        })
    }
}

/// What is currently painted on a leaf
#[derive(Clone, Debug, PartialEq)]
pub struct SkeletonDecoration {
    pub kind: SkeletonKind,
    pub colors: ColorSet,
}

impl SkeletonDecoration {
    /// Whether `other` can replace this decoration in place
    pub fn is_compatible_with(&self, other: &SkeletonDecoration) -> bool {
        self.kind == other.kind
    }
}
