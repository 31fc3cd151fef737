//! Shimmer Core
//!
//! Plain data shared by every Shimmer crate:
//!
//! - **Colors**: [`Color`] and [`SkeletonGradient`], passed through to the renderer untouched
//! - **Transitions**: [`TransitionStyle`] for appear/disappear effects
//! - **Animations**: [`SkeletonAnimation`] descriptors for looping effects
//! - **Configs**: immutable [`SkeletonConfig`] values built per request
//! - **Appearance**: [`SkeletonAppearance`] defaults, injectable or process-wide
//!
//! Nothing in this crate touches a view tree or a clock.

pub mod animation;
pub mod appearance;
pub mod color;
pub mod config;
pub mod error;
pub mod transition;

pub use animation::{SkeletonAnimation, SlideDirection};
pub use appearance::{AppearanceState, SkeletonAppearance};
pub use color::{Color, SkeletonGradient};
pub use config::{ColorSet, SkeletonConfig, SkeletonConfigBuilder, SkeletonDecoration, SkeletonKind};
pub use error::{Result, SkeletonError};
pub use transition::TransitionStyle;
