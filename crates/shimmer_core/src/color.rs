//! Colors and gradients passed through to the host renderer
//!
//! Shimmer never resolves colors itself. A [`Color`] is whatever the caller (or
//! the appearance defaults) handed in, and a [`SkeletonGradient`] is an ordered
//! list of such colors. The renderer decides how to paint them.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SkeletonError};

/// RGBA color (linear space)
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    #[serde(default = "opaque")]
    pub a: f32,
}

fn opaque() -> f32 {
    1.0
}

impl Color {
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const RED: Color = Color::rgb(1.0, 0.0, 0.0);
    pub const GREEN: Color = Color::rgb(0.0, 1.0, 0.0);
    pub const BLUE: Color = Color::rgb(0.0, 0.0, 1.0);
    pub const GRAY: Color = Color::rgb(0.5, 0.5, 0.5);
    pub const TRANSPARENT: Color = Color::rgba(0.0, 0.0, 0.0, 0.0);

    /// Light gray-blue used as the default skeleton tint (`#ECF0F1`)
    pub const CLOUDS: Color = Color::rgb(236.0 / 255.0, 240.0 / 255.0, 241.0 / 255.0);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub fn from_hex(hex: u32) -> Self {
        let r = ((hex >> 16) & 0xFF) as f32 / 255.0;
        let g = ((hex >> 8) & 0xFF) as f32 / 255.0;
        let b = (hex & 0xFF) as f32 / 255.0;
        Self::rgb(r, g, b)
    }

    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.a = alpha;
        self
    }

    /// Linear interpolation between two colors
    pub fn lerp(a: &Color, b: &Color, t: f32) -> Color {
        let t = t.clamp(0.0, 1.0);
        Color {
            r: a.r + (b.r - a.r) * t,
            g: a.g + (b.g - a.g) * t,
            b: a.b + (b.b - a.b) * t,
            a: a.a + (b.a - a.a) * t,
        }
    }

    /// Perceived brightness in `0.0..=1.0` (Rec. 601 weights)
    pub fn luminance(&self) -> f32 {
        0.299 * self.r + 0.587 * self.g + 0.114 * self.b
    }

    pub fn is_light(&self) -> bool {
        self.luminance() > 0.5
    }

    /// Move toward white by `amount`, keeping alpha
    pub fn lighter(&self, amount: f32) -> Color {
        Color::lerp(self, &Color::WHITE.with_alpha(self.a), amount)
    }

    /// Move toward black by `amount`, keeping alpha
    pub fn darker(&self, amount: f32) -> Color {
        Color::lerp(self, &Color::BLACK.with_alpha(self.a), amount)
    }

    /// The shimmer highlight for this color: darker on light colors, lighter on dark ones
    pub fn complementary(&self) -> Color {
        if self.is_light() {
            self.darker(0.1)
        } else {
            self.lighter(0.1)
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::CLOUDS
    }
}

/// Ordered set of colors used by gradient skeletons
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SkeletonGradient {
    colors: Vec<Color>,
}

impl SkeletonGradient {
    /// Build the `base -> highlight -> base` gradient used for shimmering
    pub fn new(base: Color) -> Self {
        Self {
            colors: vec![base, base.complementary(), base],
        }
    }

    /// Build a gradient from an explicit color list
    ///
    /// Fails with [`SkeletonError::EmptyColors`] when `colors` is empty.
    pub fn with_colors(colors: impl Into<Vec<Color>>) -> Result<Self> {
        let colors = colors.into();
        if colors.is_empty() {
            return Err(SkeletonError::EmptyColors);
        }
        Ok(Self { colors })
    }

    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    pub fn base(&self) -> Color {
        self.colors[0]
    }
}

impl Default for SkeletonGradient {
    fn default() -> Self {
        Self::new(Color::default())
    }
}

impl From<Color> for SkeletonGradient {
    fn from(base: Color) -> Self {
        Self::new(base)
    }
}
