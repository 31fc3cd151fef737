//! Per-node skeleton state machine
//!
//! ```text
//!            show                update (compatible)
//!   Absent ────────▶ Showing ─────────────────────▶ Updated
//!     ▲                │  ▲                           │
//!     │      hide      │  └──────── show ─────────────┤
//!     └────────────────┴──────────── hide ────────────┘
//! ```
//!
//! Animation is tracked separately and can be started or stopped without
//! touching decoration. Transitions return the [`SkeletonEffect`]s the
//! renderer must perform, in order; the state itself never calls out.

use shimmer_core::{SkeletonAnimation, SkeletonConfig, SkeletonDecoration, TransitionStyle};
use shimmer_scheduler::DelaySlot;
use smallvec::SmallVec;

use crate::tree::Size;

/// Lifecycle phase of a node's skeleton
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SkeletonPhase {
    /// No skeleton
    #[default]
    Absent,
    /// Shown by a show call
    Showing,
    /// Shown and since adjusted by an update call
    Updated,
}

impl SkeletonPhase {
    pub fn is_active(&self) -> bool {
        !matches!(self, SkeletonPhase::Absent)
    }
}

/// A renderer command produced by a state transition
#[derive(Clone, Debug, PartialEq)]
pub enum SkeletonEffect {
    /// Paint a new decoration
    Apply {
        decoration: SkeletonDecoration,
        size: Size,
        transition: TransitionStyle,
    },
    /// Swap colors of the current decoration in place
    Refresh { decoration: SkeletonDecoration },
    /// Resize the current decoration to the node's new size
    Resize { size: Size },
    /// Take the decoration off
    Remove { transition: TransitionStyle },
    StartAnimation(SkeletonAnimation),
    StopAnimation,
}

/// Effects produced by one transition
pub type Effects = SmallVec<[SkeletonEffect; 4]>;

/// Skeleton state attached to every tree node
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NodeSkeletonState {
    phase: SkeletonPhase,
    decoration: Option<SkeletonDecoration>,
    /// Node size the decoration was last laid out for
    decorated_size: Option<Size>,
    animation: Option<SkeletonAnimation>,
    /// Config of the last show/update, kept on walk roots only
    config: Option<SkeletonConfig>,
    /// Set by hide, cleared by the next show; keeps layout from bringing back
    /// a skeleton that was taken down on purpose
    dismissed: bool,
    delay: DelaySlot,
}

impl NodeSkeletonState {
    pub fn phase(&self) -> SkeletonPhase {
        self.phase
    }

    pub fn is_active(&self) -> bool {
        self.phase.is_active()
    }

    pub fn decoration(&self) -> Option<&SkeletonDecoration> {
        self.decoration.as_ref()
    }

    pub fn decorated_size(&self) -> Option<Size> {
        self.decorated_size
    }

    pub fn animation(&self) -> Option<SkeletonAnimation> {
        self.animation
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// Config of the last show or update rooted at this node
    pub fn config(&self) -> Option<&SkeletonConfig> {
        self.config.as_ref()
    }

    pub(crate) fn set_config(&mut self, config: Option<SkeletonConfig>) {
        self.config = config;
    }

    /// Whether the skeleton here was hidden and not shown again since
    pub fn is_dismissed(&self) -> bool {
        self.dismissed
    }

    pub fn delay(&self) -> &DelaySlot {
        &self.delay
    }

    pub(crate) fn delay_mut(&mut self) -> &mut DelaySlot {
        &mut self.delay
    }

    /// Show `config` on a leaf
    ///
    /// Absent leaves get decorated. A leaf already showing an equal decoration
    /// and animation is left alone. A leaf showing something else is updated,
    /// using `config`'s transition if a full cycle is needed.
    pub fn show_leaf(&mut self, config: &SkeletonConfig, size: Size) -> Effects {
        self.dismissed = false;
        let decoration = config.decoration();
        match &self.decoration {
            None => {
                let mut effects = Effects::new();
                self.apply(decoration, size, config.transition(), &mut effects);
                self.phase = SkeletonPhase::Showing;
                self.sync_animation(config.resolved_animation(), &mut effects);
                effects
            }
            Some(current) if *current == decoration => {
                let mut effects = Effects::new();
                self.phase = SkeletonPhase::Showing;
                self.sync_animation(config.resolved_animation(), &mut effects);
                effects
            }
            Some(_) => {
                let effects = self.reconfigure(config, size, config.transition());
                self.phase = SkeletonPhase::Showing;
                effects
            }
        }
    }

    /// Mark a branch as covered by an active skeleton
    ///
    /// A node that used to be a leaf loses its decoration here.
    pub fn show_branch(&mut self) -> Effects {
        self.dismissed = false;
        let mut effects = Effects::new();
        self.strip(TransitionStyle::None, &mut effects);
        if !self.phase.is_active() {
            self.phase = SkeletonPhase::Showing;
        }
        effects
    }

    /// Update a showing leaf to `config`
    ///
    /// Compatible decorations change in place; anything else goes through a
    /// hide-then-show cycle. Absent leaves are left alone.
    pub fn update_leaf(&mut self, config: &SkeletonConfig, size: Size) -> Effects {
        if self.decoration.is_none() {
            return Effects::new();
        }
        let effects = self.reconfigure(config, size, TransitionStyle::None);
        self.phase = SkeletonPhase::Updated;
        effects
    }

    /// Update an active branch; only the phase changes
    pub fn update_branch(&mut self) -> Effects {
        if self.phase.is_active() {
            self.phase = SkeletonPhase::Updated;
        }
        Effects::new()
    }

    /// Hide the skeleton on this node; a no-op when already absent
    pub fn hide(&mut self, transition: TransitionStyle) -> Effects {
        let mut effects = Effects::new();
        self.strip(transition, &mut effects);
        self.phase = SkeletonPhase::Absent;
        self.config = None;
        self.dismissed = true;
        effects
    }

    /// Start (or switch to) `animation`; needs a decoration to animate
    pub fn start_animation(&mut self, animation: SkeletonAnimation) -> Effects {
        let mut effects = Effects::new();
        if self.decoration.is_some() {
            self.sync_animation(Some(animation), &mut effects);
        }
        effects
    }

    /// Stop any running animation
    pub fn stop_animation(&mut self) -> Effects {
        let mut effects = Effects::new();
        self.sync_animation(None, &mut effects);
        effects
    }

    /// Resize the decoration if the node changed size since it was laid out
    pub fn layout_leaf(&mut self, size: Size) -> Effects {
        let mut effects = Effects::new();
        if self.decoration.is_some() && self.decorated_size != Some(size) {
            self.decorated_size = Some(size);
            effects.push(SkeletonEffect::Resize { size });
        }
        effects
    }

    fn reconfigure(
        &mut self,
        config: &SkeletonConfig,
        size: Size,
        transition: TransitionStyle,
    ) -> Effects {
        let mut effects = Effects::new();
        let decoration = config.decoration();

        match &self.decoration {
            Some(current) if current.is_compatible_with(&decoration) => {
                if *current != decoration {
                    effects.push(SkeletonEffect::Refresh {
                        decoration: decoration.clone(),
                    });
                    self.decoration = Some(decoration);
                }
            }
            _ => {
                self.strip(TransitionStyle::None, &mut effects);
                self.phase = SkeletonPhase::Absent;
                self.apply(decoration, size, transition, &mut effects);
            }
        }

        self.sync_animation(config.resolved_animation(), &mut effects);
        effects
    }

    fn apply(
        &mut self,
        decoration: SkeletonDecoration,
        size: Size,
        transition: TransitionStyle,
        effects: &mut Effects,
    ) {
        effects.push(SkeletonEffect::Apply {
            decoration: decoration.clone(),
            size,
            transition,
        });
        self.decoration = Some(decoration);
        self.decorated_size = Some(size);
    }

    /// Stop animation and take decoration off, if present
    fn strip(&mut self, transition: TransitionStyle, effects: &mut Effects) {
        self.sync_animation(None, effects);
        if self.decoration.take().is_some() {
            self.decorated_size = None;
            effects.push(SkeletonEffect::Remove { transition });
        }
    }

    fn sync_animation(&mut self, wanted: Option<SkeletonAnimation>, effects: &mut Effects) {
        if self.animation == wanted {
            return;
        }
        if self.animation.take().is_some() {
            effects.push(SkeletonEffect::StopAnimation);
        }
        if let Some(animation) = wanted {
            effects.push(SkeletonEffect::StartAnimation(animation));
            self.animation = Some(animation);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shimmer_core::{Color, SkeletonGradient, SkeletonKind};

    const SIZE: Size = Size::new(100.0, 20.0);

    fn solid(color: Color) -> SkeletonConfig {
        SkeletonConfig::solid(color).build().unwrap()
    }

    fn gradient() -> SkeletonConfig {
        SkeletonConfig::gradient(&SkeletonGradient::default())
            .build()
            .unwrap()
    }

    #[test]
    fn test_show_from_absent() {
        let mut state = NodeSkeletonState::default();
        let effects = state.show_leaf(&solid(Color::RED), SIZE);

        assert_eq!(effects.len(), 1);
        assert!(matches!(effects[0], SkeletonEffect::Apply { size, .. } if size == SIZE));
        assert_eq!(state.phase(), SkeletonPhase::Showing);
        assert_eq!(state.decoration().unwrap().kind, SkeletonKind::Solid);
        assert!(!state.is_animating());
    }

    #[test]
    fn test_show_twice_is_idempotent() {
        let mut state = NodeSkeletonState::default();
        state.show_leaf(&solid(Color::RED), SIZE);
        let snapshot = state.clone();

        assert!(state.show_leaf(&solid(Color::RED), SIZE).is_empty());
        assert_eq!(state, snapshot);
    }

    #[test]
    fn test_animated_show_starts_animation() {
        let mut state = NodeSkeletonState::default();
        let config = SkeletonConfig::solid(Color::RED).animated(true).build().unwrap();
        let effects = state.show_leaf(&config, SIZE);

        assert_eq!(
            effects.last(),
            Some(&SkeletonEffect::StartAnimation(SkeletonAnimation::default()))
        );
        assert!(state.is_animating());
    }

    #[test]
    fn test_compatible_update_is_in_place() {
        let mut state = NodeSkeletonState::default();
        state.show_leaf(&solid(Color::RED), SIZE);
        let effects = state.update_leaf(&solid(Color::BLUE), SIZE);

        assert_eq!(effects.len(), 1);
        assert!(matches!(effects[0], SkeletonEffect::Refresh { .. }));
        assert_eq!(state.phase(), SkeletonPhase::Updated);
        assert_eq!(state.decoration().unwrap().colors.as_slice(), &[Color::BLUE]);
    }

    #[test]
    fn test_incompatible_update_cycles() {
        let mut state = NodeSkeletonState::default();
        state.show_leaf(&solid(Color::RED), SIZE);
        let effects = state.update_leaf(&gradient(), SIZE);

        assert_eq!(
            effects[0],
            SkeletonEffect::Remove {
                transition: TransitionStyle::None
            }
        );
        assert!(matches!(effects[1], SkeletonEffect::Apply { .. }));
        assert_eq!(state.decoration().unwrap().kind, SkeletonKind::Gradient);
        assert_eq!(state.phase(), SkeletonPhase::Updated);
    }

    #[test]
    fn test_update_on_absent_is_noop() {
        let mut state = NodeSkeletonState::default();
        assert!(state.update_leaf(&solid(Color::RED), SIZE).is_empty());
        assert_eq!(state, NodeSkeletonState::default());
    }

    #[test]
    fn test_hide_reverts_and_is_idempotent() {
        let mut state = NodeSkeletonState::default();
        let config = SkeletonConfig::solid(Color::RED).animated(true).build().unwrap();
        state.show_leaf(&config, SIZE);

        let effects = state.hide(TransitionStyle::DEFAULT);
        assert_eq!(
            effects.as_slice(),
            &[
                SkeletonEffect::StopAnimation,
                SkeletonEffect::Remove {
                    transition: TransitionStyle::DEFAULT
                },
            ]
        );
        assert_eq!(state.phase(), SkeletonPhase::Absent);
        assert!(state.decoration().is_none());
        assert!(state.hide(TransitionStyle::DEFAULT).is_empty());
    }

    #[test]
    fn test_hide_dismisses_until_next_show() {
        let mut state = NodeSkeletonState::default();
        state.show_leaf(&solid(Color::RED), SIZE);
        assert!(!state.is_dismissed());

        state.hide(TransitionStyle::None);
        assert!(state.is_dismissed());

        state.show_leaf(&solid(Color::RED), SIZE);
        assert!(!state.is_dismissed());

        state.hide(TransitionStyle::None);
        state.show_branch();
        assert!(!state.is_dismissed());
    }

    #[test]
    fn test_animation_needs_decoration() {
        let mut state = NodeSkeletonState::default();
        assert!(state.start_animation(SkeletonAnimation::default()).is_empty());
        assert!(!state.is_animating());
    }

    #[test]
    fn test_stop_twice() {
        let mut state = NodeSkeletonState::default();
        state.show_leaf(&solid(Color::RED), SIZE);
        state.start_animation(SkeletonAnimation::pulse());

        assert_eq!(state.stop_animation().as_slice(), &[SkeletonEffect::StopAnimation]);
        assert!(state.stop_animation().is_empty());
        assert!(!state.is_animating());
        assert!(state.decoration().is_some());
    }

    #[test]
    fn test_switching_animation_restarts() {
        let mut state = NodeSkeletonState::default();
        state.show_leaf(&solid(Color::RED), SIZE);
        state.start_animation(SkeletonAnimation::pulse());

        let effects = state.start_animation(SkeletonAnimation::default());
        assert_eq!(
            effects.as_slice(),
            &[
                SkeletonEffect::StopAnimation,
                SkeletonEffect::StartAnimation(SkeletonAnimation::default()),
            ]
        );
        assert!(state.start_animation(SkeletonAnimation::default()).is_empty());
    }

    #[test]
    fn test_branch_strips_old_leaf_decoration() {
        let mut state = NodeSkeletonState::default();
        state.show_leaf(&solid(Color::RED), SIZE);

        let effects = state.show_branch();
        assert!(matches!(effects[0], SkeletonEffect::Remove { .. }));
        assert!(state.decoration().is_none());
        assert!(state.is_active());
    }

    #[test]
    fn test_layout_leaf_resizes_once() {
        let mut state = NodeSkeletonState::default();
        state.show_leaf(&solid(Color::RED), SIZE);
        assert!(state.layout_leaf(SIZE).is_empty());

        let bigger = Size::new(200.0, 20.0);
        assert_eq!(
            state.layout_leaf(bigger).as_slice(),
            &[SkeletonEffect::Resize { size: bigger }]
        );
        assert!(state.layout_leaf(bigger).is_empty());
    }
}
