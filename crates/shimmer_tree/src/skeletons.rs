//! Skeleton engine
//!
//! [`Skeletons`] owns the mirrored view tree, the host renderer, the appearance
//! defaults and the delayed-show scheduler, and exposes the public operations.
//! Every operation takes the node to use as the walk root.
//!
//! # Example
//!
//! ```rust
//! use shimmer_core::{Color, SkeletonAppearance};
//! use shimmer_tree::{Capability, RecordingRenderer, SkeletonTree, Skeletons};
//!
//! let mut tree = SkeletonTree::new();
//! let root = tree.insert(Capability::Skeletonable);
//! let title = tree.add_child(root, Capability::Skeletonable).unwrap();
//!
//! let mut skeletons = Skeletons::new(tree, RecordingRenderer::new(), SkeletonAppearance::default());
//! skeletons.show_skeleton(root, Some(Color::RED), None);
//! assert!(skeletons.decoration(title).is_some());
//!
//! skeletons.hide_skeleton(root, true, None);
//! assert!(skeletons.decoration(title).is_none());
//! ```
//!
//! # Rules shared by all operations
//!
//! - Show, update and hide cancel any delayed show pending on the root first.
//! - A root that is unknown, excluded or not skeletonable makes the call a no-op.
//! - The root is classified like any other node: a skeletonable root without
//!   qualifying children is a leaf and gets decorated itself.
//! - Redundant calls (showing what is shown, hiding what is hidden, stopping a
//!   stopped animation) do nothing.

use std::time::{Duration, Instant};

use shimmer_core::{
    AppearanceState, Color, SkeletonAnimation, SkeletonAppearance, SkeletonConfig,
    SkeletonConfigBuilder, SkeletonDecoration, SkeletonGradient, TransitionStyle,
};
use shimmer_scheduler::{DeferredScheduler, TaskId};

use crate::flow::FlowObserver;
use crate::renderer::{dispatch, SkeletonRenderer};
use crate::skeletonable::Skeletonable;
use crate::state::{SkeletonEffect, SkeletonPhase};
use crate::tree::{NodeId, SkeletonTree};
use crate::walker::TreeWalker;

/// A delayed show waiting in the scheduler
#[derive(Clone, Debug, PartialEq)]
pub struct PendingShow {
    pub root: NodeId,
    pub config: SkeletonConfig,
}

/// The skeleton engine
pub struct Skeletons<V, R> {
    tree: SkeletonTree<V>,
    renderer: R,
    appearance: SkeletonAppearance,
    scheduler: DeferredScheduler<PendingShow>,
    observer: Option<Box<dyn FlowObserver>>,
}

impl<V, R> std::fmt::Debug for Skeletons<V, R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Skeletons")
            .field("tree", &self.tree)
            .field("appearance", &self.appearance)
            .field("scheduler", &self.scheduler)
            .field("observer", &self.observer.is_some())
            .finish()
    }
}

impl<V: Skeletonable, R: SkeletonRenderer> Skeletons<V, R> {
    /// Create an engine with explicit appearance defaults
    pub fn new(tree: SkeletonTree<V>, renderer: R, appearance: SkeletonAppearance) -> Self {
        Self {
            tree,
            renderer,
            appearance,
            scheduler: DeferredScheduler::new(),
            observer: None,
        }
    }

    /// Create an engine using the process-wide appearance
    ///
    /// Falls back to [`SkeletonAppearance::default`] when
    /// [`AppearanceState::init`] has not been called.
    pub fn from_global(tree: SkeletonTree<V>, renderer: R) -> Self {
        let appearance = AppearanceState::try_get()
            .map(|state| state.appearance().clone())
            .unwrap_or_else(|| {
                tracing::debug!("AppearanceState not initialized, using default appearance");
                SkeletonAppearance::default()
            });
        Self::new(tree, renderer, appearance)
    }

    /// Replace the delayed-show scheduler (e.g. one starting at a known instant)
    ///
    /// Tasks pending in the old scheduler are dropped with it.
    pub fn with_scheduler(mut self, scheduler: DeferredScheduler<PendingShow>) -> Self {
        self.scheduler = scheduler;
        self
    }

    pub fn with_observer(mut self, observer: impl FlowObserver + 'static) -> Self {
        self.observer = Some(Box::new(observer));
        self
    }

    pub fn set_observer(&mut self, observer: Option<Box<dyn FlowObserver>>) {
        self.observer = observer;
    }

    pub fn tree(&self) -> &SkeletonTree<V> {
        &self.tree
    }

    /// Mutable access for mirroring host changes (insertions, sizes)
    pub fn tree_mut(&mut self) -> &mut SkeletonTree<V> {
        &mut self.tree
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn appearance(&self) -> &SkeletonAppearance {
        &self.appearance
    }

    pub fn scheduler(&self) -> &DeferredScheduler<PendingShow> {
        &self.scheduler
    }

    pub fn into_parts(self) -> (SkeletonTree<V>, R) {
        (self.tree, self.renderer)
    }

    // =========================================================================
    // Show
    // =========================================================================

    /// Show a solid skeleton without animation
    pub fn show_skeleton(
        &mut self,
        root: NodeId,
        color: Option<Color>,
        transition: Option<TransitionStyle>,
    ) {
        self.cancel_pending_show(root);
        let config = self.solid(color).transition(self.transition_or_default(transition));
        if let Some(config) = build_or_warn(config, "show_skeleton") {
            self.show_skeleton_with_config(root, config);
        }
    }

    /// Show a solid skeleton after `delay`; `animated` defaults to `true`
    ///
    /// A newer call on the same root, delayed or not, supersedes this one.
    pub fn show_skeleton_delayed(
        &mut self,
        root: NodeId,
        color: Option<Color>,
        animated: Option<bool>,
        delay: Duration,
        transition: Option<TransitionStyle>,
    ) -> Option<TaskId> {
        self.cancel_pending_show(root);
        let animated = animated.unwrap_or(true);
        let config = self
            .solid(color)
            .animated(animated)
            .animation(self.animation_if(animated, None))
            .transition(self.transition_or_default(transition));
        let config = build_or_warn(config, "show_skeleton_delayed")?;
        self.schedule_show(root, config, delay)
    }

    /// Show a gradient skeleton without animation
    pub fn show_gradient_skeleton(
        &mut self,
        root: NodeId,
        gradient: Option<&SkeletonGradient>,
        transition: Option<TransitionStyle>,
    ) {
        self.cancel_pending_show(root);
        let config = self
            .gradient(gradient)
            .transition(self.transition_or_default(transition));
        if let Some(config) = build_or_warn(config, "show_gradient_skeleton") {
            self.show_skeleton_with_config(root, config);
        }
    }

    /// Show a gradient skeleton after `delay`; `animated` defaults to `true`
    pub fn show_gradient_skeleton_delayed(
        &mut self,
        root: NodeId,
        gradient: Option<&SkeletonGradient>,
        animated: Option<bool>,
        delay: Duration,
        transition: Option<TransitionStyle>,
    ) -> Option<TaskId> {
        self.cancel_pending_show(root);
        let animated = animated.unwrap_or(true);
        let config = self
            .gradient(gradient)
            .animated(animated)
            .animation(self.animation_if(animated, None))
            .transition(self.transition_or_default(transition));
        let config = build_or_warn(config, "show_gradient_skeleton_delayed")?;
        self.schedule_show(root, config, delay)
    }

    /// Show an animated solid skeleton
    ///
    /// Without an explicit animation the appearance default is used, which is a
    /// left-to-right slide unless configured otherwise.
    pub fn show_animated_skeleton(
        &mut self,
        root: NodeId,
        color: Option<Color>,
        animation: Option<SkeletonAnimation>,
        transition: Option<TransitionStyle>,
    ) {
        self.cancel_pending_show(root);
        let config = self
            .solid(color)
            .animated(true)
            .animation(self.animation_if(true, animation))
            .transition(self.transition_or_default(transition));
        if let Some(config) = build_or_warn(config, "show_animated_skeleton") {
            self.show_skeleton_with_config(root, config);
        }
    }

    /// Show an animated gradient skeleton
    pub fn show_animated_gradient_skeleton(
        &mut self,
        root: NodeId,
        gradient: Option<&SkeletonGradient>,
        animation: Option<SkeletonAnimation>,
        transition: Option<TransitionStyle>,
    ) {
        self.cancel_pending_show(root);
        let config = self
            .gradient(gradient)
            .animated(true)
            .animation(self.animation_if(true, animation))
            .transition(self.transition_or_default(transition));
        if let Some(config) = build_or_warn(config, "show_animated_gradient_skeleton") {
            self.show_skeleton_with_config(root, config);
        }
    }

    /// Show `config` on every leaf under `root`
    pub fn show_skeleton_with_config(&mut self, root: NodeId, config: SkeletonConfig) {
        self.cancel_pending_show(root);
        if !self.is_valid_root(root, "show_skeleton") {
            return;
        }
        tracing::debug!(
            "show_skeleton: root={:?} kind={:?} animated={}",
            root,
            config.kind(),
            config.is_animated()
        );

        self.notify(|observer| observer.will_begin_showing_skeletons(root));
        let walker = TreeWalker::plan(&self.tree, root);
        walker.run(
            self,
            |this, id| this.show_leaf(id, &config),
            |this, id| this.show_branch(id),
        );
        if let Some(state) = self.tree.skeleton_mut(root) {
            state.set_config(Some(config));
        }
        self.layout_pass(&walker);
        self.notify(|observer| observer.did_show_skeletons(root));
    }

    /// Queue `config` to be shown on `root` after `delay`
    ///
    /// Replaces any delayed show already pending on `root`.
    pub fn schedule_show(
        &mut self,
        root: NodeId,
        config: SkeletonConfig,
        delay: Duration,
    ) -> Option<TaskId> {
        if !self.is_valid_root(root, "schedule_show") {
            return None;
        }
        let state = self.tree.skeleton_mut(root)?;
        let task = state
            .delay_mut()
            .replace(&self.scheduler, delay, PendingShow { root, config });
        match task {
            Some(_) => tracing::debug!("schedule_show: root={:?} delay={:?}", root, delay),
            None => tracing::warn!(
                "schedule_show: delay {:?} is out of range, show on {:?} dropped",
                delay,
                root
            ),
        }
        task
    }

    /// Cancel the delayed show pending on `root`; returns `true` if one was pending
    pub fn cancel_pending_show(&mut self, root: NodeId) -> bool {
        self.tree
            .skeleton_mut(root)
            .is_some_and(|state| state.delay_mut().cancel(&self.scheduler))
    }

    /// Advance the scheduler clock to `now` and run delayed shows that came due
    ///
    /// Returns how many shows were applied. Shows whose root was removed or
    /// whose slot was taken over in the meantime are discarded.
    pub fn advance_to(&mut self, now: Instant) -> usize {
        let fired = self.scheduler.advance_to(now);
        self.run_fired(fired)
    }

    /// Advance the scheduler clock by `dt`; see [`Skeletons::advance_to`]
    ///
    /// A step too large for the clock runs every pending show.
    pub fn advance_by(&mut self, dt: Duration) -> usize {
        let fired = self.scheduler.advance_by(dt);
        self.run_fired(fired)
    }

    fn run_fired(&mut self, fired: Vec<(TaskId, PendingShow)>) -> usize {
        let mut applied = 0;
        for (task, PendingShow { root, config }) in fired {
            let live = self
                .tree
                .skeleton_mut(root)
                .is_some_and(|state| state.delay_mut().complete(task));
            if !live {
                tracing::debug!("discarding stale delayed show for {:?}", root);
                continue;
            }
            self.show_skeleton_with_config(root, config);
            applied += 1;
        }
        applied
    }

    // =========================================================================
    // Update
    // =========================================================================

    pub fn update_skeleton(&mut self, root: NodeId, color: Option<Color>) {
        self.cancel_pending_show(root);
        if let Some(config) = build_or_warn(self.solid(color), "update_skeleton") {
            self.update_skeleton_with_config(root, config);
        }
    }

    pub fn update_gradient_skeleton(&mut self, root: NodeId, gradient: Option<&SkeletonGradient>) {
        self.cancel_pending_show(root);
        if let Some(config) = build_or_warn(self.gradient(gradient), "update_gradient_skeleton") {
            self.update_skeleton_with_config(root, config);
        }
    }

    pub fn update_animated_skeleton(
        &mut self,
        root: NodeId,
        color: Option<Color>,
        animation: Option<SkeletonAnimation>,
    ) {
        self.cancel_pending_show(root);
        let config = self
            .solid(color)
            .animated(true)
            .animation(self.animation_if(true, animation));
        if let Some(config) = build_or_warn(config, "update_animated_skeleton") {
            self.update_skeleton_with_config(root, config);
        }
    }

    pub fn update_animated_gradient_skeleton(
        &mut self,
        root: NodeId,
        gradient: Option<&SkeletonGradient>,
        animation: Option<SkeletonAnimation>,
    ) {
        self.cancel_pending_show(root);
        let config = self
            .gradient(gradient)
            .animated(true)
            .animation(self.animation_if(true, animation));
        if let Some(config) = build_or_warn(config, "update_animated_gradient_skeleton") {
            self.update_skeleton_with_config(root, config);
        }
    }

    /// Apply `config` to the skeleton already showing under `root`
    ///
    /// Leaves whose decoration kind matches are adjusted in place; others are
    /// hidden and shown again. A root without an active skeleton is left alone.
    pub fn update_skeleton_with_config(&mut self, root: NodeId, config: SkeletonConfig) {
        self.cancel_pending_show(root);
        if !self.is_valid_root(root, "update_skeleton") {
            return;
        }
        if !self.is_skeleton_active(root) {
            tracing::debug!("update_skeleton: {:?} has no active skeleton", root);
            return;
        }
        tracing::debug!(
            "update_skeleton: root={:?} kind={:?} animated={}",
            root,
            config.kind(),
            config.is_animated()
        );

        self.notify(|observer| observer.will_begin_updating_skeletons(root));
        let walker = TreeWalker::plan(&self.tree, root);
        walker.run(
            self,
            |this, id| this.update_leaf(id, &config),
            |this, id| this.update_branch(id),
        );
        if let Some(state) = self.tree.skeleton_mut(root) {
            state.set_config(Some(config));
        }
        self.layout_pass(&walker);
        self.notify(|observer| observer.did_update_skeletons(root));
    }

    // =========================================================================
    // Layout
    // =========================================================================

    /// Bring skeletons under `root` in line with the current tree
    ///
    /// Dirty containers are laid out again, decorations follow their node's
    /// size, skeletonable nodes inserted under an active skeleton since the
    /// show join it with the root's current config, and nodes that turned into
    /// containers lose their decoration. Parts hidden with
    /// [`Skeletons::hide_skeleton`] stay hidden. Nothing happens unless `root`
    /// has an active skeleton.
    pub fn layout_skeleton_if_needed(&mut self, root: NodeId) {
        if !self.is_valid_root(root, "layout_skeleton_if_needed") {
            return;
        }
        self.notify(|observer| observer.will_begin_laying_skeletons_if_needed(root));

        let config = self
            .tree
            .skeleton(root)
            .filter(|state| state.is_active())
            .and_then(|state| state.config().cloned());
        if let Some(config) = config {
            tracing::trace!("layout_skeleton_if_needed: root={:?}", root);
            let walker = TreeWalker::plan(&self.tree, root);
            walker.run(
                self,
                |this, id| this.adopt_leaf(id, &config),
                |this, id| this.adopt_branch(id),
            );
            self.layout_pass(&walker);
        }

        self.notify(|observer| observer.did_layout_skeletons(root));
    }

    // =========================================================================
    // Hide
    // =========================================================================

    /// Remove skeletons under `root`
    ///
    /// With `reload_data_after`, the renderer is asked to reload real content on
    /// each node as its skeleton starts going away.
    pub fn hide_skeleton(
        &mut self,
        root: NodeId,
        reload_data_after: bool,
        transition: Option<TransitionStyle>,
    ) {
        self.cancel_pending_show(root);
        if !self.is_valid_root(root, "hide_skeleton") {
            return;
        }
        let transition = match self.transition_or_default(transition).validate() {
            Ok(transition) => transition,
            Err(err) => {
                tracing::warn!("hide_skeleton: rejected transition: {}", err);
                return;
            }
        };
        self.notify(|observer| observer.will_begin_hiding_skeletons(root));

        if self.is_skeleton_active(root) {
            tracing::debug!(
                "hide_skeleton: root={:?} reload_data_after={} transition={:?}",
                root,
                reload_data_after,
                transition
            );
            let walker = TreeWalker::plan(&self.tree, root);
            walker.run(
                self,
                |this, id| this.hide_node(id, transition, reload_data_after),
                |this, id| this.hide_node(id, transition, reload_data_after),
            );
        } else {
            tracing::trace!("hide_skeleton: {:?} has no active skeleton", root);
        }

        self.notify(|observer| observer.did_hide_skeletons(root));
    }

    // =========================================================================
    // Animation
    // =========================================================================

    /// Start `animation` (or the appearance default) on every decorated leaf
    pub fn start_skeleton_animation(&mut self, root: NodeId, animation: Option<SkeletonAnimation>) {
        if !self.is_valid_root(root, "start_skeleton_animation") {
            return;
        }
        let animation = match animation.unwrap_or(self.appearance.animation).validate() {
            Ok(animation) => animation,
            Err(err) => {
                tracing::warn!("start_skeleton_animation: rejected animation: {}", err);
                return;
            }
        };
        tracing::debug!("start_skeleton_animation: root={:?} {:?}", root, animation);

        let walker = TreeWalker::plan(&self.tree, root);
        walker.run(
            self,
            |this, id| {
                if let Some(state) = this.tree.skeleton_mut(id) {
                    let effects = state.start_animation(animation);
                    this.commit(id, &effects);
                }
            },
            |_, _| {},
        );
    }

    /// Stop animations on every leaf under `root`
    pub fn stop_skeleton_animation(&mut self, root: NodeId) {
        if !self.is_valid_root(root, "stop_skeleton_animation") {
            return;
        }
        tracing::debug!("stop_skeleton_animation: root={:?}", root);

        let walker = TreeWalker::plan(&self.tree, root);
        walker.run(
            self,
            |this, id| {
                if let Some(state) = this.tree.skeleton_mut(id) {
                    let effects = state.stop_animation();
                    this.commit(id, &effects);
                }
            },
            |_, _| {},
        );
    }

    // =========================================================================
    // Teardown & queries
    // =========================================================================

    /// Remove `node` and its subtree, cancelling their delayed shows
    pub fn remove_node(&mut self, node: NodeId) -> Option<V> {
        for id in self.tree.descendants(node) {
            self.cancel_pending_show(id);
        }
        self.tree.remove(node)
    }

    /// Whether `node` currently has an active skeleton (decorated or covering)
    pub fn is_skeleton_active(&self, node: NodeId) -> bool {
        self.tree.skeleton(node).is_some_and(|state| state.is_active())
    }

    /// Phase of `node`; unknown nodes are [`SkeletonPhase::Absent`]
    pub fn phase(&self, node: NodeId) -> SkeletonPhase {
        self.tree
            .skeleton(node)
            .map(|state| state.phase())
            .unwrap_or_default()
    }

    pub fn decoration(&self, node: NodeId) -> Option<&SkeletonDecoration> {
        self.tree.skeleton(node).and_then(|state| state.decoration())
    }

    pub fn is_animating(&self, node: NodeId) -> bool {
        self.tree.skeleton(node).is_some_and(|state| state.is_animating())
    }

    pub fn has_pending_show(&self, node: NodeId) -> bool {
        self.tree
            .skeleton(node)
            .is_some_and(|state| state.delay().is_pending())
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn is_valid_root(&self, root: NodeId, op: &str) -> bool {
        if !self.tree.contains(root) {
            tracing::warn!("{}: node {:?} is not in the tree", op, root);
            return false;
        }
        if !self.tree.capability(root).is_skeletonable() {
            tracing::trace!("{}: {:?} is not skeletonable, ignoring", op, root);
            return false;
        }
        true
    }

    fn notify(&mut self, f: impl FnOnce(&mut dyn FlowObserver)) {
        if let Some(observer) = self.observer.as_deref_mut() {
            f(observer);
        }
    }

    fn solid(&self, color: Option<Color>) -> SkeletonConfigBuilder {
        SkeletonConfig::solid(color.unwrap_or(self.appearance.tint_color))
    }

    fn gradient(&self, gradient: Option<&SkeletonGradient>) -> SkeletonConfigBuilder {
        SkeletonConfig::gradient(gradient.unwrap_or(&self.appearance.gradient))
    }

    fn transition_or_default(&self, transition: Option<TransitionStyle>) -> TransitionStyle {
        transition.unwrap_or(self.appearance.transition)
    }

    fn animation_if(
        &self,
        animated: bool,
        animation: Option<SkeletonAnimation>,
    ) -> Option<SkeletonAnimation> {
        animated.then(|| animation.unwrap_or(self.appearance.animation))
    }

    fn show_leaf(&mut self, id: NodeId, config: &SkeletonConfig) {
        let size = self.tree.size(id).unwrap_or_default();
        if let Some(state) = self.tree.skeleton_mut(id) {
            let effects = state.show_leaf(config, size);
            self.commit(id, &effects);
        }
    }

    fn show_branch(&mut self, id: NodeId) {
        if let Some(state) = self.tree.skeleton_mut(id) {
            let effects = state.show_branch();
            self.commit(id, &effects);
        }
    }

    /// Decorate a leaf that joined after the skeleton was shown
    fn adopt_leaf(&mut self, id: NodeId, config: &SkeletonConfig) {
        if self.is_adoptable(id) {
            self.show_leaf(id, config);
        }
    }

    fn adopt_branch(&mut self, id: NodeId) {
        if self.is_skeleton_active(id) || self.is_adoptable(id) {
            self.show_branch(id);
        }
    }

    /// Absent, never hidden, and directly under an active skeleton
    fn is_adoptable(&self, id: NodeId) -> bool {
        let Some(state) = self.tree.skeleton(id) else {
            return false;
        };
        !state.is_active()
            && !state.is_dismissed()
            && self
                .tree
                .parent(id)
                .is_some_and(|parent| self.is_skeleton_active(parent))
    }

    fn update_leaf(&mut self, id: NodeId, config: &SkeletonConfig) {
        let size = self.tree.size(id).unwrap_or_default();
        if let Some(state) = self.tree.skeleton_mut(id) {
            let effects = state.update_leaf(config, size);
            self.commit(id, &effects);
        }
    }

    fn update_branch(&mut self, id: NodeId) {
        if let Some(state) = self.tree.skeleton_mut(id) {
            state.update_branch();
        }
    }

    fn hide_node(&mut self, id: NodeId, transition: TransitionStyle, reload_data_after: bool) {
        let Some(state) = self.tree.skeleton_mut(id) else {
            return;
        };
        let was_active = state.is_active();
        let effects = state.hide(transition);
        self.commit(id, &effects);
        if was_active && reload_data_after {
            self.renderer.reload_data(id);
        }
    }

    /// Lay out dirty containers, then fit decorations to their node sizes
    fn layout_pass(&mut self, walker: &TreeWalker<NodeId>) {
        walker.run(
            self,
            |this, id| {
                this.tree.take_needs_layout(id);
                let size = this.tree.size(id).unwrap_or_default();
                if let Some(state) = this.tree.skeleton_mut(id) {
                    let effects = state.layout_leaf(size);
                    this.commit(id, &effects);
                }
            },
            |this, id| {
                if this.tree.take_needs_layout(id) {
                    this.renderer.layout(id);
                }
            },
        );
    }

    /// Send effects to the renderer; adding or removing decoration may change
    /// the node's intrinsic size, so its parent needs layout
    fn commit(&mut self, id: NodeId, effects: &[SkeletonEffect]) {
        let changes_geometry = effects.iter().any(|effect| {
            matches!(
                effect,
                SkeletonEffect::Apply { .. } | SkeletonEffect::Remove { .. }
            )
        });
        if changes_geometry {
            if let Some(parent) = self.tree.parent(id) {
                self.tree.mark_needs_layout(parent);
            }
        }
        dispatch(&mut self.renderer, id, effects);
    }
}

fn build_or_warn(builder: SkeletonConfigBuilder, op: &str) -> Option<SkeletonConfig> {
    match builder.build() {
        Ok(config) => Some(config),
        Err(err) => {
            tracing::warn!("{}: rejected config: {}", op, err);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flow::{FlowEvent, FlowLog};
    use crate::renderer::{RecordingRenderer, RenderCall};
    use crate::skeletonable::Capability;
    use crate::tree::Size;
    use shimmer_core::SkeletonKind;

    struct Card {
        root: NodeId,
        title: NodeId,
        avatar: NodeId,
        hidden: NodeId,
    }

    fn card() -> (Skeletons<Capability, RecordingRenderer>, Card) {
        let mut tree = SkeletonTree::new();
        let root = tree.insert(Capability::Skeletonable);
        let title = tree.add_child(root, Capability::Skeletonable).unwrap();
        let avatar = tree.add_child(root, Capability::Skeletonable).unwrap();
        let excluded = tree.add_child(root, Capability::Excluded).unwrap();
        let hidden = tree.add_child(excluded, Capability::Skeletonable).unwrap();
        tree.set_size(title, Size::new(120.0, 16.0));
        tree.set_size(avatar, Size::new(40.0, 40.0));

        let skeletons = Skeletons::new(tree, RecordingRenderer::new(), SkeletonAppearance::default());
        (
            skeletons,
            Card {
                root,
                title,
                avatar,
                hidden,
            },
        )
    }

    fn applied(skeletons: &Skeletons<Capability, RecordingRenderer>) -> Vec<NodeId> {
        skeletons
            .renderer()
            .calls()
            .iter()
            .filter(|call| matches!(call, RenderCall::Apply { .. }))
            .map(|call| call.node())
            .collect()
    }

    #[test]
    fn test_show_decorates_leaves_only() {
        let (mut skeletons, card) = card();
        skeletons.show_skeleton(card.root, Some(Color::RED), None);

        assert_eq!(applied(&skeletons), vec![card.title, card.avatar]);
        assert!(skeletons.decoration(card.root).is_none());
        assert!(skeletons.is_skeleton_active(card.root));
        assert!(!skeletons.is_skeleton_active(card.hidden));
        assert_eq!(
            skeletons.decoration(card.title).map(|d| d.colors[0]),
            Some(Color::RED)
        );
    }

    #[test]
    fn test_show_on_plain_root_is_noop() {
        let mut tree = SkeletonTree::new();
        let root = tree.insert(Capability::Plain);
        tree.add_child(root, Capability::Skeletonable).unwrap();
        let mut skeletons = Skeletons::new(tree, RecordingRenderer::new(), SkeletonAppearance::default());

        skeletons.show_skeleton(root, None, None);
        assert!(skeletons.renderer().calls().is_empty());
    }

    #[test]
    fn test_show_uses_appearance_defaults() {
        let (mut skeletons, card) = card();
        skeletons.show_gradient_skeleton(card.root, None, None);

        let decoration = skeletons.decoration(card.title).unwrap();
        assert_eq!(decoration.kind, SkeletonKind::Gradient);
        assert_eq!(
            decoration.colors.as_slice(),
            SkeletonAppearance::default().gradient.colors()
        );
        assert!(matches!(
            skeletons.renderer().calls()[0],
            RenderCall::Apply { transition, .. } if transition == TransitionStyle::DEFAULT
        ));
    }

    #[test]
    fn test_show_animated_defaults_to_sliding() {
        let (mut skeletons, card) = card();
        skeletons.show_animated_skeleton(card.root, None, None, None);

        assert!(skeletons.is_animating(card.title));
        assert!(skeletons.renderer().calls().contains(&RenderCall::StartAnimation {
            node: card.avatar,
            animation: SkeletonAnimation::default(),
        }));
    }

    #[test]
    fn test_delayed_show_fires_after_delay() {
        let (mut skeletons, card) = card();
        skeletons.show_skeleton_delayed(card.root, None, None, Duration::from_millis(100), None);

        assert!(skeletons.has_pending_show(card.root));
        assert_eq!(skeletons.advance_by(Duration::from_millis(99)), 0);
        assert!(!skeletons.is_skeleton_active(card.root));

        assert_eq!(skeletons.advance_by(Duration::from_millis(1)), 1);
        assert!(skeletons.is_skeleton_active(card.root));
        assert!(skeletons.is_animating(card.title));
        assert!(!skeletons.has_pending_show(card.root));
    }

    #[test]
    fn test_newer_delay_replaces_older() {
        let (mut skeletons, card) = card();
        skeletons.show_skeleton_delayed(
            card.root,
            Some(Color::RED),
            Some(false),
            Duration::from_millis(100),
            None,
        );
        skeletons.show_skeleton_delayed(
            card.root,
            Some(Color::BLUE),
            Some(false),
            Duration::from_millis(10),
            None,
        );

        assert_eq!(skeletons.advance_by(Duration::from_millis(200)), 1);
        assert_eq!(
            skeletons.decoration(card.title).map(|d| d.colors[0]),
            Some(Color::BLUE)
        );
        assert_eq!(applied(&skeletons).len(), 2);
    }

    #[test]
    fn test_hide_cancels_pending_show() {
        let (mut skeletons, card) = card();
        skeletons.show_skeleton_delayed(card.root, None, None, Duration::from_millis(50), None);
        skeletons.hide_skeleton(card.root, false, None);

        assert_eq!(skeletons.advance_by(Duration::from_secs(1)), 0);
        assert!(!skeletons.is_skeleton_active(card.root));
        assert!(skeletons.renderer().calls().is_empty());
    }

    #[test]
    fn test_delayed_show_on_removed_node_is_discarded() {
        let (mut skeletons, card) = card();
        skeletons.show_skeleton_delayed(card.title, None, None, Duration::from_millis(50), None);
        skeletons.tree_mut().remove(card.title);

        assert_eq!(skeletons.advance_by(Duration::from_millis(60)), 0);
        assert!(skeletons.renderer().calls().is_empty());
    }

    #[test]
    fn test_out_of_range_delay_is_refused() {
        let (mut skeletons, card) = card();
        skeletons.show_skeleton_delayed(card.root, None, None, Duration::from_millis(5), None);

        let task = skeletons.show_skeleton_delayed(card.root, None, None, Duration::MAX, None);

        assert_eq!(task, None);
        assert!(!skeletons.has_pending_show(card.root));
        assert_eq!(skeletons.scheduler().pending_count(), 0);
        assert_eq!(skeletons.advance_by(Duration::MAX), 0);
        assert!(!skeletons.is_skeleton_active(card.root));
    }

    #[test]
    fn test_huge_step_runs_pending_show() {
        let (mut skeletons, card) = card();
        skeletons.show_skeleton_delayed(card.root, None, None, Duration::from_secs(600), None);

        assert_eq!(skeletons.advance_by(Duration::MAX), 1);
        assert!(skeletons.is_skeleton_active(card.title));
    }

    #[test]
    fn test_remove_node_cancels_subtree_delays() {
        let (mut skeletons, card) = card();
        skeletons.show_skeleton_delayed(card.avatar, None, None, Duration::from_millis(50), None);
        assert_eq!(skeletons.scheduler().pending_count(), 1);

        skeletons.remove_node(card.root);
        assert_eq!(skeletons.scheduler().pending_count(), 0);
    }

    #[test]
    fn test_hide_reverts_and_reloads() {
        let (mut skeletons, card) = card();
        skeletons.show_animated_skeleton(card.root, None, None, None);
        skeletons.renderer_mut().clear();

        skeletons.hide_skeleton(card.root, true, Some(TransitionStyle::None));

        assert!(!skeletons.is_skeleton_active(card.root));
        assert!(!skeletons.is_animating(card.title));
        assert_eq!(
            skeletons.renderer().calls_for(card.title),
            vec![
                &RenderCall::StopAnimation { node: card.title },
                &RenderCall::Remove {
                    node: card.title,
                    transition: TransitionStyle::None,
                },
                &RenderCall::ReloadData { node: card.title },
            ]
        );
        assert!(skeletons
            .renderer()
            .calls()
            .contains(&RenderCall::ReloadData { node: card.root }));
    }

    #[test]
    fn test_hide_when_absent_is_noop() {
        let log = FlowLog::new();
        let (skeletons, card) = card();
        let mut skeletons = skeletons.with_observer(log.clone());

        skeletons.hide_skeleton(card.root, true, None);

        assert!(skeletons.renderer().calls().is_empty());
        assert_eq!(
            log.events(),
            vec![FlowEvent::WillHide(card.root), FlowEvent::DidHide(card.root)]
        );
    }

    #[test]
    fn test_update_compatible_refreshes_in_place() {
        let (mut skeletons, card) = card();
        skeletons.show_skeleton(card.root, Some(Color::RED), None);
        skeletons.renderer_mut().clear();

        skeletons.update_skeleton(card.root, Some(Color::GREEN));

        assert!(applied(&skeletons).is_empty());
        assert_eq!(skeletons.phase(card.title), SkeletonPhase::Updated);
        assert_eq!(skeletons.phase(card.root), SkeletonPhase::Updated);
        assert!(matches!(
            skeletons.renderer().calls_for(card.title).as_slice(),
            [RenderCall::Refresh { .. }]
        ));
    }

    #[test]
    fn test_update_incompatible_cycles() {
        let (mut skeletons, card) = card();
        skeletons.show_skeleton(card.root, Some(Color::RED), None);
        skeletons.renderer_mut().clear();

        skeletons.update_gradient_skeleton(card.root, None);

        assert!(matches!(
            skeletons.renderer().calls_for(card.title).as_slice(),
            [RenderCall::Remove { .. }, RenderCall::Apply { .. }]
        ));
        assert_eq!(
            skeletons.decoration(card.title).map(|d| d.kind),
            Some(SkeletonKind::Gradient)
        );
    }

    #[test]
    fn test_update_without_skeleton_is_noop() {
        let (mut skeletons, card) = card();
        skeletons.update_skeleton(card.root, Some(Color::GREEN));

        assert!(skeletons.renderer().calls().is_empty());
        assert_eq!(skeletons.phase(card.title), SkeletonPhase::Absent);
    }

    #[test]
    fn test_layout_decorates_inserted_leaf() {
        let (mut skeletons, card) = card();
        skeletons.show_skeleton(card.root, Some(Color::RED), None);
        skeletons.renderer_mut().clear();

        let subtitle = skeletons
            .tree_mut()
            .add_child(card.root, Capability::Skeletonable)
            .unwrap();
        skeletons.layout_skeleton_if_needed(card.root);

        assert_eq!(applied(&skeletons), vec![subtitle]);
        assert!(skeletons
            .renderer()
            .calls()
            .contains(&RenderCall::Layout { node: card.root }));
    }

    #[test]
    fn test_layout_resizes_changed_leaf() {
        let (mut skeletons, card) = card();
        skeletons.show_skeleton(card.root, None, None);
        skeletons.renderer_mut().clear();

        let size = Size::new(240.0, 16.0);
        skeletons.tree_mut().set_size(card.title, size);
        skeletons.layout_skeleton_if_needed(card.root);

        assert!(skeletons.renderer().calls().contains(&RenderCall::Resize {
            node: card.title,
            size,
        }));
        assert_eq!(skeletons.phase(card.title), SkeletonPhase::Showing);
    }

    #[test]
    fn test_layout_keeps_hidden_subtree_hidden() {
        let mut tree = SkeletonTree::new();
        let root = tree.insert(Capability::Skeletonable);
        let title = tree.add_child(root, Capability::Skeletonable).unwrap();
        let inner = tree.add_child(root, Capability::Skeletonable).unwrap();
        let image = tree.add_child(inner, Capability::Skeletonable).unwrap();
        let mut skeletons = Skeletons::new(tree, RecordingRenderer::new(), SkeletonAppearance::default());

        skeletons.show_skeleton(root, None, None);
        skeletons.hide_skeleton(inner, false, None);
        skeletons.hide_skeleton(title, false, None);
        let late = skeletons
            .tree_mut()
            .add_child(inner, Capability::Skeletonable)
            .unwrap();
        skeletons.layout_skeleton_if_needed(root);

        assert!(skeletons.is_skeleton_active(root));
        for node in [title, inner, image, late] {
            assert!(!skeletons.is_skeleton_active(node));
            assert!(skeletons.decoration(node).is_none());
        }
        assert_eq!(applied(&skeletons), vec![title, image]);

        // Showing again brings the hidden parts back
        skeletons.show_skeleton(root, None, None);
        assert!(skeletons.decoration(image).is_some());
        assert!(skeletons.decoration(late).is_some());
    }

    #[test]
    fn test_deep_chain_show_and_hide() {
        const DEPTH: usize = 20_000;

        let mut tree = SkeletonTree::new();
        let root = tree.insert(Capability::Skeletonable);
        let mut tip = root;
        for _ in 0..DEPTH {
            tip = tree.add_child(tip, Capability::Skeletonable).unwrap();
        }
        let mut skeletons = Skeletons::new(tree, RecordingRenderer::new(), SkeletonAppearance::default());

        skeletons.show_skeleton(root, None, None);
        assert_eq!(applied(&skeletons), vec![tip]);

        skeletons.hide_skeleton(root, false, None);
        assert!(!skeletons.is_skeleton_active(tip));
        assert!(skeletons.remove_node(root).is_some());
    }

    #[test]
    fn test_layout_without_skeleton_is_noop() {
        let (mut skeletons, card) = card();
        skeletons.layout_skeleton_if_needed(card.root);
        assert!(skeletons.renderer().calls().is_empty());
    }

    #[test]
    fn test_animation_start_stop_keeps_decoration() {
        let (mut skeletons, card) = card();
        skeletons.show_skeleton(card.root, None, None);
        let decoration = skeletons.decoration(card.title).cloned();

        skeletons.start_skeleton_animation(card.root, Some(SkeletonAnimation::pulse()));
        assert!(skeletons.is_animating(card.avatar));

        skeletons.stop_skeleton_animation(card.root);
        skeletons.stop_skeleton_animation(card.root);
        assert!(!skeletons.is_animating(card.avatar));
        assert_eq!(skeletons.decoration(card.title).cloned(), decoration);

        let stops = skeletons
            .renderer()
            .calls_for(card.avatar)
            .into_iter()
            .filter(|call| matches!(call, RenderCall::StopAnimation { .. }))
            .count();
        assert_eq!(stops, 1);
    }

    #[test]
    fn test_flow_observer_brackets_operations() {
        let log = FlowLog::new();
        let (skeletons, card) = card();
        let mut skeletons = skeletons.with_observer(log.clone());

        skeletons.show_skeleton(card.root, None, None);
        skeletons.update_skeleton(card.root, Some(Color::GRAY));
        skeletons.layout_skeleton_if_needed(card.root);
        skeletons.hide_skeleton(card.root, false, None);

        let root = card.root;
        assert_eq!(
            log.events(),
            vec![
                FlowEvent::WillShow(root),
                FlowEvent::DidShow(root),
                FlowEvent::WillUpdate(root),
                FlowEvent::DidUpdate(root),
                FlowEvent::WillLayout(root),
                FlowEvent::DidLayout(root),
                FlowEvent::WillHide(root),
                FlowEvent::DidHide(root),
            ]
        );
    }

    #[test]
    fn test_invalid_transition_is_rejected() {
        let (mut skeletons, card) = card();
        skeletons.show_skeleton(card.root, None, Some(TransitionStyle::CrossDissolve(-1.0)));
        assert!(skeletons.renderer().calls().is_empty());

        skeletons.show_skeleton(card.root, None, None);
        skeletons.hide_skeleton(card.root, false, Some(TransitionStyle::CrossDissolve(f32::NAN)));
        assert!(skeletons.is_skeleton_active(card.root));
    }
}
