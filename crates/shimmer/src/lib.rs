//! Shimmer
//!
//! Skeleton loading placeholders for view trees.
//!
//! While content loads, shimmer replaces every skeletonable leaf of a view
//! subtree with a solid or gradient placeholder, optionally animated, and
//! restores the real content when asked. The host application keeps a mirror
//! of its views in a [`SkeletonTree`] and paints through its own
//! [`SkeletonRenderer`].
//!
//! # Example
//!
//! ```rust
//! use shimmer::prelude::*;
//!
//! let mut tree = SkeletonTree::new();
//! let card = tree.insert(Capability::Skeletonable);
//! let title = tree.add_child(card, Capability::Skeletonable).unwrap();
//! let body = tree.add_child(card, Capability::Skeletonable).unwrap();
//!
//! let mut skeletons = Skeletons::from_global(tree, RecordingRenderer::new());
//! skeletons.show_animated_gradient_skeleton(card, None, None, None);
//! assert!(skeletons.is_animating(title));
//! assert!(skeletons.decoration(body).is_some());
//!
//! skeletons.hide_skeleton(card, true, None);
//! assert!(!skeletons.is_skeleton_active(card));
//! ```
//!
//! # Delayed shows
//!
//! Shows can be deferred so fast loads never flash a skeleton. The delay is
//! driven by the host loop through [`Skeletons::advance_by`]; any later show,
//! update or hide on the same root cancels it.
//!
//! ```rust
//! use std::time::Duration;
//! use shimmer::prelude::*;
//!
//! let mut tree = SkeletonTree::new();
//! let card = tree.insert(Capability::Skeletonable);
//! let mut skeletons = Skeletons::from_global(tree, RecordingRenderer::new());
//!
//! skeletons.show_skeleton_delayed(card, None, None, Duration::from_millis(300), None);
//! // content arrived first
//! skeletons.hide_skeleton(card, true, None);
//! assert_eq!(skeletons.advance_by(Duration::from_secs(1)), 0);
//! ```


pub use shimmer_core::{
    AppearanceState, Color, ColorSet, SkeletonAnimation, SkeletonAppearance, SkeletonConfig,
    SkeletonConfigBuilder, SkeletonDecoration, SkeletonError, SkeletonGradient, SkeletonKind,
    SlideDirection, TransitionStyle,
};
pub use shimmer_scheduler::{DeferredScheduler, DelaySlot, TaskId};
pub use shimmer_tree::{
    Capability, FlowEvent, FlowLog, FlowObserver, NodeClass, NodeId, NodeSkeletonState,
    PendingShow, RecordingRenderer, RenderCall, Size, SkeletonEffect, SkeletonNodes,
    SkeletonPhase, SkeletonRenderer, SkeletonTree, Skeletonable, Skeletons, TreeError,
    TreeWalker, Visit,
};

/// Prelude module - import everything commonly needed
pub mod prelude {
    // Engine
    pub use shimmer_tree::{Skeletons, SkeletonRenderer, RecordingRenderer, FlowObserver};

    // Tree
    pub use shimmer_tree::{Capability, NodeId, Size, SkeletonTree, Skeletonable};

    // Configuration
    pub use shimmer_core::{
        AppearanceState, Color, SkeletonAnimation, SkeletonAppearance, SkeletonConfig,
        SkeletonGradient, SlideDirection, TransitionStyle,
    };
}
