//! Host rendering collaborator
//!
//! Shimmer decides *what* should be on screen; the host decides *how*. The
//! engine talks to the host exclusively through [`SkeletonRenderer`], in the
//! order transitions produce effects.

use shimmer_core::{SkeletonAnimation, SkeletonDecoration, TransitionStyle};

use crate::state::SkeletonEffect;
use crate::tree::{NodeId, Size};

/// Rendering, layout and content-reload capabilities supplied by the host
pub trait SkeletonRenderer {
    /// Paint `decoration` over `node`, fading in over `transition`
    fn apply_decoration(
        &mut self,
        node: NodeId,
        decoration: &SkeletonDecoration,
        size: Size,
        transition: TransitionStyle,
    );

    /// Replace the colors of the decoration already on `node`, without flicker
    fn refresh_decoration(&mut self, node: NodeId, decoration: &SkeletonDecoration);

    /// Fit the decoration on `node` to its new size
    fn resize_decoration(&mut self, node: NodeId, size: Size);

    /// Take the decoration off `node`, fading out over `transition`
    fn remove_decoration(&mut self, node: NodeId, transition: TransitionStyle);

    fn start_animation(&mut self, node: NodeId, animation: &SkeletonAnimation);

    fn stop_animation(&mut self, node: NodeId);

    /// Recompute layout for a container whose size or children changed
    fn layout(&mut self, node: NodeId);

    /// Refresh real content on `node`; called as hiding starts when requested
    fn reload_data(&mut self, _node: NodeId) {}
}

/// Forward `effects` to `renderer`, in order
pub fn dispatch<R>(renderer: &mut R, node: NodeId, effects: &[SkeletonEffect])
where
    R: SkeletonRenderer + ?Sized,
{
    for effect in effects {
        match effect {
            SkeletonEffect::Apply {
                decoration,
                size,
                transition,
            } => renderer.apply_decoration(node, decoration, *size, *transition),
            SkeletonEffect::Refresh { decoration } => renderer.refresh_decoration(node, decoration),
            SkeletonEffect::Resize { size } => renderer.resize_decoration(node, *size),
            SkeletonEffect::Remove { transition } => renderer.remove_decoration(node, *transition),
            SkeletonEffect::StartAnimation(animation) => renderer.start_animation(node, animation),
            SkeletonEffect::StopAnimation => renderer.stop_animation(node),
        }
    }
}

/// A renderer call captured by [`RecordingRenderer`]
#[derive(Clone, Debug, PartialEq)]
pub enum RenderCall {
    Apply {
        node: NodeId,
        decoration: SkeletonDecoration,
        size: Size,
        transition: TransitionStyle,
    },
    Refresh {
        node: NodeId,
        decoration: SkeletonDecoration,
    },
    Resize {
        node: NodeId,
        size: Size,
    },
    Remove {
        node: NodeId,
        transition: TransitionStyle,
    },
    StartAnimation {
        node: NodeId,
        animation: SkeletonAnimation,
    },
    StopAnimation {
        node: NodeId,
    },
    Layout {
        node: NodeId,
    },
    ReloadData {
        node: NodeId,
    },
}

impl RenderCall {
    pub fn node(&self) -> NodeId {
        match self {
            RenderCall::Apply { node, .. }
            | RenderCall::Refresh { node, .. }
            | RenderCall::Resize { node, .. }
            | RenderCall::Remove { node, .. }
            | RenderCall::StartAnimation { node, .. }
            | RenderCall::StopAnimation { node }
            | RenderCall::Layout { node }
            | RenderCall::ReloadData { node } => *node,
        }
    }
}

/// Renderer that records every call, for headless hosts and tests
#[derive(Clone, Debug, Default)]
pub struct RecordingRenderer {
    calls: Vec<RenderCall>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> &[RenderCall] {
        &self.calls
    }

    /// Calls that targeted `node`, in order
    pub fn calls_for(&self, node: NodeId) -> Vec<&RenderCall> {
        self.calls.iter().filter(|call| call.node() == node).collect()
    }

    /// Take the recorded calls, leaving the log empty
    pub fn take(&mut self) -> Vec<RenderCall> {
        std::mem::take(&mut self.calls)
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }
}

impl SkeletonRenderer for RecordingRenderer {
    fn apply_decoration(
        &mut self,
        node: NodeId,
        decoration: &SkeletonDecoration,
        size: Size,
        transition: TransitionStyle,
    ) {
        self.calls.push(RenderCall::Apply {
            node,
            decoration: decoration.clone(),
            size,
            transition,
        });
    }

    fn refresh_decoration(&mut self, node: NodeId, decoration: &SkeletonDecoration) {
        self.calls.push(RenderCall::Refresh {
            node,
            decoration: decoration.clone(),
        });
    }

    fn resize_decoration(&mut self, node: NodeId, size: Size) {
        self.calls.push(RenderCall::Resize { node, size });
    }

    fn remove_decoration(&mut self, node: NodeId, transition: TransitionStyle) {
        self.calls.push(RenderCall::Remove { node, transition });
    }

    fn start_animation(&mut self, node: NodeId, animation: &SkeletonAnimation) {
        self.calls.push(RenderCall::StartAnimation {
            node,
            animation: *animation,
        });
    }

    fn stop_animation(&mut self, node: NodeId) {
        self.calls.push(RenderCall::StopAnimation { node });
    }

    fn layout(&mut self, node: NodeId) {
        self.calls.push(RenderCall::Layout { node });
    }

    fn reload_data(&mut self, node: NodeId) {
        self.calls.push(RenderCall::ReloadData { node });
    }
}
