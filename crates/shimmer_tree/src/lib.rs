//! Shimmer Tree
//!
//! Skeleton placeholders over a mirrored view tree.
//!
//! The host mirrors its view hierarchy into a [`SkeletonTree`], tagging each
//! view with a [`Capability`]. [`Skeletons`] then walks the tree from any root
//! and drives a per-node state machine, forwarding the resulting paint,
//! animation and layout work to a host [`SkeletonRenderer`].
//!
//! # Modules
//!
//! - [`tree`]: arena of mirrored views with sizes and layout flags
//! - [`walker`]: leaf/branch classification and pre-order traversal
//! - [`state`]: per-node skeleton phase and effects
//! - [`renderer`]: the host rendering seam
//! - [`flow`]: observer hooks around top-level operations
//! - [`skeletons`]: the public show/update/layout/hide engine

pub mod error;
pub mod flow;
pub mod renderer;
pub mod skeletonable;
pub mod skeletons;
pub mod state;
pub mod tree;
pub mod walker;

pub use error::{Result, TreeError};
pub use flow::{FlowEvent, FlowLog, FlowObserver};
pub use renderer::{dispatch, RecordingRenderer, RenderCall, SkeletonRenderer};
pub use skeletonable::{Capability, ChildList, SkeletonNodes, Skeletonable};
pub use skeletons::{PendingShow, Skeletons};
pub use state::{Effects, NodeSkeletonState, SkeletonEffect, SkeletonPhase};
pub use tree::{NodeId, Size, SkeletonTree};
pub use walker::{traverse, NodeClass, TreeWalker, Visit};
