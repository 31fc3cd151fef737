//! Tree error types

use thiserror::Error;

use crate::tree::NodeId;

/// Errors raised while editing a [`SkeletonTree`](crate::tree::SkeletonTree)
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeError {
    /// The node does not exist (never inserted, or removed)
    #[error("Unknown node: {0:?}")]
    UnknownNode(NodeId),

    /// The node is already attached to a parent
    #[error("Node {0:?} already has a parent")]
    AlreadyAttached(NodeId),

    /// Attaching would make a node its own ancestor
    #[error("Attaching {child:?} under {parent:?} would create a cycle")]
    WouldCreateCycle { parent: NodeId, child: NodeId },
}

/// Result type for tree operations
pub type Result<T> = std::result::Result<T, TreeError>;
