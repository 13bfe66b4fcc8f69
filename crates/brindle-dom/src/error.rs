use thiserror::Error;

use crate::NodeId;

/// Errors from structural tree mutations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DomError {
    /// The id does not refer to a node in this tree.
    #[error("node {0:?} does not exist in this tree")]
    UnknownNode(NodeId),

    /// The insertion would create a cycle or move the document node.
    #[error("cannot insert {child:?} under {parent:?}: the result would not be a tree")]
    HierarchyRequest {
        /// The intended parent.
        parent: NodeId,
        /// The node being inserted.
        child: NodeId,
    },
}
