//! Structural edits: attaching, moving and removing nodes.
//!
//! Every public method here keeps the two directions of the parent/child
//! relation in agreement: a node lists `c` among its children exactly when
//! `c`'s parent is that node.

use crate::{DomError, DomTree, NodeId, NodeType};

impl DomTree {
    /// Allocate a node and append it to `parent` in one step.
    ///
    /// This is the builder's fast path. `parent` must be a node of this tree;
    /// a fresh node can never form a cycle, so no other checks are made.
    pub fn alloc_child(&mut self, parent: NodeId, node_type: NodeType) -> NodeId {
        let id = self.alloc(node_type);
        self.link(parent, id, None);
        id
    }

    /// Append `child` as the last child of `parent`, detaching it from its
    /// current parent first.
    ///
    /// # Errors
    ///
    /// [`DomError::UnknownNode`] if either id is not in this tree, and
    /// [`DomError::HierarchyRequest`] if `child` is the document node, is
    /// `parent` itself, or is an ancestor of `parent`.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        self.check_insert(parent, child)?;
        let _ = self.unlink(child);
        self.link(parent, child, None);
        Ok(())
    }

    /// Insert `child` among `parent`'s children at `index`. An index past the
    /// end appends. The child is detached from its current parent first, so
    /// `index` refers to the child list after that removal.
    ///
    /// # Errors
    ///
    /// Same as [`DomTree::append_child`].
    pub fn insert_child(
        &mut self,
        parent: NodeId,
        child: NodeId,
        index: usize,
    ) -> Result<(), DomError> {
        self.check_insert(parent, child)?;
        let _ = self.unlink(child);
        self.link(parent, child, Some(index));
        Ok(())
    }

    /// Remove `child` from `parent`'s children. The child stays in the arena,
    /// detached. Returns false if `child` was not a child of `parent`.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> bool {
        if self.parent(child) != Some(parent) {
            return false;
        }
        self.unlink(child).is_some()
    }

    /// Detach `node` from its parent. Returns the former parent.
    pub fn detach(&mut self, node: NodeId) -> Option<NodeId> {
        self.unlink(node)
    }

    /// Move `node` under `new_parent` (as its last child), or detach it when
    /// `new_parent` is `None`. Returns the former parent.
    ///
    /// # Errors
    ///
    /// Same as [`DomTree::append_child`]; on error the tree is unchanged.
    pub fn set_parent(
        &mut self,
        node: NodeId,
        new_parent: Option<NodeId>,
    ) -> Result<Option<NodeId>, DomError> {
        match new_parent {
            Some(parent) => {
                self.check_insert(parent, node)?;
                let old = self.unlink(node);
                self.link(parent, node, None);
                Ok(old)
            }
            None => {
                if !self.contains(node) {
                    return Err(DomError::UnknownNode(node));
                }
                Ok(self.unlink(node))
            }
        }
    }

    /// Detach every child of `parent` and return them in their former order.
    pub fn clear_children(&mut self, parent: NodeId) -> Vec<NodeId> {
        let Some(node) = self.get_mut(parent) else {
            return Vec::new();
        };
        let children = std::mem::take(&mut node.children);
        for &child in &children {
            if let Some(c) = self.get_mut(child) {
                c.parent = None;
            }
        }
        children
    }

    /// Deep-copy the subtree rooted at `node` of `source` into this tree.
    /// The copy is detached; returns its id, or `None` if `node` is not in
    /// `source`.
    pub fn import_subtree(&mut self, source: &DomTree, node: NodeId) -> Option<NodeId> {
        let root = self.alloc(source.get(node)?.node_type.clone());
        let mut stack = vec![(node, root)];
        while let Some((from, to)) = stack.pop() {
            for &child in source.children(from) {
                let Some(original) = source.get(child) else {
                    continue;
                };
                let copy = self.alloc_child(to, original.node_type.clone());
                stack.push((child, copy));
            }
        }
        Some(root)
    }

    fn check_insert(&self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        for id in [parent, child] {
            if !self.contains(id) {
                return Err(DomError::UnknownNode(id));
            }
        }
        let is_document = matches!(self.node_type(child), Some(NodeType::Document));
        if is_document || parent == child || self.is_descendant_of(parent, child) {
            return Err(DomError::HierarchyRequest { parent, child });
        }
        Ok(())
    }

    fn link(&mut self, parent: NodeId, child: NodeId, index: Option<usize>) {
        let Some(p) = self.get_mut(parent) else {
            return;
        };
        match index {
            Some(i) if i < p.children.len() => p.children.insert(i, child),
            _ => p.children.push(child),
        }
        if let Some(c) = self.get_mut(child) {
            c.parent = Some(parent);
        }
    }

    fn unlink(&mut self, child: NodeId) -> Option<NodeId> {
        let parent = self.get_mut(child)?.parent.take()?;
        if let Some(p) = self.get_mut(parent) {
            p.children.retain(|&c| c != child);
        }
        Some(parent)
    }
}
