//! Predicate-driven lookups over a subtree.
//!
//! The descendant forms walk depth-first in pre-order (document order) and
//! never include the scope node itself. The child forms look one level down.

use crate::{DomTree, ElementData, Node, NodeId};

impl DomTree {
    /// Every node below `scope` for which `filter` holds.
    pub fn nodes_by_filter<F>(&self, scope: NodeId, mut filter: F) -> Vec<NodeId>
    where
        F: FnMut(NodeId, &Node) -> bool,
    {
        self.descendants(scope)
            .filter(|&id| self.get(id).is_some_and(|node| filter(id, node)))
            .collect()
    }

    /// Children of `scope` for which `filter` holds.
    pub fn child_nodes_by_filter<F>(&self, scope: NodeId, mut filter: F) -> Vec<NodeId>
    where
        F: FnMut(NodeId, &Node) -> bool,
    {
        self.children(scope)
            .iter()
            .copied()
            .filter(|&id| self.get(id).is_some_and(|node| filter(id, node)))
            .collect()
    }

    /// Every element below `scope` for which `filter` holds.
    pub fn elements_by_filter<F>(&self, scope: NodeId, mut filter: F) -> Vec<NodeId>
    where
        F: FnMut(NodeId, &ElementData) -> bool,
    {
        self.descendants(scope)
            .filter(|&id| self.as_element(id).is_some_and(|e| filter(id, e)))
            .collect()
    }

    /// Element children of `scope` for which `filter` holds.
    pub fn child_elements_by_filter<F>(&self, scope: NodeId, mut filter: F) -> Vec<NodeId>
    where
        F: FnMut(NodeId, &ElementData) -> bool,
    {
        self.children(scope)
            .iter()
            .copied()
            .filter(|&id| self.as_element(id).is_some_and(|e| filter(id, e)))
            .collect()
    }

    /// Elements below `scope` whose `id` equals `id`, ignoring ASCII case.
    ///
    /// Markup in the wild repeats ids, so every match is returned.
    #[must_use]
    pub fn elements_by_id(&self, scope: NodeId, id: &str) -> Vec<NodeId> {
        self.elements_by_filter(scope, |_, e| {
            e.id().is_some_and(|value| value.eq_ignore_ascii_case(id))
        })
    }

    /// Elements below `scope` whose class list contains `class_name`,
    /// ignoring ASCII case.
    #[must_use]
    pub fn elements_by_class_name(&self, scope: NodeId, class_name: &str) -> Vec<NodeId> {
        self.elements_by_filter(scope, |_, e| e.has_class(class_name))
    }

    /// Elements below `scope` named `tag_name`; `*` matches every element.
    /// Names fold case unless `xml_mode` is set.
    #[must_use]
    pub fn elements_by_tag_name(&self, scope: NodeId, tag_name: &str, xml_mode: bool) -> Vec<NodeId> {
        let any = tag_name == "*";
        self.elements_by_filter(scope, |_, e| any || e.has_name(tag_name, !xml_mode))
    }

    /// Elements below `scope` whose attribute `name` has exactly `value`.
    /// The attribute name folds case unless `xml_mode` is set; the value is
    /// always compared exactly.
    #[must_use]
    pub fn elements_by_attr(
        &self,
        scope: NodeId,
        name: &str,
        value: &str,
        xml_mode: bool,
    ) -> Vec<NodeId> {
        self.elements_by_filter(scope, |_, e| {
            e.attr_value_with_case(name, !xml_mode)
                .is_some_and(|v| v == value)
        })
    }
}
