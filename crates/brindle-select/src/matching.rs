//! Selector evaluation over a [`DomTree`].

use std::collections::HashSet;

use brindle_dom::{DomTree, ElementData, NodeId};

use crate::selector::{PseudoClass, Selector, Step};

impl Selector {
    /// Run the selector with `scope` as the starting context.
    ///
    /// Each step maps the current working set to a new one; the result is
    /// the set produced by the last step, in document order of discovery
    /// and without duplicates. A selector with no steps selects nothing.
    #[must_use]
    pub fn select(&self, tree: &DomTree, scope: NodeId) -> Vec<NodeId> {
        if self.steps.is_empty() {
            return Vec::new();
        }
        let mut context = vec![scope];
        for step in &self.steps {
            context = apply(step, tree, &context);
            if context.is_empty() {
                break;
            }
        }
        context
    }
}

/// Compile `selector` and run it from `scope`.
#[must_use]
pub fn search(tree: &DomTree, scope: NodeId, selector: &str) -> Vec<NodeId> {
    Selector::parse(selector).select(tree, scope)
}

fn apply(step: &Step, tree: &DomTree, context: &[NodeId]) -> Vec<NodeId> {
    let mut found = Found::default();
    for &node in context {
        match step {
            Step::Descendants(test) => found.extend(
                tree.descendants(node)
                    .filter(|&id| tree.as_element(id).is_some_and(|e| test.matches(e))),
            ),
            Step::Id(id) => found.extend(self_or_descendants(tree, node, |e| {
                e.id().is_some_and(|value| value.eq_ignore_ascii_case(id))
            })),
            Step::Class(class_name) => {
                found.extend(self_or_descendants(tree, node, |e| e.has_class(class_name)));
            }
            Step::Children(test) => found.extend(
                tree.children(node)
                    .iter()
                    .copied()
                    .filter(|&id| tree.as_element(id).is_some_and(|e| test.matches(e))),
            ),
            Step::Adjacent(test) => found.extend(
                tree.next_element_sibling(node)
                    .filter(|&id| tree.as_element(id).is_some_and(|e| test.matches(e))),
            ),
            Step::Siblings(test) => found.extend(
                tree.following_siblings(node)
                    .iter()
                    .copied()
                    .filter(|&id| tree.as_element(id).is_some_and(|e| test.matches(e))),
            ),
            Step::Pseudo(pseudo) => {
                for id in std::iter::once(node).chain(tree.descendants(node)) {
                    if let Some(hit) = match_pseudo(tree, id, *pseudo) {
                        found.push(hit);
                    }
                }
            }
            Step::Attribute(selector) => {
                found.extend(self_or_descendants(tree, node, |e| selector.matches(e)));
            }
            Step::NeverMatch => {}
        }
    }
    found.nodes
}

/// `node` and everything below it, elements only, filtered by `predicate`.
fn self_or_descendants<'a, F>(
    tree: &'a DomTree,
    node: NodeId,
    predicate: F,
) -> impl Iterator<Item = NodeId> + 'a
where
    F: Fn(&ElementData) -> bool + 'a,
{
    std::iter::once(node)
        .chain(tree.descendants(node))
        .filter(move |&id| tree.as_element(id).is_some_and(&predicate))
}

/// The element selected when `pseudo` is tested against `id`. Only `:root`
/// can select a node other than `id` itself.
fn match_pseudo(tree: &DomTree, id: NodeId, pseudo: PseudoClass) -> Option<NodeId> {
    let element = tree.as_element(id)?;
    if pseudo == PseudoClass::Root {
        let top = tree
            .ancestors(id)
            .take_while(|&a| tree.is_element(a))
            .last()
            .unwrap_or(id);
        return Some(top);
    }
    if pseudo == PseudoClass::Empty {
        return tree.children(id).is_empty().then_some(id);
    }

    let parent = tree.parent(id)?;
    let siblings = match pseudo {
        PseudoClass::NthOfType(_)
        | PseudoClass::NthLastOfType(_)
        | PseudoClass::FirstOfType
        | PseudoClass::LastOfType
        | PseudoClass::OnlyOfType => tree.child_elements_named(parent, &element.tag_name),
        _ => tree.child_elements(parent),
    };
    let from_end = |n: usize| {
        let i = siblings.len().checked_sub(n)?.checked_sub(1)?;
        siblings.get(i)
    };
    let hit = match pseudo {
        PseudoClass::NthChild(n) | PseudoClass::NthOfType(n) => siblings.get(n),
        PseudoClass::NthLastChild(n) | PseudoClass::NthLastOfType(n) => from_end(n),
        PseudoClass::FirstChild | PseudoClass::FirstOfType => siblings.first(),
        PseudoClass::LastChild | PseudoClass::LastOfType => siblings.last(),
        PseudoClass::OnlyChild | PseudoClass::OnlyOfType => {
            (siblings.len() == 1).then(|| siblings.first()).flatten()
        }
        PseudoClass::Root | PseudoClass::Empty => None,
    };
    (hit == Some(&id)).then_some(id)
}

/// Ordered set of results.
#[derive(Default)]
struct Found {
    nodes: Vec<NodeId>,
    seen: HashSet<NodeId>,
}

impl Found {
    fn push(&mut self, id: NodeId) {
        if self.seen.insert(id) {
            self.nodes.push(id);
        }
    }
}

impl Extend<NodeId> for Found {
    fn extend<I: IntoIterator<Item = NodeId>>(&mut self, iter: I) {
        for id in iter {
            self.push(id);
        }
    }
}
