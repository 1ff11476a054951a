//! Frozen, queryable hierarchy.

use std::hash::Hash;

use tracing::instrument;

use crate::domain::arena::{Children, TreeArena, TreeNode};
use crate::domain::builder::HierarchyBuilder;
use crate::domain::error::{DomainError, HierarchyResult};

/// Immutable tree over a flat set of elements.
///
/// Produced by [`HierarchyBuilder::build`]. Every element is either a
/// first-level element or has exactly one parent. All queries take `&self`,
/// so a hierarchy can be shared across threads (e.g. behind an `Arc`) without
/// further synchronization.
///
/// Elements are identified by `Eq` and `Hash`: two values that compare equal
/// are the same node.
///
/// # Example
/// ```
/// use hierarchy::domain::Hierarchy;
///
/// let mut builder = Hierarchy::builder();
/// builder.add_root("a")?.add_child("a", "b")?;
/// let hierarchy = builder.build()?;
///
/// assert_eq!(hierarchy.parent(&"b")?, Some(&"a"));
/// assert_eq!(hierarchy.children(Some(&"a"))?.collect::<Vec<_>>(), vec![&"b"]);
/// # Ok::<(), hierarchy::domain::DomainError<&str>>(())
/// ```
#[derive(Debug, Clone)]
pub struct Hierarchy<E> {
    tree: TreeArena<E>,
}

impl<E> Default for Hierarchy<E> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<E> Hierarchy<E> {
    /// The hierarchy with no elements.
    pub fn empty() -> Self {
        Self {
            tree: TreeArena::default(),
        }
    }

    /// A fresh builder.
    pub fn builder() -> HierarchyBuilder<E> {
        HierarchyBuilder::new()
    }

    pub(crate) fn from_arena(tree: TreeArena<E>) -> Self {
        Self { tree }
    }

    pub(crate) fn arena(&self) -> &TreeArena<E> {
        &self.tree
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.len() == 0
    }

    /// All participating elements, in no particular order.
    pub fn element_set(&self) -> impl ExactSizeIterator<Item = &E> + '_ {
        self.tree.elements()
    }

    /// First-level elements in registration order.
    pub fn first_level(&self) -> Children<'_, E> {
        self.tree.nodes(self.tree.roots())
    }

    /// Number of levels; 0 for the empty hierarchy, 1 when there are only
    /// first-level elements.
    pub fn depth(&self) -> usize {
        self.tree.depth()
    }

    /// Depth-first pre-order traversal, first-level elements left to right.
    pub fn iter(&self) -> impl Iterator<Item = &E> + '_ {
        self.tree.iter().map(|node| &node.element)
    }

    /// Depth-first post-order traversal: every element after its children.
    pub fn iter_postorder(&self) -> impl Iterator<Item = &E> + '_ {
        self.tree.iter_postorder().map(|node| &node.element)
    }

    /// Elements without children, in pre-order.
    pub fn leaves(&self) -> Vec<&E> {
        self.tree
            .iter()
            .filter(|node| node.children.is_empty())
            .map(|node| &node.element)
            .collect()
    }

    /// Every path from a first-level element down to a leaf, in pre-order.
    pub fn branches(&self) -> Vec<Vec<&E>> {
        self.tree
            .iter()
            .filter(|node| node.children.is_empty())
            .map(|leaf| {
                let mut branch = self.parent_chain(leaf);
                branch.reverse();
                branch.push(&leaf.element);
                branch
            })
            .collect()
    }

    /// Parents of `node`, nearest first.
    fn parent_chain<'a>(&'a self, node: &'a TreeNode<E>) -> Vec<&'a E> {
        let mut chain = Vec::new();
        let mut current = node.parent.and_then(|idx| self.tree.get_node(idx));
        while let Some(parent) = current {
            chain.push(&parent.element);
            current = parent.parent.and_then(|idx| self.tree.get_node(idx));
        }
        chain
    }
}

impl<E: Eq + Hash + Clone> Hierarchy<E> {
    /// Whether `element` is a member.
    pub fn contains(&self, element: &E) -> bool {
        self.tree.index_of(element).is_some()
    }

    /// Fails with [`DomainError::NotAMember`] unless `element` is a member.
    pub fn check_member(&self, element: &E) -> HierarchyResult<(), E> {
        self.member(element).map(|_| ())
    }

    fn member(&self, element: &E) -> HierarchyResult<&TreeNode<E>, E> {
        self.tree
            .index_of(element)
            .and_then(|idx| self.tree.get_node(idx))
            .ok_or_else(|| DomainError::NotAMember(element.clone()))
    }

    /// Direct children of `element` in registration order.
    ///
    /// `None` asks for the first level. A member without children yields an
    /// empty iterator; a non-member is an error.
    #[instrument(level = "trace", skip_all)]
    pub fn children(&self, element: Option<&E>) -> HierarchyResult<Children<'_, E>, E> {
        match element {
            None => Ok(self.first_level()),
            Some(element) => {
                let node = self.member(element)?;
                Ok(self.tree.nodes(&node.children))
            }
        }
    }

    /// Parent of `element`, `None` for first-level elements.
    #[instrument(level = "trace", skip_all)]
    pub fn parent(&self, element: &E) -> HierarchyResult<Option<&E>, E> {
        let node = self.member(element)?;
        Ok(node
            .parent
            .and_then(|idx| self.tree.get_node(idx))
            .map(|parent| &parent.element))
    }

    /// Chain of parents of `element` up to its first-level element, nearest first.
    pub fn ancestors(&self, element: &E) -> HierarchyResult<Vec<&E>, E> {
        let node = self.member(element)?;
        Ok(self.parent_chain(node))
    }
}

impl<E: Eq + Hash + Clone> PartialEq for Hierarchy<E> {
    /// Same first level in the same order, and every member has the same
    /// children in the same order.
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self.first_level().eq(other.first_level())
            && self.tree.iter().all(|node| {
                match other
                    .tree
                    .index_of(&node.element)
                    .and_then(|idx| other.tree.get_node(idx))
                {
                    Some(theirs) => self
                        .tree
                        .nodes(&node.children)
                        .eq(other.tree.nodes(&theirs.children)),
                    None => false,
                }
            })
    }
}

impl<E: Eq + Hash + Clone> Eq for Hierarchy<E> {}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Hierarchy<&'static str> {
        let mut builder = Hierarchy::builder();
        builder
            .add_root("a")
            .unwrap()
            .add_children("a", ["b", "d"])
            .unwrap()
            .add_child("b", "c")
            .unwrap()
            .add_root("e")
            .unwrap();
        builder.build().unwrap()
    }

    #[test]
    fn test_empty_hierarchy() {
        let hierarchy: Hierarchy<&str> = Hierarchy::empty();
        assert!(hierarchy.is_empty());
        assert_eq!(hierarchy.depth(), 0);
        assert_eq!(hierarchy.first_level().count(), 0);
        assert!(hierarchy.leaves().is_empty());
        assert!(hierarchy.branches().is_empty());
        assert_eq!(hierarchy, Hierarchy::default());
    }

    #[test]
    fn test_branches_run_from_first_level_to_leaf() {
        let h = sample();
        let branches = h.branches();
        assert_eq!(
            branches,
            vec![vec![&"a", &"b", &"c"], vec![&"a", &"d"], vec![&"e"]]
        );
    }

    #[test]
    fn test_parent_chain_of_root_is_empty() {
        let hierarchy = sample();
        assert!(hierarchy.ancestors(&"e").unwrap().is_empty());
        assert_eq!(hierarchy.ancestors(&"c").unwrap(), vec![&"b", &"a"]);
    }

    #[test]
    fn test_equality_ignores_registration_interleaving() {
        let mut builder = Hierarchy::builder();
        builder
            .add_root("a")
            .unwrap()
            .add_root("e")
            .unwrap()
            .add_child("a", "b")
            .unwrap()
            .add_child("b", "c")
            .unwrap()
            .add_child("a", "d")
            .unwrap();
        assert_eq!(builder.build().unwrap(), sample());
    }

    #[test]
    fn test_equality_respects_child_order() {
        let mut builder = Hierarchy::builder();
        builder
            .add_root("a")
            .unwrap()
            .add_children("a", ["d", "b"])
            .unwrap()
            .add_child("b", "c")
            .unwrap()
            .add_root("e")
            .unwrap();
        assert_ne!(builder.build().unwrap(), sample());
    }
}
