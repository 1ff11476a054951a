//! Builder accumulating element/parent registrations before freezing.

use std::collections::{HashMap, HashSet, VecDeque};
use std::hash::Hash;

use tracing::{debug, instrument, trace};

use crate::domain::arena::TreeArena;
use crate::domain::error::{DomainError, HierarchyResult};
use crate::domain::hierarchy::Hierarchy;

/// Mutable accumulator for a [`Hierarchy`].
///
/// Parents must be registered before their children, so registrations can
/// never form a cycle. Nothing is validated globally until [`build`].
///
/// [`build`]: HierarchyBuilder::build
#[derive(Debug, Clone)]
pub struct HierarchyBuilder<E> {
    elements: HashSet<E>,
    first_level: Vec<E>,
    parents: HashMap<E, E>,
    children: HashMap<E, Vec<E>>,
}

impl<E> Default for HierarchyBuilder<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> HierarchyBuilder<E> {
    pub fn new() -> Self {
        Self {
            elements: HashSet::new(),
            first_level: Vec::new(),
            parents: HashMap::new(),
            children: HashMap::new(),
        }
    }

    /// Every registered element.
    pub fn elements(&self) -> &HashSet<E> {
        &self.elements
    }

    /// First-level elements in registration order.
    pub fn first_level(&self) -> &[E] {
        &self.first_level
    }

    /// Child to parent map.
    pub fn parents(&self) -> &HashMap<E, E> {
        &self.parents
    }

    /// Parent to ordered children multimap.
    pub fn children(&self) -> &HashMap<E, Vec<E>> {
        &self.children
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

impl<E: Eq + Hash + Clone> HierarchyBuilder<E> {
    pub fn contains(&self, element: &E) -> bool {
        self.elements.contains(element)
    }

    /// Registers a first-level element.
    #[instrument(level = "trace", skip_all)]
    pub fn add_root(&mut self, element: E) -> HierarchyResult<&mut Self, E> {
        if self.elements.contains(&element) {
            return Err(DomainError::DuplicateElement(element));
        }
        self.elements.insert(element.clone());
        self.first_level.push(element);
        trace!(first_level = self.first_level.len(), "root registered");
        Ok(self)
    }

    /// Registers `child` below an already registered `parent`.
    #[instrument(level = "trace", skip_all)]
    pub fn add_child(&mut self, parent: E, child: E) -> HierarchyResult<&mut Self, E> {
        if !self.elements.contains(&parent) {
            return Err(DomainError::UnknownParent(parent));
        }
        if self.elements.contains(&child) {
            return Err(DomainError::DuplicateElement(child));
        }
        self.elements.insert(child.clone());
        self.parents.insert(child.clone(), parent.clone());
        self.children.entry(parent).or_default().push(child);
        trace!(elements = self.elements.len(), "child registered");
        Ok(self)
    }

    /// Registers each of `children` below `parent`, stopping at the first error.
    pub fn add_children<I>(&mut self, parent: E, children: I) -> HierarchyResult<&mut Self, E>
    where
        I: IntoIterator<Item = E>,
    {
        for child in children {
            self.add_child(parent.clone(), child)?;
        }
        Ok(self)
    }

    /// Validates the registrations and freezes them into a [`Hierarchy`].
    ///
    /// The result owns copies of the registered elements; registering more
    /// elements afterwards does not affect it.
    #[instrument(level = "debug", skip(self), fields(elements = self.elements.len()))]
    pub fn build(&self) -> HierarchyResult<Hierarchy<E>, E> {
        self.check_counts()?;
        self.check_links()?;
        let tree = materialize(
            self.first_level.clone(),
            self.children.clone(),
            &self.elements,
        )?;
        debug!(
            first_level = tree.roots().len(),
            depth = tree.depth(),
            "hierarchy built"
        );
        Ok(Hierarchy::from_arena(tree))
    }

    /// Consuming variant of [`build`](HierarchyBuilder::build).
    ///
    /// Registered elements move into the hierarchy instead of being copied.
    #[instrument(level = "debug", skip(self), fields(elements = self.elements.len()))]
    pub fn into_hierarchy(self) -> HierarchyResult<Hierarchy<E>, E> {
        self.check_counts()?;
        self.check_links()?;
        let tree = materialize(self.first_level, self.children, &self.elements)?;
        debug!(first_level = tree.roots().len(), "hierarchy built");
        Ok(Hierarchy::from_arena(tree))
    }

    /// Every element is either first-level or has exactly one parent.
    fn check_counts(&self) -> HierarchyResult<(), E> {
        if self.elements.len() != self.first_level.len() + self.parents.len() {
            return Err(DomainError::InconsistentHierarchy {
                elements: self.elements.len(),
                first_level: self.first_level.len(),
                children: self.parents.len(),
            });
        }
        Ok(())
    }

    /// Parent map and child multimap reference members only and are inverses.
    fn check_links(&self) -> HierarchyResult<(), E> {
        let mut seen: HashSet<&E> = HashSet::with_capacity(self.elements.len());

        for root in &self.first_level {
            if !self.elements.contains(root) {
                return Err(DomainError::DanglingReference(root.clone()));
            }
            if !seen.insert(root) {
                return Err(DomainError::DuplicateElement(root.clone()));
            }
            if self.parents.contains_key(root) {
                return Err(DomainError::ParentMismatch(root.clone()));
            }
        }

        for (parent, children) in &self.children {
            if !self.elements.contains(parent) {
                return Err(DomainError::DanglingReference(parent.clone()));
            }
            for child in children {
                if !self.elements.contains(child) {
                    return Err(DomainError::DanglingReference(child.clone()));
                }
                if self.parents.get(child) != Some(parent) {
                    return Err(DomainError::ParentMismatch(child.clone()));
                }
                if !seen.insert(child) {
                    return Err(DomainError::DuplicateElement(child.clone()));
                }
            }
        }

        // every parent entry must have been listed in the multimap
        if let Some(child) = self.parents.keys().find(|child| !seen.contains(child)) {
            return Err(DomainError::ParentMismatch(child.clone()));
        }
        Ok(())
    }
}

/// Breadth-first fill of an arena, rejecting anything not reachable from the
/// first level.
fn materialize<E: Eq + Hash + Clone>(
    first_level: Vec<E>,
    mut children: HashMap<E, Vec<E>>,
    elements: &HashSet<E>,
) -> HierarchyResult<TreeArena<E>, E> {
    let mut tree = TreeArena::with_capacity(elements.len());
    let mut queue: VecDeque<_> = first_level.into_iter().map(|root| (root, None)).collect();

    while let Some((element, parent_idx)) = queue.pop_front() {
        if tree.index_of(&element).is_some() {
            return Err(DomainError::CycleDetected(element));
        }
        let below = children.remove(&element);
        let node_idx = tree.insert_node(element, parent_idx);
        if let Some(below) = below {
            queue.extend(below.into_iter().map(|child| (child, Some(node_idx))));
        }
    }

    // unreachable elements can only hang off a cycle
    if let Some(stranded) = elements.iter().find(|e| tree.index_of(e).is_none()) {
        return Err(DomainError::CycleDetected(stranded.clone()));
    }
    Ok(tree)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain() -> HierarchyBuilder<&'static str> {
        let mut builder = HierarchyBuilder::new();
        builder
            .add_root("a")
            .unwrap()
            .add_child("a", "b")
            .unwrap()
            .add_child("b", "c")
            .unwrap();
        builder
    }

    #[test]
    fn test_unknown_parent_is_checked_before_duplicate_child() {
        let mut builder = chain();
        assert_eq!(
            builder.add_child("x", "a").unwrap_err(),
            DomainError::UnknownParent("x")
        );
    }

    #[test]
    fn test_failed_registration_leaves_builder_untouched() {
        let mut builder = chain();
        let _ = builder.add_child("a", "c");
        let _ = builder.add_root("b");
        assert_eq!(builder.len(), 3);
        assert_eq!(builder.first_level(), &["a"]);
        assert_eq!(builder.children()[&"a"], vec!["b"]);
    }

    #[test]
    fn test_count_mismatch_is_inconsistent() {
        let mut builder = chain();
        builder.elements.insert("orphan");
        assert_eq!(
            builder.build().unwrap_err(),
            DomainError::InconsistentHierarchy {
                elements: 4,
                first_level: 1,
                children: 2,
            }
        );
    }

    #[test]
    fn test_child_listed_under_wrong_parent_is_rejected() {
        let mut builder = chain();
        builder.children.get_mut(&"b").unwrap().clear();
        builder.children.get_mut(&"a").unwrap().push("c");
        assert_eq!(
            builder.build().unwrap_err(),
            DomainError::ParentMismatch("c")
        );
    }

    #[test]
    fn test_parent_entry_missing_from_children_is_rejected() {
        let mut builder = chain();
        builder.elements.insert("d");
        builder.parents.insert("d", "a");
        assert_eq!(
            builder.build().unwrap_err(),
            DomainError::ParentMismatch("d")
        );
    }

    #[test]
    fn test_root_with_parent_entry_is_rejected() {
        let mut builder = chain();
        builder.elements.insert("extra");
        builder.parents.insert("a", "b");
        assert_eq!(
            builder.build().unwrap_err(),
            DomainError::ParentMismatch("a")
        );
    }

    #[test]
    fn test_dangling_parent_is_rejected() {
        let mut builder = chain();
        builder.children.insert("ghost", vec![]);
        assert_eq!(
            builder.build().unwrap_err(),
            DomainError::DanglingReference("ghost")
        );
    }

    #[test]
    fn test_cycle_is_rejected() {
        // x <-> y, detached from the first level; counts still add up
        let mut builder = chain();
        builder.elements.extend(["x", "y"]);
        builder.parents.insert("x", "y");
        builder.parents.insert("y", "x");
        builder.children.insert("x", vec!["y"]);
        builder.children.insert("y", vec!["x"]);

        let err = builder.build().unwrap_err();
        assert!(
            matches!(err, DomainError::CycleDetected("x") | DomainError::CycleDetected("y")),
            "unexpected error: {err}"
        );
    }

    #[test]
    fn test_into_hierarchy_matches_build() {
        let builder = chain();
        let built = builder.build().unwrap();
        assert_eq!(builder.into_hierarchy().unwrap(), built);
    }

    #[test]
    fn test_into_hierarchy_runs_the_same_checks() {
        let mut builder = chain();
        builder.elements.extend(["x", "y"]);
        builder.parents.insert("x", "y");
        builder.parents.insert("y", "x");
        builder.children.insert("x", vec!["y"]);
        builder.children.insert("y", vec!["x"]);
        assert!(matches!(
            builder.into_hierarchy().unwrap_err(),
            DomainError::CycleDetected(_)
        ));

        let mut builder = chain();
        builder.elements.insert("orphan");
        assert!(matches!(
            builder.into_hierarchy().unwrap_err(),
            DomainError::InconsistentHierarchy { .. }
        ));
    }
}
