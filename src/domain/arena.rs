use std::collections::HashMap;
use std::hash::Hash;
use std::iter::FusedIterator;
use std::slice;

use generational_arena::{Arena, Index};

/// Tree node in the arena-based hierarchy structure.
#[derive(Debug, Clone)]
pub(crate) struct TreeNode<E> {
    /// Element stored at this node
    pub(crate) element: E,
    /// Index of parent node in the arena, None for first-level nodes
    pub(crate) parent: Option<Index>,
    /// Indices of child nodes in the arena, in registration order
    pub(crate) children: Vec<Index>,
}

/// Arena-based tree structure backing a frozen hierarchy.
///
/// Nodes reference each other by arena index; `index` maps every element to
/// its node so membership and parent lookups are O(1).
#[derive(Debug, Clone)]
pub(crate) struct TreeArena<E> {
    arena: Arena<TreeNode<E>>,
    index: HashMap<E, Index>,
    roots: Vec<Index>,
}

impl<E> Default for TreeArena<E> {
    fn default() -> Self {
        Self {
            arena: Arena::new(),
            index: HashMap::new(),
            roots: Vec::new(),
        }
    }
}

impl<E: Eq + Hash + Clone> TreeArena<E> {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            arena: Arena::with_capacity(capacity),
            index: HashMap::with_capacity(capacity),
            roots: Vec::new(),
        }
    }

    /// Inserts a node and links it below `parent`, or as a root when `None`.
    pub(crate) fn insert_node(&mut self, element: E, parent: Option<Index>) -> Index {
        let node = TreeNode {
            element: element.clone(),
            parent,
            children: Vec::new(),
        };
        let node_idx = self.arena.insert(node);
        self.index.insert(element, node_idx);

        if let Some(parent_idx) = parent {
            if let Some(parent) = self.arena.get_mut(parent_idx) {
                parent.children.push(node_idx);
            }
        } else {
            self.roots.push(node_idx);
        }

        node_idx
    }

    pub(crate) fn index_of(&self, element: &E) -> Option<Index> {
        self.index.get(element).copied()
    }
}

impl<E> TreeArena<E> {
    pub(crate) fn get_node(&self, idx: Index) -> Option<&TreeNode<E>> {
        self.arena.get(idx)
    }

    pub(crate) fn len(&self) -> usize {
        self.arena.len()
    }

    pub(crate) fn roots(&self) -> &[Index] {
        &self.roots
    }

    pub(crate) fn elements(&self) -> impl ExactSizeIterator<Item = &E> + '_ {
        self.index.keys()
    }

    /// Elements stored at `indices`, in order.
    pub(crate) fn nodes<'a>(&'a self, indices: &'a [Index]) -> Children<'a, E> {
        Children {
            arena: &self.arena,
            indices: indices.iter(),
        }
    }

    pub(crate) fn iter(&self) -> TreeIterator<'_, E> {
        TreeIterator::new(self)
    }

    pub(crate) fn iter_postorder(&self) -> PostOrderIterator<'_, E> {
        PostOrderIterator::new(self)
    }

    /// Number of levels below and including the first level.
    pub(crate) fn depth(&self) -> usize {
        let mut max_depth = 0;
        let mut stack: Vec<(Index, usize)> = self.roots.iter().map(|&root| (root, 1)).collect();

        while let Some((node_idx, level)) = stack.pop() {
            max_depth = max_depth.max(level);
            if let Some(node) = self.get_node(node_idx) {
                stack.extend(node.children.iter().map(|&child| (child, level + 1)));
            }
        }

        max_depth
    }
}

/// Ordered iterator over the direct children of a hierarchy element.
#[derive(Debug, Clone)]
pub struct Children<'a, E> {
    arena: &'a Arena<TreeNode<E>>,
    indices: slice::Iter<'a, Index>,
}

impl<'a, E> Iterator for Children<'a, E> {
    type Item = &'a E;

    fn next(&mut self) -> Option<Self::Item> {
        let idx = self.indices.next()?;
        self.arena.get(*idx).map(|node| &node.element)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.indices.size_hint()
    }
}

impl<E> DoubleEndedIterator for Children<'_, E> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let idx = self.indices.next_back()?;
        self.arena.get(*idx).map(|node| &node.element)
    }
}

// Every index handed out by the arena stays valid: frozen arenas never remove.
impl<E> ExactSizeIterator for Children<'_, E> {}

impl<E> FusedIterator for Children<'_, E> {}

/// Depth-first pre-order traversal, first-level nodes left to right.
pub(crate) struct TreeIterator<'a, E> {
    arena: &'a TreeArena<E>,
    stack: Vec<Index>,
}

impl<'a, E> TreeIterator<'a, E> {
    fn new(arena: &'a TreeArena<E>) -> Self {
        let stack = arena.roots().iter().rev().copied().collect();
        Self { arena, stack }
    }
}

impl<'a, E> Iterator for TreeIterator<'a, E> {
    type Item = &'a TreeNode<E>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(current_idx) = self.stack.pop() {
            if let Some(node) = self.arena.get_node(current_idx) {
                // Push children in reverse order for left-to-right traversal
                self.stack.extend(node.children.iter().rev());
                return Some(node);
            }
        }
        None
    }
}

/// Depth-first post-order traversal: children before their parent.
pub(crate) struct PostOrderIterator<'a, E> {
    arena: &'a TreeArena<E>,
    stack: Vec<(Index, bool)>,
}

impl<'a, E> PostOrderIterator<'a, E> {
    fn new(arena: &'a TreeArena<E>) -> Self {
        let stack = arena
            .roots()
            .iter()
            .rev()
            .map(|&root| (root, false))
            .collect();
        Self { arena, stack }
    }
}

impl<'a, E> Iterator for PostOrderIterator<'a, E> {
    type Item = &'a TreeNode<E>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((current_idx, visited)) = self.stack.pop() {
            if let Some(node) = self.arena.get_node(current_idx) {
                if !visited {
                    self.stack.push((current_idx, true));
                    for &child in node.children.iter().rev() {
                        self.stack.push((child, false));
                    }
                } else {
                    return Some(node);
                }
            }
        }
        None
    }
}
