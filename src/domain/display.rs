//! Rendering hierarchies as `termtree` trees.

use std::fmt;

use generational_arena::Index;
use termtree::Tree;
use tracing::instrument;

use crate::domain::arena::TreeArena;
use crate::domain::hierarchy::Hierarchy;

pub trait TreeConvert {
    /// Converts into a printable tree.
    ///
    /// A single first-level element becomes the tree root; otherwise all
    /// first-level elements hang below `label`.
    fn to_tree(&self, label: &str) -> Tree<String>;
}

impl<E: fmt::Display> TreeConvert for Hierarchy<E> {
    #[instrument(level = "debug", skip(self))]
    fn to_tree(&self, label: &str) -> Tree<String> {
        let tree = self.arena();

        fn build_tree<E: fmt::Display>(tree: &TreeArena<E>, node_idx: Index) -> Tree<String> {
            match tree.get_node(node_idx) {
                Some(node) => Tree::new(node.element.to_string()).with_leaves(
                    node.children
                        .iter()
                        .map(|&child_idx| build_tree(tree, child_idx)),
                ),
                None => Tree::new(String::new()),
            }
        }

        match tree.roots() {
            [root] => build_tree(tree, *root),
            roots => Tree::new(label.to_string())
                .with_leaves(roots.iter().map(|&root| build_tree(tree, root))),
        }
    }
}

impl<E: fmt::Display> fmt::Display for Hierarchy<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_tree("."))
    }
}
