//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Errors raised while building or querying a hierarchy.
///
/// Each variant carries the offending element back to the caller.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError<E> {
    #[error("element already registered: {0:?}")]
    DuplicateElement(E),

    #[error("parent not registered: {0:?}")]
    UnknownParent(E),

    #[error(
        "inconsistent hierarchy: {elements} elements, {first_level} first-level, {children} children"
    )]
    InconsistentHierarchy {
        elements: usize,
        first_level: usize,
        children: usize,
    },

    #[error("element referenced but not registered: {0:?}")]
    DanglingReference(E),

    #[error("parent and child links disagree for: {0:?}")]
    ParentMismatch(E),

    #[error("cycle detected in hierarchy at: {0:?}")]
    CycleDetected(E),

    #[error("not a member of the hierarchy: {0:?}")]
    NotAMember(E),
}

/// Result type for hierarchy operations over elements of type `E`.
pub type HierarchyResult<T, E> = Result<T, DomainError<E>>;
