//! This module contains the representation of a path's constraint set, which
//! is the conjunction of symbolic facts characterising the inputs that reach
//! the path.

pub mod manager;
pub mod rewrite;

use crate::{
    constant::DEFAULT_CONSTRAINTS_CAPACITY,
    expr::{ExprContext, ExprId},
    utility,
};

/// An ordered accumulation of constraints forming one explored path's
/// logical formula.
///
/// # Ordering
///
/// Insertion order is semantically significant: two sets compare equal only
/// if they contain the same expression handles in the same order. This makes
/// equality usable for detecting whether a rewrite changed anything, and for
/// deduplicating cached simplification results downstream.
///
/// # Canonicalization
///
/// The set itself is a passive container, performing no deduplication,
/// simplification, or satisfiability checking. Keeping the stored formula
/// canonical is the job of [`manager::ConstraintManager`], which should be
/// the only thing mutating a set. [`Self::push`] is the raw append primitive
/// that the manager builds upon; using it directly bypasses
/// canonicalization.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ConstraintSet {
    /// The constraints in insertion order, as handles into the execution's
    /// expression context.
    pub(crate) constraints: Vec<ExprId>,
}

impl ConstraintSet {
    /// Creates a new constraint set without any constraints in it.
    #[must_use]
    pub fn new() -> Self {
        let constraints = Vec::with_capacity(DEFAULT_CONSTRAINTS_CAPACITY);
        Self { constraints }
    }

    /// Checks if the constraint set contains no constraints.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }

    /// Gets the number of constraints in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.constraints.len()
    }

    /// Iterates over the stored constraints in insertion order.
    ///
    /// The iterator borrows the set, so the set cannot be mutated while an
    /// iteration is in progress.
    pub fn iter(&self) -> impl Iterator<Item = ExprId> + '_ {
        self.constraints.iter().copied()
    }

    /// Appends `constraint` at the end of the set.
    ///
    /// This is the raw append primitive: no validation, deduplication, or
    /// simplification is performed. Prefer adding constraints through a
    /// [`manager::ConstraintManager`], which keeps the set canonical.
    pub fn push(&mut self, constraint: ExprId) {
        self.constraints.push(constraint);
    }

    /// Renders each stored constraint as a single-line string with newlines
    /// stripped and whitespace runs collapsed, preserving insertion order.
    ///
    /// Returns an empty vector for the empty set. This exists for logs and
    /// debugging only.
    #[must_use]
    pub fn render(&self, context: &ExprContext) -> Vec<String> {
        self.constraints
            .iter()
            .map(|c| utility::collapse_whitespace(&context.describe(*c)))
            .collect()
    }
}

/// Bulk construction from an existing sequence of constraints.
///
/// Takes ownership of the sequence and performs no simplification, which
/// makes restoring a previously-computed set cheap: when an execution state
/// forks, the child's initial set is a straight copy of the parent's.
impl From<Vec<ExprId>> for ConstraintSet {
    fn from(constraints: Vec<ExprId>) -> Self {
        Self { constraints }
    }
}
