//! This module contains the constraint manager, the only component that
//! should mutate a [`ConstraintSet`].

use crate::{
    constraint::{rewrite::Substitutions, ConstraintSet},
    expr::{ExprContext, ExprData, ExprId},
};

/// A transient operation object that adds constraints to a single
/// [`ConstraintSet`], keeping the stored formula canonical as new facts are
/// learned.
///
/// The manager borrows the set and the expression context for its lifetime;
/// it does not own either. The set outlives the manager and may later be
/// bound to a different one. Exclusive borrowing means at most one manager
/// can be mutating a given set at a time, and that the set cannot be
/// iterated while a manager holds it.
#[derive(Debug)]
pub struct ConstraintManager<'a> {
    /// The expression context in which the managed constraints live.
    context: &'a mut ExprContext,

    /// The constraint set being managed.
    constraints: &'a mut ConstraintSet,
}

impl<'a> ConstraintManager<'a> {
    /// Constructs a new manager that mutates `constraints`, interning any
    /// rewritten expressions into `context`.
    pub fn new(context: &'a mut ExprContext, constraints: &'a mut ConstraintSet) -> Self {
        Self {
            context,
            constraints,
        }
    }

    /// Adds `constraint` to the managed set.
    ///
    /// The constraint is first simplified against the facts already in the
    /// set. The substitutions it implies are then rewritten through every
    /// existing constraint, with any constraint that collapses to a
    /// universally-true value dropped, before the new constraint itself is
    /// appended. A constraint that is already implied by the set collapses
    /// to true and contributes nothing.
    ///
    /// Satisfiability is never adjudicated here: a constraint that is false
    /// in context is still added as-is, and detecting the contradiction is
    /// the decision procedure's job.
    pub fn add_constraint(&mut self, constraint: ExprId) {
        let simplified = Self::simplify_expr(self.context, self.constraints, constraint);
        self.add_constraint_internal(simplified);
    }

    /// Applies `substitutions` to every constraint in the managed set,
    /// replacing each with its rewritten form and dropping any that collapse
    /// to a universally-true value.
    ///
    /// Returns `true` iff at least one constraint's rewritten form differs
    /// from its original. This is a total operation: constraints the
    /// rewriter cannot improve are kept unchanged.
    pub fn rewrite_constraints(&mut self, substitutions: &Substitutions) -> bool {
        let old = std::mem::take(&mut self.constraints.constraints);
        let mut rewritten = Vec::with_capacity(old.len());
        let mut changed = false;

        for constraint in old {
            let new = substitutions.apply(self.context, constraint);
            if new != constraint {
                changed = true;
            }

            // A constraint rewritten down to true carries no information.
            if self.context.is_true(new) {
                continue;
            }
            rewritten.push(new);
        }

        self.constraints.constraints = rewritten;
        changed
    }

    /// Simplifies `expr` using `constraints` as background knowledge,
    /// returning a semantically-equivalent but possibly simpler expression.
    ///
    /// The set is not mutated, making this usable for evaluating an
    /// expression (such as a branch condition) without committing it as a
    /// constraint. The result is deterministic: identical inputs produce a
    /// handle-identical result, so downstream caching on the result is
    /// sound. An empty set returns `expr` unchanged.
    pub fn simplify_expr(
        context: &mut ExprContext,
        constraints: &ConstraintSet,
        expr: ExprId,
    ) -> ExprId {
        if constraints.is_empty() {
            return expr;
        }

        let mut facts = Substitutions::none();
        for constraint in constraints.iter() {
            facts.learn(context, constraint);
        }

        facts.apply(context, expr)
    }

    /// The unchecked append path used once simplification of the incoming
    /// constraint has already been performed.
    fn add_constraint_internal(&mut self, constraint: ExprId) {
        let data = self.context.data(constraint).clone();
        match data {
            ExprData::Const { value } => {
                // True contributes nothing. False is appended verbatim; the
                // set is a valid value even when unsatisfiable.
                if !value.is_true() {
                    self.constraints.push(constraint);
                }
            }
            ExprData::And { left, right } => {
                // A conjunction is two separate facts, each of which can
                // drive its own round of rewriting.
                self.add_constraint_internal(left);
                self.add_constraint_internal(right);
            }
            _ => {
                let facts = Substitutions::from_constraint(self.context, constraint);
                self.rewrite_constraints(&facts);
                self.constraints.push(constraint);
            }
        }
    }
}

#[cfg(test)]
mod test {
    use crate::{
        constraint::{manager::ConstraintManager, rewrite::Substitutions, ConstraintSet},
        expr::{word::Word, ExprContext},
    };

    #[test]
    fn propagates_substitutions_into_existing_constraints() {
        let mut ctx = ExprContext::new();
        let x = ctx.symbol("x");
        let y = ctx.symbol("y");
        let one = ctx.constant(Word::from(1u8));
        let five = ctx.constant(Word::from(5u8));
        let x_is_five = ctx.eq(x, five);
        let x_plus_one = ctx.add(x, one);
        let sum_is_y = ctx.eq(x_plus_one, y);

        let mut set = ConstraintSet::new();
        let mut manager = ConstraintManager::new(&mut ctx, &mut set);
        manager.add_constraint(x_is_five);
        manager.add_constraint(sum_is_y);

        let simplified = ConstraintManager::simplify_expr(&mut ctx, &set, x_plus_one);
        assert_eq!(ctx.as_constant(simplified), Some(Word::from(6u8)));
    }

    #[test]
    fn elides_constraints_already_implied_by_the_set() {
        let mut ctx = ExprContext::new();
        let a = ctx.symbol("a");
        let three = ctx.constant(Word::from(3u8));
        let a_is_three = ctx.eq(three, a);

        let mut set = ConstraintSet::new();
        let mut manager = ConstraintManager::new(&mut ctx, &mut set);
        manager.add_constraint(a_is_three);
        assert_eq!(set.len(), 1);

        let mut manager = ConstraintManager::new(&mut ctx, &mut set);
        manager.add_constraint(a_is_three);
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn elides_non_equality_constraints_already_in_the_set() {
        let mut ctx = ExprContext::new();
        let x = ctx.symbol("x");
        let y = ctx.symbol("y");
        let x_lt_y = ctx.lt(x, y);

        let mut set = ConstraintSet::new();
        let mut manager = ConstraintManager::new(&mut ctx, &mut set);
        manager.add_constraint(x_lt_y);
        manager.add_constraint(x_lt_y);
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn rewriting_with_no_op_is_idempotent() {
        let mut ctx = ExprContext::new();
        let x = ctx.symbol("x");
        let y = ctx.symbol("y");
        let constraint = ctx.lt(x, y);

        let mut set = ConstraintSet::from(vec![constraint]);
        let snapshot = set.clone();

        let mut manager = ConstraintManager::new(&mut ctx, &mut set);
        let none = Substitutions::none();
        assert!(!manager.rewrite_constraints(&none));
        assert!(!manager.rewrite_constraints(&none));
        assert_eq!(set, snapshot);
    }

    #[test]
    fn simplification_is_deterministic() {
        let mut ctx = ExprContext::new();
        let x = ctx.symbol("x");
        let two = ctx.constant(Word::from(2u8));
        let five = ctx.constant(Word::from(5u8));
        let x_is_five = ctx.eq(five, x);
        let x_times_two = ctx.mul(x, two);

        let set = ConstraintSet::from(vec![x_is_five]);
        let first = ConstraintManager::simplify_expr(&mut ctx, &set, x_times_two);
        let second = ConstraintManager::simplify_expr(&mut ctx, &set, x_times_two);
        assert_eq!(first, second);
    }

    #[test]
    fn simplification_against_empty_set_is_the_identity() {
        let mut ctx = ExprContext::new();
        let x = ctx.symbol("x");
        let y = ctx.symbol("y");
        let sum = ctx.add(x, y);

        let set = ConstraintSet::new();
        assert_eq!(ConstraintManager::simplify_expr(&mut ctx, &set, sum), sum);
    }

    #[test]
    fn false_constraints_are_added_verbatim() {
        let mut ctx = ExprContext::new();
        let falsehood = ctx.boolean(false);

        let mut set = ConstraintSet::new();
        let mut manager = ConstraintManager::new(&mut ctx, &mut set);
        manager.add_constraint(falsehood);
        assert_eq!(set.len(), 1);
        assert_eq!(set.iter().next(), Some(falsehood));
    }

    #[test]
    fn conjunctions_are_split_into_their_parts() {
        let mut ctx = ExprContext::new();
        let x = ctx.symbol("x");
        let y = ctx.symbol("y");
        let three = ctx.constant(Word::from(3u8));
        let x_is_three = ctx.eq(three, x);
        let x_lt_y = ctx.lt(x, y);
        let both = ctx.and(x_is_three, x_lt_y);

        let mut set = ConstraintSet::new();
        let mut manager = ConstraintManager::new(&mut ctx, &mut set);
        manager.add_constraint(both);

        assert_eq!(set.len(), 2);
        let stored: Vec<_> = set.iter().collect();
        assert_eq!(stored, vec![x_is_three, x_lt_y]);
    }
}
