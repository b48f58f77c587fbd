//! This module contains the constraint rewriter, the transformation that
//! substitutes learned facts into existing expressions to keep a path's
//! formula minimal.

use std::collections::HashMap;

use crate::expr::{ExprContext, ExprData, ExprId};

/// A set of substitutions to be applied over expressions.
///
/// The rewriter is a plain value carrying a handle-to-handle map; applying
/// it dispatches over the fixed set of expression shapes and rebuilds
/// through the context's folding constructors, so anything that becomes
/// constant during substitution is folded on the way back up.
///
/// An empty `Substitutions` is the uniform no-op rewriter: applying it
/// returns every expression unchanged.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Substitutions {
    map: HashMap<ExprId, ExprId>,
}

impl Substitutions {
    /// Creates the no-op rewriter containing no substitutions.
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// Checks whether the rewriter contains no substitutions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Records the substitution of `from` by `to`.
    ///
    /// Where a substitution for `from` has already been learned, the earlier
    /// fact is kept; facts are accumulated in learning order and the first
    /// one wins.
    pub fn insert(&mut self, from: ExprId, to: ExprId) {
        self.map.entry(from).or_insert(to);
    }

    /// Derives the substitutions implied by asserting `constraint`.
    ///
    /// An equality against a constant is the direct-substitution baseline:
    /// the symbolic side maps to the constant. Every other shape yields only
    /// the fact that the constraint itself is true; no richer pattern is
    /// assumed, as a richer rule could mask a genuine contradiction.
    #[must_use]
    pub fn from_constraint(context: &mut ExprContext, constraint: ExprId) -> Self {
        let mut substitutions = Self::none();
        substitutions.learn(context, constraint);
        substitutions
    }

    /// Accumulates the substitutions implied by asserting `constraint` into
    /// this rewriter.
    pub fn learn(&mut self, context: &mut ExprContext, constraint: ExprId) {
        let data = context.data(constraint).clone();
        match data {
            // Constants assert nothing that can be substituted anywhere.
            ExprData::Const { .. } => (),
            ExprData::Eq { left, right } => {
                // The folding constructors normalize constants onto the
                // left, but a raw-interned equality may not be normalized.
                if context.as_constant(left).is_some() {
                    self.insert(right, left);
                } else if context.as_constant(right).is_some() {
                    self.insert(left, right);
                } else {
                    let truth = context.boolean(true);
                    self.insert(constraint, truth);
                }
            }
            _ => {
                let truth = context.boolean(true);
                self.insert(constraint, truth);
            }
        }
    }

    /// Applies the substitutions to `expr`, returning the rewritten
    /// expression.
    ///
    /// This is a total function: an expression the rewriter cannot improve
    /// is returned unchanged, and an unchanged expression keeps its handle.
    pub fn apply(&self, context: &mut ExprContext, expr: ExprId) -> ExprId {
        let mut cache = HashMap::new();
        self.apply_cached(context, expr, &mut cache)
    }

    /// The recursive worker for [`Self::apply`], caching rewrites so that
    /// shared sub-expressions are only transformed once.
    fn apply_cached(
        &self,
        context: &mut ExprContext,
        expr: ExprId,
        cache: &mut HashMap<ExprId, ExprId>,
    ) -> ExprId {
        if let Some(hit) = cache.get(&expr) {
            return *hit;
        }

        let result = if let Some(mapped) = self.map.get(&expr) {
            *mapped
        } else {
            let data = context.data(expr).clone();
            match data {
                ExprData::Const { .. } | ExprData::Symbol { .. } => expr,
                ExprData::Add { left, right } => {
                    let left = self.apply_cached(context, left, cache);
                    let right = self.apply_cached(context, right, cache);
                    context.add(left, right)
                }
                ExprData::Sub { left, right } => {
                    let left = self.apply_cached(context, left, cache);
                    let right = self.apply_cached(context, right, cache);
                    context.sub(left, right)
                }
                ExprData::Mul { left, right } => {
                    let left = self.apply_cached(context, left, cache);
                    let right = self.apply_cached(context, right, cache);
                    context.mul(left, right)
                }
                ExprData::Div { dividend, divisor } => {
                    let dividend = self.apply_cached(context, dividend, cache);
                    let divisor = self.apply_cached(context, divisor, cache);
                    context.div(dividend, divisor)
                }
                ExprData::Eq { left, right } => {
                    let left = self.apply_cached(context, left, cache);
                    let right = self.apply_cached(context, right, cache);
                    context.eq(left, right)
                }
                ExprData::Lt { left, right } => {
                    let left = self.apply_cached(context, left, cache);
                    let right = self.apply_cached(context, right, cache);
                    context.lt(left, right)
                }
                ExprData::And { left, right } => {
                    let left = self.apply_cached(context, left, cache);
                    let right = self.apply_cached(context, right, cache);
                    context.and(left, right)
                }
                ExprData::Or { left, right } => {
                    let left = self.apply_cached(context, left, cache);
                    let right = self.apply_cached(context, right, cache);
                    context.or(left, right)
                }
                ExprData::Not { value } => {
                    let value = self.apply_cached(context, value, cache);
                    context.not(value)
                }
            }
        };

        cache.insert(expr, result);
        result
    }
}
