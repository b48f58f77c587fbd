//! This module contains the definition of the symbolic expression arena and
//! its supporting types.
//!
//! Expressions are immutable once created, and are interned: structurally
//! equal expressions are guaranteed to be represented by the same
//! [`ExprId`], so node identity doubles as structural equality. All
//! expressions live in an [`ExprContext`], which is threaded explicitly
//! through the constraint machinery so that independent symbolic-execution
//! runs can coexist without sharing ambient state.

pub mod word;

use std::collections::HashMap;

use crate::{
    constant::DEFAULT_INTERNER_CAPACITY,
    expr::word::Word,
};

/// A handle to an interned expression within an [`ExprContext`].
///
/// Handle equality is node identity, which by the interning guarantee is
/// also structural equality of the underlying expressions.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct ExprId(u32);

impl ExprId {
    /// Gets the handle as an index into the owning context's node store.
    #[must_use]
    pub fn as_usize(self) -> usize {
        self.0 as usize
    }
}

/// The shapes of expression that the constraint core manipulates.
///
/// Note that these do not aim to mirror any particular machine's operations
/// 1:1; they are the shapes over which learned facts can usefully be
/// substituted and folded. Operand handles always refer to expressions in
/// the same [`ExprContext`].
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum ExprData {
    /// A concretely known value.
    Const { value: Word },

    /// A named symbolic input about which nothing else is known.
    Symbol { name: String },

    /// Addition of expressions.
    Add { left: ExprId, right: ExprId },

    /// Subtraction of expressions.
    Sub { left: ExprId, right: ExprId },

    /// Multiplication of expressions.
    Mul { left: ExprId, right: ExprId },

    /// Division of expressions.
    Div { dividend: ExprId, divisor: ExprId },

    /// Equality between expressions.
    Eq { left: ExprId, right: ExprId },

    /// Unsigned less-than between expressions.
    Lt { left: ExprId, right: ExprId },

    /// Logical conjunction of expressions.
    And { left: ExprId, right: ExprId },

    /// Logical disjunction of expressions.
    Or { left: ExprId, right: ExprId },

    /// Logical negation of an expression.
    Not { value: ExprId },
}

/// The arena that owns and interns every expression for one symbolic
/// execution run.
///
/// # Interning
///
/// The context guarantees that constructing the same structural shape twice
/// yields the same handle. Construction goes through the smart constructors
/// below, which additionally perform conservative constant folding, so a
/// shape that can be folded is never stored un-folded.
#[derive(Clone, Debug)]
pub struct ExprContext {
    /// The store of interned expression nodes, addressed by [`ExprId`].
    nodes: Vec<ExprData>,

    /// The interning table mapping each stored shape back to its handle.
    interner: HashMap<ExprData, ExprId>,
}

impl ExprContext {
    /// Constructs a new, empty expression context.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_INTERNER_CAPACITY)
    }

    /// Constructs a new expression context guaranteed to be able to store at
    /// least `capacity` expressions without reallocating.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let nodes = Vec::with_capacity(capacity);
        let interner = HashMap::with_capacity(capacity);
        Self { nodes, interner }
    }

    /// Interns the provided `data`, returning the handle of the existing
    /// node if the shape has been seen before.
    ///
    /// # Panics
    ///
    /// Panics if more than [`u32::MAX`] distinct expressions are interned in
    /// one context. This is a programmer bug.
    pub fn intern(&mut self, data: ExprData) -> ExprId {
        if let Some(existing) = self.interner.get(&data) {
            return *existing;
        }

        let index = u32::try_from(self.nodes.len())
            .unwrap_or_else(|_| panic!("Expression count should not exceed {}", u32::MAX));
        let id = ExprId(index);
        self.nodes.push(data.clone());
        self.interner.insert(data, id);

        id
    }

    /// Gets the data of the expression referred to by `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` was produced by a different context. Handles are only
    /// meaningful within the context that produced them.
    #[must_use]
    pub fn data(&self, id: ExprId) -> &ExprData {
        &self.nodes[id.as_usize()]
    }

    /// Gets the number of distinct expressions stored in the context.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Checks whether the context contains no expressions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Gets the concrete value of `id`, if it is a constant.
    #[must_use]
    pub fn as_constant(&self, id: ExprId) -> Option<Word> {
        match self.data(id) {
            ExprData::Const { value } => Some(*value),
            _ => None,
        }
    }

    /// Checks whether `id` is a universally-true value, which is to say a
    /// logically true constant.
    #[must_use]
    pub fn is_true(&self, id: ExprId) -> bool {
        self.as_constant(id).is_some_and(|value| value.is_true())
    }

    /// Constructs the constant expression for `value`.
    pub fn constant(&mut self, value: Word) -> ExprId {
        self.intern(ExprData::Const { value })
    }

    /// Constructs the constant expression for the boolean `value`.
    pub fn boolean(&mut self, value: bool) -> ExprId {
        self.constant(Word::from_bool(value))
    }

    /// Constructs the symbolic input named `name`.
    ///
    /// Two symbols with the same name are the same node.
    pub fn symbol(&mut self, name: impl Into<String>) -> ExprId {
        self.intern(ExprData::Symbol { name: name.into() })
    }

    /// Constructs the sum of `left` and `right`, folding if both are
    /// constants.
    pub fn add(&mut self, left: ExprId, right: ExprId) -> ExprId {
        match (self.as_constant(left), self.as_constant(right)) {
            (Some(l), Some(r)) => self.constant(l + r),
            _ => self.intern(ExprData::Add { left, right }),
        }
    }

    /// Constructs the difference of `left` and `right`, folding if both are
    /// constants.
    pub fn sub(&mut self, left: ExprId, right: ExprId) -> ExprId {
        match (self.as_constant(left), self.as_constant(right)) {
            (Some(l), Some(r)) => self.constant(l - r),
            _ => self.intern(ExprData::Sub { left, right }),
        }
    }

    /// Constructs the product of `left` and `right`, folding if both are
    /// constants.
    pub fn mul(&mut self, left: ExprId, right: ExprId) -> ExprId {
        match (self.as_constant(left), self.as_constant(right)) {
            (Some(l), Some(r)) => self.constant(l * r),
            _ => self.intern(ExprData::Mul { left, right }),
        }
    }

    /// Constructs the quotient of `dividend` and `divisor`, folding if both
    /// are constants.
    pub fn div(&mut self, dividend: ExprId, divisor: ExprId) -> ExprId {
        match (self.as_constant(dividend), self.as_constant(divisor)) {
            (Some(l), Some(r)) => self.constant(l / r),
            _ => self.intern(ExprData::Div { dividend, divisor }),
        }
    }

    /// Constructs the equality of `left` and `right`.
    ///
    /// Equality between identical nodes folds to true, and equality between
    /// constants folds to its truth value. Where exactly one operand is a
    /// constant it is normalized onto the left, which is the canonical form
    /// the substitution machinery relies on.
    pub fn eq(&mut self, left: ExprId, right: ExprId) -> ExprId {
        if left == right {
            return self.boolean(true);
        }

        match (self.as_constant(left), self.as_constant(right)) {
            (Some(l), Some(r)) => self.boolean(l == r),
            (None, Some(_)) => self.intern(ExprData::Eq {
                left:  right,
                right: left,
            }),
            _ => self.intern(ExprData::Eq { left, right }),
        }
    }

    /// Constructs the unsigned comparison `left < right`, folding if both
    /// are constants.
    pub fn lt(&mut self, left: ExprId, right: ExprId) -> ExprId {
        match (self.as_constant(left), self.as_constant(right)) {
            (Some(l), Some(r)) => self.boolean(l < r),
            _ => self.intern(ExprData::Lt { left, right }),
        }
    }

    /// Constructs the conjunction of `left` and `right`, reducing where
    /// either operand is a constant.
    pub fn and(&mut self, left: ExprId, right: ExprId) -> ExprId {
        match (self.as_constant(left), self.as_constant(right)) {
            (Some(l), Some(r)) => self.boolean(l.is_true() && r.is_true()),
            (Some(l), None) => {
                if l.is_true() {
                    right
                } else {
                    self.boolean(false)
                }
            }
            (None, Some(r)) => {
                if r.is_true() {
                    left
                } else {
                    self.boolean(false)
                }
            }
            _ => self.intern(ExprData::And { left, right }),
        }
    }

    /// Constructs the disjunction of `left` and `right`, reducing where
    /// either operand is a constant.
    pub fn or(&mut self, left: ExprId, right: ExprId) -> ExprId {
        match (self.as_constant(left), self.as_constant(right)) {
            (Some(l), Some(r)) => self.boolean(l.is_true() || r.is_true()),
            (Some(l), None) => {
                if l.is_true() {
                    self.boolean(true)
                } else {
                    right
                }
            }
            (None, Some(r)) => {
                if r.is_true() {
                    self.boolean(true)
                } else {
                    left
                }
            }
            _ => self.intern(ExprData::Or { left, right }),
        }
    }

    /// Constructs the negation of `value`, folding if it is a constant.
    pub fn not(&mut self, value: ExprId) -> ExprId {
        match self.as_constant(value) {
            Some(v) => self.boolean(!v.is_true()),
            None => self.intern(ExprData::Not { value }),
        }
    }

    /// Renders the expression referred to by `id` as a single-line
    /// s-expression style string.
    ///
    /// This rendering exists for logs and debugging only; it is not a stable
    /// wire format.
    #[must_use]
    pub fn describe(&self, id: ExprId) -> String {
        match self.data(id) {
            ExprData::Const { value } => value.to_string(),
            ExprData::Symbol { name } => name.clone(),
            ExprData::Add { left, right } => {
                format!("(add {} {})", self.describe(*left), self.describe(*right))
            }
            ExprData::Sub { left, right } => {
                format!("(sub {} {})", self.describe(*left), self.describe(*right))
            }
            ExprData::Mul { left, right } => {
                format!("(mul {} {})", self.describe(*left), self.describe(*right))
            }
            ExprData::Div { dividend, divisor } => {
                format!(
                    "(div {} {})",
                    self.describe(*dividend),
                    self.describe(*divisor)
                )
            }
            ExprData::Eq { left, right } => {
                format!("(eq {} {})", self.describe(*left), self.describe(*right))
            }
            ExprData::Lt { left, right } => {
                format!("(lt {} {})", self.describe(*left), self.describe(*right))
            }
            ExprData::And { left, right } => {
                format!("(and {} {})", self.describe(*left), self.describe(*right))
            }
            ExprData::Or { left, right } => {
                format!("(or {} {})", self.describe(*left), self.describe(*right))
            }
            ExprData::Not { value } => format!("(not {})", self.describe(*value)),
        }
    }
}

impl Default for ExprContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod test {
    use crate::expr::{word::Word, ExprContext, ExprData};

    #[test]
    fn interns_structurally_equal_shapes_to_the_same_handle() {
        let mut ctx = ExprContext::new();
        let x1 = ctx.symbol("x");
        let x2 = ctx.symbol("x");
        assert_eq!(x1, x2);

        let y = ctx.symbol("y");
        let first = ctx.add(x1, y);
        let second = ctx.add(x2, y);
        assert_eq!(first, second);
        assert_ne!(first, x1);
    }

    #[test]
    fn folds_constant_arithmetic() {
        let mut ctx = ExprContext::new();
        let two = ctx.constant(Word::from(2u8));
        let three = ctx.constant(Word::from(3u8));

        let sum = ctx.add(two, three);
        assert_eq!(ctx.as_constant(sum), Some(Word::from(5u8)));

        let product = ctx.mul(two, three);
        assert_eq!(ctx.as_constant(product), Some(Word::from(6u8)));
    }

    #[test]
    fn does_not_fold_symbolic_operands() {
        let mut ctx = ExprContext::new();
        let x = ctx.symbol("x");
        let two = ctx.constant(Word::from(2u8));
        let sum = ctx.add(x, two);
        assert!(ctx.as_constant(sum).is_none());
        assert!(matches!(ctx.data(sum), ExprData::Add { .. }));
    }

    #[test]
    fn normalizes_equality_constant_first() {
        let mut ctx = ExprContext::new();
        let x = ctx.symbol("x");
        let five = ctx.constant(Word::from(5u8));

        let left_form = ctx.eq(five, x);
        let right_form = ctx.eq(x, five);
        assert_eq!(left_form, right_form);

        let ExprData::Eq { left, .. } = ctx.data(left_form) else {
            panic!("Equality did not intern as an equality")
        };
        assert_eq!(*left, five);
    }

    #[test]
    fn folds_equality_of_identical_nodes_to_true() {
        let mut ctx = ExprContext::new();
        let x = ctx.symbol("x");
        let eq = ctx.eq(x, x);
        assert!(ctx.is_true(eq));
    }

    #[test]
    fn reduces_conjunction_with_constant_operand() {
        let mut ctx = ExprContext::new();
        let x = ctx.symbol("x");
        let t = ctx.boolean(true);
        let f = ctx.boolean(false);

        assert_eq!(ctx.and(t, x), x);
        assert_eq!(ctx.and(x, f), f);
        assert_eq!(ctx.or(f, x), x);

        let saturated = ctx.or(t, x);
        assert!(ctx.is_true(saturated));
    }

    #[test]
    fn describes_expressions_on_a_single_line() {
        let mut ctx = ExprContext::new();
        let x = ctx.symbol("x");
        let one = ctx.constant(Word::from(1u8));
        let y = ctx.symbol("y");
        let sum = ctx.add(x, one);
        let eq = ctx.eq(sum, y);

        assert_eq!(ctx.describe(eq), "(eq (add x 1) y)");
    }
}
