//! This module contains common utilities for simplifying the writing of
//! integration tests for this library.

#![cfg(test)]

use path_constraint_core::expr::{word::Word, ExprContext, ExprId};

/// A small fixture bundling an expression context with the symbols that the
/// integration scenarios revolve around.
pub struct Universe {
    pub ctx: ExprContext,
    pub a:   ExprId,
    pub b:   ExprId,
}

/// Constructs the expression universe used by the integration scenarios.
#[allow(unused)] // It is actually
pub fn new_universe() -> Universe {
    let mut ctx = ExprContext::new();
    let a = ctx.symbol("a");
    let b = ctx.symbol("b");
    Universe { ctx, a, b }
}

/// Constructs the constant expression for `value` in `ctx`.
#[allow(unused)] // It is actually
pub fn constant(ctx: &mut ExprContext, value: u64) -> ExprId {
    ctx.constant(Word::from(value))
}
