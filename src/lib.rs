//! This library implements the path-constraint and fork-tracking core of a
//! symbolic execution engine: for every explored program path it maintains
//! the conjunction of symbolic constraints characterising the inputs that
//! reach that path, keeps that formula simplified as new facts are learned,
//! and records how execution states branch into a tree so that per-path
//! probabilistic bookkeeping can be attached.
//!
//! Note that this library deliberately does not decide satisfiability,
//! choose what to fork or when, or model memory; those belong to the
//! decision-procedure, search-strategy, and interpreter collaborators that
//! sit around this core.
//!
//! # How it Works
//!
//! From a very high level, the core is used as follows:
//!
//! 1. Expressions are built through an [`expr::ExprContext`], which interns
//!    them so that structurally equal expressions share one [`expr::ExprId`]
//!    handle.
//! 2. Each explored path accumulates branch conditions into a
//!    [`constraint::ConstraintSet`] via a
//!    [`constraint::manager::ConstraintManager`], which substitutes learned
//!    facts into the existing constraints so the stored formula stays
//!    minimal.
//! 3. Whenever the interpreter forks a path, the [`tree::ForkTree`] creates
//!    child nodes and mints a fresh [`tree::record::PathRecord`] per
//!    successor, so fork-relative bookkeeping can be read back per path.
//!
//! # Basic Usage
//!
//! ```
//! use path_constraint_core::{
//!     constraint::{manager::ConstraintManager, ConstraintSet},
//!     expr::{word::Word, ExprContext},
//!     tree::ForkTree,
//! };
//!
//! let mut ctx = ExprContext::new();
//! let a = ctx.symbol("a");
//! let b = ctx.symbol("b");
//! let three = ctx.constant(Word::from(3u8));
//! let two = ctx.constant(Word::from(2u8));
//! let a_is_three = ctx.eq(a, three);
//! let a_plus_two = ctx.add(a, two);
//! let sum_is_b = ctx.eq(a_plus_two, b);
//!
//! let mut constraints = ConstraintSet::new();
//! let mut manager = ConstraintManager::new(&mut ctx, &mut constraints);
//! manager.add_constraint(a_is_three);
//! manager.add_constraint(sum_is_b);
//!
//! let b_value = ConstraintManager::simplify_expr(&mut ctx, &constraints, b);
//! assert_eq!(ctx.as_constant(b_value), Some(Word::from(5u8)));
//!
//! let mut tree = ForkTree::new();
//! let record = tree.initial_record("entry");
//! let successors = tree.fork(record, 2).unwrap();
//! assert!(successors.iter().all(|s| s.fork_flag()));
//! ```

#![warn(clippy::all, clippy::cargo, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)] // Allows for better API naming

pub mod constant;
pub mod constraint;
pub mod error;
pub mod expr;
pub mod tree;
pub mod utility;

// Re-exports to provide the library interface.
pub use constraint::{manager::ConstraintManager, ConstraintSet};
pub use expr::{ExprContext, ExprId};
pub use tree::{record::PathRecord, ForkTree};
