//! This module contains constants that are needed throughout the codebase.

/// The number of expression nodes that an expression context can hold before
/// its first reallocation.
///
/// Constraint sets for realistic paths comfortably fit within this many
/// distinct sub-expressions, so it avoids rehashing the interning table
/// during typical exploration.
pub const DEFAULT_INTERNER_CAPACITY: usize = 256;

/// The number of fork-tree nodes that a tree can hold before its first
/// reallocation.
///
/// Fork trees are bounded per run and usually shallow, so this is generous.
pub const DEFAULT_FORK_TREE_CAPACITY: usize = 64;

/// The number of constraints that a constraint set can hold before its first
/// reallocation.
pub const DEFAULT_CONSTRAINTS_CAPACITY: usize = 16;

/// The width of a concrete word in bits.
pub const WORD_SIZE_BITS: usize = 256;
