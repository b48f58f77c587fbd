//! This module contains the primary error type for the library's interface.
//!
//! The constraint layer itself is total, so fallibility only arises at the
//! fork-tree seam where index handles are presented by the caller.

use thiserror::Error;

use crate::tree::NodeId;

/// The interface result type for the library.
///
/// Any function considered to be part of the public interface of the library
/// that can fail should return this result type.
pub type Result<T> = std::result::Result<T, Error>;

/// The interface error type for the library.
///
/// All errors returned from the library interface (and hence encountered by
/// the clients of the library) should be members of this enum.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum Error {
    #[error("A fork-tree node with the handle {id:?} was requested but none exists")]
    NoSuchNode { id: NodeId },

    #[error("A fork into {requested:?} successors was requested but a fork needs at least two")]
    InvalidForkArity { requested: usize },

    #[error("A fork was requested for a path record that is not attached to any tree node")]
    DetachedRecord,
}
