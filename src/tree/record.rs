//! This module contains the per-path bookkeeping record that correlates an
//! explored execution path with its position in the fork tree.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::tree::NodeId;

/// A hint locating the program point at which a path's record was created,
/// for attribution in reports.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct SourceHint {
    /// The line in the disassembled program.
    pub assembly_line: u32,

    /// The corresponding line in the source program, where known.
    pub code_line: u32,
}

impl SourceHint {
    /// Constructs a new source hint from the provided line numbers.
    #[must_use]
    pub fn new(assembly_line: u32, code_line: u32) -> Self {
        Self {
            assembly_line,
            code_line,
        }
    }
}

/// The probabilistic bookkeeping attached to one explored execution path.
///
/// A record is created when a path begins or is produced by a fork, and is
/// released when the owning execution state terminates. It is correlated 1:1
/// with that state's constraint set by the collaborator owning the state;
/// the two never reference each other directly.
///
/// # Lifecycle
///
/// A record starts created, with its fork flag set. Each step that is
/// observed to not fork settles it via [`Self::settle`]; only a fresh fork
/// produces records with the flag set again. Cloning a record duplicates the
/// flag and payload while sharing, not duplicating, the referenced tree
/// node.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PathRecord {
    /// Whether the tree forked on the step that produced this record.
    fork_flag: bool,

    /// Opaque auxiliary bookkeeping carried along the path.
    payload: String,

    /// The identifier of this path, unique among live records.
    path_id: Uuid,

    /// Where in the program this record was created, if known.
    source_hint: Option<SourceHint>,

    /// The fork-tree node representing this path's current position, absent
    /// for records not yet attached to a tree.
    node: Option<NodeId>,
}

impl PathRecord {
    /// Constructs a new record carrying `payload` under `path_id`, not yet
    /// attached to any tree node.
    #[must_use]
    pub fn new(payload: impl Into<String>, path_id: Uuid) -> Self {
        Self::with_details(true, payload, path_id, None, None)
    }

    /// Constructs a new record carrying `payload` under `path_id`,
    /// positioned at `node`.
    #[must_use]
    pub fn with_node(payload: impl Into<String>, path_id: Uuid, node: NodeId) -> Self {
        Self::with_details(true, payload, path_id, None, Some(node))
    }

    /// Constructs a new record with every field supplied.
    #[must_use]
    pub fn with_details(
        fork_flag: bool,
        payload: impl Into<String>,
        path_id: Uuid,
        source_hint: Option<SourceHint>,
        node: Option<NodeId>,
    ) -> Self {
        let payload = payload.into();
        Self {
            fork_flag,
            payload,
            path_id,
            source_hint,
            node,
        }
    }

    /// Checks whether the tree forked on the step that produced this record.
    #[must_use]
    pub fn fork_flag(&self) -> bool {
        self.fork_flag
    }

    /// Gets the opaque payload carried by this record.
    #[must_use]
    pub fn payload(&self) -> &str {
        &self.payload
    }

    /// Gets the identifier of this path.
    #[must_use]
    pub fn path_id(&self) -> Uuid {
        self.path_id
    }

    /// Gets the location at which this record was created, if known.
    #[must_use]
    pub fn source_hint(&self) -> Option<SourceHint> {
        self.source_hint
    }

    /// Gets the fork-tree node representing this path's current position, if
    /// the record is attached to a tree.
    #[must_use]
    pub fn node(&self) -> Option<NodeId> {
        self.node
    }

    /// Acknowledges a non-forking step of the path: clears the fork flag,
    /// leaving the identifier and tree position untouched.
    pub fn settle(&mut self) {
        self.fork_flag = false;
    }
}
