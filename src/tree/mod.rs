//! This module contains the fork tree, the topology of how explored
//! execution paths have branched over the course of a run.

pub mod record;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    constant::DEFAULT_FORK_TREE_CAPACITY,
    error::{Error, Result},
    tree::record::PathRecord,
};

/// A handle to a node within a [`ForkTree`].
///
/// Handles are lightweight indices into the tree's node store and are only
/// meaningful for the tree that produced them.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct NodeId(u32);

impl NodeId {
    /// Gets the handle as an index into the owning tree's node store.
    #[must_use]
    pub fn as_usize(self) -> usize {
        self.0 as usize
    }
}

/// A single point in the branching history of explored paths.
///
/// Nodes are created only by forking (or as the root), are never relinked or
/// removed, and so the tree is connected and acyclic by construction.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ForkNode {
    /// The node this one was forked from, absent only for the root.
    parent: Option<NodeId>,

    /// The nodes forked from this one, in fork order.
    children: Vec<NodeId>,

    /// How many live [`PathRecord`]s currently reference this node.
    live_records: usize,
}

impl ForkNode {
    /// Gets the parent of this node, which is absent only for the root.
    #[must_use]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Gets the children forked from this node, in fork order.
    #[must_use]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Gets the number of live path records referencing this node.
    #[must_use]
    pub fn live_records(&self) -> usize {
        self.live_records
    }
}

/// The tree of fork points explored during one symbolic execution run.
///
/// # Ownership
///
/// The tree owns all of its nodes in a single growable store; path records
/// hold [`NodeId`] handles into it. Nodes are retained for the lifetime of
/// the tree — releasing a record only adjusts liveness bookkeeping — so a
/// node referenced by any record, or by the topology itself, is always
/// reachable. Fork trees are bounded per run, which keeps this retention
/// policy cheap.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ForkTree {
    /// The store of nodes, addressed by [`NodeId`]. The node at index zero
    /// is the root.
    nodes: Vec<ForkNode>,
}

impl ForkTree {
    /// Constructs a new fork tree containing only the root node.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_FORK_TREE_CAPACITY)
    }

    /// Constructs a new fork tree guaranteed to be able to store at least
    /// `capacity` nodes without reallocating.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let mut nodes = Vec::with_capacity(capacity);
        nodes.push(ForkNode {
            parent:       None,
            children:     Vec::new(),
            live_records: 0,
        });
        Self { nodes }
    }

    /// Gets the handle of the root node.
    #[must_use]
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Gets the number of nodes in the tree, including the root.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Gets the node referred to by `id`.
    ///
    /// # Errors
    ///
    /// Returns [`Err`] if no node exists for `id`.
    pub fn node(&self, id: NodeId) -> Result<&ForkNode> {
        self.nodes.get(id.as_usize()).ok_or(Error::NoSuchNode { id })
    }

    /// Gets the parent of the node referred to by `id`, which is absent only
    /// for the root.
    ///
    /// # Errors
    ///
    /// Returns [`Err`] if no node exists for `id`.
    pub fn parent(&self, id: NodeId) -> Result<Option<NodeId>> {
        self.node(id).map(ForkNode::parent)
    }

    /// Gets the children of the node referred to by `id`, in fork order.
    ///
    /// # Errors
    ///
    /// Returns [`Err`] if no node exists for `id`.
    pub fn children(&self, id: NodeId) -> Result<&[NodeId]> {
        self.node(id).map(ForkNode::children)
    }

    /// Gets the number of live path records referencing the node referred to
    /// by `id`.
    ///
    /// # Errors
    ///
    /// Returns [`Err`] if no node exists for `id`.
    pub fn live_records(&self, id: NodeId) -> Result<usize> {
        self.node(id).map(ForkNode::live_records)
    }

    /// Constructs the path record for the path that begins exploration,
    /// positioned at the root of the tree.
    ///
    /// The record starts in the created state with its fork flag set and a
    /// fresh unique path identifier.
    pub fn initial_record(&mut self, payload: impl Into<String>) -> PathRecord {
        let root = self.root();
        self.nodes[root.as_usize()].live_records += 1;
        PathRecord::with_node(payload, Uuid::new_v4(), root)
    }

    /// Forks the path tracked by `record` into `successors` new paths.
    ///
    /// One new node is created per successor, each a child of the record's
    /// node, and one created record (fork flag set, fresh unique identifier,
    /// payload inherited) is returned per successor. The originating record
    /// is consumed: no path survives a fork still wearing its pre-fork
    /// record, so a state that continues as one of the successors must take
    /// one of the returned records.
    ///
    /// # Errors
    ///
    /// Returns [`Err`] if fewer than two successors are requested, if
    /// `record` is not attached to a tree node, or if its node does not
    /// exist in this tree.
    pub fn fork(&mut self, record: PathRecord, successors: usize) -> Result<Vec<PathRecord>> {
        if successors < 2 {
            return Err(Error::InvalidForkArity {
                requested: successors,
            });
        }
        let parent = record.node().ok_or(Error::DetachedRecord)?;
        self.node(parent)?;

        let payload = record.payload().to_owned();
        self.release(record)?;

        let mut records = Vec::with_capacity(successors);
        for _ in 0..successors {
            let child = self.new_node(parent);
            records.push(PathRecord::with_node(
                payload.clone(),
                Uuid::new_v4(),
                child,
            ));
        }

        Ok(records)
    }

    /// Releases `record`, marking the termination of the path it tracks.
    ///
    /// This only adjusts the liveness bookkeeping of the referenced node;
    /// the node itself remains in the tree and reachable through any other
    /// record that references it. Releasing a detached record is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`Err`] if the record's node does not exist in this tree.
    pub fn release(&mut self, record: PathRecord) -> Result<()> {
        let Some(id) = record.node() else {
            return Ok(());
        };
        self.node(id)?;

        let node = &mut self.nodes[id.as_usize()];
        node.live_records = node.live_records.saturating_sub(1);

        Ok(())
    }

    /// Produces a serializable snapshot of the tree's topology for the
    /// report-emission collaborator.
    ///
    /// # Panics
    ///
    /// Panics if the tree holds more than [`u32::MAX`] nodes, which
    /// [`Self::new_node`] already prevents.
    #[must_use]
    pub fn dump(&self) -> ForkTreeDump {
        let nodes = self
            .nodes
            .iter()
            .enumerate()
            .map(|(index, node)| ForkNodeDump {
                id:           NodeId(u32::try_from(index).expect("Node count fits in a u32")),
                parent:       node.parent,
                children:     node.children.clone(),
                live_records: node.live_records,
            })
            .collect();

        ForkTreeDump { nodes }
    }

    /// Creates a new node under `parent`, with a single live record.
    ///
    /// # Panics
    ///
    /// Panics if more than [`u32::MAX`] nodes are created in one tree. This
    /// is a programmer bug.
    fn new_node(&mut self, parent: NodeId) -> NodeId {
        let index = u32::try_from(self.nodes.len())
            .unwrap_or_else(|_| panic!("Fork tree node count should not exceed {}", u32::MAX));
        let id = NodeId(index);

        self.nodes.push(ForkNode {
            parent:       Some(parent),
            children:     Vec::new(),
            live_records: 1,
        });
        self.nodes[parent.as_usize()].children.push(id);

        id
    }
}

impl Default for ForkTree {
    fn default() -> Self {
        Self::new()
    }
}

/// A serializable snapshot of a [`ForkTree`]'s topology.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct ForkTreeDump {
    /// Every node in the tree, in creation order. The first entry is the
    /// root.
    pub nodes: Vec<ForkNodeDump>,
}

/// A serializable snapshot of a single [`ForkNode`].
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct ForkNodeDump {
    /// The handle of the node.
    pub id: NodeId,

    /// The node's parent, absent only for the root.
    pub parent: Option<NodeId>,

    /// The node's children, in fork order.
    pub children: Vec<NodeId>,

    /// How many live path records referenced the node at snapshot time.
    pub live_records: usize,
}
