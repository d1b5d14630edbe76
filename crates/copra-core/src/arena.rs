//! Arena ownership for path nodes.
//!
//! All nodes of one planning pass, originals and clones alike, live in a
//! single `PathArena` and are freed together when it drops; nothing is
//! reclaimed individually. Children are `PathId`s, so sharing a subtree
//! between candidates is just sharing an id, and a deep copy is a fresh run
//! of ids over fresh allocations.

use crate::error::{Error, Result};
use crate::id::PathId;
use crate::path::PathNode;

/// Append-only arena for one planning pass.
#[derive(Debug, Clone, Default)]
pub struct PathArena {
    nodes: Vec<PathNode>,
}

impl PathArena {
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    pub fn with_capacity(cap: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(cap),
        }
    }

    /// Allocate a node and return its id. Ids are dense and never reused
    /// within the arena's lifetime.
    pub fn alloc(&mut self, node: PathNode) -> PathId {
        let id = PathId::new(self.nodes.len() as u64);
        self.nodes.push(node);
        id
    }

    /// Resolve an id. An id from a different arena (or a different planning
    /// pass) is reported, not silently remapped.
    pub fn node(&self, id: PathId) -> Result<&PathNode> {
        self.nodes
            .get(id.get() as usize)
            .ok_or(Error::DanglingPathId(id))
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::RelId;
    use crate::path::{PathInfo, SeqScanPath};

    #[test]
    fn dangling_ids_are_reported() {
        let mut arena = PathArena::new();
        let id = arena.alloc(PathNode::SeqScan(SeqScanPath {
            info: PathInfo::default(),
            rel: RelId::new(1),
        }));
        assert!(arena.node(id).is_ok());
        assert!(matches!(
            arena.node(PathId::new(7)),
            Err(Error::DanglingPathId(_))
        ));
    }
}
