//! Deep duplication of path subtrees.
//!
//! `add_path`-style candidate-pool churn may reclaim a path node that an
//! upper strategy still references, because the pool only tracks the node it
//! rejected, not aliases held elsewhere. Before a device strategy adopts a
//! subtree into a candidate that will outlive that churn, the subtree must
//! become exclusively owned: every reachable node a fresh allocation, no id
//! shared with the input tree or with any other clone. `copy_path` is that
//! conversion, performed once per adoption, never speculatively.
//!
//! Non-child payload fields are copied by value and never interpreted; child
//! slots are overwritten with recursive clones, preserving order and
//! cardinality exactly. The three device kinds delegate to their specialized
//! cloners in [`crate::accel`], which also duplicate the extra substructures
//! those kinds own.

use copra_core::arena::PathArena;
use copra_core::config::PlannerConfig;
use copra_core::error::{Error, Result};
use copra_core::id::PathId;
use copra_core::path::PathNode;

use crate::accel;
use crate::dump::dump_path;
use crate::walker::check_path_depth;

/// Deep-copy the subtree rooted at `path` into `arena`, returning the new
/// root. Absent input yields absent output.
pub fn copy_path(
    config: &PlannerConfig,
    arena: &mut PathArena,
    path: Option<PathId>,
) -> Result<Option<PathId>> {
    match path {
        Some(id) => copy_path_at(config, arena, id, 0).map(Some),
        None => Ok(None),
    }
}

/// Clone one node and, recursively, everything below it.
pub(crate) fn copy_path_at(
    config: &PlannerConfig,
    arena: &mut PathArena,
    id: PathId,
    depth: usize,
) -> Result<PathId> {
    check_path_depth(config, depth)?;

    // Take the node by value so child slots can be patched in place before
    // the fresh allocation.
    let node = arena.node(id)?.clone();
    use PathNode::*;
    match node {
        // Primitive strategies: an exact payload duplicate, no recursion.
        n @ (SeqScan(_) | IndexScan(_) | BitmapHeapScan(_) | BitmapAnd(_) | BitmapOr(_)
        | TidScan(_) | GroupResult(_) | MinMaxAgg(_)) => Ok(arena.alloc(n)),

        SubqueryScan(mut p) => {
            p.subpath = copy_path_at(config, arena, p.subpath, depth + 1)?;
            Ok(arena.alloc(SubqueryScan(p)))
        }
        ForeignScan(mut p) => {
            p.fdw_outer = match p.fdw_outer {
                Some(outer) => Some(copy_path_at(config, arena, outer, depth + 1)?),
                None => None,
            };
            Ok(arena.alloc(ForeignScan(p)))
        }
        Material(mut p) => {
            p.subpath = copy_path_at(config, arena, p.subpath, depth + 1)?;
            Ok(arena.alloc(Material(p)))
        }
        Unique(mut p) => {
            p.subpath = copy_path_at(config, arena, p.subpath, depth + 1)?;
            Ok(arena.alloc(Unique(p)))
        }
        Gather(mut p) => {
            p.subpath = copy_path_at(config, arena, p.subpath, depth + 1)?;
            Ok(arena.alloc(Gather(p)))
        }
        GatherMerge(mut p) => {
            p.subpath = copy_path_at(config, arena, p.subpath, depth + 1)?;
            Ok(arena.alloc(GatherMerge(p)))
        }
        Projection(mut p) => {
            p.subpath = copy_path_at(config, arena, p.subpath, depth + 1)?;
            Ok(arena.alloc(Projection(p)))
        }
        ProjectSet(mut p) => {
            p.subpath = copy_path_at(config, arena, p.subpath, depth + 1)?;
            Ok(arena.alloc(ProjectSet(p)))
        }
        Sort(mut p) => {
            p.subpath = copy_path_at(config, arena, p.subpath, depth + 1)?;
            Ok(arena.alloc(Sort(p)))
        }
        Group(mut p) => {
            p.subpath = copy_path_at(config, arena, p.subpath, depth + 1)?;
            Ok(arena.alloc(Group(p)))
        }
        UpperUnique(mut p) => {
            p.subpath = copy_path_at(config, arena, p.subpath, depth + 1)?;
            Ok(arena.alloc(UpperUnique(p)))
        }
        Agg(mut p) => {
            p.subpath = copy_path_at(config, arena, p.subpath, depth + 1)?;
            Ok(arena.alloc(Agg(p)))
        }
        GroupingSets(mut p) => {
            p.subpath = copy_path_at(config, arena, p.subpath, depth + 1)?;
            Ok(arena.alloc(GroupingSets(p)))
        }
        WindowAgg(mut p) => {
            p.subpath = copy_path_at(config, arena, p.subpath, depth + 1)?;
            Ok(arena.alloc(WindowAgg(p)))
        }
        SetOp(mut p) => {
            p.subpath = copy_path_at(config, arena, p.subpath, depth + 1)?;
            Ok(arena.alloc(SetOp(p)))
        }
        LockRows(mut p) => {
            p.subpath = copy_path_at(config, arena, p.subpath, depth + 1)?;
            Ok(arena.alloc(LockRows(p)))
        }
        Limit(mut p) => {
            p.subpath = copy_path_at(config, arena, p.subpath, depth + 1)?;
            Ok(arena.alloc(Limit(p)))
        }

        // Duplication is total: both join sides are always cloned, unlike
        // the walker's short-circuit.
        NestLoop(mut p) => {
            p.outer = copy_path_at(config, arena, p.outer, depth + 1)?;
            p.inner = copy_path_at(config, arena, p.inner, depth + 1)?;
            Ok(arena.alloc(NestLoop(p)))
        }
        MergeJoin(mut p) => {
            p.join.outer = copy_path_at(config, arena, p.join.outer, depth + 1)?;
            p.join.inner = copy_path_at(config, arena, p.join.inner, depth + 1)?;
            Ok(arena.alloc(MergeJoin(p)))
        }
        HashJoin(mut p) => {
            p.join.outer = copy_path_at(config, arena, p.join.outer, depth + 1)?;
            p.join.inner = copy_path_at(config, arena, p.join.inner, depth + 1)?;
            Ok(arena.alloc(HashJoin(p)))
        }
        RecursiveUnion(mut p) => {
            p.left = copy_path_at(config, arena, p.left, depth + 1)?;
            p.right = copy_path_at(config, arena, p.right, depth + 1)?;
            Ok(arena.alloc(RecursiveUnion(p)))
        }

        Append(mut p) => {
            p.subpaths = copy_subpaths(config, arena, p.subpaths, depth)?;
            Ok(arena.alloc(Append(p)))
        }
        MergeAppend(mut p) => {
            p.subpaths = copy_subpaths(config, arena, p.subpaths, depth)?;
            Ok(arena.alloc(MergeAppend(p)))
        }
        ModifyTable(mut p) => {
            p.subpaths = copy_subpaths(config, arena, p.subpaths, depth)?;
            Ok(arena.alloc(ModifyTable(p)))
        }

        // Third-party extension with a recognized provider registration:
        // generic payload copy plus recursive clones of its declared list.
        Custom(mut p) => {
            p.subpaths = copy_subpaths(config, arena, p.subpaths, depth)?;
            Ok(arena.alloc(Custom(p)))
        }

        // Device strategies own substructures the generic path does not
        // understand; their providers do the whole duplication.
        DeviceScan(p) => accel::copy_device_scan_path(config, arena, p, depth),
        DeviceJoin(p) => accel::copy_device_join_path(config, arena, p, depth),
        DevicePreAgg(p) => accel::copy_device_preagg_path(config, arena, p, depth),

        Unregistered(_) => {
            let dump = dump_path(arena, id);
            tracing::error!(%dump, "cloner dispatch miss: unknown path-node");
            Err(Error::UnknownPathNode { dump })
        }
    }
}

/// Clone an ordered child list; the i-th clone child is the clone of the
/// i-th original child.
pub(crate) fn copy_subpaths(
    config: &PlannerConfig,
    arena: &mut PathArena,
    subpaths: Vec<PathId>,
    depth: usize,
) -> Result<Vec<PathId>> {
    let mut copies = Vec::with_capacity(subpaths.len());
    for subpath in subpaths {
        copies.push(copy_path_at(config, arena, subpath, depth + 1)?);
    }
    Ok(copies)
}
