//! Device-strategy entry points: classification predicates and the
//! specialized cloners for the three accelerated path kinds.
//!
//! These kinds own substructures the generic clone path does not understand
//! (a device join owns its whole inner-path list), so `copy_path` hands the
//! node over wholesale instead of shallow-copy-and-patch.

use copra_core::arena::PathArena;
use copra_core::config::PlannerConfig;
use copra_core::error::Result;
use copra_core::id::PathId;
use copra_core::path::{DeviceJoinPath, DevicePreAggPath, DeviceScanPath, PathNode};

use crate::copy::{copy_path_at, copy_subpaths};

pub fn path_is_device_scan(node: &PathNode) -> bool {
    matches!(node, PathNode::DeviceScan(_))
}

pub fn path_is_device_join(node: &PathNode) -> bool {
    matches!(node, PathNode::DeviceJoin(_))
}

pub fn path_is_device_preagg(node: &PathNode) -> bool {
    matches!(node, PathNode::DevicePreAgg(_))
}

/// Duplicate a device scan, including its provider payload and qual lists.
pub fn copy_device_scan_path(
    config: &PlannerConfig,
    arena: &mut PathArena,
    mut path: DeviceScanPath,
    depth: usize,
) -> Result<PathId> {
    tracing::debug!(rel = %path.rel, "cloning device scan path");
    path.cpath.subpaths = copy_subpaths(config, arena, path.cpath.subpaths, depth)?;
    Ok(arena.alloc(PathNode::DeviceScan(path)))
}

/// Duplicate a device join: the outer input in the generic child list and
/// every owned inner side.
pub fn copy_device_join_path(
    config: &PlannerConfig,
    arena: &mut PathArena,
    mut path: DeviceJoinPath,
    depth: usize,
) -> Result<PathId> {
    tracing::debug!(num_inners = path.inners.len(), "cloning device join path");
    path.cpath.subpaths = copy_subpaths(config, arena, path.cpath.subpaths, depth)?;
    for inner in &mut path.inners {
        inner.scan_path = copy_path_at(config, arena, inner.scan_path, depth + 1)?;
    }
    Ok(arena.alloc(PathNode::DeviceJoin(path)))
}

/// Duplicate a device partial aggregation and the input it wraps.
pub fn copy_device_preagg_path(
    config: &PlannerConfig,
    arena: &mut PathArena,
    mut path: DevicePreAggPath,
    depth: usize,
) -> Result<PathId> {
    tracing::debug!(
        num_group_keys = path.num_group_keys,
        "cloning device preagg path"
    );
    path.cpath.subpaths = copy_subpaths(config, arena, path.cpath.subpaths, depth)?;
    Ok(arena.alloc(PathNode::DevicePreAgg(path)))
}
