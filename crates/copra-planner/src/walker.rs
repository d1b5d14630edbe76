//! Generic traversal over the plan-path tree.
//!
//! `walk_path_children` visits a node's declared children (not the node
//! itself) according to the registry's child shape, short-circuiting on the
//! first child for which the callback returns true. The detector wraps it
//! with itself as the recursive callback, so truth propagates up through the
//! same short-circuiting.

use copra_core::arena::PathArena;
use copra_core::config::PlannerConfig;
use copra_core::error::{Error, Result};
use copra_core::id::PathId;
use copra_core::path::{ChildSlots, PathNode};

use crate::accel;

/// Guard against runaway recursion before each descent. Real plan trees are
/// orders of magnitude shallower than the configured limit.
pub fn check_path_depth(config: &PlannerConfig, depth: usize) -> Result<()> {
    if depth >= config.max_path_depth {
        return Err(Error::PathTreeTooDeep {
            limit: config.max_path_depth,
        });
    }
    Ok(())
}

/// Apply `visit` to each existing child of `node`, outer before inner, list
/// order preserved, returning true on the first child that satisfies it.
///
/// A registered leaf returns `Ok(false)` without invoking `visit`; an
/// unregistered kind is a fatal dispatch miss, never a silent "no children".
/// The walker itself is read-only over the tree.
pub fn walk_path_children<F>(arena: &PathArena, node: PathId, visit: &mut F) -> Result<bool>
where
    F: FnMut(&PathArena, PathId) -> Result<bool>,
{
    let slots = arena.node(node)?.children().map_err(|tag| {
        tracing::error!(tag, "walker dispatch miss: unrecognized path-node kind");
        Error::UnrecognizedPathKind(tag)
    })?;

    match slots {
        ChildSlots::Leaf => Ok(false),
        ChildSlots::Single(None) => Ok(false),
        ChildSlots::Single(Some(child)) => visit(arena, child),
        ChildSlots::Pair { outer, inner } => {
            if visit(arena, outer)? {
                return Ok(true);
            }
            visit(arena, inner)
        }
        ChildSlots::Many(subpaths) => {
            for &subpath in subpaths {
                if visit(arena, subpath)? {
                    return Ok(true);
                }
            }
            Ok(false)
        }
    }
}

/// Does the tree rooted at `path` already contain a device-accelerated
/// strategy?
///
/// Pure over the tree's shape and kinds; an absent root is simply false.
/// The optimizer uses this as a capability query before deciding whether a
/// candidate should receive a further acceleration transform.
pub fn has_device_path(
    config: &PlannerConfig,
    arena: &PathArena,
    path: Option<PathId>,
) -> Result<bool> {
    probe_device_path(config, arena, path, 0)
}

fn probe_device_path(
    config: &PlannerConfig,
    arena: &PathArena,
    path: Option<PathId>,
    depth: usize,
) -> Result<bool> {
    let Some(id) = path else {
        return Ok(false);
    };
    check_path_depth(config, depth)?;

    let node = arena.node(id)?;
    if accel::path_is_device_scan(node)
        || accel::path_is_device_join(node)
        || accel::path_is_device_preagg(node)
    {
        return Ok(true);
    }
    walk_path_children(arena, id, &mut |arena, child| {
        probe_device_path(config, arena, Some(child), depth + 1)
    })
}

/// Should the optimizer try to inject a device strategy on top of `path`?
///
/// False when device strategies are disabled outright, and false when the
/// candidate already contains one (stacking device transforms only moves
/// the same rows across the bus twice).
pub fn consider_device_offload(
    config: &PlannerConfig,
    arena: &PathArena,
    path: Option<PathId>,
) -> Result<bool> {
    if !config.any_device_strategy() {
        return Ok(false);
    }
    Ok(!has_device_path(config, arena, path)?)
}
