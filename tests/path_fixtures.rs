//! Shared builders for path-tree tests.
#![allow(dead_code)]

use copra::path::{
    AppendPath, CustomPath, DeviceJoinInner, DeviceJoinPath, DevicePreAggPath, DeviceScanPath,
    ForeignScanPath, JoinPath, JoinType, LimitPath, SeqScanPath, SortPath, UnregisteredPath,
};
use copra::{
    walk_path_children, Cost, ExprId, PathArena, PathId, PathInfo, PathNode, ProviderTag, RelId,
    RelSet,
};

pub fn info(rows: f64) -> PathInfo {
    PathInfo {
        parent_rels: RelSet::new(),
        rows,
        cost: Cost::new(0.0, rows),
        parallel_safe: true,
        parallel_workers: 0,
    }
}

pub fn seq_scan(arena: &mut PathArena, rel: u64) -> PathId {
    arena.alloc(PathNode::SeqScan(SeqScanPath {
        info: info(1000.0),
        rel: RelId::new(rel),
    }))
}

pub fn sort(arena: &mut PathArena, subpath: PathId) -> PathId {
    arena.alloc(PathNode::Sort(SortPath {
        info: info(1000.0),
        subpath,
        sort_keys: vec![],
    }))
}

pub fn limit(arena: &mut PathArena, subpath: PathId, count: u64) -> PathId {
    arena.alloc(PathNode::Limit(LimitPath {
        info: info(count as f64),
        subpath,
        offset: None,
        count: Some(count),
    }))
}

pub fn foreign_scan(arena: &mut PathArena, rel: u64, fdw_outer: Option<PathId>) -> PathId {
    arena.alloc(PathNode::ForeignScan(ForeignScanPath {
        info: info(500.0),
        rel: RelId::new(rel),
        fdw_outer,
    }))
}

fn join(outer: PathId, inner: PathId) -> JoinPath {
    JoinPath {
        info: info(2000.0),
        join_type: JoinType::Inner,
        outer,
        inner,
        join_quals: vec![ExprId::new(1)],
    }
}

pub fn nest_loop(arena: &mut PathArena, outer: PathId, inner: PathId) -> PathId {
    arena.alloc(PathNode::NestLoop(join(outer, inner)))
}

pub fn hash_join(arena: &mut PathArena, outer: PathId, inner: PathId) -> PathId {
    arena.alloc(PathNode::HashJoin(copra::path::HashJoinPath {
        join: join(outer, inner),
        num_batches: 1,
    }))
}

pub fn append(arena: &mut PathArena, subpaths: Vec<PathId>) -> PathId {
    arena.alloc(PathNode::Append(AppendPath {
        info: info(3000.0),
        subpaths,
    }))
}

pub fn custom(arena: &mut PathArena, provider: u32, subpaths: Vec<PathId>) -> PathId {
    arena.alloc(PathNode::Custom(CustomPath {
        info: info(1000.0),
        provider: ProviderTag(provider),
        flags: 0,
        subpaths,
        private: serde_json::json!({ "provider_state": provider }),
    }))
}

pub fn device_scan(arena: &mut PathArena, rel: u64) -> PathId {
    arena.alloc(PathNode::DeviceScan(DeviceScanPath {
        cpath: CustomPath {
            info: info(1000.0),
            provider: ProviderTag::DEVICE_SCAN,
            flags: 0,
            subpaths: vec![],
            private: serde_json::Value::Null,
        },
        rel: RelId::new(rel),
        dev_quals: vec![ExprId::new(10), ExprId::new(11)],
        host_quals: vec![ExprId::new(12)],
    }))
}

pub fn device_join(arena: &mut PathArena, outer: PathId, inner_scans: Vec<PathId>) -> PathId {
    let inners = inner_scans
        .into_iter()
        .map(|scan_path| DeviceJoinInner {
            scan_path,
            join_type: JoinType::Inner,
            join_quals: vec![ExprId::new(20)],
            hash_quals: vec![ExprId::new(21)],
            join_nrows: 100.0,
        })
        .collect();
    arena.alloc(PathNode::DeviceJoin(DeviceJoinPath {
        cpath: CustomPath {
            info: info(2000.0),
            provider: ProviderTag::DEVICE_JOIN,
            flags: 0,
            subpaths: vec![outer],
            private: serde_json::Value::Null,
        },
        inners,
    }))
}

pub fn device_preagg(arena: &mut PathArena, input: PathId) -> PathId {
    arena.alloc(PathNode::DevicePreAgg(DevicePreAggPath {
        cpath: CustomPath {
            info: info(100.0),
            provider: ProviderTag::DEVICE_PREAGG,
            flags: 0,
            subpaths: vec![input],
            private: serde_json::Value::Null,
        },
        num_group_keys: 2,
    }))
}

pub fn unregistered(arena: &mut PathArena, tag: u32) -> PathId {
    arena.alloc(PathNode::Unregistered(UnregisteredPath {
        tag,
        info: info(0.0),
    }))
}

/// Every node reachable through the generic child lists, root first.
pub fn reachable(arena: &PathArena, root: PathId) -> Vec<PathId> {
    let mut out = Vec::new();
    collect(arena, root, &mut out).expect("fixture trees walk cleanly");
    out
}

fn collect(arena: &PathArena, id: PathId, out: &mut Vec<PathId>) -> copra::Result<()> {
    out.push(id);
    walk_path_children(arena, id, &mut |arena, child| {
        collect(arena, child, out).map(|()| false)
    })?;
    Ok(())
}
