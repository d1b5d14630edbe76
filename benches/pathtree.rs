use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use copra::path::{
    CustomPath, DeviceScanPath, JoinPath, JoinType, PathInfo, SeqScanPath, SortPath,
};
use copra::{
    copy_path, has_device_path, Cost, ExprId, PathArena, PathId, PathNode, PlannerConfig,
    ProviderTag, RelId, RelSet,
};

fn info(rows: f64) -> PathInfo {
    PathInfo {
        parent_rels: RelSet::from_iter([RelId::new(1)]),
        rows,
        cost: Cost {
            startup: 0.0,
            total: rows * 0.01,
        },
        parallel_safe: true,
        parallel_workers: 0,
    }
}

fn seq_scan(arena: &mut PathArena) -> PathId {
    arena.alloc(PathNode::SeqScan(SeqScanPath {
        info: info(10_000.0),
        rel: RelId::new(1),
    }))
}

fn device_scan(arena: &mut PathArena) -> PathId {
    arena.alloc(PathNode::DeviceScan(DeviceScanPath {
        cpath: CustomPath {
            info: info(10_000.0),
            provider: ProviderTag::DEVICE_SCAN,
            flags: 0,
            subpaths: vec![],
            private: serde_json::Value::Null,
        },
        rel: RelId::new(1),
        dev_quals: vec![ExprId::new(1)],
        host_quals: vec![],
    }))
}

fn nest_loop(arena: &mut PathArena, outer: PathId, inner: PathId) -> PathId {
    arena.alloc(PathNode::NestLoop(JoinPath {
        info: info(10_000.0),
        join_type: JoinType::Inner,
        outer,
        inner,
        join_quals: vec![ExprId::new(2)],
    }))
}

fn sort(arena: &mut PathArena, subpath: PathId) -> PathId {
    arena.alloc(PathNode::Sort(SortPath {
        info: info(10_000.0),
        subpath,
        sort_keys: vec![],
    }))
}

/// Left-deep join tree of `joins` levels; `accelerated` puts a device scan
/// at the innermost leaf, the worst case for the detector's left-first walk.
fn join_tree(arena: &mut PathArena, joins: usize, accelerated: bool) -> PathId {
    let mut path = if accelerated {
        device_scan(arena)
    } else {
        seq_scan(arena)
    };
    for _ in 0..joins {
        let inner = seq_scan(arena);
        path = nest_loop(arena, path, inner);
        path = sort(arena, path);
    }
    path
}

fn bench_detector(c: &mut Criterion) {
    let config = PlannerConfig::default();
    let mut arena = PathArena::new();
    let plain = join_tree(&mut arena, 64, false);
    let accel = join_tree(&mut arena, 64, true);

    c.bench_function("has_device_path/miss", |b| {
        b.iter(|| has_device_path(&config, &arena, Some(plain)).unwrap())
    });
    c.bench_function("has_device_path/hit_deep", |b| {
        b.iter(|| has_device_path(&config, &arena, Some(accel)).unwrap())
    });
}

fn bench_cloner(c: &mut Criterion) {
    let config = PlannerConfig::default();
    let mut arena = PathArena::new();
    let root = join_tree(&mut arena, 64, true);

    // Cloning allocates into the arena, so each iteration gets a snapshot.
    c.bench_function("copy_path/join_tree_64", |b| {
        b.iter_batched(
            || arena.clone(),
            |mut arena| copy_path(&config, &mut arena, Some(root)).unwrap(),
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(pathtree, bench_detector, bench_cloner);
criterion_main!(pathtree);
