//! The plan-path tree: one candidate execution strategy per node.
//!
//! The host optimizer keeps many competing candidate structures alive at once
//! and freely aliases unchanged subtrees between them, so children are
//! `PathId`s into a [`PathArena`](crate::arena::PathArena) rather than owned
//! boxes: two parents holding the same id *is* the aliasing.
//!
//! The enum is closed and every dispatch over it is compile-time exhaustive.
//! The single [`PathNode::Unregistered`] variant stands for kind tags minted
//! by the host's externally-owned type registry after this engine was built;
//! walking or cloning one is a fatal invariant violation, never a silent
//! no-op (see `copra-planner`).
//!
//! Payload fields other than child ids are opaque to the walk/clone engine:
//! they are copied by value and never interpreted.

use serde::{Deserialize, Serialize};

use crate::cost::Cost;
use crate::id::{ExprId, IndexId, PathId, ProviderTag, RelId};
use crate::relset::RelSet;

/// Fields shared by every path, whatever its kind.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PathInfo {
    /// Base relations this path produces rows for.
    pub parent_rels: RelSet,
    /// Estimated output rows.
    pub rows: f64,
    pub cost: Cost,
    pub parallel_safe: bool,
    /// Workers budgeted for this path (0 = not parallel).
    pub parallel_workers: u32,
}

/// Sort direction for one ordering column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortKey {
    pub expr: ExprId,
    pub descending: bool,
    pub nulls_first: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JoinType {
    Inner,
    Left,
    Right,
    Full,
    Semi,
    Anti,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AggStrategy {
    Plain,
    Sorted,
    Hashed,
    Mixed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SetOpCmd {
    Intersect,
    IntersectAll,
    Except,
    ExceptAll,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SetOpStrategy {
    Sorted,
    Hashed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CmdType {
    Insert,
    Update,
    Delete,
}

// ── Leaf payloads ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeqScanPath {
    pub info: PathInfo,
    pub rel: RelId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexScanPath {
    pub info: PathInfo,
    pub rel: RelId,
    pub index: IndexId,
    pub index_quals: Vec<ExprId>,
    pub index_only: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BitmapHeapScanPath {
    pub info: PathInfo,
    pub rel: RelId,
    pub bitmap_quals: Vec<ExprId>,
}

/// AND of bitmap inputs. The qual substructure is not made of path nodes,
/// so this is primitive as far as tree traversal is concerned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BitmapAndPath {
    pub info: PathInfo,
    pub quals: Vec<ExprId>,
}

/// OR of bitmap inputs; primitive, like [`BitmapAndPath`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BitmapOrPath {
    pub info: PathInfo,
    pub quals: Vec<ExprId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TidScanPath {
    pub info: PathInfo,
    pub rel: RelId,
    pub tid_quals: Vec<ExprId>,
}

/// Degenerate result-only path (no relation to scan).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupResultPath {
    pub info: PathInfo,
    pub quals: Vec<ExprId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MinMaxAggPath {
    pub info: PathInfo,
    pub quals: Vec<ExprId>,
}

// ── Single-child payloads ──────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubqueryScanPath {
    pub info: PathInfo,
    pub rel: RelId,
    pub subpath: PathId,
}

/// Remote-table scan. The outer child is optional: it only exists when the
/// remote join pushdown keeps a local fallback plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForeignScanPath {
    pub info: PathInfo,
    pub rel: RelId,
    pub fdw_outer: Option<PathId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialPath {
    pub info: PathInfo,
    pub subpath: PathId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UniquePath {
    pub info: PathInfo,
    pub subpath: PathId,
    pub key_exprs: Vec<ExprId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GatherPath {
    pub info: PathInfo,
    pub subpath: PathId,
    pub num_workers: u32,
    pub single_copy: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GatherMergePath {
    pub info: PathInfo,
    pub subpath: PathId,
    pub sort_keys: Vec<SortKey>,
    pub num_workers: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionPath {
    pub info: PathInfo,
    pub subpath: PathId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectSetPath {
    pub info: PathInfo,
    pub subpath: PathId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SortPath {
    pub info: PathInfo,
    pub subpath: PathId,
    pub sort_keys: Vec<SortKey>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupPath {
    pub info: PathInfo,
    pub subpath: PathId,
    pub group_exprs: Vec<ExprId>,
    pub quals: Vec<ExprId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpperUniquePath {
    pub info: PathInfo,
    pub subpath: PathId,
    pub num_keys: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggPath {
    pub info: PathInfo,
    pub subpath: PathId,
    pub strategy: AggStrategy,
    pub group_exprs: Vec<ExprId>,
    pub num_groups: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupingSetsPath {
    pub info: PathInfo,
    pub subpath: PathId,
    pub sets: Vec<Vec<ExprId>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowAggPath {
    pub info: PathInfo,
    pub subpath: PathId,
    pub partition_exprs: Vec<ExprId>,
    pub order_keys: Vec<SortKey>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetOpPath {
    pub info: PathInfo,
    pub subpath: PathId,
    pub cmd: SetOpCmd,
    pub strategy: SetOpStrategy,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LockRowsPath {
    pub info: PathInfo,
    pub subpath: PathId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LimitPath {
    pub info: PathInfo,
    pub subpath: PathId,
    pub offset: Option<u64>,
    pub count: Option<u64>,
}

// ── Two-child payloads (outer evaluated before inner) ──────────────────────

/// Common join fields; embedded by the three join strategies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JoinPath {
    pub info: PathInfo,
    pub join_type: JoinType,
    pub outer: PathId,
    pub inner: PathId,
    pub join_quals: Vec<ExprId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MergeJoinPath {
    pub join: JoinPath,
    pub outer_sort_keys: Vec<SortKey>,
    pub inner_sort_keys: Vec<SortKey>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HashJoinPath {
    pub join: JoinPath,
    pub num_batches: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecursiveUnionPath {
    pub info: PathInfo,
    pub left: PathId,
    pub right: PathId,
}

// ── List payloads ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppendPath {
    pub info: PathInfo,
    pub subpaths: Vec<PathId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MergeAppendPath {
    pub info: PathInfo,
    pub subpaths: Vec<PathId>,
    pub sort_keys: Vec<SortKey>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModifyTablePath {
    pub info: PathInfo,
    pub operation: CmdType,
    pub subpaths: Vec<PathId>,
}

/// Generic extension point: a provider-supplied strategy with an ordered
/// list of child paths and a payload this engine never interprets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomPath {
    pub info: PathInfo,
    pub provider: ProviderTag,
    pub flags: u32,
    pub subpaths: Vec<PathId>,
    pub private: serde_json::Value,
}

// ── Accelerated (device) payloads ──────────────────────────────────────────

/// Table scan executed on the co-processor. Quals that compile for the
/// device run there; the remainder are re-checked on the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceScanPath {
    pub cpath: CustomPath,
    pub rel: RelId,
    pub dev_quals: Vec<ExprId>,
    pub host_quals: Vec<ExprId>,
}

/// One inner side of a multi-way device join. These live outside the
/// generic child list: the join owns its inner paths outright.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceJoinInner {
    pub scan_path: PathId,
    pub join_type: JoinType,
    pub join_quals: Vec<ExprId>,
    pub hash_quals: Vec<ExprId>,
    pub join_nrows: f64,
}

/// Multi-way join executed on the co-processor. The outer input rides in
/// `cpath.subpaths[0]`; the inner sides are the owned `inners` list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceJoinPath {
    pub cpath: CustomPath,
    pub inners: Vec<DeviceJoinInner>,
}

/// Partial aggregation pushed down to the co-processor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DevicePreAggPath {
    pub cpath: CustomPath,
    pub num_group_keys: u32,
}

/// A kind tag the host type system defines but this registry does not.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnregisteredPath {
    pub tag: u32,
    pub info: PathInfo,
}

// ── The node itself ────────────────────────────────────────────────────────

/// One candidate execution strategy for producing a stream of rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PathNode {
    SeqScan(SeqScanPath),
    IndexScan(IndexScanPath),
    BitmapHeapScan(BitmapHeapScanPath),
    BitmapAnd(BitmapAndPath),
    BitmapOr(BitmapOrPath),
    TidScan(TidScanPath),
    GroupResult(GroupResultPath),
    MinMaxAgg(MinMaxAggPath),
    SubqueryScan(SubqueryScanPath),
    ForeignScan(ForeignScanPath),
    Material(MaterialPath),
    Unique(UniquePath),
    Gather(GatherPath),
    GatherMerge(GatherMergePath),
    Projection(ProjectionPath),
    ProjectSet(ProjectSetPath),
    Sort(SortPath),
    Group(GroupPath),
    UpperUnique(UpperUniquePath),
    Agg(AggPath),
    GroupingSets(GroupingSetsPath),
    WindowAgg(WindowAggPath),
    SetOp(SetOpPath),
    LockRows(LockRowsPath),
    Limit(LimitPath),
    NestLoop(JoinPath),
    MergeJoin(MergeJoinPath),
    HashJoin(HashJoinPath),
    RecursiveUnion(RecursiveUnionPath),
    Append(AppendPath),
    MergeAppend(MergeAppendPath),
    ModifyTable(ModifyTablePath),
    Custom(CustomPath),
    DeviceScan(DeviceScanPath),
    DeviceJoin(DeviceJoinPath),
    DevicePreAgg(DevicePreAggPath),
    Unregistered(UnregisteredPath),
}

/// Registry tags for every kind this engine supports. `Unregistered` nodes
/// have no entry here by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PathKind {
    SeqScan,
    IndexScan,
    BitmapHeapScan,
    BitmapAnd,
    BitmapOr,
    TidScan,
    GroupResult,
    MinMaxAgg,
    SubqueryScan,
    ForeignScan,
    Material,
    Unique,
    Gather,
    GatherMerge,
    Projection,
    ProjectSet,
    Sort,
    Group,
    UpperUnique,
    Agg,
    GroupingSets,
    WindowAgg,
    SetOp,
    LockRows,
    Limit,
    NestLoop,
    MergeJoin,
    HashJoin,
    RecursiveUnion,
    Append,
    MergeAppend,
    ModifyTable,
    Custom,
    DeviceScan,
    DeviceJoin,
    DevicePreAgg,
}

/// How many children a kind declares, and how they are arranged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChildShape {
    Leaf,
    Single,
    Pair,
    Many,
}

impl PathKind {
    /// The registry's shape entry for this kind.
    pub fn child_shape(self) -> ChildShape {
        use PathKind::*;
        match self {
            SeqScan | IndexScan | BitmapHeapScan | BitmapAnd | BitmapOr | TidScan
            | GroupResult | MinMaxAgg => ChildShape::Leaf,
            SubqueryScan | ForeignScan | Material | Unique | Gather | GatherMerge
            | Projection | ProjectSet | Sort | Group | UpperUnique | Agg | GroupingSets
            | WindowAgg | SetOp | LockRows | Limit => ChildShape::Single,
            NestLoop | MergeJoin | HashJoin | RecursiveUnion => ChildShape::Pair,
            Append | MergeAppend | ModifyTable | Custom | DeviceScan | DeviceJoin
            | DevicePreAgg => ChildShape::Many,
        }
    }
}

/// Borrowed view of a node's child slots, in declared order.
#[derive(Debug, Clone, Copy)]
pub enum ChildSlots<'a> {
    Leaf,
    /// `None` when an optional child slot is empty (foreign scans).
    Single(Option<PathId>),
    Pair {
        outer: PathId,
        inner: PathId,
    },
    Many(&'a [PathId]),
}

impl PathNode {
    /// Registry tag for this node; `None` only for [`PathNode::Unregistered`].
    pub fn kind(&self) -> Option<PathKind> {
        use PathNode::*;
        Some(match self {
            SeqScan(_) => PathKind::SeqScan,
            IndexScan(_) => PathKind::IndexScan,
            BitmapHeapScan(_) => PathKind::BitmapHeapScan,
            BitmapAnd(_) => PathKind::BitmapAnd,
            BitmapOr(_) => PathKind::BitmapOr,
            TidScan(_) => PathKind::TidScan,
            GroupResult(_) => PathKind::GroupResult,
            MinMaxAgg(_) => PathKind::MinMaxAgg,
            SubqueryScan(_) => PathKind::SubqueryScan,
            ForeignScan(_) => PathKind::ForeignScan,
            Material(_) => PathKind::Material,
            Unique(_) => PathKind::Unique,
            Gather(_) => PathKind::Gather,
            GatherMerge(_) => PathKind::GatherMerge,
            Projection(_) => PathKind::Projection,
            ProjectSet(_) => PathKind::ProjectSet,
            Sort(_) => PathKind::Sort,
            Group(_) => PathKind::Group,
            UpperUnique(_) => PathKind::UpperUnique,
            Agg(_) => PathKind::Agg,
            GroupingSets(_) => PathKind::GroupingSets,
            WindowAgg(_) => PathKind::WindowAgg,
            SetOp(_) => PathKind::SetOp,
            LockRows(_) => PathKind::LockRows,
            Limit(_) => PathKind::Limit,
            NestLoop(_) => PathKind::NestLoop,
            MergeJoin(_) => PathKind::MergeJoin,
            HashJoin(_) => PathKind::HashJoin,
            RecursiveUnion(_) => PathKind::RecursiveUnion,
            Append(_) => PathKind::Append,
            MergeAppend(_) => PathKind::MergeAppend,
            ModifyTable(_) => PathKind::ModifyTable,
            Custom(_) => PathKind::Custom,
            DeviceScan(_) => PathKind::DeviceScan,
            DeviceJoin(_) => PathKind::DeviceJoin,
            DevicePreAgg(_) => PathKind::DevicePreAgg,
            Unregistered(_) => return None,
        })
    }

    /// Shared cost/estimate header, present on every kind.
    pub fn info(&self) -> &PathInfo {
        use PathNode::*;
        match self {
            SeqScan(p) => &p.info,
            IndexScan(p) => &p.info,
            BitmapHeapScan(p) => &p.info,
            BitmapAnd(p) => &p.info,
            BitmapOr(p) => &p.info,
            TidScan(p) => &p.info,
            GroupResult(p) => &p.info,
            MinMaxAgg(p) => &p.info,
            SubqueryScan(p) => &p.info,
            ForeignScan(p) => &p.info,
            Material(p) => &p.info,
            Unique(p) => &p.info,
            Gather(p) => &p.info,
            GatherMerge(p) => &p.info,
            Projection(p) => &p.info,
            ProjectSet(p) => &p.info,
            Sort(p) => &p.info,
            Group(p) => &p.info,
            UpperUnique(p) => &p.info,
            Agg(p) => &p.info,
            GroupingSets(p) => &p.info,
            WindowAgg(p) => &p.info,
            SetOp(p) => &p.info,
            LockRows(p) => &p.info,
            Limit(p) => &p.info,
            NestLoop(p) => &p.info,
            MergeJoin(p) => &p.join.info,
            HashJoin(p) => &p.join.info,
            RecursiveUnion(p) => &p.info,
            Append(p) => &p.info,
            MergeAppend(p) => &p.info,
            ModifyTable(p) => &p.info,
            Custom(p) => &p.info,
            DeviceScan(p) => &p.cpath.info,
            DeviceJoin(p) => &p.cpath.info,
            DevicePreAgg(p) => &p.cpath.info,
            Unregistered(p) => &p.info,
        }
    }

    /// The node's child slots per the registry, in declared order.
    ///
    /// `Err` carries the raw tag of an unregistered kind; callers must treat
    /// that as fatal, never as "no children" (a registered leaf returns
    /// `Ok(ChildSlots::Leaf)` instead).
    pub fn children(&self) -> std::result::Result<ChildSlots<'_>, u32> {
        use PathNode::*;
        Ok(match self {
            SeqScan(_) | IndexScan(_) | BitmapHeapScan(_) | BitmapAnd(_) | BitmapOr(_)
            | TidScan(_) | GroupResult(_) | MinMaxAgg(_) => ChildSlots::Leaf,
            SubqueryScan(p) => ChildSlots::Single(Some(p.subpath)),
            ForeignScan(p) => ChildSlots::Single(p.fdw_outer),
            Material(p) => ChildSlots::Single(Some(p.subpath)),
            Unique(p) => ChildSlots::Single(Some(p.subpath)),
            Gather(p) => ChildSlots::Single(Some(p.subpath)),
            GatherMerge(p) => ChildSlots::Single(Some(p.subpath)),
            Projection(p) => ChildSlots::Single(Some(p.subpath)),
            ProjectSet(p) => ChildSlots::Single(Some(p.subpath)),
            Sort(p) => ChildSlots::Single(Some(p.subpath)),
            Group(p) => ChildSlots::Single(Some(p.subpath)),
            UpperUnique(p) => ChildSlots::Single(Some(p.subpath)),
            Agg(p) => ChildSlots::Single(Some(p.subpath)),
            GroupingSets(p) => ChildSlots::Single(Some(p.subpath)),
            WindowAgg(p) => ChildSlots::Single(Some(p.subpath)),
            SetOp(p) => ChildSlots::Single(Some(p.subpath)),
            LockRows(p) => ChildSlots::Single(Some(p.subpath)),
            Limit(p) => ChildSlots::Single(Some(p.subpath)),
            NestLoop(p) => ChildSlots::Pair {
                outer: p.outer,
                inner: p.inner,
            },
            MergeJoin(p) => ChildSlots::Pair {
                outer: p.join.outer,
                inner: p.join.inner,
            },
            HashJoin(p) => ChildSlots::Pair {
                outer: p.join.outer,
                inner: p.join.inner,
            },
            RecursiveUnion(p) => ChildSlots::Pair {
                outer: p.left,
                inner: p.right,
            },
            Append(p) => ChildSlots::Many(&p.subpaths),
            MergeAppend(p) => ChildSlots::Many(&p.subpaths),
            ModifyTable(p) => ChildSlots::Many(&p.subpaths),
            Custom(p) => ChildSlots::Many(&p.subpaths),
            DeviceScan(p) => ChildSlots::Many(&p.cpath.subpaths),
            DeviceJoin(p) => ChildSlots::Many(&p.cpath.subpaths),
            DevicePreAgg(p) => ChildSlots::Many(&p.cpath.subpaths),
            Unregistered(p) => return Err(p.tag),
        })
    }

    /// Registry shape for this node; `None` for unregistered kinds.
    pub fn child_shape(&self) -> Option<ChildShape> {
        self.kind().map(PathKind::child_shape)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_shape_agrees_with_child_slots() {
        let leaf = PathNode::SeqScan(SeqScanPath {
            info: PathInfo::default(),
            rel: RelId::new(1),
        });
        assert_eq!(leaf.child_shape(), Some(ChildShape::Leaf));
        assert!(matches!(leaf.children(), Ok(ChildSlots::Leaf)));

        let unknown = PathNode::Unregistered(UnregisteredPath {
            tag: 999,
            info: PathInfo::default(),
        });
        assert_eq!(unknown.child_shape(), None);
        assert_eq!(unknown.children().unwrap_err(), 999);
    }
}
