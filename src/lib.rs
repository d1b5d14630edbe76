#![forbid(unsafe_code)]
//! copra: plan-path walk/clone engine for a co-processor offload planner.
//!
//! Facade crate re-exporting the workspace members; the integration tests
//! and benches drive the engine through this surface.

pub use copra_core::arena::PathArena;
pub use copra_core::config::PlannerConfig;
pub use copra_core::cost::{parallel_divisor, Cost};
pub use copra_core::error::{Error, Result};
pub use copra_core::id::{ExprId, IndexId, PathId, ProviderTag, RelId};
pub use copra_core::path;
pub use copra_core::path::{ChildShape, ChildSlots, PathInfo, PathKind, PathNode};
pub use copra_core::relset::RelSet;
pub use copra_planner::{
    consider_device_offload, copy_path, dump_path, has_device_path, walk_path_children,
};
pub use copra_planner::{path_is_device_join, path_is_device_preagg, path_is_device_scan};
