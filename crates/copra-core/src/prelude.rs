//! Convenient re-exports for downstream crates.

pub use crate::arena::PathArena;
pub use crate::config::PlannerConfig;
pub use crate::cost::{parallel_divisor, Cost};
pub use crate::error::{Error, Result};
pub use crate::id::{ExprId, IndexId, PathId, ProviderTag, RelId};
pub use crate::path::{ChildShape, ChildSlots, PathInfo, PathKind, PathNode};
pub use crate::relset::RelSet;
