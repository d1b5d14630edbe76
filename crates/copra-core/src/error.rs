use thiserror::Error;

use crate::id::PathId;

/// Canonical result for core.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// A kind tag exists in the host optimizer's type system but not in this
    /// engine's registry. Reported by the walker with the raw tag; always
    /// aborts the enclosing planning attempt.
    #[error("unrecognized path-node kind: {0}")]
    UnrecognizedPathKind(u32),

    /// The cloner hit a node it has no duplication rule for. Carries a full
    /// structural dump to diagnose an out-of-sync registry.
    #[error("Bug? unknown path-node: {dump}")]
    UnknownPathNode { dump: String },

    /// Recursion guard tripped before descending past `limit` levels.
    #[error("path tree exceeds maximum depth of {limit}")]
    PathTreeTooDeep { limit: usize },

    /// A `PathId` that was never allocated in the arena it was resolved
    /// against (typically an id leaked across planning passes).
    #[error("path node {0} is not allocated in this arena")]
    DanglingPathId(PathId),
}
