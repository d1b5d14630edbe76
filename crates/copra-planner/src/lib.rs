#![forbid(unsafe_code)]
//! copra-planner: the walk/clone engine over the plan-path tree.
//!
//! Responsibilities:
//! - Generic child traversal with short-circuit semantics (`walker`).
//! - Detection of device-accelerated sub-strategies (`walker::has_device_path`).
//! - Deep duplication of subtrees the device providers adopt (`copy`).
//! - The providers' classification predicates and specialized cloners
//!   (`accel`), and the diagnostic dumper backing fatal errors (`dump`).
//!
//! Everything here is a pure recursive computation over one `PathArena`;
//! no I/O, no async, no allocation outside the arena.

pub mod accel;
pub mod copy;
pub mod dump;
pub mod walker;

pub use accel::{
    copy_device_join_path, copy_device_preagg_path, copy_device_scan_path, path_is_device_join,
    path_is_device_preagg, path_is_device_scan,
};
pub use copy::copy_path;
pub use dump::dump_path;
pub use walker::{consider_device_offload, has_device_path, walk_path_children};
