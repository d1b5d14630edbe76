#![forbid(unsafe_code)]
//! copra-core: data model for the copra offload planner.
//!
//! This crate owns the plan-path tree itself: the closed node enum, the
//! variant registry, and the arena that controls node lifetime. It also
//! holds the strongly-typed ids, cost header, and planner configuration
//! shared by the algorithm crate (`copra-planner`) and the host extension
//! glue.
//!
//! No I/O, no async, no allocation policy beyond the arena lives here.

pub mod arena;
pub mod config;
pub mod cost;
pub mod error;
pub mod id;
pub mod path;
pub mod prelude;
pub mod relset;
