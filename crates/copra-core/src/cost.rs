//! Cost bookkeeping shared by every path node.
//!
//! The engine never interprets these numbers; they ride along as payload.
//! The one computation that lives here is the parallel divisor, because both
//! the host's cost hooks and our device providers need the same formula.

use serde::{Deserialize, Serialize};

/// Startup/total cost pair in the host optimizer's abstract cost units.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Cost {
    pub startup: f64,
    pub total: f64,
}

impl Cost {
    pub fn new(startup: f64, total: f64) -> Self {
        Self { startup, total }
    }
}

/// Estimate the fraction of the work that each worker will do, given the
/// number of workers budgeted for the path.
///
/// When the leader participates it contributes a diminishing share,
/// `1 - 0.3 * workers`, floored at zero once enough workers are running.
pub fn parallel_divisor(parallel_workers: u32, leader_participation: bool) -> f64 {
    let mut divisor = parallel_workers as f64;

    if leader_participation {
        let leader_contribution = 1.0 - 0.3 * parallel_workers as f64;
        if leader_contribution > 0.0 {
            divisor += leader_contribution;
        }
    }
    divisor
}
