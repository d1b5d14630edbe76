//! Planner configuration that the host extension can serialize/deserialize.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlannerConfig {
    /// Consider device-accelerated scan strategies.
    pub enable_device_scan: bool,

    /// Consider device-accelerated join strategies.
    pub enable_device_join: bool,

    /// Consider device-side partial aggregation.
    pub enable_device_preagg: bool,

    /// Does the coordinating process also execute a share of parallel work?
    pub parallel_leader_participation: bool,

    /// Recursion guard for walk/clone over the path tree. Real plan trees
    /// are far shallower; tripping this means a cycle or a runaway rewrite.
    pub max_path_depth: usize,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            enable_device_scan: true,
            enable_device_join: true,
            enable_device_preagg: true,
            parallel_leader_participation: true,
            max_path_depth: 2048,
        }
    }
}

impl PlannerConfig {
    /// Reject configurations the engine cannot honor. Called once on a
    /// config handed over from the host, before any planning pass uses it.
    pub fn validate(&self) -> Result<()> {
        if self.max_path_depth == 0 {
            return Err(Error::Config(
                "max_path_depth must be at least 1; a zero limit rejects every tree".to_string(),
            ));
        }
        Ok(())
    }

    /// True when at least one device strategy may be injected at all.
    pub fn any_device_strategy(&self) -> bool {
        self.enable_device_scan || self.enable_device_join || self.enable_device_preagg
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_depth_limit_is_rejected() {
        assert!(PlannerConfig::default().validate().is_ok());

        let config = PlannerConfig {
            max_path_depth: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }
}
