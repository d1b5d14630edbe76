//! Strongly-typed identifiers used across the engine.
//!
//! Downstream crates (planner, the host extension glue) should *not* use raw
//! integers for IDs.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! new_id {
    ($name:ident) => {
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Ord, PartialOrd,
        )]
        #[serde(transparent)]
        pub struct $name(u64);

        impl $name {
            pub const fn new(v: u64) -> Self {
                Self(v)
            }
            pub const fn get(self) -> u64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }
    };
}

new_id!(PathId);
new_id!(RelId);
new_id!(IndexId);
new_id!(ExprId);

/// Tag assigned by the host optimizer to a custom-path provider. The three
/// device providers own well-known tags; anything else is an unrecognized
/// (but still cloneable) third-party extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Ord, PartialOrd)]
#[serde(transparent)]
pub struct ProviderTag(pub u32);

impl ProviderTag {
    pub const DEVICE_SCAN: ProviderTag = ProviderTag(1);
    pub const DEVICE_JOIN: ProviderTag = ProviderTag(2);
    pub const DEVICE_PREAGG: ProviderTag = ProviderTag(3);
}

impl fmt::Display for ProviderTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ProviderTag({})", self.0)
    }
}
