//! Ordered sets of relation ids, with the `{ 1 2 }` display form used in
//! planner diagnostics.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use crate::id::RelId;

/// The set of base relations a path produces rows for.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelSet(BTreeSet<RelId>);

impl RelSet {
    pub fn new() -> Self {
        Self(BTreeSet::new())
    }

    pub fn single(rel: RelId) -> Self {
        let mut s = BTreeSet::new();
        s.insert(rel);
        Self(s)
    }

    pub fn insert(&mut self, rel: RelId) -> bool {
        self.0.insert(rel)
    }

    pub fn contains(&self, rel: RelId) -> bool {
        self.0.contains(&rel)
    }

    pub fn union(&self, other: &RelSet) -> RelSet {
        Self(self.0.union(&other.0).copied().collect())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = RelId> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<RelId> for RelSet {
    fn from_iter<I: IntoIterator<Item = RelId>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl fmt::Display for RelSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for rel in &self.0 {
            write!(f, " {}", rel.get())?;
        }
        write!(f, " }}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_matches_diagnostic_form() {
        let set: RelSet = [RelId::new(2), RelId::new(1)].into_iter().collect();
        assert_eq!(set.to_string(), "{ 1 2 }");
        assert_eq!(RelSet::new().to_string(), "{ }");
    }
}
