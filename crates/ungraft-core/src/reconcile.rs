//! Shallow-file reconciliation.

use std::collections::HashSet;

use ungraft_git::CommitId;

/// The grafted commits that remain after removing candidates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconciliation {
    /// Grafted commits minus candidates, original order and duplicates kept.
    pub residual: Vec<CommitId>,
    /// Whether the residual differs from the grafted list as a set.
    pub changed: bool,
}

/// Remove every candidate from the grafted list.
///
/// Change detection compares sets, so reordering or duplicate entries
/// alone never trigger a rewrite.
#[must_use]
pub fn reconcile(grafted: &[CommitId], candidates: &[CommitId]) -> Reconciliation {
    let remove: HashSet<&CommitId> = candidates.iter().collect();
    let residual: Vec<CommitId> = grafted
        .iter()
        .filter(|c| !remove.contains(c))
        .cloned()
        .collect();

    let before: HashSet<&CommitId> = grafted.iter().collect();
    let after: HashSet<&CommitId> = residual.iter().collect();

    Reconciliation {
        changed: before != after,
        residual,
    }
}
