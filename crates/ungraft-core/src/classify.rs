//! Ungraft candidate classification.
//!
//! A grafted commit can be ungrafted when every parent recorded in its
//! commit object is present locally. A commit without parents is always
//! a candidate.

use ungraft_git::{CommitId, GraftOps};

use crate::error::Result;

/// Outcome of classifying a single grafted commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// The commit has no recorded parents.
    Root,

    /// All recorded parents are present.
    Ungraftable {
        /// Recorded parents, in order.
        parents: Vec<CommitId>,
    },

    /// At least one recorded parent is missing.
    Blocked {
        /// Missing parents, in recorded order.
        missing: Vec<CommitId>,
    },
}

impl Verdict {
    /// Check if the commit can be ungrafted.
    #[must_use]
    pub const fn is_candidate(&self) -> bool {
        !matches!(self, Self::Blocked { .. })
    }
}

/// Verdicts for a list of commits, in input order.
#[derive(Debug, Clone, Default)]
pub struct Classification {
    pub verdicts: Vec<(CommitId, Verdict)>,
}

impl Classification {
    /// Commits that can be ungrafted, in input order.
    #[must_use]
    pub fn candidates(&self) -> Vec<CommitId> {
        self.verdicts
            .iter()
            .filter(|(_, v)| v.is_candidate())
            .map(|(c, _)| c.clone())
            .collect()
    }

    /// Commits without recorded parents.
    #[must_use]
    pub fn roots(&self) -> Vec<CommitId> {
        self.verdicts
            .iter()
            .filter(|(_, v)| matches!(v, Verdict::Root))
            .map(|(c, _)| c.clone())
            .collect()
    }

    /// Commits that must stay grafted, with their missing parents.
    pub fn blocked(&self) -> impl Iterator<Item = (&CommitId, &[CommitId])> {
        self.verdicts.iter().filter_map(|(c, v)| match v {
            Verdict::Blocked { missing } => Some((c, missing.as_slice())),
            _ => None,
        })
    }
}

/// Classify each commit by the presence of its recorded parents.
///
/// Every parent is checked so the missing list is complete.
///
/// # Errors
/// Returns error if a commit object can't be read or a backend query
/// fails. Nothing is skipped.
pub fn classify<G: GraftOps + ?Sized>(ops: &G, commits: &[CommitId]) -> Result<Classification> {
    let mut verdicts = Vec::with_capacity(commits.len());

    for commit in commits {
        tracing::debug!(%commit, "checking parents");
        let parents = ops.parents_of(commit)?;

        let verdict = if parents.is_empty() {
            tracing::info!(%commit, "no parents found, root commit?");
            Verdict::Root
        } else {
            let mut missing = Vec::new();
            for parent in &parents {
                if !ops.commit_exists(parent)? {
                    missing.push(parent.clone());
                }
            }

            if missing.is_empty() {
                tracing::debug!(%commit, "all parents present, suitable for ungrafting");
                Verdict::Ungraftable { parents }
            } else {
                tracing::debug!(%commit, ?missing, "parents missing");
                Verdict::Blocked { missing }
            }
        };

        verdicts.push((commit.clone(), verdict));
    }

    Ok(Classification { verdicts })
}

/// Get the commits suitable for ungrafting.
///
/// Defaults to the repository's grafted commits when `commits` is `None`
/// or empty.
///
/// # Errors
/// Returns error if the shallow file can't be read or classification fails.
pub fn ungraft_candidates<G: GraftOps + ?Sized>(
    ops: &G,
    commits: Option<&[CommitId]>,
) -> Result<Vec<CommitId>> {
    let classification = match commits {
        Some(list) if !list.is_empty() => classify(ops, list)?,
        _ => classify(ops, &ops.grafted_commits()?)?,
    };
    Ok(classification.candidates())
}
