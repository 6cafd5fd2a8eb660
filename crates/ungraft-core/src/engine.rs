//! The ungraft pipeline.
//!
//! Read the grafted commits, classify them, compute the residual list and
//! rewrite the shallow file if it changed. Any failure aborts the run
//! before the shallow file is touched.

use serde::Serialize;
use ungraft_git::{CommitId, GraftOps};

use crate::classify::classify;
use crate::error::Result;
use crate::reconcile::reconcile;

/// A commit that stays grafted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlockedCommit {
    pub commit: CommitId,
    /// Recorded parents that are not present locally.
    pub missing: Vec<CommitId>,
}

/// Outcome of an ungraft run.
#[derive(Debug, Clone, Serialize)]
pub struct UngraftReport {
    /// The shallow file was left alone regardless of the result.
    pub dry_run: bool,
    /// Grafted commits as read from the shallow file.
    pub grafted: Vec<CommitId>,
    /// Commits that were (or would be) ungrafted, in shallow-file order.
    pub candidates: Vec<CommitId>,
    /// Commits left in the shallow file.
    pub remaining: Vec<CommitId>,
    /// Candidates without recorded parents.
    pub roots: Vec<CommitId>,
    pub blocked: Vec<BlockedCommit>,
    /// Whether the shallow file was rewritten.
    pub written: bool,
}

impl UngraftReport {
    /// Check if anything was (or would be) ungrafted.
    #[must_use]
    pub fn has_candidates(&self) -> bool {
        !self.candidates.is_empty()
    }

    /// Serialize the report as pretty-printed JSON.
    ///
    /// # Errors
    /// Returns error if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Runs the ungraft pipeline against a repository backend.
pub struct UngraftEngine<'a, G: GraftOps + ?Sized> {
    ops: &'a G,
    dry_run: bool,
}

impl<'a, G: GraftOps + ?Sized> UngraftEngine<'a, G> {
    /// Create a new engine.
    pub const fn new(ops: &'a G) -> Self {
        Self { ops, dry_run: false }
    }

    /// Only report, never rewrite the shallow file.
    #[must_use]
    pub const fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Run the pipeline.
    ///
    /// # Errors
    /// Returns error if reading, classification or the shallow-file write
    /// fails. Nothing is written unless classification succeeded.
    pub fn run(&self) -> Result<UngraftReport> {
        let grafted = self.ops.grafted_commits()?;
        tracing::debug!(count = grafted.len(), "read grafted commits");

        let classification = classify(self.ops, &grafted)?;
        let candidates = classification.candidates();
        let reconciliation = reconcile(&grafted, &candidates);

        let written = if self.dry_run {
            tracing::debug!("dry run, shallow file left untouched");
            false
        } else if reconciliation.changed {
            self.ops.replace_grafted_commits(&grafted, &reconciliation.residual)?;
            true
        } else {
            tracing::debug!("shallow file unchanged");
            false
        };

        let blocked = classification
            .blocked()
            .map(|(commit, missing)| BlockedCommit {
                commit: commit.clone(),
                missing: missing.to_vec(),
            })
            .collect();

        Ok(UngraftReport {
            dry_run: self.dry_run,
            roots: classification.roots(),
            grafted,
            candidates,
            remaining: reconciliation.residual,
            blocked,
            written,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_mocks::{MockGraftOps, ids};

    const A1: &str = "aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa1";
    const B2: &str = "bbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb2";
    const C3: &str = "ccccccccccccccccccccccccccccccccccccccc3";
    const D4: &str = "ddddddddddddddddddddddddddddddddddddddd4";
    const E5: &str = "eeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeee5";
    const F6: &str = "fffffffffffffffffffffffffffffffffffffff6";
    const G7: &str = "0000000000000000000000000000000000000007";
    const H8: &str = "0000000000000000000000000000000000000008";

    #[test]
    fn test_root_commit_is_ungrafted() {
        let ops = MockGraftOps::new()
            .with_grafted(&[A1])
            .with_commit(A1, &[]);

        let report = UngraftEngine::new(&ops).run().unwrap();

        assert_eq!(report.candidates, ids(&[A1]));
        assert_eq!(report.roots, ids(&[A1]));
        assert!(report.remaining.is_empty());
        assert!(report.written);
        assert_eq!(*ops.writes.borrow(), vec![Vec::<CommitId>::new()]);
    }

    #[test]
    fn test_missing_parent_means_no_write() {
        let ops = MockGraftOps::new()
            .with_grafted(&[B2])
            .with_commit(B2, &[C3]);

        let report = UngraftEngine::new(&ops).run().unwrap();

        assert!(!report.has_candidates());
        assert_eq!(report.remaining, ids(&[B2]));
        assert!(!report.written);
        assert_eq!(ops.write_count(), 0);
        assert_eq!(
            report.blocked,
            vec![BlockedCommit {
                commit: CommitId::from(B2),
                missing: ids(&[C3]),
            }]
        );
    }

    #[test]
    fn test_merge_with_one_missing_parent_is_kept() {
        let ops = MockGraftOps::new()
            .with_grafted(&[D4])
            .with_commit(D4, &[E5, F6])
            .with_commit(E5, &[]);

        let report = UngraftEngine::new(&ops).run().unwrap();

        assert!(report.candidates.is_empty());
        assert_eq!(ops.write_count(), 0);
    }

    #[test]
    fn test_mixed_grafts_rewrite_residual() {
        let ops = MockGraftOps::new()
            .with_grafted(&[G7, H8])
            .with_commit(G7, &[A1])
            .with_commit(A1, &[])
            .with_commit(H8, &[C3]);

        let report = UngraftEngine::new(&ops).run().unwrap();

        assert_eq!(report.candidates, ids(&[G7]));
        assert_eq!(report.remaining, ids(&[H8]));
        assert!(report.written);
        assert_eq!(*ops.writes.borrow(), vec![ids(&[H8])]);
        assert_eq!(*ops.grafted.borrow(), ids(&[H8]));
    }

    #[test]
    fn test_dry_run_never_writes() {
        let ops = MockGraftOps::new()
            .with_grafted(&[G7, H8])
            .with_commit(G7, &[A1])
            .with_commit(A1, &[])
            .with_commit(H8, &[]);

        let report = UngraftEngine::new(&ops).dry_run(true).run().unwrap();

        assert!(report.dry_run);
        assert_eq!(report.candidates, ids(&[G7, H8]));
        assert!(report.remaining.is_empty());
        assert!(!report.written);
        assert_eq!(ops.write_count(), 0);
        assert_eq!(*ops.grafted.borrow(), ids(&[G7, H8]));
    }

    #[test]
    fn test_failure_aborts_before_write() {
        let ops = MockGraftOps::new()
            .with_grafted(&[A1, B2])
            .with_commit(A1, &[]);

        assert!(UngraftEngine::new(&ops).run().is_err());
        assert_eq!(ops.write_count(), 0);
    }

    #[test]
    fn test_concurrent_store_update_aborts() {
        let ops = MockGraftOps::new()
            .with_grafted(&[A1, B2])
            .with_commit(A1, &[])
            .with_commit(B2, &[C3])
            .with_store_update(&[A1, B2, D4]);

        assert!(UngraftEngine::new(&ops).run().is_err());
        assert_eq!(ops.write_count(), 0);
        assert_eq!(*ops.grafted.borrow(), ids(&[A1, B2, D4]));
    }

    #[test]
    fn test_empty_store_is_a_no_op() {
        let ops = MockGraftOps::new();
        let report = UngraftEngine::new(&ops).run().unwrap();

        assert!(report.grafted.is_empty());
        assert!(!report.written);
        assert_eq!(ops.write_count(), 0);
    }

    #[test]
    fn test_second_run_finds_nothing() {
        let ops = MockGraftOps::new()
            .with_grafted(&[G7, H8])
            .with_commit(G7, &[A1])
            .with_commit(A1, &[])
            .with_commit(H8, &[C3]);

        UngraftEngine::new(&ops).run().unwrap();
        let report = UngraftEngine::new(&ops).run().unwrap();

        assert!(!report.has_candidates());
        assert_eq!(ops.write_count(), 1);
    }

    #[test]
    fn test_report_serializes() {
        let ops = MockGraftOps::new()
            .with_grafted(&[B2])
            .with_commit(B2, &[C3]);
        let json = UngraftEngine::new(&ops).run().unwrap().to_json().unwrap();

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["dry_run"], false);
        assert_eq!(value["remaining"][0], B2);
        assert_eq!(value["blocked"][0]["missing"][0], C3);
    }
}
