//! Trait abstractions for graft inspection.
//!
//! This module defines the `GraftOps` trait which abstracts the repository
//! queries the ungraft engine needs, enabling dependency injection and
//! testability.

use crate::{CommitId, Result};

/// Trait for shallow-repository operations.
///
/// This trait abstracts the repository backend, allowing for:
/// - Dependency injection in the engine
/// - Mock implementations for testing
/// - Alternative implementations (e.g., a subprocess-based backend)
#[allow(clippy::missing_errors_doc)]
pub trait GraftOps {
    // === Shallow Store ===

    /// List the grafted commits recorded in the shallow store.
    ///
    /// Returns an empty list if no store is present.
    fn grafted_commits(&self) -> Result<Vec<CommitId>>;

    /// Replace the shallow store with `commits`.
    ///
    /// Fails without writing unless the store still holds `expected`, the
    /// list read at the start of the run. Either the old or the complete
    /// new content is observable afterwards.
    fn replace_grafted_commits(&self, expected: &[CommitId], commits: &[CommitId]) -> Result<()>;

    // === Object Inspection ===

    /// Check whether `id` exists locally and refers to a commit.
    ///
    /// A missing object is `Ok(false)`, never an error.
    fn commit_exists(&self, id: &CommitId) -> Result<bool>;

    /// Get the parents recorded in the commit object, in order.
    ///
    /// Parents are listed even if they are not present locally.
    fn parents_of(&self, id: &CommitId) -> Result<Vec<CommitId>>;
}
