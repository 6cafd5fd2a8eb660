//! Mock implementation of `GraftOps` for testing.
//!
//! Lets the classifier and engine run without a real repository.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};

use ungraft_git::{CommitId, Error as GitError, GraftOps, Result as GitResult};

/// In-memory repository backend.
#[derive(Default)]
pub struct MockGraftOps {
    pub grafted: RefCell<Vec<CommitId>>,
    /// Commit objects and the parents recorded in them.
    pub objects: RefCell<HashMap<CommitId, Vec<CommitId>>>,
    /// Commits that are present locally.
    pub present: RefCell<HashSet<CommitId>>,
    /// Commits whose existence check fails with a backend error.
    pub failing: RefCell<HashSet<CommitId>>,
    /// Every list passed to `replace_grafted_commits`.
    pub writes: RefCell<Vec<Vec<CommitId>>>,
    /// Store content written by another process after the first read.
    pub store_update: RefCell<Option<Vec<CommitId>>>,
}

pub fn ids(list: &[&str]) -> Vec<CommitId> {
    list.iter().copied().map(CommitId::from).collect()
}

impl MockGraftOps {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_grafted(self, list: &[&str]) -> Self {
        *self.grafted.borrow_mut() = ids(list);
        self
    }

    /// Add a locally present commit object with the given parents.
    pub fn with_commit(self, id: &str, parents: &[&str]) -> Self {
        self.objects
            .borrow_mut()
            .insert(CommitId::from(id), ids(parents));
        self.present.borrow_mut().insert(CommitId::from(id));
        self
    }

    pub fn with_failing(self, id: &str) -> Self {
        self.failing.borrow_mut().insert(CommitId::from(id));
        self
    }

    /// Simulate another process rewriting the store once it has been read.
    pub fn with_store_update(self, list: &[&str]) -> Self {
        *self.store_update.borrow_mut() = Some(ids(list));
        self
    }

    pub fn write_count(&self) -> usize {
        self.writes.borrow().len()
    }
}

impl GraftOps for MockGraftOps {
    fn grafted_commits(&self) -> GitResult<Vec<CommitId>> {
        let current = self.grafted.borrow().clone();
        if let Some(update) = self.store_update.borrow_mut().take() {
            *self.grafted.borrow_mut() = update;
        }
        Ok(current)
    }

    fn replace_grafted_commits(
        &self,
        expected: &[CommitId],
        commits: &[CommitId],
    ) -> GitResult<()> {
        if *self.grafted.borrow() != expected {
            return Err(GitError::StoreChanged("shallow".into()));
        }
        self.writes.borrow_mut().push(commits.to_vec());
        *self.grafted.borrow_mut() = commits.to_vec();
        Ok(())
    }

    fn commit_exists(&self, id: &CommitId) -> GitResult<bool> {
        if self.failing.borrow().contains(id) {
            return Err(GitError::Io(std::io::Error::other("backend unavailable")));
        }
        Ok(self.present.borrow().contains(id))
    }

    fn parents_of(&self, id: &CommitId) -> GitResult<Vec<CommitId>> {
        self.objects
            .borrow()
            .get(id)
            .cloned()
            .ok_or_else(|| GitError::MissingCommit(id.to_string()))
    }
}
