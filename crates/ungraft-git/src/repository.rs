//! Repository wrapper implementing the graft backend on top of git2.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use git2::{ErrorClass, ErrorCode, ObjectType};

use crate::commit::{CommitId, parse_parents};
use crate::error::{Error, Result};
use crate::traits::GraftOps;

/// Name of the shallow-commit store inside the git directory.
const SHALLOW_FILE: &str = "shallow";
/// Lockfile taken while rewriting the store, as git itself does.
const SHALLOW_LOCK: &str = "shallow.lock";

/// High-level wrapper around a git repository.
pub struct Repository {
    inner: git2::Repository,
}

impl Repository {
    /// Open the repository containing `path`.
    ///
    /// # Errors
    /// Returns `NotARepository` if no repository is found at path or any parent.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let inner = git2::Repository::discover(path).map_err(|_| Error::NotARepository {
            path: path.to_path_buf(),
        })?;
        tracing::debug!(git_dir = %inner.path().display(), "opened repository");
        Ok(Self { inner })
    }

    /// Get the path to the repository root (workdir).
    #[must_use]
    pub fn workdir(&self) -> Option<&Path> {
        self.inner.workdir()
    }

    /// Get the path to the .git directory.
    #[must_use]
    pub fn git_dir(&self) -> &Path {
        self.inner.path()
    }

    /// Get the path to the shallow file.
    ///
    /// Linked worktrees share the store of the main repository.
    #[must_use]
    pub fn shallow_path(&self) -> PathBuf {
        self.inner.commondir().join(SHALLOW_FILE)
    }

    fn lock_path(&self) -> PathBuf {
        self.inner.commondir().join(SHALLOW_LOCK)
    }

    /// Take the shallow lockfile, run `f` with it, and release it.
    ///
    /// `f` is responsible for consuming the lockfile (by renaming it into
    /// place); on failure the lockfile is removed.
    fn with_lock<F>(&self, f: F) -> Result<()>
    where
        F: FnOnce(fs::File, &Path) -> Result<()>,
    {
        let lock = self.lock_path();
        let file = match OpenOptions::new().write(true).create_new(true).open(&lock) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                return Err(Error::StoreLocked(lock));
            }
            Err(e) => return Err(e.into()),
        };

        if let Err(e) = f(file, &lock) {
            let _ = fs::remove_file(&lock);
            return Err(e);
        }

        // No-op when `f` renamed the lockfile into place.
        match fs::remove_file(&lock) {
            Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e.into()),
            _ => Ok(()),
        }
    }

    /// Fail unless the store still holds `expected`. Call with the lock held.
    fn ensure_unchanged(&self, expected: &[CommitId]) -> Result<()> {
        if self.grafted_commits()? == expected {
            Ok(())
        } else {
            Err(Error::StoreChanged(self.shallow_path()))
        }
    }
}

/// Errors that mean "this name does not resolve to an object".
fn is_absent(e: &git2::Error) -> bool {
    matches!(
        e.code(),
        ErrorCode::NotFound | ErrorCode::InvalidSpec | ErrorCode::Ambiguous
    ) || e.class() == ErrorClass::Invalid
}

impl GraftOps for Repository {
    fn grafted_commits(&self) -> Result<Vec<CommitId>> {
        let path = self.shallow_path();
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no shallow file present");
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        };

        tracing::debug!(path = %path.display(), "reading shallow file");
        let grafted: Vec<CommitId> = content.lines().map(CommitId::from).collect();
        for commit in grafted.iter().filter(|c| !c.is_full_hash()) {
            tracing::warn!(%commit, path = %path.display(), "malformed entry in shallow file");
        }
        Ok(grafted)
    }

    fn replace_grafted_commits(&self, expected: &[CommitId], commits: &[CommitId]) -> Result<()> {
        let path = self.shallow_path();

        if commits.is_empty() {
            tracing::info!(path = %path.display(), "no grafts remain, removing shallow file");
            return self.with_lock(|file, _| {
                drop(file);
                self.ensure_unchanged(expected)?;
                match fs::remove_file(&path) {
                    Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e.into()),
                    _ => Ok(()),
                }
            });
        }

        let content: String = commits.iter().map(|c| format!("{c}\n")).collect();
        tracing::info!(path = %path.display(), remaining = commits.len(), "rewriting shallow file");

        self.with_lock(|mut file, lock| {
            self.ensure_unchanged(expected)?;
            file.write_all(content.as_bytes())?;
            file.sync_all()?;
            drop(file);
            fs::rename(lock, &path)?;
            Ok(())
        })
    }

    fn commit_exists(&self, id: &CommitId) -> Result<bool> {
        tracing::trace!(%id, "checking existence");
        match self.inner.revparse_single(id.as_str()) {
            Ok(object) => Ok(object.kind() == Some(ObjectType::Commit)),
            Err(e) if is_absent(&e) => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    fn parents_of(&self, id: &CommitId) -> Result<Vec<CommitId>> {
        let oid = match self.inner.revparse_single(id.as_str()) {
            Ok(object) => object.id(),
            Err(e) if is_absent(&e) => return Err(Error::MissingCommit(id.to_string())),
            Err(e) => return Err(e.into()),
        };

        // Read the raw object: the parsed commit view honors the shallow
        // grafts and would report no parents for a grafted commit.
        let odb = self.inner.odb()?;
        let object = odb.read(oid).map_err(|e| {
            if e.code() == ErrorCode::NotFound {
                Error::MissingCommit(id.to_string())
            } else {
                Error::Git2(e)
            }
        })?;

        if object.kind() != ObjectType::Commit {
            return Err(Error::NotACommit {
                id: id.to_string(),
                kind: object.kind().str().to_string(),
            });
        }

        let parents = parse_parents(&String::from_utf8_lossy(object.data()));
        tracing::debug!(%id, ?parents, "read parents");
        Ok(parents)
    }
}

impl std::fmt::Debug for Repository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Repository")
            .field("path", &self.git_dir())
            .finish()
    }
}
