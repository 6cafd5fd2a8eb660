//! # ungraft-git
//!
//! Repository backend for ungraft, built on git2-rs.
//! Reads the shallow-commit store, inspects commit objects and
//! rewrites the store when grafts are removed.

mod commit;
mod error;
mod repository;
pub mod traits;

pub use commit::{CommitId, parse_parents};
pub use error::{Error, Result};
pub use repository::Repository;
pub use traits::GraftOps;
