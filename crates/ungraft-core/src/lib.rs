//! # ungraft-core
//!
//! Decides which grafted commits of a shallow repository can be ungrafted
//! (all of their recorded parents are present locally) and reconciles the
//! shallow file accordingly.

pub mod classify;
pub mod config;
pub mod engine;
mod error;
pub mod reconcile;

#[cfg(test)]
mod test_mocks;

pub use classify::{Classification, Verdict, classify, ungraft_candidates};
pub use config::Config;
pub use engine::{BlockedCommit, UngraftEngine, UngraftReport};
pub use error::{Error, Result};
pub use reconcile::{Reconciliation, reconcile};
pub use ungraft_git::{CommitId, GraftOps};
