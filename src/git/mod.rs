//! Git operations module
//!
//! Thin adapter over the `git` executable:
//! - Repository discovery and command execution
//! - Change listing (staged, unstaged, untracked, porcelain status)
//! - Diff retrieval and classification
//! - Staging, committing and pushing

mod repo;
mod status;
mod diff;
mod ops;

pub use repo::Git;
pub use status::{ChangeLists, FileStatus};
pub use diff::{LineType, classify_line, diff_stats};
