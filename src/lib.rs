//! Deterministic SemVer 2.0 versions for git checkouts.
//!
//! ```no_run
//! use worktree_version::{current_version, GitCli};
//!
//! let version = current_version(&GitCli::new("git", None))?;
//! println!("{}", version);
//! # Ok::<(), worktree_version::QueryError>(())
//! ```

pub mod error;
pub mod git;
pub mod version;
pub mod worktree;

pub use error::{QueryError, Result};
pub use git::{GitCli, GitRunner};
pub use version::{current_version, format_version};
