/// Worktree version computation
///
/// This module handles:
/// - Formatting commit id, commit time and dirty tree id into a SemVer 2.0 string
/// - Running the queries in order to produce the current version
///
/// Format: `0.0.0-<YYYYMMDDHHMMSS>-<12 hex chars of commit>[-dirty-<tree id>]`
use crate::error::Result;
use crate::git::{self, GitRunner};
use crate::worktree;
use chrono::{DateTime, TimeZone, Utc};
use log::debug;

/// Number of commit id characters kept in the version
const COMMIT_PREFIX_LEN: usize = 12;

/// Commit time layout, always rendered in UTC
const TIMESTAMP_FORMAT: &str = "%Y%m%d%H%M%S";

/// Build the version string. Pure; an empty `dirty_id` means a clean tree.
pub fn format_version<Tz: TimeZone>(commit_id: &str, committed_at: &DateTime<Tz>, dirty_id: &str) -> String {
    let commit_prefix = match commit_id.char_indices().nth(COMMIT_PREFIX_LEN) {
        Some((end, _)) => &commit_id[..end],
        None => commit_id,
    };

    let mut version = format!(
        "0.0.0-{}-{}",
        committed_at.with_timezone(&Utc).format(TIMESTAMP_FORMAT),
        commit_prefix
    );
    if !dirty_id.is_empty() {
        version.push_str("-dirty-");
        version.push_str(dirty_id);
    }
    version
}

/// Compute the version of the checked out worktree.
///
/// Dirty trees get a stable version too: two identically dirty trees
/// produce the same version. The first failing query aborts the run.
pub fn current_version(git: &impl GitRunner) -> Result<String> {
    let commit_id = git::head_commit_id(git)?;
    let committed_at = git::head_commit_timestamp(git)?;
    let dirty = git::is_dirty(git)?;
    debug!("HEAD {} committed at {} (dirty: {})", commit_id, committed_at, dirty);

    let dirty_id = if dirty { worktree::worktree_id(git)? } else { String::new() };

    Ok(format_version(&commit_id, &committed_at, &dirty_id))
}

#[cfg(test)]
#[path = "version_test.rs"]
mod version_test;
