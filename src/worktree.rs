//! Content hash of a dirty worktree.
//!
//! Git has no way to ask "what would this tree hash to" without writing
//! it. We stage the whole worktree into a throwaway index file, write that
//! index out as a tree object and use the tree id as the fingerprint.
//!
//! The tree object (and any new blobs) stay in the object database as
//! unreachable garbage until the next `git gc`.

use crate::error::{QueryError, Result};
use crate::git::GitRunner;
use log::debug;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Prefix of the scratch directory holding the throwaway index
const SCRATCH_PREFIX: &str = "worktree-id-";

/// A private index file location, removed when dropped.
///
/// Git creates the index file itself on first `add`; we only own the
/// directory. Removal errors on drop are ignored.
pub struct ScratchIndex {
    _dir: TempDir,
    index_file: PathBuf,
}

impl ScratchIndex {
    pub fn acquire() -> Result<Self> {
        let dir = tempfile::Builder::new().prefix(SCRATCH_PREFIX).tempdir().map_err(QueryError::ScratchDir)?;
        let index_file = dir.path().join("index");
        debug!("Using scratch index {:?}", index_file);
        Ok(Self { _dir: dir, index_file })
    }

    pub fn index_file(&self) -> &Path {
        &self.index_file
    }
}

/// Hash of the full worktree, including modified and untracked files.
///
/// Ignored files are left out, following git's ignore rules. Identical
/// worktree content always yields the same id.
pub fn worktree_id(git: &impl GitRunner) -> Result<String> {
    let scratch = ScratchIndex::acquire()?;

    git.run(&["add", "--all"], Some(scratch.index_file()))?;
    let tree = git.run(&["write-tree"], Some(scratch.index_file()))?;

    debug!("Worktree tree id {}", tree);
    Ok(tree)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::fake::FakeGit;

    #[test]
    fn test_scratch_index_removed_on_drop() {
        let scratch = ScratchIndex::acquire().unwrap();
        let dir = scratch.index_file().parent().unwrap().to_path_buf();
        assert!(dir.is_dir());
        assert!(!scratch.index_file().exists(), "git creates the index file, not us");

        drop(scratch);
        assert!(!dir.exists());
    }

    #[test]
    fn test_scratch_index_dir_prefix() {
        let scratch = ScratchIndex::acquire().unwrap();
        let dir_name = scratch.index_file().parent().unwrap().file_name().unwrap().to_string_lossy().to_string();
        assert!(dir_name.starts_with(SCRATCH_PREFIX));
        assert_eq!(scratch.index_file().file_name().unwrap(), "index");
    }

    #[test]
    fn test_scratch_indexes_are_isolated() {
        let a = ScratchIndex::acquire().unwrap();
        let b = ScratchIndex::acquire().unwrap();
        assert_ne!(a.index_file(), b.index_file());
    }

    #[test]
    fn test_worktree_id_stages_into_scratch_index() {
        let git = FakeGit::default().with("add --all", "").with("write-tree", "4b825dc642cb6eb9a060e54bf8d69288fbee4904\n");

        let id = worktree_id(&git).unwrap();
        assert_eq!(id, "4b825dc642cb6eb9a060e54bf8d69288fbee4904");

        let calls = git.calls.borrow();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].args, "add --all");
        assert_eq!(calls[1].args, "write-tree");

        let index = calls[0].index_file.clone().expect("add must use the scratch index");
        assert_eq!(calls[1].index_file.as_ref(), Some(&index));
        assert!(!index.parent().unwrap().exists(), "scratch directory should be gone");
    }

    #[test]
    fn test_worktree_id_stops_when_add_fails() {
        let git = FakeGit::default().with("write-tree", "deadbeef");

        let err = worktree_id(&git).unwrap_err();
        assert!(matches!(err, QueryError::Failed { .. }));
        assert_eq!(git.call_args(), vec!["add --all"]);

        let index = git.calls.borrow()[0].index_file.clone().unwrap();
        assert!(!index.parent().unwrap().exists(), "scratch directory should be gone after failure");
    }

    #[test]
    fn test_worktree_id_write_tree_failure() {
        let git = FakeGit::default().with("add --all", "");
        assert!(worktree_id(&git).is_err());
        assert_eq!(git.call_args(), vec!["add --all", "write-tree"]);
    }
}
