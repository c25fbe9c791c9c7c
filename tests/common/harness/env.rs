//! Isolated test environment with temp directory and optional git repository.

// Allow dead code since this is a test utility shared by several test crates
#![allow(dead_code)]

use super::NotegitCommand;
use git2::{Commit, IndexAddOption, Oid, Repository, Signature, Time};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Isolated test environment with a temporary notes root.
///
/// Creates a temp directory that is automatically cleaned up on drop. With
/// [`TestEnv::with_git`], the root is also a git work tree and files can be
/// committed at fixed times.
pub struct TestEnv {
    /// The temporary directory (kept for lifetime management)
    _temp_dir: TempDir,
    /// Path to the notes root
    notes_dir: PathBuf,
    /// Directory standing in for the user's config directory
    config_home: PathBuf,
    repo: Option<Repository>,
}

impl TestEnv {
    /// Creates a new isolated test environment without version control.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let notes_dir = temp_dir.path().join("notes");
        let config_home = temp_dir.path().join("config");
        std::fs::create_dir_all(&notes_dir).expect("Failed to create notes directory");
        std::fs::create_dir_all(&config_home).expect("Failed to create config directory");
        Self {
            _temp_dir: temp_dir,
            notes_dir,
            config_home,
            repo: None,
        }
    }

    /// Creates a new environment whose notes root is a git repository.
    pub fn with_git() -> Self {
        let mut env = Self::new();
        env.repo = Some(Repository::init(&env.notes_dir).expect("Failed to init repository"));
        env
    }

    /// Returns the path to the notes root.
    pub fn notes_dir(&self) -> &Path {
        &self.notes_dir
    }

    pub fn repo(&self) -> &Repository {
        self.repo.as_ref().expect("TestEnv was created without git")
    }

    /// Writes a file under the notes root and returns its path.
    pub fn write_file(&self, name: &str, content: &str) -> PathBuf {
        let path = self.notes_dir.join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&path, content).expect("Failed to write file");
        path
    }

    /// Writes the user config file read by the binary.
    pub fn write_config(&self, content: &str) {
        let dir = self.config_home.join("notegit");
        std::fs::create_dir_all(&dir).expect("Failed to create config directory");
        std::fs::write(dir.join("config.toml"), content).expect("Failed to write config");
    }

    /// Stages every file and commits with author and committer time `seconds`.
    pub fn commit_all(&self, message: &str, seconds: i64) -> Oid {
        let repo = self.repo();
        let mut index = repo.index().expect("Failed to open index");
        index
            .add_all(["*"].iter(), IndexAddOption::DEFAULT, None)
            .expect("Failed to stage files");
        index.write().expect("Failed to write index");
        let tree_id = index.write_tree().expect("Failed to write tree");
        let tree = repo.find_tree(tree_id).expect("Failed to find tree");

        let signature = Signature::new("Test Author", "test@example.com", &Time::new(seconds, 0))
            .expect("Failed to create signature");
        let parent = repo.head().ok().and_then(|head| head.peel_to_commit().ok());
        let parents: Vec<&Commit<'_>> = parent.iter().collect();

        repo.commit(Some("HEAD"), &signature, &signature, message, &tree, &parents)
            .expect("Failed to commit")
    }

    /// Creates a NotegitCommand configured for this test environment.
    pub fn cmd(&self) -> NotegitCommand {
        NotegitCommand::new()
            .config_home(&self.config_home)
            .root(&self.notes_dir)
    }

    /// Creates a NotegitCommand that takes its root from the config file.
    pub fn cmd_without_root(&self) -> NotegitCommand {
        NotegitCommand::new().config_home(&self.config_home)
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_creates_temp_directory() {
        let env = TestEnv::new();
        assert!(env.notes_dir().is_dir(), "notes root should be a directory");
    }

    #[test]
    fn test_env_cleanup_on_drop() {
        let path = {
            let env = TestEnv::new();
            env.notes_dir().to_path_buf()
        };
        assert!(!path.exists(), "temp directory should be cleaned up on drop");
    }

    #[test]
    fn test_env_commits_at_fixed_time() {
        let env = TestEnv::with_git();
        env.write_file("a.md", "---\nid: a\n---\n");
        let oid = env.commit_all("first", 1_700_000_000);

        let commit = env.repo().find_commit(oid).unwrap();
        assert_eq!(commit.author().when().seconds(), 1_700_000_000);
        assert_eq!(commit.parent_count(), 0);

        env.write_file("b.md", "---\nid: b\n---\n");
        let second = env.commit_all("second", 1_700_000_100);
        assert_eq!(env.repo().find_commit(second).unwrap().parent_count(), 1);
    }
}
