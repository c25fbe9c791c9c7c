//! [`History`] backed by a git repository.

use super::{BlameLine, CommitRef, History, ProvenanceError};
use chrono::{DateTime, Utc};
use git2::{BlameOptions, Commit, ErrorCode, Oid, Repository, Sort};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Git history for a notes root that lives somewhere inside a work tree.
pub struct GitHistory {
    repo: Repository,
    /// Location of the notes root relative to the work tree.
    prefix: PathBuf,
}

impl GitHistory {
    /// Opens the repository containing `root`, searching parent directories.
    ///
    /// # Errors
    ///
    /// Returns `ProvenanceError::Repository` if no repository is found, it is
    /// bare, or `root` is outside its work tree.
    pub fn discover(root: &Path) -> Result<Self, ProvenanceError> {
        let repository_err = |message: String| ProvenanceError::Repository {
            path: root.into(),
            message,
        };

        let repo = Repository::discover(root).map_err(|e| repository_err(e.message().into()))?;
        let workdir = repo
            .workdir()
            .ok_or_else(|| repository_err("bare repository has no work tree".into()))?;

        let root = root.canonicalize().map_err(|e| repository_err(e.to_string()))?;
        let workdir = workdir
            .canonicalize()
            .map_err(|e| repository_err(e.to_string()))?;
        let prefix = root
            .strip_prefix(&workdir)
            .map_err(|_| repository_err(format!("outside work tree {}", workdir.display())))?
            .to_path_buf();

        tracing::debug!(workdir = %workdir.display(), prefix = %prefix.display(), "opened repository");
        Ok(Self { repo, prefix })
    }

    fn repo_path(&self, path: &Path) -> PathBuf {
        self.prefix.join(path)
    }

    /// Author time of a commit in seconds since the epoch.
    fn author_seconds(&self, id: Oid) -> Result<i64, git2::Error> {
        Ok(self.repo.find_commit(id)?.author().when().seconds())
    }
}

impl History for GitHistory {
    fn most_recent_commit_touching(&self, path: &Path) -> Result<CommitRef, ProvenanceError> {
        let repo_path = self.repo_path(path);
        let history_err = |e: git2::Error| ProvenanceError::History {
            path: path.into(),
            message: e.message().into(),
        };

        let mut walk = self.repo.revwalk().map_err(history_err)?;
        walk.set_sorting(Sort::TIME).map_err(history_err)?;
        if let Err(e) = walk.push_head() {
            // A repository with no commits yet
            if e.code() == ErrorCode::UnbornBranch || e.code() == ErrorCode::NotFound {
                return Err(ProvenanceError::NoHistory { path: path.into() });
            }
            return Err(history_err(e));
        }

        for oid in walk {
            let commit = self.repo.find_commit(oid.map_err(history_err)?).map_err(history_err)?;
            if touches(&commit, &repo_path).map_err(history_err)? {
                tracing::trace!(path = %path.display(), commit = %commit.id(), "found last commit");
                return Ok(CommitRef::new(commit.id().to_string()));
            }
        }

        Err(ProvenanceError::NoHistory { path: path.into() })
    }

    fn blame(&self, commit: &CommitRef, path: &Path) -> Result<Vec<BlameLine>, ProvenanceError> {
        let blame_err = |e: git2::Error| ProvenanceError::Blame {
            path: path.into(),
            commit: commit.clone(),
            message: e.message().into(),
        };

        let newest = Oid::from_str(commit.as_str()).map_err(blame_err)?;
        let mut options = BlameOptions::new();
        options.newest_commit(newest);
        let blame = self
            .repo
            .blame_file(&self.repo_path(path), Some(&mut options))
            .map_err(blame_err)?;

        let mut times: HashMap<Oid, DateTime<Utc>> = HashMap::new();
        let mut lines = Vec::new();
        for hunk in blame.iter() {
            let id = hunk.final_commit_id();
            let timestamp = match times.get(&id) {
                Some(timestamp) => *timestamp,
                None => {
                    let seconds = self.author_seconds(id).map_err(blame_err)?;
                    let timestamp = DateTime::from_timestamp(seconds, 0)
                        .ok_or(ProvenanceError::InvalidTimestamp { seconds })?;
                    times.insert(id, timestamp);
                    timestamp
                }
            };

            let first = hunk.final_start_line();
            lines.extend((first..first + hunk.lines_in_hunk()).map(|line| BlameLine { line, timestamp }));
        }

        lines.sort_by_key(|line| line.line);
        Ok(lines)
    }
}

/// Whether `commit` changed `path` relative to its parents.
///
/// A commit touches a path when the path exists in its tree and differs from
/// every parent's version. A root commit touches every path it contains.
fn touches(commit: &Commit<'_>, path: &Path) -> Result<bool, git2::Error> {
    let Some(entry) = entry_id(commit, path)? else {
        return Ok(false);
    };

    for parent in commit.parents() {
        if entry_id(&parent, path)? == Some(entry) {
            return Ok(false);
        }
    }
    Ok(true)
}

fn entry_id(commit: &Commit<'_>, path: &Path) -> Result<Option<Oid>, git2::Error> {
    match commit.tree()?.get_path(path) {
        Ok(entry) => Ok(Some(entry.id())),
        Err(e) if e.code() == ErrorCode::NotFound => Ok(None),
        Err(e) => Err(e),
    }
}
