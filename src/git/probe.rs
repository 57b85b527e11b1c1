//! Read-only inspection of local repositories via libgit2.
//!
//! All probes are best-effort: a directory that is not a repository, has no
//! origin remote, or has an unborn HEAD simply yields `None`/clean rather
//! than an error, so discovery can report partial information.

use std::path::Path;

use git2::{Repository, StatusOptions};

/// Get the `remote.origin.url` of a repository, if configured
pub fn origin_url(repo_path: &Path) -> Option<String> {
    let repo = Repository::open(repo_path).ok()?;
    let remote = repo.find_remote("origin").ok()?;
    remote.url().map(|url| url.to_string())
}

/// Get the current branch name of a repository
///
/// Returns "HEAD" for a detached HEAD, `None` for an unborn branch or a
/// directory that is not a repository.
pub fn current_branch(repo_path: &Path) -> Option<String> {
    let repo = Repository::open(repo_path).ok()?;
    let head = repo.head().ok()?;
    if head.is_branch() {
        head.shorthand().map(|name| name.to_string())
    } else {
        Some("HEAD".to_string())
    }
}

/// Check whether a repository has uncommitted changes (including untracked
/// files, matching `git status --porcelain`)
pub fn is_dirty(repo_path: &Path) -> bool {
    let Ok(repo) = Repository::open(repo_path) else {
        return false;
    };

    let mut opts = StatusOptions::new();
    opts.include_untracked(true);

    match repo.statuses(Some(&mut opts)) {
        Ok(statuses) => !statuses.is_empty(),
        Err(_) => false,
    }
}
