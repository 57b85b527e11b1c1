//! Recursive discovery of git repositories under a base directory.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::git;

/// Information about a discovered git repository
#[derive(Debug, Clone)]
pub struct RepoInfo {
    /// Absolute path of the repository working directory
    pub path: PathBuf,
    /// Host derived from the directory layout relative to the scan base,
    /// or "unknown" when the repo sits directly under the base
    pub host: String,
    /// Path below the host derived from the directory layout
    pub repo_path: String,
    /// Current branch, if determinable
    pub branch: Option<String>,
    /// Whether the working tree has uncommitted changes
    pub dirty: bool,
    /// Configured origin URL, if any
    pub remote_url: Option<String>,
}

/// Find all git repositories under `base`, recursively.
///
/// A directory counts as a repository when it contains a `.git` directory.
/// The walk does not descend into `.git` itself but does descend into
/// repositories, so nested checkouts are found too.
pub fn find_git_repos(base: &Path) -> Vec<PathBuf> {
    let mut repos = Vec::new();

    for entry in WalkDir::new(base)
        .follow_links(false)
        .into_iter()
        .filter_entry(|e| e.file_name() != ".git")
        .flatten()
    {
        if entry.file_type().is_dir() && entry.path().join(".git").is_dir() {
            repos.push(entry.path().to_path_buf());
        }
    }

    repos
}

/// Scan a directory tree and collect information about every repository in it.
///
/// The host/path columns are derived from where the repo sits relative to
/// `base`: the first component is taken as the host, the rest as the repo
/// path. Repos directly under `base` get host "unknown".
pub fn collect_repo_info(base: &Path) -> Vec<RepoInfo> {
    find_git_repos(base)
        .into_iter()
        .map(|repo| {
            let (host, repo_path) = layout_location(base, &repo);

            RepoInfo {
                branch: git::current_branch(&repo),
                dirty: git::is_dirty(&repo),
                remote_url: git::origin_url(&repo),
                path: repo,
                host,
                repo_path,
            }
        })
        .collect()
}

/// Derive (host, path) from a repo's position relative to the scan base
fn layout_location(base: &Path, repo: &Path) -> (String, String) {
    let Ok(rel) = repo.strip_prefix(base) else {
        let name = repo
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        return ("unknown".to_string(), name);
    };

    let parts: Vec<String> = rel
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();

    if parts.len() >= 2 {
        (parts[0].clone(), parts[1..].join("/"))
    } else {
        ("unknown".to_string(), rel.to_string_lossy().into_owned())
    }
}
