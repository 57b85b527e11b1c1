use std::fs;
use std::path::Path;
use std::process::Command;

use anyhow::{Context, Result, bail};

/// Clone a repository to the given target path.
///
/// Shells out to the `git` CLI (libgit2 has no equivalent of per-invocation
/// `-c transfer.fsckObjects=false`). `no_fsck` disables object checks during
/// the clone, which some repositories with malformed history need.
pub fn clone_repo(url: &str, target: &Path, no_fsck: bool) -> Result<()> {
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory: {}", parent.display()))?;
    }

    if target.exists() {
        bail!("clone target already exists: {}", target.display());
    }

    let mut cmd = Command::new("git");
    if no_fsck {
        cmd.args(["-c", "transfer.fsckObjects=false"]);
    }
    cmd.arg("clone").arg(url).arg(target);

    let output = cmd
        .output()
        .with_context(|| format!("failed to execute git clone for {}", url))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        bail!("git clone failed for {}: {}", url, stderr.trim());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use git2::{Repository, Signature};
    use tempfile::TempDir;

    /// Create a local repository with one commit to clone from
    fn create_source_repo() -> TempDir {
        let dir = TempDir::new().unwrap();
        let repo = Repository::init(dir.path()).unwrap();

        {
            let mut config = repo.config().unwrap();
            config.set_str("user.name", "Test User").unwrap();
            config.set_str("user.email", "test@test.com").unwrap();
        }

        {
            let sig = Signature::now("Test User", "test@test.com").unwrap();
            let tree_id = {
                let mut index = repo.index().unwrap();
                std::fs::write(dir.path().join("README.md"), "# Test").unwrap();
                index.add_path(Path::new("README.md")).unwrap();
                index.write().unwrap();
                index.write_tree().unwrap()
            };
            let tree = repo.find_tree(tree_id).unwrap();
            repo.commit(Some("HEAD"), &sig, &sig, "Initial commit", &tree, &[])
                .unwrap();
        }

        dir
    }

    #[test]
    fn test_clone_local_repo() {
        let source = create_source_repo();
        let target_dir = TempDir::new().unwrap();
        let target = target_dir.path().join("host.example/user/repo");

        let url = source.path().to_string_lossy().to_string();
        clone_repo(&url, &target, false).unwrap();

        assert!(target.join(".git").is_dir());
        assert!(target.join("README.md").is_file());
    }

    #[test]
    fn test_clone_creates_parent_directories() {
        let source = create_source_repo();
        let target_dir = TempDir::new().unwrap();
        let target = target_dir.path().join("deep/nested/layout/repo");

        let url = source.path().to_string_lossy().to_string();
        clone_repo(&url, &target, false).unwrap();

        assert!(target.is_dir());
    }

    #[test]
    fn test_clone_into_existing_target_fails() {
        let source = create_source_repo();
        let target_dir = TempDir::new().unwrap();
        let target = target_dir.path().join("repo");
        fs::create_dir_all(&target).unwrap();

        let url = source.path().to_string_lossy().to_string();
        let result = clone_repo(&url, &target, false);

        assert!(result.is_err());
    }

    #[test]
    fn test_clone_invalid_url_fails() {
        let target_dir = TempDir::new().unwrap();
        let target = target_dir.path().join("repo");

        let result = clone_repo("/nonexistent/source/repo", &target, false);
        assert!(result.is_err());
    }
}
