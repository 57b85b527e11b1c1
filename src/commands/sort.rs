use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::discover;
use crate::git;
use crate::naming::unique_target_path;
use crate::output::{Output, OutputFormat};
use crate::types::RepoLocation;

/// Options for sort command
pub struct SortOptions {
    pub source: PathBuf,
    pub target: PathBuf,
    pub dry_run: bool,
    pub yes: bool,
}

/// A repository scheduled to move to its canonical destination
#[derive(Debug)]
pub struct PlannedMove {
    pub repo: PathBuf,
    pub target: PathBuf,
    pub origin: String,
    /// The canonical destination was taken; a -copyN suffix was allocated
    pub renamed: bool,
}

/// A repository that cannot be sorted, with the reason
#[derive(Debug)]
pub struct SkippedRepo {
    pub repo: PathBuf,
    pub reason: String,
}

#[derive(Debug, Default)]
pub struct SortPlan {
    pub moves: Vec<PlannedMove>,
    pub skipped: Vec<SkippedRepo>,
}

/// Sort repositories under `source` into `target/host/path`
pub fn sort(opts: SortOptions, out: &Output) -> Result<()> {
    if !opts.dry_run {
        out.require_human("sort")?;
    }

    let source = opts
        .source
        .canonicalize()
        .with_context(|| format!("source directory not found: {}", opts.source.display()))?;

    let plan = plan_moves(&source, &opts.target);

    if plan.moves.is_empty() && plan.skipped.is_empty() {
        out.info(&format!(
            "No git repositories found in {}",
            source.display()
        ));
        return Ok(());
    }

    match out.format {
        OutputFormat::Human => print_plan(&plan, out),
        OutputFormat::Json => print_plan_json(&plan)?,
    }

    if opts.dry_run {
        out.info("Dry run: no changes made.");
        return Ok(());
    }

    if plan.moves.is_empty() {
        out.info("Nothing to move.");
        return Ok(());
    }

    if !opts.yes && !out.confirm("Proceed with moving repositories?")? {
        out.info("Aborted.");
        return Ok(());
    }

    let mut moved = 0;
    let mut failed = 0;

    for m in &plan.moves {
        match execute_move(m) {
            Ok(()) => {
                moved += 1;
                out.status(
                    "Moved",
                    &format!("{} -> {}", m.repo.display(), m.target.display()),
                );
            }
            Err(e) => {
                failed += 1;
                out.warn(&format!("failed to move {}: {:#}", m.repo.display(), e));
            }
        }
    }

    if failed > 0 {
        out.warn(&format!("{} move(s) failed", failed));
    }
    out.success(&format!("Sorted {} repositories", moved));

    Ok(())
}

/// Compute the move plan for every repository under `source`.
///
/// Conflict resolution is per plan, not just per filesystem state: targets
/// claimed earlier in the same plan count as occupied, so two clones of the
/// same repository get distinct destinations in a single run.
pub fn plan_moves(source: &Path, target: &Path) -> SortPlan {
    let mut plan = SortPlan::default();
    let mut claimed: HashSet<PathBuf> = HashSet::new();

    for repo in discover::find_git_repos(source) {
        let Some(origin) = git::origin_url(&repo) else {
            plan.skipped.push(SkippedRepo {
                repo,
                reason: "no origin URL found".to_string(),
            });
            continue;
        };

        let location = match RepoLocation::from_remote_url(&origin) {
            Ok(location) => location,
            Err(e) => {
                plan.skipped.push(SkippedRepo {
                    repo,
                    reason: e.to_string(),
                });
                continue;
            }
        };

        let desired = location.target_path(target);

        if already_in_place(&repo, &desired) {
            plan.skipped.push(SkippedRepo {
                repo,
                reason: "already sorted".to_string(),
            });
            continue;
        }

        let destination =
            unique_target_path(&desired, |p| claimed.contains(p) || p.exists());
        claimed.insert(destination.clone());

        plan.moves.push(PlannedMove {
            renamed: destination != desired,
            repo,
            target: destination,
            origin,
        });
    }

    plan
}

/// A repo already sitting at its canonical destination needs no move
fn already_in_place(repo: &Path, desired: &Path) -> bool {
    if !desired.exists() {
        return false;
    }
    match (fs::canonicalize(repo), fs::canonicalize(desired)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

fn execute_move(m: &PlannedMove) -> Result<()> {
    if let Some(parent) = m.target.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory: {}", parent.display()))?;
    }

    fs::rename(&m.repo, &m.target).with_context(|| {
        format!(
            "failed to move {} to {}",
            m.repo.display(),
            m.target.display()
        )
    })
}

fn print_plan(plan: &SortPlan, out: &Output) {
    out.info(&format!(
        "Found {} git repositories",
        plan.moves.len() + plan.skipped.len()
    ));

    if !plan.moves.is_empty() {
        println!("Planned moves:");
        for m in &plan.moves {
            let suffix = if m.renamed { "  [conflict: renamed]" } else { "" };
            println!("  {} -> {}{}", m.repo.display(), m.target.display(), suffix);
            out.verbose(&format!("    origin: {}", m.origin));
        }
    }

    if !plan.skipped.is_empty() {
        println!("Skipped:");
        for s in &plan.skipped {
            println!("  {}: {}", s.repo.display(), s.reason);
        }
    }
}

fn print_plan_json(plan: &SortPlan) -> Result<()> {
    let payload = serde_json::json!({
        "moves": plan
            .moves
            .iter()
            .map(|m| {
                serde_json::json!({
                    "from": m.repo,
                    "to": m.target,
                    "origin": m.origin,
                    "renamed": m.renamed,
                })
            })
            .collect::<Vec<_>>(),
        "skipped": plan
            .skipped
            .iter()
            .map(|s| {
                serde_json::json!({
                    "repo": s.repo,
                    "reason": s.reason,
                })
            })
            .collect::<Vec<_>>(),
    });

    println!("{}", serde_json::to_string_pretty(&payload)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use git2::Repository;
    use tempfile::TempDir;

    /// Create a repository under base/rel with the given origin URL
    fn repo_with_origin(base: &Path, rel: &str, origin: &str) -> PathBuf {
        let path = base.join(rel);
        fs::create_dir_all(&path).unwrap();
        let repo = Repository::init(&path).unwrap();
        repo.remote("origin", origin).unwrap();
        path
    }

    #[test]
    fn test_plan_basic_move() {
        let source = TempDir::new().unwrap();
        let target = TempDir::new().unwrap();
        repo_with_origin(source.path(), "myrepo", "git@github.com:user/repo.git");

        let plan = plan_moves(source.path(), target.path());

        assert_eq!(plan.moves.len(), 1);
        assert!(plan.skipped.is_empty());
        assert_eq!(plan.moves[0].target, target.path().join("github.com/user/repo"));
        assert!(!plan.moves[0].renamed);
    }

    #[test]
    fn test_plan_skips_repo_without_origin() {
        let source = TempDir::new().unwrap();
        let target = TempDir::new().unwrap();
        let path = source.path().join("local-only");
        fs::create_dir_all(&path).unwrap();
        Repository::init(&path).unwrap();

        let plan = plan_moves(source.path(), target.path());

        assert!(plan.moves.is_empty());
        assert_eq!(plan.skipped.len(), 1);
        assert!(plan.skipped[0].reason.contains("no origin"));
    }

    #[test]
    fn test_plan_skips_unparseable_origin() {
        let source = TempDir::new().unwrap();
        let target = TempDir::new().unwrap();
        repo_with_origin(source.path(), "weird", "/local/path/repo");

        let plan = plan_moves(source.path(), target.path());

        assert!(plan.moves.is_empty());
        assert_eq!(plan.skipped.len(), 1);
        assert!(plan.skipped[0].reason.contains("unrecognized"));
    }

    #[test]
    fn test_plan_resolves_existing_destination() {
        let source = TempDir::new().unwrap();
        let target = TempDir::new().unwrap();
        repo_with_origin(source.path(), "myrepo", "git@github.com:user/repo.git");
        fs::create_dir_all(target.path().join("github.com/user/repo")).unwrap();

        let plan = plan_moves(source.path(), target.path());

        assert_eq!(plan.moves.len(), 1);
        assert_eq!(
            plan.moves[0].target,
            target.path().join("github.com/user/repo-copy1")
        );
        assert!(plan.moves[0].renamed);
    }

    #[test]
    fn test_plan_resolves_collision_within_run() {
        let source = TempDir::new().unwrap();
        let target = TempDir::new().unwrap();
        repo_with_origin(source.path(), "clone-a", "git@github.com:user/repo.git");
        repo_with_origin(source.path(), "clone-b", "git@github.com:user/repo.git");

        let plan = plan_moves(source.path(), target.path());

        assert_eq!(plan.moves.len(), 2);
        let mut targets: Vec<_> = plan.moves.iter().map(|m| m.target.clone()).collect();
        targets.sort();
        assert_eq!(
            targets,
            vec![
                target.path().join("github.com/user/repo"),
                target.path().join("github.com/user/repo-copy1"),
            ]
        );
    }

    #[test]
    fn test_plan_skips_repo_already_in_place() {
        let target = TempDir::new().unwrap();
        repo_with_origin(target.path(), "github.com/user/repo", "git@github.com:user/repo.git");

        // Scanning the target tree itself: the repo is where it belongs
        let plan = plan_moves(target.path(), target.path());

        assert!(plan.moves.is_empty());
        assert_eq!(plan.skipped.len(), 1);
        assert_eq!(plan.skipped[0].reason, "already sorted");
    }

    #[test]
    fn test_sort_executes_moves() {
        let source = TempDir::new().unwrap();
        let target = TempDir::new().unwrap();
        let repo = repo_with_origin(source.path(), "myrepo", "git@github.com:user/repo.git");

        let opts = SortOptions {
            source: source.path().to_path_buf(),
            target: target.path().to_path_buf(),
            dry_run: false,
            yes: true,
        };
        sort(opts, &Output::default()).unwrap();

        assert!(!repo.exists());
        assert!(target.path().join("github.com/user/repo/.git").is_dir());
    }

    #[test]
    fn test_sort_dry_run_moves_nothing() {
        let source = TempDir::new().unwrap();
        let target = TempDir::new().unwrap();
        let repo = repo_with_origin(source.path(), "myrepo", "git@github.com:user/repo.git");

        let opts = SortOptions {
            source: source.path().to_path_buf(),
            target: target.path().to_path_buf(),
            dry_run: true,
            yes: false,
        };
        sort(opts, &Output::default()).unwrap();

        assert!(repo.exists());
        assert!(!target.path().join("github.com").exists());
    }
}
