use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::discover;
use crate::output::{Output, OutputFormat};

/// Options for status command
pub struct StatusOptions {
    pub dir: PathBuf,
}

/// Report every git repository under a directory: where it sits in the
/// host/path layout, its branch, dirty state, and origin URL
pub fn status(opts: StatusOptions, out: &Output) -> Result<()> {
    let dir = opts
        .dir
        .canonicalize()
        .with_context(|| format!("directory not found: {}", opts.dir.display()))?;

    let infos = discover::collect_repo_info(&dir);

    match out.format {
        OutputFormat::Human => {
            if infos.is_empty() {
                out.info(&format!("No git repositories found in {}", dir.display()));
                return Ok(());
            }

            println!("{:<44} {:<20} {:<6} {}", "REPO", "BRANCH", "DIRTY", "ORIGIN");
            for info in &infos {
                println!(
                    "{:<44} {:<20} {:<6} {}",
                    format!("{}/{}", info.host, info.repo_path),
                    info.branch.as_deref().unwrap_or("-"),
                    if info.dirty { "yes" } else { "no" },
                    info.remote_url.as_deref().unwrap_or("-"),
                );
            }
        }
        OutputFormat::Json => {
            let repos: Vec<_> = infos
                .iter()
                .map(|info| {
                    serde_json::json!({
                        "path": info.path,
                        "host": info.host,
                        "repo_path": info.repo_path,
                        "branch": info.branch,
                        "dirty": info.dirty,
                        "origin": info.remote_url,
                    })
                })
                .collect();
            println!(
                "{}",
                serde_json::to_string_pretty(&serde_json::json!({ "repos": repos }))?
            );
        }
    }

    Ok(())
}
