use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::git;
use crate::naming::unique_target_path;
use crate::output::Output;
use crate::types::RepoLocation;

/// Options for clone command
pub struct CloneOptions {
    pub url: String,
    pub target: PathBuf,
    pub no_fsck: bool,
}

/// Clone a repository straight into its canonical host/path location
pub fn clone(opts: CloneOptions, out: &Output) -> Result<()> {
    let location = RepoLocation::from_remote_url(&opts.url)
        .with_context(|| format!("cannot derive a location for {}", opts.url))?;

    let desired = location.target_path(&opts.target);
    let destination = unique_target_path(&desired, |p| p.exists());

    if destination != desired {
        out.warn(&format!(
            "{} already exists, cloning to {}",
            desired.display(),
            destination.display()
        ));
    }

    out.status("Cloning", &format!("{} -> {}", opts.url, destination.display()));
    git::clone_repo(&opts.url, &destination, opts.no_fsck)?;

    out.success(&format!("Cloned {}", location));
    Ok(())
}
