//! Collision-free target path allocation.
//!
//! A repository's canonical destination may already be occupied (two clones
//! of the same repo, or an unrelated directory squatting on the name). The
//! allocator probes `-copy1`, `-copy2`, ... suffixes until it finds a free
//! path. The existence check is injected by the caller, so allocation itself
//! performs no I/O and the probing is fully unit-testable.

use std::path::{Path, PathBuf};

/// Lazy candidate sequence for a desired path: the path itself, then
/// `{path}-copy1`, `{path}-copy2`, ...
///
/// The suffix is appended to the full path string, not added as a new path
/// segment, so `/x/repo` becomes `/x/repo-copy1`.
pub fn candidate_paths(desired: &Path) -> impl Iterator<Item = PathBuf> + '_ {
    std::iter::once(desired.to_path_buf()).chain((1u64..).map(move |n| {
        let mut s = desired.as_os_str().to_os_string();
        s.push(format!("-copy{}", n));
        PathBuf::from(s)
    }))
}

/// Return the first candidate for `desired` that does not already exist
/// according to `exists`.
///
/// The probe is unbounded by design: on any finite filesystem the counter
/// eventually clears the pre-existing collisions.
pub fn unique_target_path(desired: &Path, mut exists: impl FnMut(&Path) -> bool) -> PathBuf {
    candidate_paths(desired)
        .find(|candidate| !exists(candidate))
        .expect("candidate sequence is unbounded")
}
