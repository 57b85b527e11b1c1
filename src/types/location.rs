use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use thiserror::Error;
use url::Url;

/// Canonical repository location derived from a remote URL: host + path.
///
/// Supports arbitrary path depth for GitLab subgroups:
/// - `github.com` / `user/repo` (traditional two-segment path)
/// - `git.example.com` / `group/subgroup/project`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepoLocation {
    /// Host part (e.g., "github.com"), never empty, never contains `/`
    pub host: String,
    /// Path below the host, `/`-separated, no leading/trailing `/`,
    /// never ends in `.git`
    pub path: String,
}

/// A remote URL that matched none of the recognized grammars
/// (or matched a grammar that could not extract a host and path).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unrecognized remote URL: '{0}'")]
pub struct RemoteParseError(pub String);

/// A recognized URL grammar: a predicate that claims an input, and an
/// extractor that pulls the location out of it.
type Grammar = (fn(&str) -> bool, fn(&str) -> Option<RepoLocation>);

/// Grammars in priority order. The first grammar whose predicate matches is
/// committed to: if its extractor fails, the whole parse fails rather than
/// falling through. `ssh://host` (no path) must not be re-read as scp
/// shorthand with host "ssh".
const GRAMMARS: [Grammar; 3] = [
    (is_ssh_scheme, extract_ssh_scheme),
    (is_http_scheme, extract_http_url),
    (is_scp_shorthand, extract_scp_shorthand),
];

const SSH_PREFIX: &str = "ssh://";

impl RepoLocation {
    /// Parse a git remote URL into its canonical host/path location.
    ///
    /// Handles `ssh://` URLs, `http(s)://` URLs, and scp-style shorthand
    /// (`git@host:path`). Returns an error for anything else, including the
    /// empty string.
    pub fn from_remote_url(url: &str) -> Result<Self, RemoteParseError> {
        if url.is_empty() {
            return Err(RemoteParseError(url.to_string()));
        }

        for (applies, extract) in GRAMMARS {
            if applies(url) {
                return extract(url).ok_or_else(|| RemoteParseError(url.to_string()));
            }
        }

        Err(RemoteParseError(url.to_string()))
    }

    /// Desired filesystem destination below `base`: `base/host/path`
    pub fn target_path(&self, base: &Path) -> PathBuf {
        base.join(&self.host).join(&self.path)
    }

    /// Repository name (last path segment)
    pub fn name(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or(&self.path)
    }
}

fn is_ssh_scheme(url: &str) -> bool {
    url.starts_with(SSH_PREFIX)
}

/// ssh://[user@]host[:port]/path/to/repo[.git]
fn extract_ssh_scheme(url: &str) -> Option<RepoLocation> {
    let rest = url.strip_prefix(SSH_PREFIX)?;

    // Drop user@ if present
    let rest = match rest.split_once('@') {
        Some((_, after)) => after,
        None => rest,
    };

    // host[:port] / path — no slash means no path, grammar fails
    let (host_part, path) = rest.split_once('/')?;

    let host = host_part.split(':').next().unwrap_or(host_part);
    if host.is_empty() {
        return None;
    }

    let path = path.strip_suffix(".git").unwrap_or(path);
    let path = path.trim_end_matches('/');

    Some(RepoLocation {
        host: host.to_string(),
        path: path.to_string(),
    })
}

fn is_http_scheme(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

/// http(s)://[user[:pass]@]host[:port]/path/to/repo[.git]
fn extract_http_url(url: &str) -> Option<RepoLocation> {
    let parsed = Url::parse(url).ok()?;
    let host = parsed.host_str()?.to_string();

    let path = parsed.path().trim_start_matches('/');
    let path = path.strip_suffix(".git").unwrap_or(path);
    let path = path.trim_end_matches('/');

    Some(RepoLocation {
        host,
        path: path.to_string(),
    })
}

fn is_scp_shorthand(url: &str) -> bool {
    url.contains(':')
}

/// [user@]host:path[.git] — the scp-style shorthand git accepts
fn extract_scp_shorthand(url: &str) -> Option<RepoLocation> {
    // Only a word-chars/dash user prefix is recognized; anything else stays
    // part of the host
    let rest = match url.split_once('@') {
        Some((user, after))
            if !user.is_empty()
                && user.chars().all(|c| c.is_alphanumeric() || c == '_' || c == '-') =>
        {
            after
        }
        _ => url,
    };

    let (host, path) = rest.split_once(':')?;
    if host.is_empty() || path.is_empty() {
        return None;
    }

    // Strip one trailing .git, but only when a non-empty stem remains
    let path = match path.strip_suffix(".git") {
        Some(stem) if !stem.is_empty() => stem,
        _ => path,
    };

    // Leading slashes handle malformed forms like host:/path
    let path = path.trim_start_matches('/').trim_end_matches('/');

    Some(RepoLocation {
        host: host.to_string(),
        path: path.to_string(),
    })
}

impl FromStr for RepoLocation {
    type Err = RemoteParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_remote_url(s)
    }
}

impl fmt::Display for RepoLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.host, self.path)
    }
}
