mod config;
mod location;

pub use config::Config;
pub use location::{RemoteParseError, RepoLocation};
