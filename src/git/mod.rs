pub mod probe;
pub mod shell;

pub use probe::{current_branch, is_dirty, origin_url};
pub use shell::clone_repo;
