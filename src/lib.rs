pub mod commands;
pub mod discover;
pub mod git;
pub mod naming;
pub mod output;
pub mod types;
