pub mod comments;
pub mod config;
pub mod prs;
pub mod search;
