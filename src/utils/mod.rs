pub mod comment;
pub mod config;
pub mod pull_request;
pub mod reqwest_client;
