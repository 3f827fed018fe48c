use std::process::ExitCode;

use crate::utils::config::AppConfig;

mod github;
mod logger;
mod server;
mod utils;

#[tokio::main]
async fn main() -> ExitCode {
    if let Err(e) = dotenv::dotenv() {
        if !e.not_found() {
            eprintln!("[main] Unable to load .env file: {}", e);
        }
    }
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("[main] Invalid configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let logs_init_status = logger::init::init_logger(config.log_level, config.log_dir.as_deref());
    if !logs_init_status {
        eprintln!("[main] Unable to set up file logger");
    }
    if let Some(log_dir) = &config.log_dir {
        logger::init::spawn_log_cleanup(log_dir.clone(), config.log_retention);
    }

    log::info!(
        "[main] Proxying {}/{} via {}, token {}",
        &config.github.owner,
        &config.github.repo,
        &config.github.base_url,
        if config.github.token().is_empty() { "unset" } else { "set" }
    );
    if let Err(e) = server::serve(config).await {
        log::error!("[main] Server error: {:?}", e);
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
