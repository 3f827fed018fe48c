use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::Utc;
use fern::log_file;
use log::LevelFilter;

use crate::logger::cleanup::cleanup_old_logs;

const CLEANUP_INTERVAL: Duration = Duration::from_secs(24 * 60 * 60);

pub fn init_logger(level: LevelFilter, log_dir: Option<&Path>) -> bool {
    let quiet_level = dependency_level(level);
    let mut dispatcher = fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{}][{}] {}",
                Utc::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                message
            ))
        })
        .level(level)
        // hyper and reqwest are chatty at debug level
        .level_for("hyper", quiet_level)
        .level_for("reqwest", quiet_level)
        .chain(std::io::stdout());

    let mut file_chained = true;
    if let Some(dir) = log_dir {
        match open_log_file(dir) {
            Some(file) => dispatcher = dispatcher.chain(file),
            None => file_chained = false,
        }
    }

    if let Err(e) = dispatcher.apply() {
        eprintln!("[init_logger] Unable to set logger: {:?}", e);
        return false;
    }
    if !file_chained {
        log::error!("[init_logger] Logging to stdout only, log dir {:?} is unusable", log_dir);
    }
    return file_chained;
}

fn open_log_file(dir: &Path) -> Option<File> {
    if let Err(e) = fs::create_dir_all(dir) {
        eprintln!("[open_log_file] Unable to create logs dir {:?}: {:?}", dir, e);
        return None;
    }
    let log_file_path = dir.join(log_file_name());
    match log_file(&log_file_path) {
        Ok(file) => Some(file),
        Err(e) => {
            eprintln!("[open_log_file] Unable to create log file {:?}: {:?}", &log_file_path, e);
            None
        }
    }
}

fn dependency_level(level: LevelFilter) -> LevelFilter {
    level.min(LevelFilter::Warn)
}

/// Periodically removes log files older than `retention` from `log_dir`.
pub fn spawn_log_cleanup(log_dir: PathBuf, retention: Duration) {
    tokio::spawn(async move {
        loop {
            cleanup_old_logs(&log_dir, retention);
            tokio::time::sleep(CLEANUP_INTERVAL).await;
        }
    });
}

fn log_file_name() -> String {
    format!("{}.log", Utc::now().format("%Y-%m-%d_%H-%M-%S"))
}
