use std::fs;
use std::path::Path;
use std::time::{Duration, SystemTime};

pub fn cleanup_old_logs(logs_dir: &Path, retention_period: Duration) {
    let entries = match fs::read_dir(logs_dir) {
        Ok(entries) => entries,
        Err(e) => {
            log::error!("[cleanup_old_logs] Unable to read logs dir {:?}: {:?}", logs_dir, e);
            return;
        }
    };
    let current_time = SystemTime::now();

    for entry_res in entries {
        let entry = match entry_res {
            Ok(entry) => entry,
            Err(e) => {
                log::error!("[cleanup_old_logs] Error in getting dir entry: {:?}", e);
                continue;
            }
        };
        let metadata = match entry.metadata() {
            Ok(metadata) => metadata,
            Err(e) => {
                log::error!("[cleanup_old_logs] Unable to get metadata for {:?}: {:?}", entry.path(), e);
                continue;
            }
        };
        if !metadata.is_file() {
            continue;
        }
        let modified_time = match metadata.modified() {
            Ok(modified_time) => modified_time,
            Err(e) => {
                log::error!("[cleanup_old_logs] Unable to get last modified time of {:?}: {:?}", entry.path(), e);
                continue;
            }
        };
        // Files stamped in the future are kept.
        let Ok(elapsed) = current_time.duration_since(modified_time) else {
            continue;
        };
        if elapsed > retention_period {
            if let Err(e) = fs::remove_file(entry.path()) {
                log::error!("[cleanup_old_logs] Unable to remove old log file {:?}: {:?}", entry.path(), e);
            } else {
                log::info!("[cleanup_old_logs] Removed old log file {:?}", entry.path());
            }
        }
    }
}
