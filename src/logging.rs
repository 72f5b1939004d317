use flexi_logger::{Cleanup, Criterion, Duplicate, FileSpec, Logger, Naming};
use std::path::PathBuf;

/// Returns the appropriate log directory for the current OS, using the app name.
pub fn get_log_directory() -> PathBuf {
    let app_name = "salesdash";
    if let Some(dir) = dirs::data_dir() {
        return dir.join(app_name);
    }
    if let Some(home) = dirs::home_dir() {
        return home.join(format!(".{}", app_name));
    }
    // Fallback: current directory
    PathBuf::from(".")
}

/// Initializes the logger to write to a rotating file in the app data directory.
/// Keeps at most 5 log files, each up to 1 MB.
///
/// Call early in main() before any log macros are used.
pub fn init_logging() {
    let log_dir = get_log_directory();
    if let Err(e) = std::fs::create_dir_all(&log_dir) {
        eprintln!("Failed to create log directory {:?}: {}", log_dir, e);
        // Fallback: use current directory
    }

    Logger::try_with_env_or_str("info")
        .unwrap()
        .log_to_file(
            FileSpec::default()
                .directory(log_dir)
                .basename("salesdash")
                .suffix("log"),
        )
        .rotate(
            Criterion::Size(1_000_000), // 1 MB per file
            Naming::Numbers,
            Cleanup::KeepLogFiles(5),
        )
        .duplicate_to_stderr(Duplicate::Warn)
        .duplicate_to_stdout(Duplicate::Info)
        .start()
        .unwrap_or_else(|e| {
            panic!("Logger initialization failed: {}", e);
        });
}
