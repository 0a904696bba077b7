use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

const LOG_FILE_NAME: &str = "trivium.log";

/// Initialize tracing.
///
/// The TUI owns the terminal, so logs always go to `trivium.log` inside
/// `log_dir` (or the OS temp directory when none is given). If the file
/// cannot be opened, output is discarded.
pub fn initialize(log_dir: Option<&Path>) {
    let builder = tracing_subscriber::fmt().with_env_filter(
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    );

    let path = log_file_path(log_dir);
    let file = path
        .parent()
        .map(std::fs::create_dir_all)
        .transpose()
        .and_then(|_| {
            std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
        });

    match file {
        Ok(file) => {
            let _ = builder.with_writer(file).with_ansi(false).try_init();
        }
        Err(_) => {
            let _ = builder
                .with_writer(std::io::sink)
                .with_ansi(false)
                .try_init();
        }
    }
}

/// Return the log file path: `{log_dir or temp_dir}/trivium.log`
pub fn log_file_path(log_dir: Option<&Path>) -> PathBuf {
    log_dir
        .map(Path::to_path_buf)
        .unwrap_or_else(std::env::temp_dir)
        .join(LOG_FILE_NAME)
}
