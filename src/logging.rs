// src/logging.rs

use color_eyre::eyre::Result;
use directories::ProjectDirs;
use lazy_static::lazy_static;
use std::path::PathBuf;
use tracing_error::ErrorLayer;
use tracing_subscriber::{self, EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

lazy_static! {
    pub static ref PROJECT_NAME: String = env!("CARGO_CRATE_NAME").to_uppercase().to_string();
    pub static ref LOG_ENV: String = format!("{}_LOGLEVEL", PROJECT_NAME.clone());
    pub static ref LOG_FILE: String = format!("{}.log", env!("CARGO_PKG_NAME"));
}

/// Where log lines go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogOutput {
    /// Standard error, for the API server and one-shot scans.
    Stderr,
    /// A file in the data directory, so the terminal UI is never overwritten.
    File,
}

fn project_directory() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "sitescan", env!("CARGO_PKG_NAME"))
}

pub fn get_data_dir() -> PathBuf {
    if let Some(proj_dirs) = project_directory() {
        proj_dirs.data_local_dir().to_path_buf()
    } else {
        PathBuf::from(".").join(".data")
    }
}

/// `RUST_LOG` wins, then `SITESCAN_LOGLEVEL`, then info for this crate and
/// the HTTP trace layer.
fn log_filter() -> EnvFilter {
    let directives = std::env::var("RUST_LOG")
        .or_else(|_| std::env::var(LOG_ENV.as_str()))
        .unwrap_or_else(|_| format!("{}=info,tower_http=info", env!("CARGO_CRATE_NAME")));
    EnvFilter::new(directives)
}

/// Initializes the global tracing subscriber.
pub fn initialize_logging(output: LogOutput) -> Result<()> {
    let fmt_layer = match output {
        LogOutput::Stderr => tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_filter(log_filter())
            .boxed(),
        LogOutput::File => {
            let directory = get_data_dir();
            std::fs::create_dir_all(&directory)?;
            let log_file = std::fs::File::create(directory.join(LOG_FILE.as_str()))?;
            tracing_subscriber::fmt::layer()
                .with_writer(log_file)
                .with_target(false)
                .with_ansi(false)
                .with_filter(log_filter())
                .boxed()
        }
    };

    tracing_subscriber::registry()
        .with(fmt_layer)
        .with(ErrorLayer::default())
        .init();

    Ok(())
}
