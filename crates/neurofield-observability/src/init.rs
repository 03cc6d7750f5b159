// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Unified logging initialization for NeuroField
//!
//! Console output always; optionally a timestamped per-run folder of
//! rolling JSON log files with run-count retention.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Utc;
use tracing_appender::rolling;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

use crate::cli::CrateDebugFlags;

/// File output settings for [`init_logging`]
#[derive(Debug, Clone)]
pub struct LogFileOptions {
    /// Base directory run folders are created under
    pub log_dir: PathBuf,
    /// Keep the N most recent run folders, delete older ones
    pub retention_runs: usize,
}

impl Default for LogFileOptions {
    fn default() -> Self {
        Self {
            log_dir: PathBuf::from("logs"),
            retention_runs: 10,
        }
    }
}

/// Logging initialization result
///
/// Must be kept alive for the lifetime of the program: dropping it flushes
/// and closes the non-blocking file writers.
pub struct LoggingGuard {
    _file_guards: Vec<tracing_appender::non_blocking::WorkerGuard>,
    run_dir: Option<PathBuf>,
}

impl LoggingGuard {
    /// Per-run log directory, when file output is enabled
    pub fn run_dir(&self) -> Option<&Path> {
        self.run_dir.as_deref()
    }
}

/// Initialize logging with console output and optional file output
///
/// With file output enabled, creates a timestamped folder:
/// ```text
/// ./logs/
///   └── run_20250101_120000/
///       └── neurofield.log
/// ```
///
/// Filter resolution order: `RUST_LOG` when set, otherwise the directives
/// built from `debug_flags` on top of `default_level`.
///
/// # Arguments
/// * `debug_flags` - Per-crate debug flags for filtering
/// * `default_level` - Level directive used when no flag raises a crate
/// * `file_options` - `Some` to also write rolling JSON log files
pub fn init_logging(
    debug_flags: &CrateDebugFlags,
    default_level: &str,
    file_options: Option<LogFileOptions>,
) -> Result<LoggingGuard> {
    let filter_string = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| debug_flags.to_filter_string(default_level));

    let mut layers = Vec::new();
    let mut file_guards = Vec::new();
    let mut run_dir = None;

    // Console layer (human-readable)
    let console_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_file(false)
        .with_line_number(false)
        .with_filter(EnvFilter::new(&filter_string));
    layers.push(console_layer.boxed());

    if let Some(options) = file_options {
        let timestamp = Utc::now().format("%Y%m%d_%H%M%S");
        let run_folder = options.log_dir.join(format!("run_{}", timestamp));
        std::fs::create_dir_all(&run_folder)
            .with_context(|| format!("Failed to create log directory: {}", run_folder.display()))?;

        cleanup_old_runs(&options.log_dir, options.retention_runs)?;

        let file_appender = rolling::daily(&run_folder, "neurofield.log");
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
        file_guards.push(guard);

        // JSON formatter for files, with source locations kept
        let file_layer = tracing_subscriber::fmt::layer()
            .with_writer(non_blocking)
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .json()
            .with_filter(EnvFilter::new(&filter_string))
            .boxed();
        layers.push(file_layer);

        run_dir = Some(run_folder);
    }

    Registry::default()
        .with(layers)
        .try_init()
        .context("failed to install the global tracing subscriber")?;

    Ok(LoggingGuard {
        _file_guards: file_guards,
        run_dir,
    })
}

/// Initialize console-only logging with default settings
pub fn init_logging_default(debug_flags: &CrateDebugFlags) -> Result<LoggingGuard> {
    init_logging(debug_flags, "info", None)
}

/// Remove the oldest `run_*` folders beyond the retention count.
///
/// The timestamp format sorts lexicographically in chronological order, so
/// name order is age order.
fn cleanup_old_runs(base_log_dir: &Path, retention_runs: usize) -> Result<()> {
    if !base_log_dir.exists() {
        return Ok(());
    }

    let mut runs: Vec<PathBuf> = Vec::new();
    for entry in std::fs::read_dir(base_log_dir)? {
        let entry = entry?;
        let path = entry.path();
        if path.is_dir()
            && path
                .file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.starts_with("run_"))
        {
            runs.push(path);
        }
    }

    runs.sort();

    if runs.len() > retention_runs {
        let to_remove = runs.len() - retention_runs;
        for path in runs.iter().take(to_remove) {
            if let Err(e) = std::fs::remove_dir_all(path) {
                eprintln!(
                    "Warning: Failed to remove old log directory {}: {}",
                    path.display(),
                    e
                );
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_cleanup_keeps_the_most_recent_runs() {
        let dir = tempdir().unwrap();
        for stamp in [
            "run_20250101_090000",
            "run_20250102_090000",
            "run_20250103_090000",
            "run_20250104_090000",
        ] {
            std::fs::create_dir(dir.path().join(stamp)).unwrap();
        }
        // Unrelated entries are never touched
        std::fs::create_dir(dir.path().join("archive")).unwrap();

        cleanup_old_runs(dir.path(), 2).unwrap();

        assert!(!dir.path().join("run_20250101_090000").exists());
        assert!(!dir.path().join("run_20250102_090000").exists());
        assert!(dir.path().join("run_20250103_090000").exists());
        assert!(dir.path().join("run_20250104_090000").exists());
        assert!(dir.path().join("archive").exists());
    }

    #[test]
    fn test_cleanup_of_missing_dir_is_a_noop() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("never_created");
        assert!(cleanup_old_runs(&missing, 3).is_ok());
    }

    #[test]
    fn test_file_options_defaults() {
        let options = LogFileOptions::default();
        assert_eq!(options.log_dir, PathBuf::from("logs"));
        assert_eq!(options.retention_runs, 10);
    }
}
