// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! Error types for the panorama importer

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for importer operations
pub type Result<T> = std::result::Result<T, ImportError>;

/// Importer error types
///
/// Missing folders are never errors; they are skips recorded in the
/// [`ImportReport`](crate::importer::ImportReport). Everything here aborts the run.
#[derive(Error, Debug)]
pub enum ImportError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("File system error: {0}")]
    FileSystem(#[from] std::io::Error),

    #[error("Source root {} exists but cannot be read: {source}", path.display())]
    SourceUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to list {}: {source}", path.display())]
    ListFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to copy {} -> {}: {source}", from.display(), to.display())]
    CopyFailed {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
