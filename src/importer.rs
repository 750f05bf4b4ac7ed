// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! Traversal of the export tree and copying into the flat asset directory
//!
//! Order is fixed: time folders, then elevation folders (both in table
//! order), then direction subfolders sorted by name. When two leaves resolve
//! to the same asset name, the one visited last wins.
//!
//! Two runs against the same target at once are not coordinated; the last
//! writer wins.

use serde::Serialize;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::config::ImportConfig;
use crate::selector::select_best_candidate;
use crate::tables::AssetName;
use crate::{ImportError, Result};

/// One copied (or, in dry-run mode, planned) asset
#[derive(Debug, Clone, Serialize)]
pub struct CopyRecord {
    pub source: PathBuf,
    pub target: PathBuf,
    pub asset: AssetName,
}

/// Why a folder contributed nothing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    MissingTimeFolder,
    MissingElevationFolder,
    UnresolvedDirection,
    NoCandidate,
}

#[derive(Debug, Clone, Serialize)]
pub struct Skip {
    pub path: PathBuf,
    pub reason: SkipReason,
}

/// Outcome of a run
#[derive(Debug, Clone, Default, Serialize)]
pub struct ImportReport {
    pub copies: Vec<CopyRecord>,
    pub skips: Vec<Skip>,
}

impl ImportReport {
    pub fn skipped(&self, reason: SkipReason) -> usize {
        self.skips.iter().filter(|s| s.reason == reason).count()
    }

    fn skip(&mut self, path: PathBuf, reason: SkipReason) {
        self.skips.push(Skip { path, reason });
    }
}

/// Create the target directory and any parents. Existing directories are fine.
pub fn ensure_target_directory(path: &Path) -> Result<()> {
    if !path.is_dir() {
        fs::create_dir_all(path)?;
        info!("Created target directory: {:?}", path);
    }
    Ok(())
}

/// Folder names to try for `name`, in order: verbatim, then lowercased
pub fn folder_name_candidates(name: &str) -> Vec<String> {
    let mut names = vec![name.to_string()];
    let lower = name.to_lowercase();
    if lower != name {
        names.push(lower);
    }
    names
}

/// First existing directory under `parent` among [`folder_name_candidates`]
pub fn probe_folder(parent: &Path, name: &str) -> Option<PathBuf> {
    folder_name_candidates(name)
        .into_iter()
        .map(|candidate| parent.join(candidate))
        .find(|path| path.is_dir())
}

/// Runs one import pass with a given configuration
pub struct Importer<'a> {
    config: &'a ImportConfig,
    dry_run: bool,
}

impl<'a> Importer<'a> {
    pub fn new(config: &'a ImportConfig) -> Self {
        Self { config, dry_run: false }
    }

    /// Resolve and log everything but leave the filesystem untouched
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn run(&self) -> Result<ImportReport> {
        let source_root = &self.config.source_root;
        let target_root = &self.config.target_root;
        let mappings = &self.config.mappings;

        check_source_root(source_root)?;

        if self.dry_run {
            warn!("DRY RUN MODE - nothing will be copied");
        } else {
            ensure_target_directory(target_root)?;
        }

        let mut report = ImportReport::default();

        for time in &mappings.times {
            let time_path = source_root.join(&time.folder);
            if !time_path.is_dir() {
                warn!("Time folder not found: {:?}", time_path);
                report.skip(time_path, SkipReason::MissingTimeFolder);
                continue;
            }

            for elevation in &mappings.elevations {
                let Some(elevation_path) = probe_folder(&time_path, &elevation.label) else {
                    let missing = time_path.join(&elevation.label);
                    warn!("Elevation folder not found: {:?}", missing);
                    report.skip(missing, SkipReason::MissingElevationFolder);
                    continue;
                };

                for leaf in list_subdirectories(&elevation_path)? {
                    let leaf_name = leaf
                        .file_name()
                        .map(|n| n.to_string_lossy().into_owned())
                        .unwrap_or_default();

                    let Some(direction) = mappings.resolve_direction(&leaf_name) else {
                        debug!("No direction keyword in {:?}, skipping", leaf);
                        report.skip(leaf, SkipReason::UnresolvedDirection);
                        continue;
                    };

                    let Some(best) = select_best_candidate(&leaf, &self.config.image_extensions)? else {
                        debug!("No candidate image in {:?}", leaf);
                        report.skip(leaf, SkipReason::NoCandidate);
                        continue;
                    };

                    let asset = AssetName::new(elevation.floor, time.key, direction);
                    let target = target_root.join(asset.file_name());

                    if self.dry_run {
                        info!("DRY RUN: Would map {} -> {}", best.display(), asset);
                    } else {
                        info!("Mapping: {} -> {}", best.display(), asset);
                        copy_asset(&best, &target)?;
                    }

                    report.copies.push(CopyRecord { source: best, target, asset });
                }
            }
        }

        Ok(report)
    }
}

/// Import with the built-in tables
pub fn run(source_root: &Path, target_root: &Path) -> Result<ImportReport> {
    let config = ImportConfig::default()
        .with_overrides(Some(source_root.to_path_buf()), Some(target_root.to_path_buf()));
    Importer::new(&config).run()
}

/// A missing root is fine (every time folder will be skipped); one that
/// exists but cannot be listed aborts the run.
fn check_source_root(source_root: &Path) -> Result<()> {
    match fs::read_dir(source_root) {
        Ok(_) => Ok(()),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            warn!("Source root not found: {:?}", source_root);
            Ok(())
        }
        Err(e) => Err(ImportError::SourceUnreadable {
            path: source_root.to_path_buf(),
            source: e,
        }),
    }
}

/// Immediate subdirectories of `path`, sorted by name
fn list_subdirectories(path: &Path) -> Result<Vec<PathBuf>> {
    let list_failed = |e| ImportError::ListFailed {
        path: path.to_path_buf(),
        source: e,
    };

    let mut dirs = Vec::new();
    for entry in fs::read_dir(path).map_err(list_failed)? {
        let entry = entry.map_err(list_failed)?;
        let entry_path = entry.path();
        if entry_path.is_dir() {
            dirs.push(entry_path);
        }
    }
    dirs.sort();
    Ok(dirs)
}

/// Copy `from` over `to`, carrying the modification time across
fn copy_asset(from: &Path, to: &Path) -> Result<()> {
    let copy_failed = |e| ImportError::CopyFailed {
        from: from.to_path_buf(),
        to: to.to_path_buf(),
        source: e,
    };

    // fs::copy carries permissions over, so an earlier copy of a read-only
    // source cannot be truncated in place
    if let Ok(existing) = fs::symlink_metadata(to) {
        if existing.is_file() && existing.permissions().readonly() {
            debug!("Replacing read-only asset {:?}", to);
            fs::remove_file(to).map_err(copy_failed)?;
        }
    }

    fs::copy(from, to).map_err(copy_failed)?;

    // Setting times needs ownership, not write access
    let preserved = fs::metadata(from)
        .and_then(|m| m.modified())
        .and_then(|modified| fs::File::open(to)?.set_modified(modified));
    if let Err(e) = preserved {
        warn!("Could not preserve modification time on {:?}: {}", to, e);
    }

    Ok(())
}
