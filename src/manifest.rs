// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! JSON manifest of the imported assets

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use tracing::debug;

use crate::tables::AssetName;
use crate::{ImportError, Result};

/// One asset in the manifest
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManifestEntry {
    pub file: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub size: u64,
    pub blake3: String,
}

/// Manifest keyed by `{floor}/{time}/{direction}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    pub generated_at: DateTime<Utc>,
    pub assets: BTreeMap<String, ManifestEntry>,
}

impl Manifest {
    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    /// Write as pretty JSON, creating the parent directory if needed
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }
}

/// Hash file contents with BLAKE3
pub fn hash_file(path: &Path) -> Result<String> {
    let data = fs::read(path)?;
    Ok(blake3::hash(&data).to_hex().to_string())
}

fn join_url(base: &str, file: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), file)
}

/// Index every asset-named file directly inside `target_root`.
///
/// A missing directory gives an empty manifest.
pub fn build_manifest(target_root: &Path, base_url: Option<&str>) -> Result<Manifest> {
    let mut assets = BTreeMap::new();

    let entries = match fs::read_dir(target_root) {
        Ok(entries) => entries,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!("Target directory {:?} not found, manifest is empty", target_root);
            return Ok(Manifest { generated_at: Utc::now(), assets });
        }
        Err(e) => {
            return Err(ImportError::ListFailed {
                path: target_root.to_path_buf(),
                source: e,
            })
        }
    };

    for entry in entries {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(file) = entry.file_name().to_str().map(String::from) else {
            continue;
        };
        let Some(asset) = AssetName::parse(&file) else {
            debug!("Not an asset, ignoring: {}", file);
            continue;
        };

        let size = fs::metadata(&path)?.len();
        let url = base_url.map(|base| join_url(base, &file));
        assets.insert(
            asset.key(),
            ManifestEntry {
                blake3: hash_file(&path)?,
                file,
                url,
                size,
            },
        );
    }

    Ok(Manifest { generated_at: Utc::now(), assets })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_join_url() {
        assert_eq!(join_url("https://cdn.example.com/", "a.jpg"), "https://cdn.example.com/a.jpg");
        assert_eq!(join_url("https://cdn.example.com", "a.jpg"), "https://cdn.example.com/a.jpg");
    }

    #[test]
    fn test_build_manifest() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("floor-75-night-stadium.jpg"), b"night").unwrap();
        fs::write(dir.path().join("floor-44-noon-sea.jpg"), b"noon!").unwrap();
        fs::write(dir.path().join("manifest.json"), b"{}").unwrap();
        fs::create_dir(dir.path().join("floor-48-noon-sea.jpg")).unwrap();

        let manifest = build_manifest(dir.path(), Some("https://cdn.example.com/panoramas")).unwrap();
        assert_eq!(manifest.len(), 2);

        let keys: Vec<&String> = manifest.assets.keys().collect();
        assert_eq!(keys, vec!["44/noon/sea", "75/night/stadium"]);

        let entry = &manifest.assets["44/noon/sea"];
        assert_eq!(entry.file, "floor-44-noon-sea.jpg");
        assert_eq!(entry.size, 5);
        assert_eq!(
            entry.url.as_deref(),
            Some("https://cdn.example.com/panoramas/floor-44-noon-sea.jpg")
        );
        assert_eq!(entry.blake3, blake3::hash(b"noon!").to_hex().to_string());
    }

    #[test]
    fn test_missing_target_is_empty() {
        let dir = TempDir::new().unwrap();
        let manifest = build_manifest(&dir.path().join("absent"), None).unwrap();
        assert!(manifest.is_empty());
    }

    #[test]
    fn test_save_without_base_url() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("floor-52-evening-marine.jpg"), b"m").unwrap();

        let manifest = build_manifest(dir.path(), None).unwrap();
        let out = dir.path().join("out/manifest.json");
        manifest.save(&out).unwrap();

        let raw = fs::read_to_string(&out).unwrap();
        assert!(!raw.contains("\"url\""));
        let loaded: Manifest = serde_json::from_str(&raw).unwrap();
        assert_eq!(loaded.assets, manifest.assets);
    }
}
