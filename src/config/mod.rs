// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! Configuration management for the importer

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::selector::IMAGE_EXTENSIONS;
use crate::tables::{self, Direction, TimeOfDay, DIRECTION_KEYWORDS, ELEVATIONS, TIMES};

/// Main application configuration
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ImportConfig {
    /// Root of the exported `<Time>/<Elevation>/<Direction>/` tree
    #[serde(default = "default_source_root")]
    pub source_root: PathBuf,

    /// Flat asset directory the front end serves
    #[serde(default = "default_target_root")]
    pub target_root: PathBuf,

    /// Extensions (without dot) accepted as candidate images
    #[serde(default = "default_image_extensions")]
    pub image_extensions: Vec<String>,

    /// Folder name lookup tables
    #[serde(default)]
    pub mappings: Mappings,

    /// Manifest output settings
    #[serde(default)]
    pub manifest: ManifestConfig,
}

/// Ordered lookup tables. Lists, not maps, so declaration order survives a
/// round trip through JSON.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Mappings {
    #[serde(default = "default_elevations")]
    pub elevations: Vec<ElevationMapping>,
    #[serde(default = "default_times")]
    pub times: Vec<TimeMapping>,
    #[serde(default = "default_directions")]
    pub directions: Vec<DirectionKeyword>,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ElevationMapping {
    pub label: String,
    pub floor: u32,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct TimeMapping {
    pub folder: String,
    pub key: TimeOfDay,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct DirectionKeyword {
    pub keyword: String,
    pub direction: Direction,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ManifestConfig {
    #[serde(default = "default_manifest_output")]
    pub output: PathBuf,
    /// Public URL prefix for manifest entries
    #[serde(default)]
    pub base_url: Option<String>,
}

// Default value functions
fn default_source_root() -> PathBuf { PathBuf::from("./.processing") }
fn default_target_root() -> PathBuf { PathBuf::from("./public/assets/panoramas") }
fn default_manifest_output() -> PathBuf { PathBuf::from("./public/assets/panoramas/manifest.json") }

fn default_image_extensions() -> Vec<String> {
    IMAGE_EXTENSIONS.iter().map(|e| e.to_string()).collect()
}

fn default_elevations() -> Vec<ElevationMapping> {
    ELEVATIONS
        .iter()
        .map(|(label, floor)| ElevationMapping { label: label.to_string(), floor: *floor })
        .collect()
}

fn default_times() -> Vec<TimeMapping> {
    TIMES
        .iter()
        .map(|(folder, key)| TimeMapping { folder: folder.to_string(), key: *key })
        .collect()
}

fn default_directions() -> Vec<DirectionKeyword> {
    DIRECTION_KEYWORDS
        .iter()
        .map(|(keyword, direction)| DirectionKeyword {
            keyword: keyword.to_string(),
            direction: *direction,
        })
        .collect()
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            source_root: default_source_root(),
            target_root: default_target_root(),
            image_extensions: default_image_extensions(),
            mappings: Mappings::default(),
            manifest: ManifestConfig::default(),
        }
    }
}

impl Default for Mappings {
    fn default() -> Self {
        Self {
            elevations: default_elevations(),
            times: default_times(),
            directions: default_directions(),
        }
    }
}

impl Default for ManifestConfig {
    fn default() -> Self {
        Self {
            output: default_manifest_output(),
            base_url: None,
        }
    }
}

impl Mappings {
    /// First configured keyword contained in `folder_name`, case-insensitive
    pub fn resolve_direction(&self, folder_name: &str) -> Option<Direction> {
        tables::first_keyword_match(
            self.directions.iter().map(|d| (d.keyword.as_str(), d.direction)),
            folder_name,
        )
    }

    /// Distinct direction keys in first-seen order
    pub fn directions(&self) -> Vec<Direction> {
        let mut seen = Vec::new();
        for d in &self.directions {
            if !seen.contains(&d.direction) {
                seen.push(d.direction);
            }
        }
        seen
    }

    fn validate(&self) -> crate::Result<()> {
        if self.elevations.is_empty() || self.times.is_empty() || self.directions.is_empty() {
            return Err(crate::ImportError::Config(
                "mappings must define at least one elevation, time and direction".to_string(),
            ));
        }
        if let Some(d) = self.directions.iter().find(|d| d.keyword.is_empty()) {
            // An empty keyword matches every folder
            return Err(crate::ImportError::Config(format!(
                "empty direction keyword for '{}'",
                d.direction
            )));
        }
        Ok(())
    }
}

impl ImportConfig {
    /// Load configuration from a JSON file
    pub fn load(path: &Path) -> crate::Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Self = serde_json::from_str(&content)
                .map_err(|e| crate::ImportError::Config(format!("Failed to parse config: {}", e)))?;
            config.mappings.validate()?;
            Ok(config)
        } else {
            tracing::info!("Config file not found at {:?}, using defaults", path);
            Ok(Self::default())
        }
    }

    /// Save configuration to a JSON file
    pub fn save(&self, path: &Path) -> crate::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Apply command-line or environment overrides on top of the file values
    pub fn with_overrides(mut self, source: Option<PathBuf>, target: Option<PathBuf>) -> Self {
        if let Some(source) = source {
            self.source_root = source;
        }
        if let Some(target) = target {
            self.target_root = target;
        }
        self
    }
}
