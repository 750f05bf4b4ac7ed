// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! Coverage check of the target directory against the lookup tables

use serde::Serialize;
use std::path::Path;

use crate::config::Mappings;
use crate::tables::AssetName;

#[derive(Debug, Clone, Default, Serialize)]
pub struct CoverageReport {
    pub present: Vec<AssetName>,
    pub missing: Vec<AssetName>,
}

impl CoverageReport {
    pub fn total(&self) -> usize {
        self.present.len() + self.missing.len()
    }

    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }
}

/// Every asset the tables can produce, floor-major
pub fn expected_assets(mappings: &Mappings) -> Vec<AssetName> {
    let directions = mappings.directions();
    let mut assets = Vec::new();
    for elevation in &mappings.elevations {
        for time in &mappings.times {
            for direction in &directions {
                let asset = AssetName::new(elevation.floor, time.key, *direction);
                // Two labels may share a floor
                if !assets.contains(&asset) {
                    assets.push(asset);
                }
            }
        }
    }
    assets
}

/// Check which expected assets exist as files under `target_root`
pub fn validate_coverage(target_root: &Path, mappings: &Mappings) -> CoverageReport {
    let mut report = CoverageReport::default();
    for asset in expected_assets(mappings) {
        if target_root.join(asset.file_name()).is_file() {
            report.present.push(asset);
        } else {
            report.missing.push(asset);
        }
    }
    report
}
