// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! Panorama Import: capture exports to web assets
//!
//! Walks a `<Time>/<Elevation>/<Direction>/` export tree, picks one image per
//! leaf folder and copies it into a flat directory as
//! `floor-{N}-{time}-{direction}.jpg`.

pub mod config;
pub mod error;
pub mod importer;
pub mod manifest;
pub mod selector;
pub mod tables;
pub mod validate;

pub use config::ImportConfig;
pub use error::{ImportError, Result};
