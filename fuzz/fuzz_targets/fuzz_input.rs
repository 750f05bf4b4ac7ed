// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

#![no_main]

use libfuzzer_sys::fuzz_target;
use panorama_import::selector::compare_candidates;
use panorama_import::tables::{resolve_direction, AssetName};

fuzz_target!(|data: &[u8]| {
    let Ok(s) = std::str::from_utf8(data) else {
        return;
    };

    // Anything that parses must render back to the same name
    if let Some(asset) = AssetName::parse(s) {
        assert_eq!(asset.to_string(), s);
    }

    let _ = resolve_direction(s);
    let _ = compare_candidates(s, "a_copy.jpg");
});
