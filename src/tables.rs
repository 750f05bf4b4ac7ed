// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! Static lookup tables and the target asset naming scheme
//!
//! All tables are ordered slices. Direction keywords are matched in
//! declaration order and the first hit wins, so reordering
//! [`DIRECTION_KEYWORDS`] changes how ambiguous folder names resolve.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Time-of-day key used in target filenames
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeOfDay {
    Morning,
    Noon,
    Evening,
    Night,
}

impl TimeOfDay {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeOfDay::Morning => "morning",
            TimeOfDay::Noon => "noon",
            TimeOfDay::Evening => "evening",
            TimeOfDay::Night => "night",
        }
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeOfDay {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "morning" => Ok(TimeOfDay::Morning),
            "noon" => Ok(TimeOfDay::Noon),
            "evening" => Ok(TimeOfDay::Evening),
            "night" => Ok(TimeOfDay::Night),
            other => Err(format!("unknown time of day: {}", other)),
        }
    }
}

/// Viewing direction key used in target filenames
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Sea,
    Marine,
    Stadium,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Sea => "sea",
            Direction::Marine => "marine",
            Direction::Stadium => "stadium",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sea" => Ok(Direction::Sea),
            "marine" => Ok(Direction::Marine),
            "stadium" => Ok(Direction::Stadium),
            other => Err(format!("unknown direction: {}", other)),
        }
    }
}

/// Elevation folder label -> building floor
pub const ELEVATIONS: &[(&str, u32)] = &[
    ("154m", 44),
    ("167m", 48),
    ("182m", 52),
    ("196m", 56),
    ("210m", 60),
    ("224m", 64),
    ("238m", 68),
    ("252m", 72),
    ("266m", 75),
];

/// Time folder name -> time key
pub const TIMES: &[(&str, TimeOfDay)] = &[
    ("Morning View", TimeOfDay::Morning),
    ("Day View", TimeOfDay::Noon),
    ("Evening View", TimeOfDay::Evening),
    ("Night View", TimeOfDay::Night),
];

/// Lowercase keyword -> direction key. Many-to-one, first match wins.
pub const DIRECTION_KEYWORDS: &[(&str, Direction)] = &[
    ("sea", Direction::Sea),
    ("central", Direction::Sea),
    ("marine", Direction::Marine),
    ("stadium", Direction::Stadium),
];

/// Resolve a direction folder name against the built-in keyword table
pub fn resolve_direction(folder_name: &str) -> Option<Direction> {
    first_keyword_match(DIRECTION_KEYWORDS.iter().copied(), folder_name)
}

/// Return the direction of the first keyword contained in `folder_name`.
///
/// Both sides are lowercased, so keywords supplied by configuration may use
/// any case.
pub fn first_keyword_match<'a, I>(keywords: I, folder_name: &str) -> Option<Direction>
where
    I: IntoIterator<Item = (&'a str, Direction)>,
{
    let name = folder_name.to_lowercase();
    keywords
        .into_iter()
        .find(|(keyword, _)| name.contains(&keyword.to_lowercase()))
        .map(|(_, direction)| direction)
}

/// A target asset, rendered as `floor-{floor}-{time}-{direction}.jpg`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AssetName {
    pub floor: u32,
    pub time: TimeOfDay,
    pub direction: Direction,
}

impl AssetName {
    pub const PREFIX: &'static str = "floor-";
    pub const EXTENSION: &'static str = ".jpg";

    pub fn new(floor: u32, time: TimeOfDay, direction: Direction) -> Self {
        Self { floor, time, direction }
    }

    /// Parse a target filename back into its parts
    pub fn parse(file_name: &str) -> Option<Self> {
        let stem = file_name
            .strip_prefix(Self::PREFIX)?
            .strip_suffix(Self::EXTENSION)?;

        let mut parts = stem.splitn(3, '-');
        let floor_part = parts.next()?;
        // "+5" and "05" parse as a u32 but never render back
        if floor_part.is_empty()
            || !floor_part.bytes().all(|b| b.is_ascii_digit())
            || (floor_part.len() > 1 && floor_part.starts_with('0'))
        {
            return None;
        }
        let floor = floor_part.parse().ok()?;
        let time = parts.next()?.parse().ok()?;
        let direction = parts.next()?.parse().ok()?;

        Some(Self { floor, time, direction })
    }

    pub fn file_name(&self) -> String {
        self.to_string()
    }

    /// Manifest key, `{floor}/{time}/{direction}`
    pub fn key(&self) -> String {
        format!("{}/{}/{}", self.floor, self.time, self.direction)
    }
}

impl fmt::Display for AssetName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}-{}-{}{}",
            Self::PREFIX,
            self.floor,
            self.time,
            self.direction,
            Self::EXTENSION
        )
    }
}
