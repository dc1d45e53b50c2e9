//! Boundary types exchanged between the engine and its consumers.
//!
//! A consumer asks for two things: the biome ids over a [`Range`] and the
//! [`StructurePosition`]s of one [`StructureKind`]. Everything here is plain
//! data so it can be marshalled across a thread or process boundary as-is.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{LARGE_EXTENT, MEDIUM_EXTENT, SMALL_EXTENT};

/// Errors raised while validating or parsing boundary values.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    /// Structure name not in the supported set.
    #[error("unknown structure kind: {0}")]
    UnknownStructure(String),

    /// Map preset name not in the supported set.
    #[error("unknown map preset: {0}")]
    UnknownPreset(String),

    /// Range with a negative extent or an unsupported scale.
    #[error("invalid range: scale {scale}, extent {sx}x{sy}x{sz}")]
    InvalidRange {
        /// Requested scale
        scale: i32,
        /// Requested x extent
        sx: i32,
        /// Requested y extent
        sy: i32,
        /// Requested z extent
        sz: i32,
    },
}

/// A cuboid of sample cells at a given scale.
///
/// Cell `(i, j, k)` of the result covers the position `(x + i, y + k, z + j)`
/// in units of `scale` blocks. Results are ordered y-major, then z, then x.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Range {
    /// Blocks per cell: 1 (Voronoi smoothed) or a multiple of 4
    pub scale: i32,
    /// Origin x, in cells
    pub x: i32,
    /// Origin z, in cells
    pub z: i32,
    /// Extent along x
    pub sx: i32,
    /// Extent along z
    pub sz: i32,
    /// Origin y, in cells
    pub y: i32,
    /// Extent along y; 0 is read as 1
    pub sy: i32,
}

impl Range {
    /// Creates a range with the given origin and extents.
    #[must_use]
    pub const fn new(scale: i32, x: i32, z: i32, sx: i32, sz: i32, y: i32, sy: i32) -> Self {
        Self {
            scale,
            x,
            z,
            sx,
            sz,
            y,
            sy,
        }
    }

    /// A single cell at `(x, y, z)`.
    #[must_use]
    pub const fn point(scale: i32, x: i32, y: i32, z: i32) -> Self {
        Self::new(scale, x, z, 1, 1, y, 1)
    }

    /// Extent along y with the `0 means 1` rule applied.
    #[inline]
    #[must_use]
    pub const fn height(&self) -> i32 {
        if self.sy == 0 {
            1
        } else {
            self.sy
        }
    }

    /// Number of cells a query over this range produces.
    ///
    /// Negative extents produce no cells.
    #[must_use]
    pub fn volume(&self) -> usize {
        let axis = |v: i32| usize::try_from(v).unwrap_or(0);
        axis(self.sx) * axis(self.sz) * axis(self.height())
    }

    /// Checks the range before handing it to the engine.
    ///
    /// The engine itself does not defend against negative extents.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::InvalidRange`] when an extent is negative or
    /// the scale is neither 1 nor a positive multiple of 4.
    pub fn validate(&self) -> Result<(), ProtocolError> {
        let scale_ok = self.scale == 1 || (self.scale > 0 && self.scale % 4 == 0);
        if !scale_ok || self.sx < 0 || self.sz < 0 || self.sy < 0 {
            return Err(ProtocolError::InvalidRange {
                scale: self.scale,
                sx: self.sx,
                sy: self.sy,
                sz: self.sz,
            });
        }
        Ok(())
    }
}

/// Every structure the engine can place.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StructureKind {
    /// Desert temple
    DesertPyramid = 0,
    /// Jungle temple
    JunglePyramid = 1,
    /// Witch hut
    SwampHut = 2,
    /// Igloo
    Igloo = 3,
    /// Village
    Village = 4,
    /// Ocean ruins
    OceanRuins = 5,
    /// Shipwreck
    Shipwreck = 6,
    /// Ruined portal
    RuinedPortal = 7,
    /// Ocean monument
    Monument = 8,
    /// Woodland mansion
    Mansion = 9,
    /// Pillager outpost
    Outpost = 10,
    /// Ancient city
    AncientCity = 11,
}

impl StructureKind {
    /// All kinds, in configuration order.
    pub const ALL: [Self; 12] = [
        Self::DesertPyramid,
        Self::JunglePyramid,
        Self::SwampHut,
        Self::Igloo,
        Self::Village,
        Self::OceanRuins,
        Self::Shipwreck,
        Self::RuinedPortal,
        Self::Monument,
        Self::Mansion,
        Self::Outpost,
        Self::AncientCity,
    ];

    /// Converts from the wire id.
    #[must_use]
    pub const fn from_u8(value: u8) -> Option<Self> {
        if (value as usize) < Self::ALL.len() {
            Some(Self::ALL[value as usize])
        } else {
            None
        }
    }

    /// Snake-case name, as used in config files and on the command line.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::DesertPyramid => "desert_pyramid",
            Self::JunglePyramid => "jungle_pyramid",
            Self::SwampHut => "swamp_hut",
            Self::Igloo => "igloo",
            Self::Village => "village",
            Self::OceanRuins => "ocean_ruins",
            Self::Shipwreck => "shipwreck",
            Self::RuinedPortal => "ruined_portal",
            Self::Monument => "monument",
            Self::Mansion => "mansion",
            Self::Outpost => "outpost",
            Self::AncientCity => "ancient_city",
        }
    }
}

impl fmt::Display for StructureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for StructureKind {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == wanted)
            .ok_or_else(|| ProtocolError::UnknownStructure(s.to_string()))
    }
}

/// A placed structure, in block coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StructurePosition {
    /// Block x
    pub x: i32,
    /// Block z
    pub z: i32,
    /// What was placed
    pub kind: StructureKind,
}

impl StructurePosition {
    /// Squared horizontal distance to the world origin.
    #[inline]
    #[must_use]
    pub fn distance_squared(&self) -> i64 {
        let x = i64::from(self.x);
        let z = i64::from(self.z);
        x * x + z * z
    }
}

/// Preview window sizes offered by the front end.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MapPreset {
    /// 64x64 samples
    Small,
    /// 128x128 samples
    Medium,
    /// 256x256 samples
    #[default]
    Large,
}

impl MapPreset {
    /// The `(sx, sz)` extent passed to structure search.
    #[must_use]
    pub const fn extent(self) -> (i32, i32) {
        match self {
            Self::Small => (SMALL_EXTENT, SMALL_EXTENT),
            Self::Medium => (MEDIUM_EXTENT, MEDIUM_EXTENT),
            Self::Large => (LARGE_EXTENT, LARGE_EXTENT),
        }
    }

    /// The biome range covering the same blocks as the structure search.
    #[must_use]
    pub const fn range(self, scale: i32, y: i32) -> Range {
        let (sx, sz) = self.extent();
        Range::new(scale, -2 * sx, -2 * sz, 4 * sx, 4 * sz, y, 1)
    }
}

impl FromStr for MapPreset {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "small" => Ok(Self::Small),
            "medium" => Ok(Self::Medium),
            "large" => Ok(Self::Large),
            _ => Err(ProtocolError::UnknownPreset(s.to_string())),
        }
    }
}
