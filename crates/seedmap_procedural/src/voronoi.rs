//! # Voronoi Smoothing
//!
//! Maps a block position to the 1:4 cell whose jittered centre is nearest.
//!
//! The jitter of every cell is a pure function of the seed hash and the
//! cell coordinates, so lookups need no state beyond the hash.

use seedmap_shared::math::{add64, mul64};
use seedmap_shared::Range;
use sha2::{Digest, Sha256};

const STEP_MULTIPLIER: u64 = 6_364_136_223_846_793_005;
const STEP_ADDEND: u64 = 1_442_695_040_888_963_407;

/// Sub-cell resolution of one quarter cell (`1024 * 10`).
const QUARTER: i64 = 10_240;

/// SHA-256 seed hash: the first eight digest bytes of the little-endian seed.
#[must_use]
pub fn voronoi_seed_hash(seed: u64) -> u64 {
    let mut hasher = Sha256::new();
    hasher.update(seed.to_le_bytes());
    let digest = hasher.finalize();
    let mut head = [0u8; 8];
    head.copy_from_slice(&digest[..8]);
    u64::from_le_bytes(head)
}

#[inline]
const fn step(s: u64, salt: u64) -> u64 {
    add64(mul64(s, add64(mul64(s, STEP_MULTIPLIER), STEP_ADDEND)), salt)
}

/// Signed jitter component from the top bits of a step.
#[inline]
#[allow(clippy::cast_possible_wrap)]
const fn jitter(s: u64) -> i64 {
    (((s >> 24) & 1023) as i64 - 512) * 36
}

/// Jitter of one cell centre, in sub-cell units.
#[inline]
#[must_use]
#[allow(clippy::cast_sign_loss)]
pub const fn cell_offset(hash: u64, x: i32, y: i32, z: i32) -> (i64, i64, i64) {
    let (a, b, c) = (x as i64 as u64, y as i64 as u64, z as i64 as u64);
    let mut s = hash;
    s = step(s, a);
    s = step(s, b);
    s = step(s, c);
    s = step(s, a);
    s = step(s, b);
    s = step(s, c);
    let dx = jitter(s);
    s = step(s, hash);
    let dy = jitter(s);
    s = step(s, hash);
    let dz = jitter(s);
    (dx, dy, dz)
}

/// The 1:4 cell a block position reads its biome from.
#[must_use]
pub fn voronoi_access(hash: u64, x: i32, y: i32, z: i32) -> (i32, i32, i32) {
    let (x, y, z) = (x - 2, y - 2, z - 2);
    let (px, py, pz) = (x >> 2, y >> 2, z >> 2);
    let (dx, dy, dz) = (
        i64::from(x & 3) * QUARTER,
        i64::from(y & 3) * QUARTER,
        i64::from(z & 3) * QUARTER,
    );

    let mut nearest = (px, py, pz);
    let mut best = i64::MAX;
    for corner in 0..8 {
        let bx = i32::from(corner & 4 != 0);
        let by = i32::from(corner & 2 != 0);
        let bz = i32::from(corner & 1 != 0);
        let cell = (px + bx, py + by, pz + bz);
        let (jx, jy, jz) = cell_offset(hash, cell.0, cell.1, cell.2);
        let rx = jx + dx - 4 * QUARTER * i64::from(bx);
        let ry = jy + dy - 4 * QUARTER * i64::from(by);
        let rz = jz + dz - 4 * QUARTER * i64::from(bz);
        let distance = rx * rx + ry * ry + rz * rz;
        if distance < best {
            best = distance;
            nearest = cell;
        }
    }
    nearest
}

/// The 1:4 range that a 1:1 range reads from through [`voronoi_access`].
#[must_use]
pub fn source_range(range: &Range) -> Range {
    let x = range.x - 2;
    let z = range.z - 2;
    let y = range.y - 2;
    let (sx, sz) = (x >> 2, z >> 2);
    let sy = y >> 2;
    Range::new(
        4,
        sx,
        sz,
        ((x + range.sx) >> 2) - sx + 2,
        ((z + range.sz) >> 2) - sz + 2,
        sy,
        ((y + range.height()) >> 2) - sy + 2,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEED: u64 = 12_370_816_993_565;

    #[test]
    fn test_seed_hash_reference() {
        assert_eq!(voronoi_seed_hash(0), 8_794_265_229_978_523_055);
        assert_eq!(voronoi_seed_hash(SEED), 16_586_587_794_988_363_546);
        assert_eq!(voronoi_seed_hash(u64::MAX), 6_759_447_113_877_070_610);
    }

    #[test]
    fn test_cell_offset_reference() {
        let hash = voronoi_seed_hash(SEED);
        assert_eq!(cell_offset(hash, 0, 0, 0), (-18_072, -17_532, -11_772));
        assert_eq!(cell_offset(hash, -3, 5, 7), (-16_704, -14_220, -6_768));
    }

    #[test]
    fn test_access_reference() {
        let hash = voronoi_seed_hash(SEED);
        assert_eq!(voronoi_access(hash, 0, 63, 0), (-1, 15, 0));
        assert_eq!(voronoi_access(hash, 1, 2, 3), (-1, 0, 0));
        assert_eq!(voronoi_access(hash, -5, -64, 17), (-2, -17, 4));
        assert_eq!(voronoi_access(hash, 100, 70, -250), (24, 17, -63));
        assert_eq!(voronoi_access(hash, -1, -1, -1), (-1, -1, -1));
    }

    #[test]
    fn test_source_range_covers_every_access() {
        let hash = voronoi_seed_hash(SEED);
        let range = Range::new(1, -13, 7, 19, 11, 60, 3);
        let src = source_range(&range);
        assert_eq!(src.scale, 4);
        for k in 0..range.sy {
            for j in 0..range.sz {
                for i in 0..range.sx {
                    let (cx, cy, cz) = voronoi_access(hash, range.x + i, range.y + k, range.z + j);
                    assert!((src.x..src.x + src.sx).contains(&cx), "x {cx} outside {src:?}");
                    assert!((src.y..src.y + src.sy).contains(&cy), "y {cy} outside {src:?}");
                    assert!((src.z..src.z + src.sz).contains(&cz), "z {cz} outside {src:?}");
                }
            }
        }
    }
}
