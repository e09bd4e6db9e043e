use std::ops::{Add, AddAssign, Sub, SubAssign};

use glam::IVec3;
use serde::{Deserialize, Serialize};

pub const CHUNK_SIZE: usize = 16;
pub const WORLD_HEIGHT: usize = 64;
pub const CHUNK_VOLUME: usize = CHUNK_SIZE * WORLD_HEIGHT * CHUNK_SIZE;

const CHUNK_SIZE_I32: i32 = CHUNK_SIZE as i32;

/// Horizontal position of a chunk in the chunk grid. Chunks span the full
/// world height, so there is no y component.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChunkPos {
    pub x: i32,
    pub z: i32,
}

impl ChunkPos {
    pub const fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    /// World coordinate of the chunk's (0, 0, 0) cell. Chunk coordinates
    /// past the i32 block range wrap around.
    pub fn world_origin(self) -> IVec3 {
        IVec3::new(
            self.x.wrapping_mul(CHUNK_SIZE_I32),
            0,
            self.z.wrapping_mul(CHUNK_SIZE_I32),
        )
    }

    pub fn chebyshev_distance(self, other: ChunkPos) -> i32 {
        let dx = self.x.wrapping_sub(other.x).wrapping_abs();
        let dz = self.z.wrapping_sub(other.z).wrapping_abs();
        dx.max(dz)
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LocalPos {
    pub x: u8,
    pub y: u8,
    pub z: u8,
}

impl Add for ChunkPos {
    type Output = ChunkPos;

    fn add(self, rhs: Self) -> Self::Output {
        ChunkPos {
            x: self.x.wrapping_add(rhs.x),
            z: self.z.wrapping_add(rhs.z),
        }
    }
}

impl AddAssign for ChunkPos {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for ChunkPos {
    type Output = ChunkPos;

    fn sub(self, rhs: Self) -> Self::Output {
        ChunkPos {
            x: self.x.wrapping_sub(rhs.x),
            z: self.z.wrapping_sub(rhs.z),
        }
    }
}

impl SubAssign for ChunkPos {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

fn div_rem_floor(value: i32, divisor: i32) -> (i32, i32) {
    (value.div_euclid(divisor), value.rem_euclid(divisor))
}

/// Chunk owning the world column `(world_x, world_z)`.
pub fn chunk_of_column(world_x: i32, world_z: i32) -> ChunkPos {
    ChunkPos {
        x: world_x.div_euclid(CHUNK_SIZE_I32),
        z: world_z.div_euclid(CHUNK_SIZE_I32),
    }
}

/// Chunk containing a continuous horizontal position such as the viewer's.
pub fn chunk_containing(x: f32, z: f32) -> ChunkPos {
    chunk_of_column(x.floor() as i32, z.floor() as i32)
}

/// Splits a world position into its chunk and the chunk-local position.
/// The local x/z are always in `0..CHUNK_SIZE`; y passes through untouched
/// so callers can apply the chunk's own vertical bounds policy.
pub fn world_to_chunk(world_pos: IVec3) -> (ChunkPos, IVec3) {
    let (chunk_x, local_x) = div_rem_floor(world_pos.x, CHUNK_SIZE_I32);
    let (chunk_z, local_z) = div_rem_floor(world_pos.z, CHUNK_SIZE_I32);

    (
        ChunkPos {
            x: chunk_x,
            z: chunk_z,
        },
        IVec3::new(local_x, world_pos.y, local_z),
    )
}

pub fn chunk_to_world(chunk_pos: ChunkPos, local: LocalPos) -> IVec3 {
    IVec3::new(
        chunk_pos
            .x
            .wrapping_mul(CHUNK_SIZE_I32)
            .wrapping_add(i32::from(local.x)),
        i32::from(local.y),
        chunk_pos
            .z
            .wrapping_mul(CHUNK_SIZE_I32)
            .wrapping_add(i32::from(local.z)),
    )
}

/// Checked conversion of signed chunk-local coordinates.
pub fn local_in_bounds(x: i32, y: i32, z: i32) -> Option<LocalPos> {
    let horizontal = 0..CHUNK_SIZE_I32;
    if !horizontal.contains(&x) || !horizontal.contains(&z) {
        return None;
    }
    if !(0..WORLD_HEIGHT as i32).contains(&y) {
        return None;
    }
    Some(LocalPos {
        x: x as u8,
        y: y as u8,
        z: z as u8,
    })
}

pub fn local_to_index(local: LocalPos) -> usize {
    usize::from(local.x)
        + usize::from(local.z) * CHUNK_SIZE
        + usize::from(local.y) * CHUNK_SIZE * CHUNK_SIZE
}

pub fn index_to_local(index: usize) -> LocalPos {
    assert!(index < CHUNK_VOLUME, "chunk index out of bounds: {index}");

    let y = index / (CHUNK_SIZE * CHUNK_SIZE);
    let rem = index % (CHUNK_SIZE * CHUNK_SIZE);
    let z = rem / CHUNK_SIZE;
    let x = rem % CHUNK_SIZE;

    LocalPos {
        x: x as u8,
        y: y as u8,
        z: z as u8,
    }
}
