use std::{
    fmt::{self, Debug, Display, Formatter},
    ops::{Add, Sub},
};

/// Number of bits a block coordinate is shifted right by to get its chunk coordinate.
pub const CHUNK_SHIFT: u32 = 4;
/// The width of a chunk along the x and z axes, in blocks.
pub const CHUNK_WIDTH: i32 = 1 << CHUNK_SHIFT;

/// The integer position of a block.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct BlockPosition {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl BlockPosition {
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        BlockPosition { x, y, z }
    }

    /// The chunk containing this block. Uses an arithmetic shift, so block `-1` lies in chunk `-1`.
    pub const fn chunk(&self) -> ChunkPosition {
        ChunkPosition::new(self.x >> CHUNK_SHIFT, self.z >> CHUNK_SHIFT)
    }
}

impl Display for BlockPosition {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "x: {}, y: {}, z: {}", self.x, self.y, self.z)
    }
}

impl Debug for BlockPosition {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

impl Add for BlockPosition {
    type Output = BlockPosition;

    fn add(self, rhs: Self) -> Self::Output {
        BlockPosition {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
            z: self.z + rhs.z,
        }
    }
}

impl Sub for BlockPosition {
    type Output = BlockPosition;

    fn sub(self, rhs: Self) -> Self::Output {
        BlockPosition {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
            z: self.z - rhs.z,
        }
    }
}

/// The position of a chunk, in chunk units along x and z.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ChunkPosition {
    pub x: i32,
    pub z: i32,
}

impl ChunkPosition {
    pub const fn new(x: i32, z: i32) -> Self {
        ChunkPosition { x, z }
    }

    /// The smallest block x coordinate inside this chunk.
    pub const fn min_block_x(&self) -> i32 {
        self.x.wrapping_shl(CHUNK_SHIFT)
    }

    /// The smallest block z coordinate inside this chunk.
    pub const fn min_block_z(&self) -> i32 {
        self.z.wrapping_shl(CHUNK_SHIFT)
    }

    /// Whether the block column at `x`, `z` lies in this chunk.
    pub const fn contains(&self, x: i32, z: i32) -> bool {
        x >> CHUNK_SHIFT == self.x && z >> CHUNK_SHIFT == self.z
    }
}

impl Display for ChunkPosition {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "x: {}, z: {}", self.x, self.z)
    }
}

impl Debug for ChunkPosition {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "C({}, {})", self.x, self.z)
    }
}

impl From<BlockPosition> for ChunkPosition {
    fn from(pos: BlockPosition) -> Self {
        pos.chunk()
    }
}
