use crate::world::{BlockPosition, ChunkPosition};
use sponge_util::{UnlocalizedName, DEFAULT_NAMESPACE};
use std::fmt::{self, Display, Formatter};

/// A block as reported by a world: its position and its type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Block {
    pub position: BlockPosition,
    pub kind: UnlocalizedName,
}

impl Block {
    pub fn new(position: BlockPosition, kind: UnlocalizedName) -> Self {
        Block { position, kind }
    }

    pub fn air(position: BlockPosition) -> Self {
        Block::new(position, UnlocalizedName::minecraft("air"))
    }

    pub fn is_air(&self) -> bool {
        self.kind.is(DEFAULT_NAMESPACE, "air")
    }
}

impl Display for Block {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {:?}", self.kind, self.position)
    }
}

/// A 16 by 16 column of blocks as reported by a world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Chunk {
    pub position: ChunkPosition,
}

impl Chunk {
    pub const fn new(x: i32, z: i32) -> Self {
        Chunk {
            position: ChunkPosition::new(x, z),
        }
    }

    pub const fn x(&self) -> i32 {
        self.position.x
    }

    pub const fn z(&self) -> i32 {
        self.position.z
    }

    /// Whether the given block lies in this chunk.
    pub const fn contains(&self, block: &BlockPosition) -> bool {
        self.position.contains(block.x, block.z)
    }
}

impl Display for Chunk {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "chunk {:?}", self.position)
    }
}
