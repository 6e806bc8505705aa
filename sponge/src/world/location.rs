use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};
use sponge_util::math::truncate_coord;
use static_assertions::assert_impl_all;

use crate::world::{
    coords::CHUNK_SHIFT,
    Block,
    BlockPosition,
    Chunk,
    ChunkPosition,
    WorldError,
    WorldRef,
};

/// A position and orientation in a world.
///
/// The world is held through a [`WorldRef`], so a location never keeps its world loaded. None of
/// the fields are validated: coordinates may take any value and the angles, in degrees, are not
/// normalized.
#[derive(Debug, Clone)]
pub struct Location {
    world: WorldRef,
    x: f64,
    y: f64,
    z: f64,
    pitch: f32,
    yaw: f32,
}

assert_impl_all!(Location: Send, Sync, Clone);

impl Location {
    /// Creates a location with zero pitch and yaw.
    pub fn new(world: WorldRef, x: f64, y: f64, z: f64) -> Self {
        Self::with_rotation(world, x, y, z, 0.0, 0.0)
    }

    /// Creates a location with the given pitch and zero yaw.
    pub fn with_pitch(world: WorldRef, x: f64, y: f64, z: f64, pitch: f32) -> Self {
        Self::with_rotation(world, x, y, z, pitch, 0.0)
    }

    pub fn with_rotation(world: WorldRef, x: f64, y: f64, z: f64, pitch: f32, yaw: f32) -> Self {
        Location {
            world,
            x,
            y,
            z,
            pitch,
            yaw,
        }
    }

    // Block coordinates truncate toward zero rather than flooring, so -0.5 maps to block 0.
    // TODO: decide whether negative coordinates should floor into the block they visually occupy

    #[inline]
    pub fn block_x(&self) -> i32 {
        truncate_coord(self.x)
    }

    #[inline]
    pub fn block_y(&self) -> i32 {
        truncate_coord(self.y)
    }

    #[inline]
    pub fn block_z(&self) -> i32 {
        truncate_coord(self.z)
    }

    pub fn block_position(&self) -> BlockPosition {
        BlockPosition::new(self.block_x(), self.block_y(), self.block_z())
    }

    /// The chunk coordinates, computed by shifting the block coordinates right by four bits.
    pub fn chunk_position(&self) -> ChunkPosition {
        ChunkPosition::new(
            self.block_x() >> CHUNK_SHIFT,
            self.block_z() >> CHUNK_SHIFT,
        )
    }

    /// Gets the world that this location resides in.
    pub fn world(&self) -> &WorldRef {
        &self.world
    }

    pub fn set_world(&mut self, world: WorldRef) {
        self.world = world;
    }

    /// Gets the block at this location from the world.
    ///
    /// Fails with [`WorldError::Unavailable`] if the world is gone, otherwise returns whatever the
    /// world's lookup returns.
    pub fn block(&self) -> Result<Block, WorldError> {
        self.world
            .upgrade()?
            .block_at(self.block_x(), self.block_y(), self.block_z())
    }

    /// Gets the chunk containing this location from the world.
    ///
    /// Fails with [`WorldError::Unavailable`] if the world is gone, otherwise returns whatever the
    /// world's lookup returns.
    pub fn chunk(&self) -> Result<Chunk, WorldError> {
        let ChunkPosition { x, z } = self.chunk_position();
        self.world.upgrade()?.chunk_at(x, z)
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn set_x(&mut self, x: f64) {
        self.x = x;
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn set_y(&mut self, y: f64) {
        self.y = y;
    }

    pub fn z(&self) -> f64 {
        self.z
    }

    pub fn set_z(&mut self, z: f64) {
        self.z = z;
    }

    /// The pitch in degrees.
    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    pub fn set_pitch(&mut self, pitch: f32) {
        self.pitch = pitch;
    }

    /// The yaw in degrees.
    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn set_yaw(&mut self, yaw: f32) {
        self.yaw = yaw;
    }

    /// Serializable form of this location, or `None` if its world is no longer loaded.
    pub fn to_config(&self) -> Option<LocationConfig> {
        Some(LocationConfig {
            world: self.world.name()?,
            x: self.x,
            y: self.y,
            z: self.z,
            pitch: self.pitch,
            yaw: self.yaw,
        })
    }
}

impl Display for Location {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}, {}, {}) pitch: {}, yaw: {}",
            self.world, self.x, self.y, self.z, self.pitch, self.yaw
        )
    }
}

/// A location described by world name, as found in config files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationConfig {
    pub world: String,
    pub x: f64,
    pub y: f64,
    pub z: f64,
    #[serde(default)]
    pub pitch: f32,
    #[serde(default)]
    pub yaw: f32,
}
