use sponge_util::ParseUlnError;
use std::{
    error::Error,
    fmt::{self, Display, Formatter},
};

/// Errors produced by world lookups and world construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorldError {
    /// The referenced world was never set or has since been unloaded.
    Unavailable,
    /// No world with the given name is loaded.
    UnknownWorld(String),
    /// The y coordinate lies outside the world's build height. `max` is exclusive.
    OutOfBounds { y: i32, min: i32, max: i32 },
    /// The block column lies outside the world border.
    OutsideBorder { x: i32, z: i32, radius: i32 },
    /// The chunk lies entirely outside the world border.
    ChunkOutsideBorder { x: i32, z: i32, radius: i32 },
    /// A block id could not be parsed.
    InvalidBlock(String, ParseUlnError),
    /// A world definition is inconsistent.
    InvalidConfig(String),
}

impl Display for WorldError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            WorldError::Unavailable => write!(f, "World is not available"),
            WorldError::UnknownWorld(name) => write!(f, "Unknown world \"{}\"", name),
            WorldError::OutOfBounds { y, min, max } =>
                write!(f, "y = {} is outside the build height [{}, {})", y, min, max),
            WorldError::OutsideBorder { x, z, radius } => write!(
                f,
                "Block column ({}, {}) is outside the world border (radius {})",
                x, z, radius
            ),
            WorldError::ChunkOutsideBorder { x, z, radius } => write!(
                f,
                "Chunk ({}, {}) is outside the world border (radius {})",
                x, z, radius
            ),
            WorldError::InvalidBlock(id, error) => write!(f, "Invalid block \"{}\": {}", id, error),
            WorldError::InvalidConfig(msg) => write!(f, "Invalid world config: {}", msg),
        }
    }
}

impl Error for WorldError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            WorldError::InvalidBlock(_, error) => Some(error),
            _ => None,
        }
    }
}
