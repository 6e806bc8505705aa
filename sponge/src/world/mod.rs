mod block;
pub mod coords;
mod error;
pub mod flat;
pub mod location;
#[allow(clippy::module_inception)]
mod world;

pub use block::{Block, Chunk};
pub use coords::{BlockPosition, ChunkPosition};
pub use error::WorldError;
pub use flat::{FlatWorld, FlatWorldConfig, LayerConfig};
pub use location::{Location, LocationConfig};
pub use world::{World, WorldRef, WorldStore};
