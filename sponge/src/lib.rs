#![deny(rust_2018_idioms)]

//! Locations in named voxel worlds, the world lookups they delegate to, and a launcher that reports
//! what configured locations resolve to.

pub use sponge_util as util;

/// Loads the launcher config.
pub mod config;
/// Resolves configured locations against loaded worlds.
pub mod probe;
/// Contains locations, the world lookup contract and a generated flat world.
pub mod world;

pub use probe::run;
