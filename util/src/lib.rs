#![warn(missing_docs)]

//! Provides generic utilities for sponge: logging setup, namespaced identifiers and coordinate math.

/// Configures log4rs with a colored console and compressed, rolling log files.
pub mod logging;
/// Integer conversions used when mapping real coordinates onto the block grid.
pub mod math;
mod uln;

pub use uln::{ParseUlnError, UnlocalizedName, DEFAULT_NAMESPACE};
