use std::fmt::{self, Display, Formatter};

use log::*;

use crate::{
    config::Config,
    world::{Block, Chunk, FlatWorld, Location, LocationConfig, WorldError, WorldStore},
};

/// What a world reports for a single location.
#[derive(Debug, Clone)]
pub struct ProbeReport {
    pub location: Location,
    pub block: Block,
    pub chunk: Chunk,
}

impl Display for ProbeReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}, {}", self.location, self.block, self.chunk)
    }
}

/// Creates a store holding every world named in the config.
pub fn load_worlds(config: &Config) -> Result<WorldStore, WorldError> {
    let store = WorldStore::new();
    for world in &config.worlds {
        store.insert(FlatWorld::new(world)?);
    }
    info!("Loaded {} world(s): {}", store.len(), store.names().join(", "));
    Ok(store)
}

/// Resolves a configured location and looks up its block and chunk.
pub fn probe(store: &WorldStore, config: &LocationConfig) -> Result<ProbeReport, WorldError> {
    let location = store.resolve(config)?;
    let block = location.block()?;
    let chunk = location.chunk()?;

    Ok(ProbeReport {
        location,
        block,
        chunk,
    })
}

/// Loads the configured worlds and logs a report for every probe. Failed probes are logged and
/// skipped. Returns the number of probes that succeeded.
pub fn run(config: &Config) -> Result<usize, WorldError> {
    let store = load_worlds(config)?;
    let mut succeeded = 0;

    for probe_config in &config.probes {
        match probe(&store, probe_config) {
            Ok(report) => {
                info!("{}", report);
                succeeded += 1;
            }
            Err(e) => error!(
                "Failed to probe {} ({}, {}, {}): {}",
                probe_config.world, probe_config.x, probe_config.y, probe_config.z, e
            ),
        }
    }

    Ok(succeeded)
}
