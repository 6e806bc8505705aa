use std::{
    collections::HashMap,
    fmt::{self, Debug, Display, Formatter},
    sync::{Arc, Weak},
};

use log::*;
use parking_lot::RwLock;

use crate::world::{
    location::{Location, LocationConfig},
    Block,
    Chunk,
    WorldError,
};

/// A world that blocks and chunks can be looked up in.
///
/// Lookups are free to fail for any reason the implementation chooses (unloaded terrain, build
/// limits, borders); callers such as [`Location`] pass those errors through unchanged.
pub trait World: Send + Sync {
    /// The name this world is registered under.
    fn name(&self) -> &str;

    /// Returns the block at the given block coordinates.
    fn block_at(&self, x: i32, y: i32, z: i32) -> Result<Block, WorldError>;

    /// Returns the chunk at the given chunk coordinates.
    fn chunk_at(&self, x: i32, z: i32) -> Result<Chunk, WorldError>;
}

// Never instantiated; only used to build a dangling `Weak<dyn World>`.
enum Detached {}

impl World for Detached {
    fn name(&self) -> &str {
        match *self {}
    }

    fn block_at(&self, _x: i32, _y: i32, _z: i32) -> Result<Block, WorldError> {
        match *self {}
    }

    fn chunk_at(&self, _x: i32, _z: i32) -> Result<Chunk, WorldError> {
        match *self {}
    }
}

/// A non-owning handle to a world.
///
/// Holding a `WorldRef` never keeps a world alive. Once every strong reference to the world is
/// dropped, [`upgrade`](WorldRef::upgrade) fails with [`WorldError::Unavailable`].
#[derive(Clone)]
pub struct WorldRef {
    inner: Weak<dyn World>,
}

impl WorldRef {
    /// A handle which refers to no world at all.
    pub fn detached() -> Self {
        WorldRef {
            inner: Weak::<Detached>::new(),
        }
    }

    /// Creates a handle to a world already stored behind a trait object.
    pub fn from_dyn(world: &Arc<dyn World>) -> Self {
        WorldRef {
            inner: Arc::downgrade(world),
        }
    }

    /// Returns a strong reference to the world, or an error if it no longer exists.
    pub fn upgrade(&self) -> Result<Arc<dyn World>, WorldError> {
        self.inner.upgrade().ok_or(WorldError::Unavailable)
    }

    pub fn is_loaded(&self) -> bool {
        self.inner.strong_count() > 0
    }

    /// The name of the world, if it is still loaded.
    pub fn name(&self) -> Option<String> {
        self.inner.upgrade().map(|world| world.name().to_owned())
    }
}

impl Default for WorldRef {
    fn default() -> Self {
        WorldRef::detached()
    }
}

impl<W: World + 'static> From<&Arc<W>> for WorldRef {
    fn from(world: &Arc<W>) -> Self {
        let weak: Weak<W> = Arc::downgrade(world);
        WorldRef { inner: weak }
    }
}

impl PartialEq for WorldRef {
    fn eq(&self, other: &Self) -> bool {
        Weak::ptr_eq(&self.inner, &other.inner)
    }
}

impl Display for WorldRef {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.inner.upgrade() {
            Some(world) => f.write_str(world.name()),
            None => f.write_str("<unavailable>"),
        }
    }
}

impl Debug for WorldRef {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "WorldRef({})", self)
    }
}

/// Owns the loaded worlds, keyed by name.
///
/// Locations only ever receive [`WorldRef`]s into the store, so removing a world here unloads it
/// for everyone.
#[derive(Default)]
pub struct WorldStore {
    worlds: RwLock<HashMap<String, Arc<dyn World>>>,
}

impl WorldStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a world to the store, replacing any world with the same name, and returns a handle to it.
    pub fn insert<W: World + 'static>(&self, world: W) -> WorldRef {
        self.insert_arc(Arc::new(world))
    }

    /// Adds an already shared world to the store.
    pub fn insert_arc(&self, world: Arc<dyn World>) -> WorldRef {
        let handle = WorldRef::from_dyn(&world);
        let name = world.name().to_owned();

        if self.worlds.write().insert(name.clone(), world).is_some() {
            warn!("Replaced already loaded world \"{}\"", name);
        } else {
            debug!("Loaded world \"{}\"", name);
        }

        handle
    }

    /// Removes a world from the store. Handles to it become unavailable once the returned value (and
    /// any other strong reference) is dropped.
    pub fn remove(&self, name: &str) -> Option<Arc<dyn World>> {
        let removed = self.worlds.write().remove(name);
        if removed.is_some() {
            debug!("Unloaded world \"{}\"", name);
        }
        removed
    }

    pub fn get(&self, name: &str) -> Option<WorldRef> {
        self.worlds.read().get(name).map(WorldRef::from_dyn)
    }

    /// The names of all loaded worlds in sorted order.
    pub fn names(&self) -> Vec<String> {
        let mut names = self.worlds.read().keys().cloned().collect::<Vec<_>>();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.worlds.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.worlds.read().is_empty()
    }

    /// Builds a location from its serialized form, looking the world up by name.
    pub fn resolve(&self, config: &LocationConfig) -> Result<Location, WorldError> {
        let world = self
            .get(&config.world)
            .ok_or_else(|| WorldError::UnknownWorld(config.world.clone()))?;

        Ok(Location::with_rotation(
            world,
            config.x,
            config.y,
            config.z,
            config.pitch,
            config.yaw,
        ))
    }
}
