// Checks that locations hand the exact integer coordinates to their world and pass the world's
// answers, including errors, back untouched.

use parking_lot::Mutex;
use sponge::world::{
    Block,
    BlockPosition,
    Chunk,
    FlatWorld,
    FlatWorldConfig,
    Location,
    World,
    WorldError,
    WorldRef,
    WorldStore,
};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lookup {
    Block(i32, i32, i32),
    Chunk(i32, i32),
}

#[derive(Default)]
struct RecordingWorld {
    calls: Mutex<Vec<Lookup>>,
    fail_with: Option<WorldError>,
}

impl RecordingWorld {
    fn failing(error: WorldError) -> Self {
        RecordingWorld {
            calls: Mutex::new(Vec::new()),
            fail_with: Some(error),
        }
    }

    fn calls(&self) -> Vec<Lookup> {
        self.calls.lock().clone()
    }
}

impl World for RecordingWorld {
    fn name(&self) -> &str {
        "recording"
    }

    fn block_at(&self, x: i32, y: i32, z: i32) -> Result<Block, WorldError> {
        self.calls.lock().push(Lookup::Block(x, y, z));
        match &self.fail_with {
            Some(error) => Err(error.clone()),
            None => Ok(Block::air(BlockPosition::new(x, y, z))),
        }
    }

    fn chunk_at(&self, x: i32, z: i32) -> Result<Chunk, WorldError> {
        self.calls.lock().push(Lookup::Chunk(x, z));
        match &self.fail_with {
            Some(error) => Err(error.clone()),
            None => Ok(Chunk::new(x, z)),
        }
    }
}

#[test]
fn block_lookup_uses_truncated_coordinates() {
    let world = Arc::new(RecordingWorld::default());
    let location = Location::new(WorldRef::from(&world), 3.9, -3.9, -0.5);

    let block = location.block().unwrap();
    assert_eq!(block.position, BlockPosition::new(3, -3, 0));
    assert_eq!(world.calls(), vec![Lookup::Block(3, -3, 0)]);
}

#[test]
fn chunk_lookup_shifts_block_coordinates() {
    let world = Arc::new(RecordingWorld::default());
    let handle = WorldRef::from(&world);

    let cases = [
        ((0.0, 0.0), (0, 0)),
        ((15.99, 16.0), (0, 1)),
        ((255.5, -255.5), (15, -16)),
        ((-1.0, -16.0), (-1, -1)),
        ((-16.5, -17.0), (-1, -2)),
        // Truncation happens before the shift
        ((-0.99, -15.99), (0, -1)),
    ];

    for &((x, z), (chunk_x, chunk_z)) in &cases {
        let location = Location::new(handle.clone(), x, 64.0, z);
        let chunk = location.chunk().unwrap();
        assert_eq!((chunk.x(), chunk.z()), (chunk_x, chunk_z), "Wrong chunk for ({}, {})", x, z);
        assert!(chunk.contains(&location.block_position()));
    }

    let expected = cases
        .iter()
        .map(|&(_, (x, z))| Lookup::Chunk(x, z))
        .collect::<Vec<_>>();
    assert_eq!(world.calls(), expected);
}

#[test]
fn world_errors_pass_through() {
    let error = WorldError::OutOfBounds {
        y: 7,
        min: 0,
        max: 4,
    };
    let world = Arc::new(RecordingWorld::failing(error.clone()));
    let location = Location::new(WorldRef::from(&world), 1.0, 7.0, 1.0);

    assert_eq!(location.block().unwrap_err(), error);
    assert_eq!(location.chunk().unwrap_err(), error);
    assert_eq!(world.calls(), vec![Lookup::Block(1, 7, 1), Lookup::Chunk(0, 0)]);
}

#[test]
fn location_outlives_world() {
    let world = Arc::new(RecordingWorld::default());
    let location = Location::new(WorldRef::from(&world), 1.0, 2.0, 3.0);
    assert!(location.block().is_ok());

    drop(world);
    assert_eq!(location.block().unwrap_err(), WorldError::Unavailable);
    assert_eq!(location.chunk().unwrap_err(), WorldError::Unavailable);
    assert_eq!(location.x(), 1.0, "Location state should survive its world.");
}

#[test]
fn set_world_redirects_lookups() {
    let first = Arc::new(RecordingWorld::default());
    let second = Arc::new(RecordingWorld::default());

    let mut location = Location::with_pitch(WorldRef::from(&first), 5.5, 6.5, 7.5, 45.0);
    location.set_world(WorldRef::from(&second));
    location.block().unwrap();

    assert!(first.calls().is_empty());
    assert_eq!(second.calls(), vec![Lookup::Block(5, 6, 7)]);
    assert_eq!((location.x(), location.y(), location.z()), (5.5, 6.5, 7.5));
    assert_eq!((location.pitch(), location.yaw()), (45.0, 0.0));
}

#[test]
fn clones_share_world_but_not_fields() {
    let world = Arc::new(RecordingWorld::default());
    let original = Location::new(WorldRef::from(&world), 1.0, 2.0, 3.0);
    let mut copy = original.clone();
    copy.set_x(100.0);

    assert_eq!(original.x(), 1.0);
    assert_eq!(copy.world(), original.world());
    assert_eq!(Arc::strong_count(&world), 1);
}

#[test]
fn unloading_from_store_invalidates_locations() {
    let store = WorldStore::new();
    let overworld = store.insert(FlatWorld::new(&FlatWorldConfig::default()).unwrap());
    let location = Location::with_rotation(overworld, -0.5, -64.0, 0.5, -90.0, 180.0);

    assert_eq!(location.block().unwrap().kind.identifier, "bedrock");
    assert_eq!(location.to_string(), "overworld (-0.5, -64, 0.5) pitch: -90, yaw: 180");

    let saved = location.to_config().unwrap();
    assert_eq!(saved.world, "overworld");
    assert_eq!((saved.pitch, saved.yaw), (-90.0, 180.0));

    drop(store.remove("overworld"));
    assert_eq!(location.block().unwrap_err(), WorldError::Unavailable);
    assert!(location.to_config().is_none());

    // Reloading under the same name does not revive old handles, but resolving does
    store.insert(FlatWorld::new(&FlatWorldConfig::default()).unwrap());
    assert!(location.block().is_err());
    let restored = store.resolve(&saved).unwrap();
    assert_eq!(restored.block_position(), location.block_position());
    assert!(restored.block().is_ok());
}
