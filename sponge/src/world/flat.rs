use std::str::FromStr;

use log::*;
use serde::{Deserialize, Serialize};
use sponge_util::{math::div_floor, UnlocalizedName};

use crate::world::{coords::CHUNK_WIDTH, Block, BlockPosition, Chunk, World, WorldError};

/// Describes a superflat world.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlatWorldConfig {
    pub name: String,
    /// The lowest y coordinate of the world.
    #[serde(default = "FlatWorldConfig::default_min_y")]
    pub min_y: i32,
    /// The number of blocks between the lowest and highest y coordinate.
    #[serde(default = "FlatWorldConfig::default_height")]
    pub height: u32,
    /// Block layers from the bottom up. Everything above the last layer is air.
    #[serde(default)]
    pub layers: Vec<LayerConfig>,
    /// Distance from the origin along x and z past which lookups fail.
    #[serde(default)]
    pub border: Option<u32>,
}

impl FlatWorldConfig {
    const fn default_min_y() -> i32 {
        -64
    }

    const fn default_height() -> u32 {
        384
    }
}

impl Default for FlatWorldConfig {
    fn default() -> Self {
        FlatWorldConfig {
            name: "overworld".to_owned(),
            min_y: Self::default_min_y(),
            height: Self::default_height(),
            layers: vec![
                LayerConfig::new("minecraft:bedrock", 1),
                LayerConfig::new("minecraft:dirt", 2),
                LayerConfig::new("minecraft:grass_block", 1),
            ],
            border: None,
        }
    }
}

/// A run of identical blocks in a flat world.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerConfig {
    pub block: String,
    pub depth: u32,
}

impl LayerConfig {
    pub fn new(block: &str, depth: u32) -> Self {
        LayerConfig {
            block: block.to_owned(),
            depth,
        }
    }
}

/// A world of horizontal block layers, generated on demand.
///
/// Nothing is stored: every lookup is computed from the configured layers, so any chunk inside the
/// border is always available.
#[derive(Debug)]
pub struct FlatWorld {
    name: String,
    min_y: i32,
    // Exclusive
    max_y: i32,
    // Exclusive top of each layer, ascending
    layers: Vec<(i32, UnlocalizedName)>,
    border: Option<i32>,
}

impl FlatWorld {
    pub fn new(config: &FlatWorldConfig) -> Result<Self, WorldError> {
        let max_y = i32::try_from(config.height)
            .ok()
            .and_then(|height| config.min_y.checked_add(height))
            .ok_or_else(|| {
                WorldError::InvalidConfig(format!(
                    "height {} above y = {} overflows",
                    config.height, config.min_y
                ))
            })?;

        let border = config
            .border
            .map(|radius| {
                i32::try_from(radius).map_err(|_| {
                    WorldError::InvalidConfig(format!("border radius {} is too large", radius))
                })
            })
            .transpose()?;

        let mut layers = Vec::with_capacity(config.layers.len());
        let mut top = config.min_y;
        for layer in &config.layers {
            let kind = UnlocalizedName::from_str(&layer.block)
                .map_err(|e| WorldError::InvalidBlock(layer.block.clone(), e))?;

            // Layers past the build height can never be reached
            top = top.saturating_add(i32::try_from(layer.depth).unwrap_or(i32::MAX));
            layers.push((top.min(max_y), kind));
        }

        debug!(
            "Created flat world \"{}\" spanning y = [{}, {}) with {} layers",
            config.name,
            config.min_y,
            max_y,
            layers.len()
        );

        Ok(FlatWorld {
            name: config.name.clone(),
            min_y: config.min_y,
            max_y,
            layers,
            border,
        })
    }

    pub fn min_y(&self) -> i32 {
        self.min_y
    }

    pub fn max_y(&self) -> i32 {
        self.max_y
    }

    pub fn border(&self) -> Option<i32> {
        self.border
    }

    fn kind_at(&self, y: i32) -> UnlocalizedName {
        self.layers
            .iter()
            .find(|(top, _)| y < *top)
            .map(|(_, kind)| kind.clone())
            .unwrap_or_else(|| UnlocalizedName::minecraft("air"))
    }
}

impl World for FlatWorld {
    fn name(&self) -> &str {
        &self.name
    }

    fn block_at(&self, x: i32, y: i32, z: i32) -> Result<Block, WorldError> {
        if let Some(radius) = self.border {
            if x.unsigned_abs() > radius as u32 || z.unsigned_abs() > radius as u32 {
                return Err(WorldError::OutsideBorder { x, z, radius });
            }
        }

        if y < self.min_y || y >= self.max_y {
            return Err(WorldError::OutOfBounds {
                y,
                min: self.min_y,
                max: self.max_y,
            });
        }

        let block = Block::new(BlockPosition::new(x, y, z), self.kind_at(y));
        trace!("{}: {}", self.name, block);
        Ok(block)
    }

    fn chunk_at(&self, x: i32, z: i32) -> Result<Chunk, WorldError> {
        if let Some(radius) = self.border {
            let lowest = div_floor(-radius, CHUNK_WIDTH);
            let highest = div_floor(radius, CHUNK_WIDTH);
            if x < lowest || x > highest || z < lowest || z > highest {
                return Err(WorldError::ChunkOutsideBorder { x, z, radius });
            }
        }

        trace!("{}: chunk ({}, {})", self.name, x, z);
        Ok(Chunk::new(x, z))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn overworld() -> FlatWorld {
        FlatWorld::new(&FlatWorldConfig::default()).unwrap()
    }

    #[test]
    fn layers_from_bottom_up() {
        let world = overworld();
        assert_eq!(world.min_y(), -64);
        assert_eq!(world.max_y(), 320);

        let kind = |y| world.block_at(0, y, 0).unwrap().kind.to_string();
        assert_eq!(kind(-64), "minecraft:bedrock");
        assert_eq!(kind(-63), "minecraft:dirt");
        assert_eq!(kind(-62), "minecraft:dirt");
        assert_eq!(kind(-61), "minecraft:grass_block");
        assert_eq!(kind(-60), "minecraft:air");
        assert_eq!(kind(319), "minecraft:air");
    }

    #[test]
    fn build_height_is_enforced() {
        let world = overworld();
        assert_eq!(
            world.block_at(0, -65, 0).unwrap_err(),
            WorldError::OutOfBounds {
                y: -65,
                min: -64,
                max: 320
            }
        );
        assert!(matches!(
            world.block_at(0, 320, 0),
            Err(WorldError::OutOfBounds { y: 320, .. })
        ));
    }

    #[test]
    fn border_limits_blocks_and_chunks() {
        let world = FlatWorld::new(&FlatWorldConfig {
            border: Some(20),
            ..FlatWorldConfig::default()
        })
        .unwrap();

        assert!(world.block_at(20, 0, -20).is_ok());
        assert_eq!(
            world.block_at(-21, 0, 0).unwrap_err(),
            WorldError::OutsideBorder {
                x: -21,
                z: 0,
                radius: 20
            }
        );
        assert!(world.block_at(i32::MIN, 0, 0).is_err());

        // Blocks -20 ..= 20 span chunks -2 ..= 1
        assert!(world.chunk_at(-2, 1).is_ok());
        assert!(world.chunk_at(1, -2).is_ok());
        assert_eq!(
            world.chunk_at(2, 0).unwrap_err(),
            WorldError::ChunkOutsideBorder {
                x: 2,
                z: 0,
                radius: 20
            }
        );
        assert!(world.chunk_at(0, -3).is_err());
    }

    #[test]
    fn unbounded_chunks() {
        let world = overworld();
        assert_eq!(world.chunk_at(i32::MIN, i32::MAX).unwrap(), Chunk::new(i32::MIN, i32::MAX));
    }

    #[test]
    fn invalid_configs_are_rejected() {
        let bad_block = FlatWorldConfig {
            layers: vec![LayerConfig::new("minecraft:", 1)],
            ..FlatWorldConfig::default()
        };
        assert!(matches!(
            FlatWorld::new(&bad_block),
            Err(WorldError::InvalidBlock(id, _)) if id == "minecraft:"
        ));

        let too_tall = FlatWorldConfig {
            min_y: 0,
            height: u32::MAX,
            ..FlatWorldConfig::default()
        };
        assert!(matches!(FlatWorld::new(&too_tall), Err(WorldError::InvalidConfig(_))));

        let huge_border = FlatWorldConfig {
            border: Some(u32::MAX),
            ..FlatWorldConfig::default()
        };
        assert!(matches!(FlatWorld::new(&huge_border), Err(WorldError::InvalidConfig(_))));
    }

    #[test]
    fn deep_layers_are_clamped() {
        let world = FlatWorld::new(&FlatWorldConfig {
            min_y: 0,
            height: 16,
            layers: vec![LayerConfig::new("stone", u32::MAX), LayerConfig::new("dirt", 4)],
            border: None,
            name: "deep".to_owned(),
        })
        .unwrap();

        assert_eq!(world.block_at(0, 15, 0).unwrap().kind, UnlocalizedName::minecraft("stone"));
    }
}
