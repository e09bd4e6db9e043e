use std::collections::HashMap;

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

#[repr(transparent)]
#[derive(
    Copy,
    Clone,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Pod,
    Zeroable,
)]
pub struct BlockId(pub u8);

impl BlockId {
    pub const AIR: Self = Self(0);
    pub const GRASS: Self = Self(1);
    pub const DIRT: Self = Self(2);
    pub const STONE: Self = Self(3);
    pub const SAND: Self = Self(4);
    pub const PLANKS: Self = Self(5);
    pub const LEAVES: Self = Self(6);
    pub const LOG: Self = Self(7);
    pub const WATER: Self = Self(8);
    pub const CHEST: Self = Self(9);
    pub const IRON_ORE: Self = Self(10);
    pub const DIAMOND_ORE: Self = Self(11);
    pub const GLASS: Self = Self(12);
    pub const BRICKS: Self = Self(13);
    pub const IRON_BLOCK: Self = Self(14);
    pub const DIAMOND_BLOCK: Self = Self(15);
    pub const CACTUS: Self = Self(16);
    pub const FLOWER: Self = Self(17);
    pub const SNOW: Self = Self(18);
    pub const FURNACE: Self = Self(19);
    pub const COAL_ORE: Self = Self(20);
    pub const CONCRETE_WHITE: Self = Self(21);
    pub const CONCRETE_RED: Self = Self(22);
    pub const CONCRETE_BLUE: Self = Self(23);
    pub const GLOWSTONE: Self = Self(24);

    pub fn is_air(self) -> bool {
        self == Self::AIR
    }
}

/// Pickaxe tiers, in the order they unlock harder blocks.
pub const TIER_HAND: u8 = 0;
pub const TIER_WOOD: u8 = 1;
pub const TIER_STONE: u8 = 2;
pub const TIER_IRON: u8 = 3;

/// Which face of a cube a texture tile is drawn on.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FaceKind {
    Top,
    Bottom,
    Side,
}

/// Atlas tile indices for the three face kinds of a block.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockTiles {
    pub top: u8,
    pub side: u8,
    pub bottom: u8,
}

impl BlockTiles {
    pub const fn all(tile: u8) -> Self {
        Self {
            top: tile,
            side: tile,
            bottom: tile,
        }
    }

    pub const fn top_side_bottom(top: u8, side: u8, bottom: u8) -> Self {
        Self { top, side, bottom }
    }

    pub fn for_face(&self, face: FaceKind) -> u8 {
        match face {
            FaceKind::Top => self.top,
            FaceKind::Bottom => self.bottom,
            FaceKind::Side => self.side,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BlockProperties {
    pub name: String,
    pub tiles: BlockTiles,
    /// Minimum pickaxe tier needed to break the block in survival.
    #[serde(default)]
    pub required_tier: u8,
}

#[derive(Default, Debug, Clone)]
pub struct BlockRegistry {
    properties: Vec<BlockProperties>,
    by_name: HashMap<String, BlockId>,
}

impl BlockRegistry {
    pub fn new() -> Self {
        Self {
            properties: Vec::new(),
            by_name: HashMap::new(),
        }
    }

    /// Registers a block under the next free id. Re-registering a name
    /// returns the existing id; registering past `u8::MAX` returns `None`.
    pub fn register(&mut self, props: BlockProperties) -> Option<BlockId> {
        if let Some(existing) = self.by_name.get(props.name.as_str()) {
            return Some(*existing);
        }

        let id = BlockId(u8::try_from(self.properties.len()).ok()?);
        self.by_name.insert(props.name.clone(), id);
        self.properties.push(props);
        Some(id)
    }

    /// Properties for `id`; ids with no registration resolve to air.
    pub fn get_properties(&self, id: BlockId) -> &BlockProperties {
        self.properties
            .get(usize::from(id.0))
            .unwrap_or(&AIR_PROPERTIES)
    }

    pub fn get_by_name(&self, name: &str) -> Option<BlockId> {
        self.by_name.get(name).copied()
    }

    pub fn tile_for(&self, id: BlockId, face: FaceKind) -> u8 {
        self.get_properties(id).tiles.for_face(face)
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}

static AIR_PROPERTIES: BlockProperties = BlockProperties {
    name: String::new(),
    tiles: BlockTiles::all(0),
    required_tier: TIER_HAND,
};

pub fn register_default_blocks() -> BlockRegistry {
    fn block(name: &str, tiles: BlockTiles, required_tier: u8) -> BlockProperties {
        BlockProperties {
            name: name.to_string(),
            tiles,
            required_tier,
        }
    }

    let mut registry = BlockRegistry::new();

    // Order must match the `BlockId` constants.
    let defaults = [
        block("air", BlockTiles::all(0), TIER_HAND),
        block("grass", BlockTiles::top_side_bottom(0, 1, 2), TIER_HAND),
        block("dirt", BlockTiles::all(2), TIER_HAND),
        block("stone", BlockTiles::all(3), TIER_WOOD),
        block("sand", BlockTiles::all(4), TIER_HAND),
        block("planks", BlockTiles::all(5), TIER_HAND),
        block("leaves", BlockTiles::all(6), TIER_HAND),
        block("log", BlockTiles::top_side_bottom(8, 7, 8), TIER_HAND),
        block("water", BlockTiles::all(9), TIER_HAND),
        block("chest", BlockTiles::all(5), TIER_HAND),
        block("iron_ore", BlockTiles::all(10), TIER_STONE),
        block("diamond_ore", BlockTiles::all(11), TIER_IRON),
        block("glass", BlockTiles::all(12), TIER_HAND),
        block("bricks", BlockTiles::all(13), TIER_HAND),
        block("iron_block", BlockTiles::all(10), TIER_STONE),
        block("diamond_block", BlockTiles::all(11), TIER_IRON),
        block("cactus", BlockTiles::all(6), TIER_HAND),
        block("flower", BlockTiles::all(0), TIER_HAND),
        block("snow", BlockTiles::all(4), TIER_HAND),
        block("furnace", BlockTiles::all(3), TIER_HAND),
        block("coal_ore", BlockTiles::all(3), TIER_WOOD),
        block("concrete_white", BlockTiles::all(2), TIER_HAND),
        block("concrete_red", BlockTiles::all(13), TIER_HAND),
        block("concrete_blue", BlockTiles::all(12), TIER_HAND),
        block("glowstone", BlockTiles::all(4), TIER_HAND),
    ];

    for props in defaults {
        registry.register(props);
    }

    registry
}
