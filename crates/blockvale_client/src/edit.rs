use std::fmt;

use blockvale_shared::{block::BlockId, world::World};
use glam::IVec3;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::chest::{LootItem, LootStack};
use crate::chunk_manager::ChunkManager;
use crate::renderer::backend::MeshBackend;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameMode {
    #[default]
    Survival,
    Creative,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditError {
    /// Nothing to break at the target.
    NothingThere { pos: IVec3 },
    /// The held tool is below the block's mining tier.
    TooHard {
        block: BlockId,
        required_tier: u8,
        tool_tier: u8,
    },
    NotPlaceable { block: BlockId },
}

impl fmt::Display for EditError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NothingThere { pos } => write!(f, "no block to break at {pos}"),
            Self::TooHard {
                block,
                required_tier,
                tool_tier,
            } => write!(
                f,
                "block {} needs tool tier {required_tier}, holding tier {tool_tier}",
                block.0
            ),
            Self::NotPlaceable { block } => write!(f, "block {} cannot be placed", block.0),
        }
    }
}

impl std::error::Error for EditError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BrokenBlock {
    pub block: BlockId,
    /// What the player picks up. Always `None` in creative.
    pub drop: Option<LootStack>,
}

/// Survival pickup for a broken block. Grass, leaves, water, cacti, snow and
/// chests drop nothing; compressed blocks give back all nine ingots or gems.
pub fn drop_for_block(block: BlockId) -> Option<LootStack> {
    let (item, count) = match block {
        BlockId::DIRT => (LootItem::Dirt, 1),
        BlockId::SAND => (LootItem::Sand, 1),
        BlockId::LOG => (LootItem::Log, 1),
        BlockId::PLANKS => (LootItem::Planks, 1),
        BlockId::STONE => (LootItem::Stone, 1),
        BlockId::GLASS => (LootItem::Glass, 1),
        BlockId::BRICKS => (LootItem::Bricks, 1),
        BlockId::IRON_ORE => (LootItem::Iron, 1),
        BlockId::DIAMOND_ORE => (LootItem::Diamond, 1),
        BlockId::COAL_ORE => (LootItem::Coal, 1),
        BlockId::IRON_BLOCK => (LootItem::Iron, 9),
        BlockId::DIAMOND_BLOCK => (LootItem::Diamond, 9),
        BlockId::FURNACE => (LootItem::Furnace, 1),
        BlockId::FLOWER => (LootItem::Flower, 1),
        BlockId::CONCRETE_WHITE => (LootItem::ConcreteWhite, 1),
        BlockId::CONCRETE_RED => (LootItem::ConcreteRed, 1),
        BlockId::CONCRETE_BLUE => (LootItem::ConcreteBlue, 1),
        BlockId::GLOWSTONE => (LootItem::Glowstone, 1),
        _ => return None,
    };
    Some(LootStack { item, count })
}

/// Breaks the block at `pos` and re-meshes its chunk. Survival mode checks the
/// tool tier against the block's mining tier and yields the block's drop;
/// creative always succeeds and drops nothing.
pub fn break_block<B: MeshBackend>(
    world: &mut World,
    manager: &mut ChunkManager<B>,
    pos: IVec3,
    mode: GameMode,
    tool_tier: u8,
) -> Result<BrokenBlock, EditError> {
    let block = world.get_block(pos);
    if block.is_air() {
        return Err(EditError::NothingThere { pos });
    }

    if mode == GameMode::Survival {
        let required_tier = manager.registry().get_properties(block).required_tier;
        if tool_tier < required_tier {
            return Err(EditError::TooHard {
                block,
                required_tier,
                tool_tier,
            });
        }
    }

    world.set_block(pos, BlockId::AIR);
    manager.rebuild_chunk_at_world(world, pos.x, pos.z);
    info!("Broke block {} at {pos}", block.0);

    let drop = match mode {
        GameMode::Survival => drop_for_block(block),
        GameMode::Creative => None,
    };
    Ok(BrokenBlock { block, drop })
}

/// Places `block` at `pos`, overwriting whatever is there, and re-meshes.
pub fn place_block<B: MeshBackend>(
    world: &mut World,
    manager: &mut ChunkManager<B>,
    pos: IVec3,
    block: BlockId,
) -> Result<BlockId, EditError> {
    if block.is_air() {
        return Err(EditError::NotPlaceable { block });
    }

    let previous = world.set_block(pos, block);
    manager.rebuild_chunk_at_world(world, pos.x, pos.z);
    info!("Placed block {} at {pos}", block.0);
    Ok(previous)
}

#[cfg(test)]
mod tests {
    use blockvale_shared::{
        block::{register_default_blocks, BlockId, TIER_HAND, TIER_IRON, TIER_STONE, TIER_WOOD},
        config::WorldConfig,
        world::World,
        worldgen::WorldGenerator,
    };
    use glam::IVec3;
    use noise::Constant;

    use super::{break_block, drop_for_block, place_block, BrokenBlock, EditError, GameMode};
    use crate::chest::{LootItem, LootStack};
    use crate::chunk_manager::{ChunkManager, DEFAULT_VIEW_DISTANCE};
    use crate::renderer::backend::HeadlessBackend;

    fn setup() -> (World, ChunkManager<HeadlessBackend>) {
        let world = World::with_generator(WorldGenerator::with_noise(
            5,
            WorldConfig::default(),
            Box::new(Constant::new(0.0)),
            Box::new(Constant::new(0.5)),
        ));
        let manager = ChunkManager::new(
            HeadlessBackend::new(),
            register_default_blocks(),
            DEFAULT_VIEW_DISTANCE,
        );
        (world, manager)
    }

    #[test]
    fn survival_needs_the_right_tool_tier() {
        let (mut world, mut manager) = setup();
        let pos = IVec3::new(4, 20, 4);
        world.set_block(pos, BlockId::IRON_ORE);

        let err = break_block(&mut world, &mut manager, pos, GameMode::Survival, TIER_WOOD)
            .expect_err("wood cannot mine iron");
        assert_eq!(
            err,
            EditError::TooHard {
                block: BlockId::IRON_ORE,
                required_tier: TIER_STONE,
                tool_tier: TIER_WOOD,
            }
        );
        assert_eq!(world.get_block(pos), BlockId::IRON_ORE);
        assert_eq!(manager.backend().stats().uploads, 0);

        let broken = break_block(&mut world, &mut manager, pos, GameMode::Survival, TIER_STONE)
            .expect("stone pickaxe mines iron");
        assert_eq!(broken.block, BlockId::IRON_ORE);
        assert_eq!(
            broken.drop,
            Some(LootStack {
                item: LootItem::Iron,
                count: 1
            })
        );
        assert_eq!(world.get_block(pos), BlockId::AIR);
    }

    #[test]
    fn soft_blocks_break_by_hand_and_diamond_needs_iron() {
        let (mut world, mut manager) = setup();

        let grass = IVec3::new(1, 8, 1);
        assert_eq!(
            break_block(&mut world, &mut manager, grass, GameMode::Survival, TIER_HAND),
            Ok(BrokenBlock {
                block: BlockId::GRASS,
                drop: None
            })
        );

        let diamond = IVec3::new(2, 3, 2);
        world.set_block(diamond, BlockId::DIAMOND_BLOCK);
        assert!(
            break_block(&mut world, &mut manager, diamond, GameMode::Survival, TIER_STONE).is_err()
        );
        let broken = break_block(&mut world, &mut manager, diamond, GameMode::Survival, TIER_IRON)
            .expect("iron pickaxe mines diamond blocks");
        assert_eq!(broken.block, BlockId::DIAMOND_BLOCK);
        assert_eq!(
            broken.drop,
            Some(LootStack {
                item: LootItem::Diamond,
                count: 9
            })
        );
    }

    #[test]
    fn creative_ignores_tiers() {
        let (mut world, mut manager) = setup();
        let pos = IVec3::new(-3, 2, -3);
        world.set_block(pos, BlockId::DIAMOND_ORE);

        assert_eq!(
            break_block(&mut world, &mut manager, pos, GameMode::Creative, TIER_HAND),
            Ok(BrokenBlock {
                block: BlockId::DIAMOND_ORE,
                drop: None
            })
        );
    }

    #[test]
    fn survival_drops_follow_the_block_table() {
        let iron = LootStack {
            item: LootItem::Iron,
            count: 9,
        };
        assert_eq!(drop_for_block(BlockId::IRON_BLOCK), Some(iron));
        assert_eq!(
            drop_for_block(BlockId::COAL_ORE),
            Some(LootStack {
                item: LootItem::Coal,
                count: 1
            })
        );
        assert_eq!(
            drop_for_block(BlockId::GLOWSTONE).map(|stack| stack.item),
            Some(LootItem::Glowstone)
        );
        for nothing in [
            BlockId::GRASS,
            BlockId::LEAVES,
            BlockId::WATER,
            BlockId::CHEST,
            BlockId::CACTUS,
            BlockId::SNOW,
        ] {
            assert_eq!(drop_for_block(nothing), None, "block {}", nothing.0);
        }

        let (mut world, mut manager) = setup();
        let pos = IVec3::new(6, 20, 6);
        world.set_block(pos, BlockId::IRON_BLOCK);
        let broken = break_block(&mut world, &mut manager, pos, GameMode::Survival, TIER_STONE)
            .expect("stone pickaxe mines iron blocks");
        assert_eq!(broken.drop, Some(iron));
    }

    #[test]
    fn breaking_air_is_an_error() {
        let (mut world, mut manager) = setup();
        let pos = IVec3::new(0, 40, 0);
        assert_eq!(
            break_block(&mut world, &mut manager, pos, GameMode::Creative, TIER_HAND),
            Err(EditError::NothingThere { pos })
        );
    }

    #[test]
    fn each_successful_edit_rebuilds_the_chunk() {
        let (mut world, mut manager) = setup();
        manager.update(&mut world, 0.0, 0.0);
        let uploads = manager.backend().stats().uploads;

        let pos = IVec3::new(5, 9, 5);
        place_block(&mut world, &mut manager, pos, BlockId::BRICKS).expect("place bricks");
        break_block(&mut world, &mut manager, pos, GameMode::Survival, TIER_HAND)
            .expect("bricks break by hand");

        let stats = manager.backend().stats();
        assert_eq!(stats.uploads, uploads + 2);
        assert_eq!(stats.disposals, 2);
    }

    #[test]
    fn placing_air_is_rejected() {
        let (mut world, mut manager) = setup();
        let pos = IVec3::new(0, 8, 0);

        assert_eq!(
            place_block(&mut world, &mut manager, pos, BlockId::AIR),
            Err(EditError::NotPlaceable {
                block: BlockId::AIR
            })
        );
        assert_eq!(world.get_block(pos), BlockId::GRASS);
        assert_eq!(manager.meshed_count(), 0);
    }

    #[test]
    fn place_returns_what_was_replaced() {
        let (mut world, mut manager) = setup();
        assert_eq!(
            place_block(&mut world, &mut manager, IVec3::new(0, 8, 0), BlockId::GLASS),
            Ok(BlockId::GRASS)
        );
        assert_eq!(manager.meshed_count(), 1);
    }
}
