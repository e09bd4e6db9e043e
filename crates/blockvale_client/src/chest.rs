use blockvale_shared::{block::BlockId, world::World};
use glam::{IVec3, Vec3};
use tracing::info;

use crate::chunk_manager::ChunkManager;
use crate::edit::GameMode;
use crate::renderer::backend::MeshBackend;

const LOOT_RADIUS: i32 = 2;
const LOOT_BELOW: i32 = 1;
const LOOT_ABOVE: i32 = 2;

/// Items picked up from chests or dropped by broken blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LootItem {
    Dirt,
    Planks,
    Food,
    Log,
    Stick,
    Stone,
    Iron,
    Diamond,
    Sand,
    Glass,
    Bricks,
    Flower,
    Furnace,
    Coal,
    ConcreteWhite,
    ConcreteRed,
    ConcreteBlue,
    Glowstone,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LootStack {
    pub item: LootItem,
    pub count: u32,
}

pub const VILLAGE_CHEST_LOOT: [LootStack; 4] = [
    LootStack {
        item: LootItem::Planks,
        count: 8,
    },
    LootStack {
        item: LootItem::Log,
        count: 4,
    },
    LootStack {
        item: LootItem::Food,
        count: 3,
    },
    LootStack {
        item: LootItem::Stick,
        count: 4,
    },
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChestLoot {
    pub chest_pos: IVec3,
    pub items: Vec<LootStack>,
}

/// Opens the first chest near the viewer, in survival only. The chest is
/// consumed: it turns into air and its chunk is re-meshed.
pub fn loot_nearby_chest<B: MeshBackend>(
    world: &mut World,
    manager: &mut ChunkManager<B>,
    viewer_pos: Vec3,
    mode: GameMode,
) -> Option<ChestLoot> {
    if mode != GameMode::Survival {
        return None;
    }

    let center = viewer_pos.floor().as_ivec3();
    let chest_pos = find_chest(world, center)?;

    world.set_block(chest_pos, BlockId::AIR);
    manager.rebuild_chunk_at_world(world, chest_pos.x, chest_pos.z);
    info!("Looted a village chest at {chest_pos}");

    Some(ChestLoot {
        chest_pos,
        items: VILLAGE_CHEST_LOOT.to_vec(),
    })
}

fn find_chest(world: &mut World, center: IVec3) -> Option<IVec3> {
    for dx in -LOOT_RADIUS..=LOOT_RADIUS {
        for dy in -LOOT_BELOW..=LOOT_ABOVE {
            for dz in -LOOT_RADIUS..=LOOT_RADIUS {
                let pos = center.wrapping_add(IVec3::new(dx, dy, dz));
                if world.get_block(pos) == BlockId::CHEST {
                    return Some(pos);
                }
            }
        }
    }
    None
}
