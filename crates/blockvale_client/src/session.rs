use std::collections::VecDeque;

use blockvale_shared::{
    block::{BlockId, BlockRegistry},
    coords::{chunk_containing, ChunkPos},
    world::World,
};
use glam::{IVec3, Vec3};
use tracing::{debug, info, warn};

use crate::chest::{loot_nearby_chest, LootStack};
use crate::chunk_manager::ChunkManager;
use crate::edit::{break_block, place_block, GameMode};
use crate::game_loop::Frame;
use crate::renderer::backend::HeadlessBackend;
use crate::settings::ClientSettings;

const SPAWN_HEIGHT_OFFSET: f32 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditCommand {
    Break(IVec3),
    Place(IVec3, BlockId),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChunkPassStats {
    pub rendered_chunks: u32,
    pub rendered_quads: u64,
    pub rendered_indices: u64,
    pub rendered_vertices: u64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionReport {
    pub frames: u64,
    pub loaded_chunks: usize,
    pub meshed_chunks: usize,
    pub mesh_uploads: u64,
    pub mesh_disposals: u64,
    pub live_buffer_bytes: u64,
    pub edits_applied: u32,
    pub edits_rejected: u32,
    pub loot: Vec<LootStack>,
    pub drops: Vec<LootStack>,
    pub viewer: Vec3,
}

/// A headless play session: a viewer walking through the world, with block
/// edits applied one per frame and chests looted on contact. Survival drops
/// from broken blocks are collected separately from chest loot.
pub struct Session {
    world: World,
    manager: ChunkManager<HeadlessBackend>,
    viewer: Vec3,
    step: Vec3,
    game_mode: GameMode,
    tool_tier: u8,
    edits: VecDeque<EditCommand>,
    frames: u64,
    edits_applied: u32,
    edits_rejected: u32,
    loot: Vec<LootStack>,
    drops: Vec<LootStack>,
    last_pass: ChunkPassStats,
}

impl Session {
    pub fn from_settings(settings: &ClientSettings, seed: u64, registry: BlockRegistry) -> Self {
        let world = World::new(settings.world, seed);
        let manager = ChunkManager::new(
            HeadlessBackend::new(),
            registry,
            settings.view_distance,
        );
        let step = Vec3::X * settings.viewer_speed / settings.tick_rate.max(1) as f32;
        Self::new(world, manager, step, settings.game_mode, settings.tool_tier)
    }

    /// Places the viewer just above the surface at the world origin.
    pub fn new(
        world: World,
        manager: ChunkManager<HeadlessBackend>,
        step: Vec3,
        game_mode: GameMode,
        tool_tier: u8,
    ) -> Self {
        let surface = world.generator().sample_column(0, 0).height;
        let viewer = Vec3::new(0.5, surface as f32 + SPAWN_HEIGHT_OFFSET, 0.5);
        info!("Spawning viewer at {viewer} (seed {})", world.seed());

        Self {
            world,
            manager,
            viewer,
            step,
            game_mode,
            tool_tier,
            edits: VecDeque::new(),
            frames: 0,
            edits_applied: 0,
            edits_rejected: 0,
            loot: Vec::new(),
            drops: Vec::new(),
            last_pass: ChunkPassStats::default(),
        }
    }

    pub fn queue_edit(&mut self, edit: EditCommand) {
        self.edits.push_back(edit);
    }

    pub fn viewer(&self) -> Vec3 {
        self.viewer
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn manager(&self) -> &ChunkManager<HeadlessBackend> {
        &self.manager
    }

    pub fn last_pass(&self) -> ChunkPassStats {
        self.last_pass
    }

    pub fn report(&self) -> SessionReport {
        let stats = self.manager.backend().stats();
        SessionReport {
            frames: self.frames,
            loaded_chunks: self.world.loaded_chunk_count(),
            meshed_chunks: self.manager.meshed_count(),
            mesh_uploads: stats.uploads,
            mesh_disposals: stats.disposals,
            live_buffer_bytes: self.manager.backend().live_buffer_bytes(),
            edits_applied: self.edits_applied,
            edits_rejected: self.edits_rejected,
            loot: self.loot.clone(),
            drops: self.drops.clone(),
            viewer: self.viewer,
        }
    }

    fn apply_next_edit(&mut self) {
        let Some(edit) = self.edits.pop_front() else {
            return;
        };

        let result = match edit {
            EditCommand::Break(pos) => break_block(
                &mut self.world,
                &mut self.manager,
                pos,
                self.game_mode,
                self.tool_tier,
            )
            .map(|broken| {
                if let Some(drop) = broken.drop {
                    debug!("Picked up {drop:?} from block {}", broken.block.0);
                    self.drops.push(drop);
                }
            }),
            EditCommand::Place(pos, block) => {
                place_block(&mut self.world, &mut self.manager, pos, block).map(|_| ())
            }
        };

        match result {
            Ok(()) => self.edits_applied += 1,
            Err(err) => {
                warn!("Edit {edit:?} rejected: {err}");
                self.edits_rejected += 1;
            }
        }
    }
}

impl Frame for Session {
    fn update(&mut self) {
        self.viewer += self.step;
        let built = self
            .manager
            .update(&mut self.world, self.viewer.x, self.viewer.z);
        if built > 0 {
            debug!("Frame {}: meshed {built} new chunks", self.frames);
        }

        self.apply_next_edit();

        if let Some(loot) =
            loot_nearby_chest(&mut self.world, &mut self.manager, self.viewer, self.game_mode)
        {
            self.loot.extend(loot.items);
        }
    }

    fn render(&mut self) {
        let center = chunk_containing(self.viewer.x, self.viewer.z);
        let view_distance = self.manager.view_distance();

        let mut pass = ChunkPassStats::default();
        for dx in -view_distance..=view_distance {
            for dz in -view_distance..=view_distance {
                let pos = center + ChunkPos::new(dx, dz);
                let Some(mesh) = self.manager.mesh(pos) else {
                    continue;
                };
                if mesh.is_empty() {
                    continue;
                }
                pass.rendered_chunks += 1;
                pass.rendered_quads += mesh.quad_count() as u64;
                pass.rendered_indices += mesh.indices.len() as u64;
                pass.rendered_vertices += mesh.vertices.len() as u64;
            }
        }

        self.last_pass = pass;
        self.frames += 1;
    }
}
